use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::employees::{parse_schedule_days, Employee};
use crate::utils::date::serializer;

// EmployeeDto is a data transfer object for Employee service; the password is accepted
// on input but never written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub employee_id: i64,
    pub version: i64,
    pub name: String,
    pub position: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub is_admin: bool,
    #[serde(with = "serializer")]
    pub work_date: NaiveDateTime,
    pub schedule_days: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl EmployeeDto {
    pub fn new(name: &str, position: &str, username: &str, password: &str, is_admin: bool) -> Self {
        Self {
            employee_id: 0,
            version: 0,
            name: name.to_string(),
            position: position.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            is_admin,
            work_date: Utc::now().naive_utc(),
            schedule_days: "".to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn with_schedule(mut self, schedule_days: &str) -> Self {
        self.schedule_days = schedule_days.to_string();
        self
    }
}

impl Identifiable for EmployeeDto {
    fn id(&self) -> i64 {
        self.employee_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Employee for EmployeeDto {
    fn is_admin(&self) -> bool {
        self.is_admin
    }

    fn works_on(&self, day: u32) -> bool {
        parse_schedule_days(self.schedule_days.as_str()).contains(&day)
    }
}

#[cfg(test)]
mod tests {
    use crate::employees::dto::EmployeeDto;

    #[tokio::test]
    async fn test_should_hide_password() {
        let employee = EmployeeDto::new("Nhân viên 1", "Thủ thư", "staff", "staff123", false);
        let json = serde_json::to_string(&employee).expect("should serialize");
        assert!(!json.contains("staff123"));
        assert!(json.contains("\"username\":\"staff\""));
    }
}
