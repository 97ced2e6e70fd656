use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::employees::{parse_schedule_days, Employee};
use crate::utils::date::serializer;

// EmployeeEntity is a librarian or administrator who records loans.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct EmployeeEntity {
    pub employee_id: i64,
    pub version: i64,
    pub name: String,
    pub position: String,
    pub username: String,
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

impl EmployeeEntity {
    pub fn new(employee_id: i64, name: &str, position: &str, username: &str, password: &str, is_admin: bool) -> Self {
        Self {
            employee_id,
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
}

impl Identifiable for EmployeeEntity {
    fn id(&self) -> i64 {
        self.employee_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Employee for EmployeeEntity {
    fn is_admin(&self) -> bool {
        self.is_admin
    }

    fn works_on(&self, day: u32) -> bool {
        parse_schedule_days(self.schedule_days.as_str()).contains(&day)
    }
}

#[cfg(test)]
mod tests {
    use crate::employees::domain::model::EmployeeEntity;
    use crate::employees::Employee;

    #[tokio::test]
    async fn test_should_build_employee() {
        let mut employee = EmployeeEntity::new(1, "Admin Thư Viện", "Quản trị viên", "admin", "admin123", true);
        assert_eq!("admin", employee.username.as_str());
        assert!(employee.is_admin());
        assert!(!employee.works_on(1));
        employee.schedule_days = "1,15".to_string();
        assert!(employee.works_on(15));
    }
}
