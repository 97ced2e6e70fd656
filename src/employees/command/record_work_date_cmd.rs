use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::employees::domain::EmployeeService;
use crate::employees::dto::EmployeeDto;
use crate::utils::date::opt_serializer;

pub(crate) struct RecordWorkDateCommand {
    employee_service: Box<dyn EmployeeService>,
}

impl RecordWorkDateCommand {
    pub(crate) fn new(employee_service: Box<dyn EmployeeService>) -> Self {
        Self {
            employee_service,
        }
    }
}

// work_date defaults to now
#[derive(Debug, Deserialize)]
pub(crate) struct RecordWorkDateCommandRequest {
    #[serde(default)]
    pub(crate) employee_id: i64,
    #[serde(default, with = "opt_serializer")]
    pub(crate) work_date: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct RecordWorkDateCommandResponse {
    pub employee: EmployeeDto,
}

#[async_trait]
impl Command<RecordWorkDateCommandRequest, RecordWorkDateCommandResponse> for RecordWorkDateCommand {
    async fn execute(&self, req: RecordWorkDateCommandRequest) -> Result<RecordWorkDateCommandResponse, CommandError> {
        let date = req.work_date.unwrap_or_else(|| Utc::now().naive_utc());
        self.employee_service.record_work_date(req.employee_id, date)
            .await.map_err(CommandError::from).map(|employee| RecordWorkDateCommandResponse { employee })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::employees::command::record_work_date_cmd::{RecordWorkDateCommand, RecordWorkDateCommandRequest};
    use crate::employees::dto::EmployeeDto;
    use crate::employees::factory;

    #[tokio::test]
    async fn test_should_run_record_work_date() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let svc = factory::create_employee_service(&config, RepositoryStore::Memory).await;
        let saved = svc.add_employee(&EmployeeDto::new("Admin", "Quản trị viên", "admin", "admin123", true))
            .await.expect("should add employee");
        let cmd = RecordWorkDateCommand::new(svc);
        let req: RecordWorkDateCommandRequest = serde_json::from_str(
            format!("{{\"employee_id\": {}, \"work_date\": \"2022-01-15\"}}", saved.employee_id).as_str())
            .expect("should parse request");
        let res = cmd.execute(req).await.expect("should record work date");
        assert_eq!("2022-01-15", res.employee.work_date.format("%Y-%m-%d").to_string());
    }
}
