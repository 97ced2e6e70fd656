use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::employees::domain::EmployeeService;
use crate::employees::dto::EmployeeDto;

pub(crate) struct OnDutyCommand {
    employee_service: Box<dyn EmployeeService>,
}

impl OnDutyCommand {
    pub(crate) fn new(employee_service: Box<dyn EmployeeService>) -> Self {
        Self {
            employee_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OnDutyCommandRequest {
    pub(crate) day: u32,
}

#[derive(Debug, Serialize)]
pub struct OnDutyCommandResponse {
    pub day: u32,
    pub employees: Vec<EmployeeDto>,
}

#[async_trait]
impl Command<OnDutyCommandRequest, OnDutyCommandResponse> for OnDutyCommand {
    async fn execute(&self, req: OnDutyCommandRequest) -> Result<OnDutyCommandResponse, CommandError> {
        self.employee_service.on_duty(req.day)
            .await.map_err(CommandError::from).map(|employees| OnDutyCommandResponse { day: req.day, employees })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::employees::command::on_duty_cmd::{OnDutyCommand, OnDutyCommandRequest};
    use crate::employees::dto::EmployeeDto;
    use crate::employees::factory;

    #[tokio::test]
    async fn test_should_run_on_duty() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let svc = factory::create_employee_service(&config, RepositoryStore::Memory).await;
        svc.add_employee(&EmployeeDto::new("Nhân viên 1", "Thủ thư", "staff", "staff123", false).with_schedule("1,15"))
            .await.expect("should add employee");
        let cmd = OnDutyCommand::new(svc);
        assert_eq!(1, cmd.execute(OnDutyCommandRequest { day: 15 }).await.expect("should list").employees.len());
        assert!(cmd.execute(OnDutyCommandRequest { day: 2 }).await.expect("should list").employees.is_empty());
        assert!(matches!(cmd.execute(OnDutyCommandRequest { day: 0 }).await, Err(CommandError::Validation { .. })));
    }
}
