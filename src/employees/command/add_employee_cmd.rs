use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::employees::domain::EmployeeService;
use crate::employees::dto::EmployeeDto;

pub(crate) struct AddEmployeeCommand {
    employee_service: Box<dyn EmployeeService>,
}

impl AddEmployeeCommand {
    pub(crate) fn new(employee_service: Box<dyn EmployeeService>) -> Self {
        Self {
            employee_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddEmployeeCommandRequest {
    pub(crate) name: String,
    pub(crate) position: String,
    pub(crate) username: String,
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) is_admin: bool,
    #[serde(default)]
    pub(crate) schedule_days: String,
}

impl AddEmployeeCommandRequest {
    pub fn new(name: &str, position: &str, username: &str, password: &str) -> Self {
        Self {
            name: name.to_string(),
            position: position.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            is_admin: false,
            schedule_days: "".to_string(),
        }
    }

    pub fn build_employee(&self) -> EmployeeDto {
        EmployeeDto::new(self.name.as_str(), self.position.as_str(), self.username.as_str(),
                         self.password.as_str(), self.is_admin)
            .with_schedule(self.schedule_days.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct AddEmployeeCommandResponse {
    pub employee: EmployeeDto,
}

impl AddEmployeeCommandResponse {
    pub fn new(employee: EmployeeDto) -> Self {
        Self {
            employee,
        }
    }
}

#[async_trait]
impl Command<AddEmployeeCommandRequest, AddEmployeeCommandResponse> for AddEmployeeCommand {
    async fn execute(&self, req: AddEmployeeCommandRequest) -> Result<AddEmployeeCommandResponse, CommandError> {
        let employee = req.build_employee();
        self.employee_service.add_employee(&employee).await.map_err(CommandError::from).map(AddEmployeeCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::employees::command::add_employee_cmd::{AddEmployeeCommand, AddEmployeeCommandRequest};
    use crate::employees::factory;

    lazy_static! {
        static ref SUT_CMD : AsyncOnce<AddEmployeeCommand> = AsyncOnce::new(async {
                let config = Configuration::new(Uuid::new_v4().to_string().as_str());
                let svc = factory::create_employee_service(&config, RepositoryStore::Memory).await;
                AddEmployeeCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_add_employee() {
        let cmd = SUT_CMD.get().await;
        let res = cmd.execute(AddEmployeeCommandRequest::new("Nhân viên 1", "Thủ thư", "staff", "staff123"))
            .await.expect("should add employee");
        assert!(res.employee.employee_id > 0);
        let dup = cmd.execute(AddEmployeeCommandRequest::new("Nhân viên 2", "Thủ thư", "staff", "x")).await;
        assert!(matches!(dup, Err(CommandError::DuplicateKey { .. })));
    }
}
