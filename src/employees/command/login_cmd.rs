use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::employees::domain::EmployeeService;
use crate::employees::dto::EmployeeDto;

pub(crate) struct LoginCommand {
    employee_service: Box<dyn EmployeeService>,
}

impl LoginCommand {
    pub(crate) fn new(employee_service: Box<dyn EmployeeService>) -> Self {
        Self {
            employee_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginCommandRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginCommandResponse {
    pub employee: EmployeeDto,
}

#[async_trait]
impl Command<LoginCommandRequest, LoginCommandResponse> for LoginCommand {
    async fn execute(&self, req: LoginCommandRequest) -> Result<LoginCommandResponse, CommandError> {
        self.employee_service.authenticate(req.username.as_str(), req.password.as_str())
            .await.map_err(CommandError::from).map(|employee| LoginCommandResponse { employee })
    }
}
