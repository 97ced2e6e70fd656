use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::employees::domain::EmployeeService;
use crate::employees::dto::EmployeeDto;

pub(crate) struct GetEmployeeCommand {
    employee_service: Box<dyn EmployeeService>,
}

impl GetEmployeeCommand {
    pub(crate) fn new(employee_service: Box<dyn EmployeeService>) -> Self {
        Self {
            employee_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetEmployeeCommandRequest {
    pub(crate) employee_id: i64,
}

#[derive(Debug, Serialize)]
pub struct GetEmployeeCommandResponse {
    pub employee: EmployeeDto,
}

#[async_trait]
impl Command<GetEmployeeCommandRequest, GetEmployeeCommandResponse> for GetEmployeeCommand {
    async fn execute(&self, req: GetEmployeeCommandRequest) -> Result<GetEmployeeCommandResponse, CommandError> {
        self.employee_service.find_employee_by_id(req.employee_id)
            .await.map_err(CommandError::from).map(|employee| GetEmployeeCommandResponse { employee })
    }
}
