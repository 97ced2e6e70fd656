use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::loans::domain::LoanService;
use crate::loans::dto::LoanDto;

pub(crate) struct GetLoanCommand {
    loan_service: Box<dyn LoanService>,
}

impl GetLoanCommand {
    pub(crate) fn new(loan_service: Box<dyn LoanService>) -> Self {
        Self {
            loan_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetLoanCommandRequest {
    pub(crate) loan_id: i64,
}

#[derive(Debug, Serialize)]
pub struct GetLoanCommandResponse {
    pub loan: LoanDto,
}

#[async_trait]
impl Command<GetLoanCommandRequest, GetLoanCommandResponse> for GetLoanCommand {
    async fn execute(&self, req: GetLoanCommandRequest) -> Result<GetLoanCommandResponse, CommandError> {
        self.loan_service.find_loan_by_id(req.loan_id)
            .await.map_err(CommandError::from).map(|loan| GetLoanCommandResponse { loan })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::loans::command::get_loan_cmd::{GetLoanCommand, GetLoanCommandRequest};
    use crate::loans::factory;

    #[tokio::test]
    async fn test_should_run_get_missing_loan() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let cmd = GetLoanCommand::new(factory::create_loan_service(&config, RepositoryStore::Memory).await);
        let res = cmd.execute(GetLoanCommandRequest { loan_id: 1 }).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
