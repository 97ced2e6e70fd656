use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::loans::domain::LoanService;
use crate::loans::dto::LoanDto;
use crate::utils::date::opt_serializer;

pub(crate) struct ReturnBookCommand {
    loan_service: Box<dyn LoanService>,
}

impl ReturnBookCommand {
    pub(crate) fn new(loan_service: Box<dyn LoanService>) -> Self {
        Self {
            loan_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnBookCommandRequest {
    #[serde(default)]
    pub(crate) loan_id: i64,
    #[serde(default, with = "opt_serializer")]
    pub(crate) return_date: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct ReturnBookCommandResponse {
    pub loan: LoanDto,
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        let date = req.return_date.unwrap_or_else(|| Utc::now().naive_utc());
        self.loan_service.return_book(req.loan_id, date)
            .await.map_err(CommandError::from).map(|loan| ReturnBookCommandResponse { loan })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::loans::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
    use crate::loans::factory;
    use crate::seed::seed_reference_data;
    use crate::utils::date::parse_date;

    #[tokio::test]
    async fn test_should_run_return_book() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        seed_reference_data(&config, RepositoryStore::Memory).await.expect("should seed reference data");
        let svc = factory::create_loan_service(&config, RepositoryStore::Memory).await;
        let loan = svc.borrow_book(1, 1, 1, parse_date("2022-01-01").unwrap()).await.expect("should borrow book");
        let cmd = ReturnBookCommand::new(svc);
        let res = cmd.execute(ReturnBookCommandRequest { loan_id: loan.loan_id, return_date: parse_date("2022-01-15") })
            .await.expect("should return book");
        assert!(res.loan.is_returned);
        let again = cmd.execute(ReturnBookCommandRequest { loan_id: loan.loan_id, return_date: None }).await;
        assert!(matches!(again, Err(CommandError::InvalidState { .. })));
    }
}
