use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::loans::domain::LoanService;
use crate::loans::dto::LoanDto;
use crate::utils::date::opt_serializer;

pub(crate) struct BorrowBookCommand {
    loan_service: Box<dyn LoanService>,
}

impl BorrowBookCommand {
    pub(crate) fn new(loan_service: Box<dyn LoanService>) -> Self {
        Self {
            loan_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BorrowBookCommandRequest {
    pub(crate) borrower_id: i64,
    pub(crate) book_id: i64,
    pub(crate) employee_id: i64,
    #[serde(default, with = "opt_serializer")]
    pub(crate) borrow_date: Option<NaiveDateTime>,
}

impl BorrowBookCommandRequest {
    pub fn new(borrower_id: i64, book_id: i64, employee_id: i64, borrow_date: Option<NaiveDateTime>) -> Self {
        Self {
            borrower_id,
            book_id,
            employee_id,
            borrow_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BorrowBookCommandResponse {
    pub loan: LoanDto,
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        let date = req.borrow_date.unwrap_or_else(|| Utc::now().naive_utc());
        self.loan_service.borrow_book(req.borrower_id, req.book_id, req.employee_id, date)
            .await.map_err(CommandError::from).map(|loan| BorrowBookCommandResponse { loan })
    }
}
