pub mod model;
pub mod service;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::core::library::LibraryResult;
use crate::loans::dto::LoanDto;

#[async_trait]
pub(crate) trait LoanService: Sync + Send {
    async fn borrow_book(&self, borrower_id: i64, book_id: i64, employee_id: i64,
                         date: NaiveDateTime) -> LibraryResult<LoanDto>;
    async fn return_book(&self, loan_id: i64, date: NaiveDateTime) -> LibraryResult<LoanDto>;
    async fn find_loan_by_id(&self, loan_id: i64) -> LibraryResult<LoanDto>;
    async fn find_open_loan(&self, book_id: i64) -> LibraryResult<Option<LoanDto>>;
    async fn loans_by_borrower(&self, borrower_id: i64) -> LibraryResult<Vec<LoanDto>>;
}
