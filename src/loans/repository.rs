pub mod ddb_loan_repository;
pub mod memory_loan_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;
use crate::loans::domain::model::LoanEntity;

// LoanRepository writes a loan and the status of its book as one unit.
#[async_trait]
pub(crate) trait LoanRepository: Repository<LoanEntity> {
    // Creates the open loan and marks the book Borrowed. Fails with InvalidState when the
    // book is no longer Available at the version it was read.
    async fn open_loan(&self, loan: &LoanEntity, book: &BookEntity) -> LibraryResult<()>;

    // Stores the returned loan and marks the book Available. Fails with InvalidState when
    // the loan was closed or modified since it was read, or the book is not Borrowed.
    async fn close_loan(&self, loan: &LoanEntity, book: &BookEntity) -> LibraryResult<()>;

    async fn find_open_by_book(&self, book_id: i64) -> LibraryResult<Option<LoanEntity>>;

    async fn find_by_borrower(&self, borrower_id: i64) -> LibraryResult<Vec<LoanEntity>>;
}
