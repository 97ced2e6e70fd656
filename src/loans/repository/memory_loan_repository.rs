use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use async_trait::async_trait;
use chrono::Utc;
use crate::books::domain::model::BookEntity;
use crate::core::library::{BookStatus, LibraryError, LibraryResult};
use crate::loans::domain::model::LoanEntity;
use crate::loans::repository::LoanRepository;
use crate::utils::memory::{lock, MemoryDatabase, MemoryRecord, MemoryRepository};

pub(crate) type MemoryLoanRepository = MemoryRepository<LoanEntity>;

impl MemoryRecord for LoanEntity {
    fn table(db: &MemoryDatabase) -> &Mutex<BTreeMap<i64, Self>> {
        &db.loans
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    fn label() -> &'static str {
        "loan"
    }
}

// checks that the stored book is still in `expected` state at the version that was read
fn check_book(books: &BTreeMap<i64, BookEntity>, book: &BookEntity, expected: BookStatus) -> LibraryResult<()> {
    match books.get(&book.book_id) {
        Some(stored) if stored.book_status == expected && stored.version == book.version => Ok(()),
        Some(stored) => Err(LibraryError::invalid_state(
            format!("book {} is {} at version {}", book.book_id, stored.book_status, stored.version).as_str())),
        None => Err(LibraryError::not_found(format!("book not found for {}", book.book_id).as_str())),
    }
}

fn set_book_status(books: &mut BTreeMap<i64, BookEntity>, book_id: i64, status: BookStatus) {
    if let Some(stored) = books.get_mut(&book_id) {
        stored.book_status = status;
        stored.version += 1;
        stored.updated_at = Utc::now().naive_utc();
    }
}

#[async_trait]
impl LoanRepository for MemoryLoanRepository {
    async fn open_loan(&self, loan: &LoanEntity, book: &BookEntity) -> LibraryResult<()> {
        let db = self.database();
        let mut loans = lock(&db.loans)?;
        let mut books = lock(&db.books)?;
        let borrowers = lock(&db.borrowers)?;
        if loans.contains_key(&loan.loan_id) {
            return Err(LibraryError::duplicate_key(format!("loan {} already exists", loan.loan_id).as_str()));
        }
        if !borrowers.contains_key(&loan.borrower_id) {
            return Err(LibraryError::invalid_state(
                format!("borrower {} no longer exists", loan.borrower_id).as_str()));
        }
        check_book(&books, book, BookStatus::Available)?;
        loans.insert(loan.loan_id, loan.clone());
        set_book_status(&mut books, book.book_id, BookStatus::Borrowed);
        Ok(())
    }

    async fn close_loan(&self, loan: &LoanEntity, book: &BookEntity) -> LibraryResult<()> {
        let db = self.database();
        let mut loans = lock(&db.loans)?;
        let mut books = lock(&db.books)?;
        match loans.get(&loan.loan_id) {
            Some(stored) if !stored.is_returned && stored.version == loan.version => {}
            Some(_) => {
                return Err(LibraryError::invalid_state(
                    format!("loan {} was already returned or modified concurrently", loan.loan_id).as_str()));
            }
            None => {
                return Err(LibraryError::not_found(format!("loan not found for {}", loan.loan_id).as_str()));
            }
        }
        check_book(&books, book, BookStatus::Borrowed)?;
        let mut closed = loan.clone();
        closed.version = loan.version + 1;
        loans.insert(loan.loan_id, closed);
        set_book_status(&mut books, book.book_id, BookStatus::Available);
        Ok(())
    }

    async fn find_open_by_book(&self, book_id: i64) -> LibraryResult<Option<LoanEntity>> {
        let predicate = HashMap::from([
            ("book_id".to_string(), book_id.to_string()),
            ("is_returned".to_string(), "false".to_string()),
        ]);
        Ok(self.select(&predicate)?.into_iter().next())
    }

    async fn find_by_borrower(&self, borrower_id: i64) -> LibraryResult<Vec<LoanEntity>> {
        let predicate = HashMap::from([("borrower_id".to_string(), borrower_id.to_string())]);
        self.select(&predicate)
    }
}
