use std::collections::HashMap;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use tracing::info;
use crate::books::domain::Book;
use crate::books::repository::BookRepository;
use crate::borrowers::repository::BorrowerRepository;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Collection;
use crate::counters::repository::CounterRepository;
use crate::employees::repository::EmployeeRepository;
use crate::gateway::events::{publish_committed, EventPublisher};
use crate::loans::domain::LoanService;
use crate::loans::domain::model::LoanEntity;
use crate::loans::dto::LoanDto;
use crate::loans::repository::LoanRepository;

pub(crate) struct LoanServiceImpl {
    loan_repository: Box<dyn LoanRepository>,
    book_repository: Box<dyn BookRepository>,
    borrower_repository: Box<dyn BorrowerRepository>,
    employee_repository: Box<dyn EmployeeRepository>,
    counter_repository: Box<dyn CounterRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl LoanServiceImpl {
    pub(crate) fn new(_config: &Configuration,
                      loan_repository: Box<dyn LoanRepository>,
                      book_repository: Box<dyn BookRepository>,
                      borrower_repository: Box<dyn BorrowerRepository>,
                      employee_repository: Box<dyn EmployeeRepository>,
                      counter_repository: Box<dyn CounterRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            loan_repository,
            book_repository,
            borrower_repository,
            employee_repository,
            counter_repository,
            events_publisher,
        }
    }
}

#[async_trait]
impl LoanService for LoanServiceImpl {
    async fn borrow_book(&self, borrower_id: i64, book_id: i64, employee_id: i64,
                         date: NaiveDateTime) -> LibraryResult<LoanDto> {
        let _ = self.borrower_repository.get(borrower_id).await?;
        let _ = self.employee_repository.get(employee_id).await?;
        let book = self.book_repository.get(book_id).await?;
        if !book.is_available() {
            return Err(LibraryError::invalid_state(
                format!("book {} is already {}", book_id, book.book_status).as_str()));
        }
        let loan_id = self.counter_repository.next_id(Collection::Loans.table_name()).await?;
        let loan = LoanEntity::new(loan_id, borrower_id, book_id, employee_id, date);
        self.loan_repository.open_loan(&loan, &book).await?;
        info!("borrower {} borrowed book {} as loan {}", borrower_id, book_id, loan_id);

        let dto = LoanDto::from(&loan);
        let metadata = HashMap::from([("employee_id".to_string(), employee_id.to_string())]);
        publish_committed(self.events_publisher.as_ref(), DomainEvent::added(
            "borrow_book", "loans", loan_id.to_string().as_str(), &metadata, &dto)).await;
        Ok(dto)
    }

    async fn return_book(&self, loan_id: i64, date: NaiveDateTime) -> LibraryResult<LoanDto> {
        let loan = self.loan_repository.get(loan_id).await?;
        if loan.is_returned {
            return Err(LibraryError::invalid_state(
                format!("loan {} is already returned", loan_id).as_str()));
        }
        let book = self.book_repository.get(loan.book_id).await?;
        let mut closed = loan.returned(date);
        self.loan_repository.close_loan(&closed, &book).await?;
        closed.version += 1;
        info!("book {} of loan {} returned", loan.book_id, loan_id);

        let dto = LoanDto::from(&closed);
        let metadata = HashMap::from([("employee_id".to_string(), loan.employee_id.to_string())]);
        publish_committed(self.events_publisher.as_ref(), DomainEvent::updated(
            "return_book", "loans", loan_id.to_string().as_str(), &metadata, &dto)).await;
        Ok(dto)
    }

    async fn find_loan_by_id(&self, loan_id: i64) -> LibraryResult<LoanDto> {
        self.loan_repository.get(loan_id).await.map(|l| LoanDto::from(&l))
    }

    async fn find_open_loan(&self, book_id: i64) -> LibraryResult<Option<LoanDto>> {
        Ok(self.loan_repository.find_open_by_book(book_id).await?.as_ref().map(LoanDto::from))
    }

    async fn loans_by_borrower(&self, borrower_id: i64) -> LibraryResult<Vec<LoanDto>> {
        Ok(self.loan_repository.find_by_borrower(borrower_id).await?.iter().map(LoanDto::from).collect())
    }
}

impl From<&LoanEntity> for LoanDto {
    fn from(other: &LoanEntity) -> Self {
        Self {
            loan_id: other.loan_id,
            version: other.version,
            borrower_id: other.borrower_id,
            book_id: other.book_id,
            employee_id: other.employee_id,
            borrow_date: other.borrow_date,
            return_date: other.return_date,
            is_returned: other.is_returned,
            status: other.status(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
