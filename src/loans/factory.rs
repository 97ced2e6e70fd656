use crate::books::factory::create_book_repository;
use crate::borrowers::factory::create_borrower_repository;
use crate::core::domain::Configuration;
use crate::core::repository::{Collection, RepositoryStore};
use crate::counters::factory::create_counter_repository;
use crate::employees::factory::create_employee_repository;
use crate::gateway::factory::create_publisher;
use crate::loans::domain::LoanService;
use crate::loans::domain::service::LoanServiceImpl;
use crate::loans::repository::LoanRepository;
use crate::loans::repository::ddb_loan_repository::DDBLoanRepository;
use crate::loans::repository::memory_loan_repository::MemoryLoanRepository;
use crate::utils::ddb::{build_db_client, create_table, KeyDef};
use crate::utils::memory::memory_database;

pub(crate) async fn create_loan_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn LoanRepository> {
    let table_name = Collection::Loans.table_name();
    let index_name = Collection::Loans.index_name();
    let books_table = Collection::Books.table_name();
    let borrowers_table = Collection::Borrowers.table_name();
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBLoanRepository::new(client, table_name, index_name.as_str(), books_table, borrowers_table, config.page_size))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, table_name, KeyDef::number("loan_id"), Some(KeyDef::number("book_id"))).await;
            Box::new(DDBLoanRepository::new(client, table_name, index_name.as_str(), books_table, borrowers_table, config.page_size))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryLoanRepository::new(memory_database(config.branch_id.as_str())))
        }
    }
}

pub(crate) async fn create_loan_service(config: &Configuration, store: RepositoryStore) -> Box<dyn LoanService> {
    let loan_repo = create_loan_repository(config, store).await;
    let book_repo = create_book_repository(config, store).await;
    let borrower_repo = create_borrower_repository(config, store).await;
    let employee_repo = create_employee_repository(config, store).await;
    let counter_repo = create_counter_repository(config, store).await;
    let publisher = create_publisher(config, store.gateway_publisher()).await;
    Box::new(LoanServiceImpl::new(config, loan_repo, book_repo, borrower_repo, employee_repo, counter_repo, publisher))
}
