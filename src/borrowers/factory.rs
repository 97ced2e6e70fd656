use crate::borrowers::domain::BorrowerService;
use crate::borrowers::domain::service::BorrowerServiceImpl;
use crate::borrowers::repository::BorrowerRepository;
use crate::borrowers::repository::ddb_borrower_repository::DDBBorrowerRepository;
use crate::borrowers::repository::memory_borrower_repository::MemoryBorrowerRepository;
use crate::core::domain::Configuration;
use crate::core::repository::{Collection, RepositoryStore};
use crate::counters::factory::create_counter_repository;
use crate::gateway::factory::create_publisher;
use crate::utils::ddb::{build_db_client, create_table, KeyDef};
use crate::utils::memory::memory_database;

pub(crate) async fn create_borrower_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn BorrowerRepository> {
    let table_name = Collection::Borrowers.table_name();
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBorrowerRepository::new(client, table_name))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, table_name, KeyDef::number("borrower_id"), None).await;
            Box::new(DDBBorrowerRepository::new(client, table_name))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryBorrowerRepository::new(memory_database(config.branch_id.as_str())))
        }
    }
}

pub(crate) async fn create_borrower_service(config: &Configuration, store: RepositoryStore) -> Box<dyn BorrowerService> {
    let borrower_repo = create_borrower_repository(config, store).await;
    let counter_repo = create_counter_repository(config, store).await;
    let publisher = create_publisher(config, store.gateway_publisher()).await;
    Box::new(BorrowerServiceImpl::new(config, borrower_repo, counter_repo, publisher))
}
