use crate::core::domain::Configuration;
use crate::core::repository::{COUNTERS_TABLE, RepositoryStore};
use crate::counters::repository::CounterRepository;
use crate::counters::repository::ddb_counter_repository::DDBCounterRepository;
use crate::counters::repository::memory_counter_repository::MemoryCounterRepository;
use crate::utils::ddb::{build_db_client, create_table, KeyDef};
use crate::utils::memory::memory_database;

pub(crate) async fn create_counter_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn CounterRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBCounterRepository::new(client, COUNTERS_TABLE))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, COUNTERS_TABLE, KeyDef::string("name"), None).await;
            Box::new(DDBCounterRepository::new(client, COUNTERS_TABLE))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryCounterRepository::new(memory_database(config.branch_id.as_str())))
        }
    }
}
