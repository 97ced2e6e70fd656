use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::domain::Configuration;
use crate::core::repository::{Collection, RepositoryStore};
use crate::utils::ddb::{build_db_client, create_table, KeyDef};
use crate::utils::memory::memory_database;

pub(crate) async fn create_book_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn BookRepository> {
    let table_name = Collection::Books.table_name();
    let index_name = Collection::Books.index_name();
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBookRepository::new(client, table_name, index_name.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, table_name, KeyDef::number("book_id"), Some(KeyDef::string("book_status"))).await;
            Box::new(DDBBookRepository::new(client, table_name, index_name.as_str()))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryBookRepository::new(memory_database(config.branch_id.as_str())))
        }
    }
}
