use crate::core::domain::Configuration;
use crate::core::repository::{Collection, RepositoryStore, USERNAMES_TABLE};
use crate::counters::factory::create_counter_repository;
use crate::employees::domain::EmployeeService;
use crate::employees::domain::service::EmployeeServiceImpl;
use crate::employees::repository::EmployeeRepository;
use crate::employees::repository::ddb_employee_repository::DDBEmployeeRepository;
use crate::employees::repository::memory_employee_repository::MemoryEmployeeRepository;
use crate::gateway::factory::create_publisher;
use crate::utils::ddb::{build_db_client, create_table, KeyDef};
use crate::utils::memory::memory_database;

pub(crate) async fn create_employee_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn EmployeeRepository> {
    let table_name = Collection::Employees.table_name();
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBEmployeeRepository::new(client, table_name, USERNAMES_TABLE))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, table_name, KeyDef::number("employee_id"), None).await;
            let _ = create_table(&client, USERNAMES_TABLE, KeyDef::string("username"), None).await;
            Box::new(DDBEmployeeRepository::new(client, table_name, USERNAMES_TABLE))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryEmployeeRepository::new(memory_database(config.branch_id.as_str())))
        }
    }
}

pub(crate) async fn create_employee_service(config: &Configuration, store: RepositoryStore) -> Box<dyn EmployeeService> {
    let employee_repo = create_employee_repository(config, store).await;
    let counter_repo = create_counter_repository(config, store).await;
    let publisher = create_publisher(config, store.gateway_publisher()).await;
    Box::new(EmployeeServiceImpl::new(config, employee_repo, counter_repo, publisher))
}
