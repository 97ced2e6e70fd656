use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::gateway::GatewayPublisherVia;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity if its version is still current
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: i64) -> LibraryResult<Entity>;

    // delete an entity
    async fn delete(&self, id: i64) -> LibraryResult<usize>;

    // pages through every entity ordered by id where the store allows it
    async fn scan(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>>;

    // find by predicate, keys are field names optionally suffixed with `:op`
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>>;
}

const PREDICATE_OPS: [&str; 7] = ["=", "<>", "<", "<=", ">", ">=", "contains"];

// splits a predicate key such as `borrow_date:>=` into the field and its comparison operator
pub(crate) fn predicate_op(key: &str) -> (&str, &str) {
    if let Some((field, op)) = key.split_once(':') {
        if PREDICATE_OPS.contains(&op) {
            return (field, op);
        }
    }
    (key, "=")
}

// drains all pages of a scan
pub(crate) async fn scan_all<E, R>(repo: &R, page_size: usize) -> LibraryResult<Vec<E>>
    where E: Send, R: Repository<E> + ?Sized {
    let mut records = vec![];
    let mut next_page: Option<String> = None;
    loop {
        let res = repo.scan(next_page.as_deref(), page_size).await?;
        records.extend(res.records);
        next_page = res.next_page;
        if next_page.is_none() {
            break;
        }
    }
    Ok(records)
}

// drains all pages of a query
pub(crate) async fn query_all<E, R>(repo: &R, predicate: &HashMap<String, String>,
                                    page_size: usize) -> LibraryResult<Vec<E>>
    where E: Send, R: Repository<E> + ?Sized {
    let mut records = vec![];
    let mut next_page: Option<String> = None;
    loop {
        let res = repo.query(predicate, next_page.as_deref(), page_size).await?;
        records.extend(res.records);
        next_page = res.next_page;
        if next_page.is_none() {
            break;
        }
    }
    Ok(records)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}

impl RepositoryStore {
    pub fn gateway_publisher(&self) -> GatewayPublisherVia  {
        match self {
            RepositoryStore::DynamoDB => {GatewayPublisherVia::Sns},
            RepositoryStore::LocalDynamoDB => {GatewayPublisherVia::LocalDynamoDB},
            RepositoryStore::Memory => {GatewayPublisherVia::Memory},
        }
    }

    pub fn from_env() -> Self {
        match env::var("LIBRARY_STORE").unwrap_or_default().to_lowercase().as_str() {
            "dynamodb" | "ddb" => RepositoryStore::DynamoDB,
            "memory" | "mem" => RepositoryStore::Memory,
            _ => RepositoryStore::LocalDynamoDB,
        }
    }
}

// Collection names the persisted tables and the counters used to number their records.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Collection {
    Employees,
    Books,
    Borrowers,
    Loans,
}

impl Collection {
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Employees => "employees",
            Collection::Books => "books",
            Collection::Borrowers => "borrowers",
            Collection::Loans => "loans",
        }
    }

    pub fn id_field(&self) -> &'static str {
        match self {
            Collection::Employees => "employee_id",
            Collection::Books => "book_id",
            Collection::Borrowers => "borrower_id",
            Collection::Loans => "loan_id",
        }
    }

    pub fn index_name(&self) -> String {
        format!("{}_ndx", self.table_name())
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

pub(crate) const COUNTERS_TABLE: &str = "counters";
pub(crate) const USERNAMES_TABLE: &str = "usernames";
pub(crate) const SYSTEM_LOGS_TABLE: &str = "system_logs";
