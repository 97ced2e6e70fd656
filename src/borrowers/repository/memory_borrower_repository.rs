use std::collections::BTreeMap;
use std::sync::Mutex;
use async_trait::async_trait;
use crate::borrowers::domain::model::BorrowerEntity;
use crate::borrowers::repository::BorrowerRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::memory::{lock, MemoryDatabase, MemoryRecord, MemoryRepository};

pub(crate) type MemoryBorrowerRepository = MemoryRepository<BorrowerEntity>;

impl MemoryRecord for BorrowerEntity {
    fn table(db: &MemoryDatabase) -> &Mutex<BTreeMap<i64, Self>> {
        &db.borrowers
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    fn label() -> &'static str {
        "borrower"
    }
}

#[async_trait]
impl BorrowerRepository for MemoryBorrowerRepository {
    async fn delete_without_open_loans(&self, id: i64) -> LibraryResult<usize> {
        let db = self.database();
        let loans = lock(&db.loans)?;
        let mut borrowers = lock(&db.borrowers)?;
        if !borrowers.contains_key(&id) {
            return Err(LibraryError::not_found(format!("borrower not found for {}", id).as_str()));
        }
        let open = loans.values().filter(|l| l.borrower_id == id && !l.is_returned).count();
        if open > 0 {
            return Err(LibraryError::invalid_state(
                format!("borrower {} still has {} open loans", id, open).as_str()));
        }
        borrowers.remove(&id);
        Ok(1)
    }
}
