use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};
use async_trait::async_trait;
use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::Value;
use crate::books::domain::model::BookEntity;
use crate::borrowers::domain::model::BorrowerEntity;
use crate::core::domain::Identifiable;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::{predicate_op, Repository};
use crate::employees::domain::model::EmployeeEntity;
use crate::loans::domain::model::LoanEntity;

// In-process database of one library branch. Every collection has its own lock;
// writes touching several collections lock loans, then books, then borrowers.
#[derive(Debug, Default)]
pub(crate) struct MemoryDatabase {
    pub(crate) employees: Mutex<BTreeMap<i64, EmployeeEntity>>,
    pub(crate) books: Mutex<BTreeMap<i64, BookEntity>>,
    pub(crate) borrowers: Mutex<BTreeMap<i64, BorrowerEntity>>,
    pub(crate) loans: Mutex<BTreeMap<i64, LoanEntity>>,
    pub(crate) counters: Mutex<HashMap<String, i64>>,
    pub(crate) events: Mutex<Vec<DomainEvent>>,
}

lazy_static! {
    static ref BRANCHES: Mutex<HashMap<String, Arc<MemoryDatabase>>> = Mutex::new(HashMap::new());
}

// returns the database of a branch, creating it on first use
pub(crate) fn memory_database(branch_id: &str) -> Arc<MemoryDatabase> {
    let mut branches = BRANCHES.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    branches.entry(branch_id.to_string())
        .or_insert_with(|| Arc::new(MemoryDatabase::default()))
        .clone()
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> LibraryResult<MutexGuard<'_, T>> {
    mutex.lock().map_err(|err| LibraryError::runtime(
        format!("memory store lock poisoned {}", err).as_str(), None))
}

// MemoryRecord binds an entity to its table of the memory database.
pub(crate) trait MemoryRecord: Identifiable + Clone + Serialize + 'static {
    fn table(db: &MemoryDatabase) -> &Mutex<BTreeMap<i64, Self>>;

    fn set_version(&mut self, version: i64);

    fn label() -> &'static str;

    // value of a field that must be unique across the table
    fn unique_key(&self) -> Option<String> {
        None
    }
}

#[derive(Debug)]
pub(crate) struct MemoryRepository<E> {
    db: Arc<MemoryDatabase>,
    _entity: PhantomData<E>,
}

impl<E: MemoryRecord> MemoryRepository<E> {
    pub(crate) fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db, _entity: PhantomData }
    }

    pub(crate) fn database(&self) -> &Arc<MemoryDatabase> {
        &self.db
    }

    // all records matching the predicate, in id order
    pub(crate) fn select(&self, predicate: &HashMap<String, String>) -> LibraryResult<Vec<E>> {
        let table = lock(E::table(&self.db))?;
        let mut records = vec![];
        for entity in table.values() {
            if matches_predicate(entity, predicate)? {
                records.push(entity.clone());
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl<E: MemoryRecord> Repository<E> for MemoryRepository<E> {
    async fn create(&self, entity: &E) -> LibraryResult<usize> {
        let mut table = lock(E::table(&self.db))?;
        if table.contains_key(&entity.id()) {
            return Err(LibraryError::duplicate_key(
                format!("{} {} already exists", E::label(), entity.id()).as_str()));
        }
        if let Some(key) = entity.unique_key() {
            if table.values().any(|other| other.unique_key().as_ref() == Some(&key)) {
                return Err(LibraryError::duplicate_key(
                    format!("{} {} already exists", E::label(), key).as_str()));
            }
        }
        table.insert(entity.id(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &E) -> LibraryResult<usize> {
        let mut table = lock(E::table(&self.db))?;
        match table.get(&entity.id()) {
            Some(existing) if existing.version() == entity.version() => {}
            _ => {
                return Err(LibraryError::invalid_state(
                    format!("{} {} is missing or was modified concurrently", E::label(), entity.id()).as_str()));
            }
        }
        if let Some(key) = entity.unique_key() {
            if table.values().any(|other| other.id() != entity.id() && other.unique_key().as_ref() == Some(&key)) {
                return Err(LibraryError::duplicate_key(
                    format!("{} {} already exists", E::label(), key).as_str()));
            }
        }
        let mut updated = entity.clone();
        updated.set_version(entity.version() + 1);
        table.insert(entity.id(), updated);
        Ok(1)
    }

    async fn get(&self, id: i64) -> LibraryResult<E> {
        let table = lock(E::table(&self.db))?;
        table.get(&id).cloned().ok_or_else(|| LibraryError::not_found(
            format!("{} not found for {}", E::label(), id).as_str()))
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let mut table = lock(E::table(&self.db))?;
        table.remove(&id).map(|_| 1).ok_or_else(|| LibraryError::not_found(
            format!("{} not found for {}", E::label(), id).as_str()))
    }

    async fn scan(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<E>> {
        self.query(&HashMap::new(), page, page_size).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<E>> {
        let after = page.and_then(|p| p.parse::<i64>().ok()).unwrap_or(i64::MIN);
        let table = lock(E::table(&self.db))?;
        let mut records = vec![];
        let mut next_page = None;
        for entity in table.range(after.saturating_add(1)..).map(|(_, e)| e) {
            if !matches_predicate(entity, predicate)? {
                continue;
            }
            if records.len() == page_size.max(1) {
                next_page = records.last().map(|last: &E| last.id().to_string());
                break;
            }
            records.push(entity.clone());
        }
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }
}

// Compares serialized fields of an entity against predicate strings; numbers and
// booleans are compared by value and everything else as text.
pub(crate) fn matches_predicate<E: Serialize>(entity: &E, predicate: &HashMap<String, String>) -> LibraryResult<bool> {
    if predicate.is_empty() {
        return Ok(true);
    }
    let value = serde_json::to_value(entity)?;
    for (k, expected) in predicate {
        let (field, op) = predicate_op(k);
        let actual = value.get(field).unwrap_or(&Value::Null);
        if !compare(actual, op, expected) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn compare(actual: &Value, op: &str, expected: &str) -> bool {
    let ordering = match actual {
        Value::Number(n) => match (n.as_f64(), expected.parse::<f64>()) {
            (Some(a), Ok(e)) => a.partial_cmp(&e),
            _ => None,
        },
        Value::Bool(b) => expected.parse::<bool>().ok().map(|e| b.cmp(&e)),
        Value::String(s) => {
            if op == "contains" {
                return s.contains(expected);
            }
            Some(s.as_str().cmp(expected))
        }
        _ => None,
    };
    match (op, ordering) {
        ("=", Some(o)) => o.is_eq(),
        ("<>", Some(o)) => o.is_ne(),
        ("<>", None) => true,
        ("<", Some(o)) => o.is_lt(),
        ("<=", Some(o)) => o.is_le(),
        (">", Some(o)) => o.is_gt(),
        (">=", Some(o)) => o.is_ge(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use uuid::Uuid;
    use crate::books::domain::model::BookEntity;
    use crate::core::library::{BookStatus, LibraryError};
    use crate::core::repository::{scan_all, Repository};
    use crate::utils::memory::{matches_predicate, memory_database, MemoryRepository};

    fn repository() -> MemoryRepository<BookEntity> {
        let db = memory_database(Uuid::new_v4().to_string().as_str());
        MemoryRepository::new(db)
    }

    #[tokio::test]
    async fn test_should_share_branch_database() {
        let branch = Uuid::new_v4().to_string();
        let a = memory_database(branch.as_str());
        let b = memory_database(branch.as_str());
        assert!(std::sync::Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_and_stale_writes() {
        let repo = repository();
        let book = BookEntity::new(1, "Dune", "Frank Herbert", 1965, "Sci-Fi");
        repo.create(&book).await.expect("should create book");
        assert!(matches!(repo.create(&book).await, Err(LibraryError::DuplicateKey { .. })));

        let mut copy = repo.get(1).await.expect("should get book");
        copy.book_status = BookStatus::Borrowed;
        repo.update(&copy).await.expect("should update book");
        assert_eq!(1, repo.get(1).await.expect("should get book").version);
        assert!(matches!(repo.update(&copy).await, Err(LibraryError::InvalidState { .. })));
    }

    #[tokio::test]
    async fn test_should_page_in_id_order() {
        let repo = repository();
        for i in (1..=25).rev() {
            let book = BookEntity::new(i, format!("title {}", i).as_str(), "author", 2000 + i, "Novel");
            repo.create(&book).await.expect("should create book");
        }
        let first = repo.scan(None, 10).await.expect("should scan");
        assert_eq!(10, first.records.len());
        assert_eq!(1, first.records[0].book_id);
        assert_eq!(Some("10".to_string()), first.next_page);
        let all = scan_all(&repo, 10).await.expect("should scan all");
        assert_eq!(25, all.len());
        assert!(all.windows(2).all(|w| w[0].book_id < w[1].book_id));
    }

    #[tokio::test]
    async fn test_should_match_predicates() {
        let book = BookEntity::new(3, "Clean Code", "Robert C. Martin", 2008, "Programming");
        let predicate = HashMap::from([
            ("published_year:>=".to_string(), "2000".to_string()),
            ("title:contains".to_string(), "Code".to_string()),
            ("book_status".to_string(), "Available".to_string()),
        ]);
        assert!(matches_predicate(&book, &predicate).expect("should match"));
        let predicate = HashMap::from([("book_id".to_string(), "4".to_string())]);
        assert!(!matches_predicate(&book, &predicate).expect("should match"));
    }
}
