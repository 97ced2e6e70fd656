use std::sync::Arc;
use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::counters::repository::CounterRepository;
use crate::utils::memory::{lock, MemoryDatabase};

#[derive(Debug)]
pub struct MemoryCounterRepository {
    db: Arc<MemoryDatabase>,
}

impl MemoryCounterRepository {
    pub(crate) fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CounterRepository for MemoryCounterRepository {
    async fn next_id(&self, name: &str) -> LibraryResult<i64> {
        let mut counters = lock(&self.db.counters)?;
        let last_id = counters.entry(name.to_string()).or_insert(0);
        *last_id += 1;
        Ok(*last_id)
    }

    async fn last_id(&self, name: &str) -> LibraryResult<i64> {
        let counters = lock(&self.db.counters)?;
        Ok(counters.get(name).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use uuid::Uuid;
    use crate::counters::repository::CounterRepository;
    use crate::counters::repository::memory_counter_repository::MemoryCounterRepository;
    use crate::utils::memory::memory_database;

    #[tokio::test]
    async fn test_should_start_counter_at_one() {
        let repo = MemoryCounterRepository::new(memory_database(Uuid::new_v4().to_string().as_str()));
        assert_eq!(0, repo.last_id("books").await.expect("should read counter"));
        assert_eq!(1, repo.next_id("books").await.expect("should increment"));
        assert_eq!(1, repo.next_id("loans").await.expect("should increment"));
        assert_eq!(1, repo.last_id("books").await.expect("should read counter"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_issue_unique_ids_concurrently() {
        let repo = Arc::new(MemoryCounterRepository::new(memory_database(Uuid::new_v4().to_string().as_str())));
        let mut handles = vec![];
        for _ in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                let mut ids = vec![];
                for _ in 0..50 {
                    ids.push(repo.next_id("loans").await.expect("should increment"));
                }
                ids
            }));
        }
        let mut all = vec![];
        for handle in handles {
            let ids = handle.await.expect("should join");
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            all.extend(ids);
        }
        all.sort();
        all.dedup();
        assert_eq!(400, all.len());
        assert_eq!(400, repo.last_id("loans").await.expect("should read counter"));
    }
}
