pub mod ddb_counter_repository;
pub mod memory_counter_repository;

use async_trait::async_trait;
use crate::core::library::LibraryResult;

// CounterRepository issues sequential ids, one counter per collection.
#[async_trait]
pub(crate) trait CounterRepository: Sync + Send {
    // atomically increments the counter and returns the new value, 1 for a fresh counter
    async fn next_id(&self, name: &str) -> LibraryResult<i64>;

    // the last issued id or 0 when nothing was issued yet
    async fn last_id(&self, name: &str) -> LibraryResult<i64>;
}
