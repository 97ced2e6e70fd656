pub mod ddb_borrower_repository;
pub mod memory_borrower_repository;

use async_trait::async_trait;
use crate::borrowers::domain::model::BorrowerEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

#[async_trait]
pub(crate) trait BorrowerRepository: Repository<BorrowerEntity> {
    // Deletes the borrower only while no open loan references it. Fails with InvalidState
    // when a loan is open and NotFound when the borrower does not exist.
    async fn delete_without_open_loans(&self, id: i64) -> LibraryResult<usize>;
}
