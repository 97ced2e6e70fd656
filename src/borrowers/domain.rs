pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::borrowers::dto::BorrowerDto;
use crate::core::library::LibraryResult;

#[async_trait]
pub(crate) trait BorrowerService: Sync + Send {
    async fn add_borrower(&self, borrower: &BorrowerDto) -> LibraryResult<BorrowerDto>;
    async fn update_borrower(&self, borrower: &BorrowerDto) -> LibraryResult<BorrowerDto>;
    async fn remove_borrower(&self, id: i64) -> LibraryResult<()>;
    async fn find_borrower_by_id(&self, id: i64) -> LibraryResult<BorrowerDto>;
    async fn search_borrowers(&self, keyword: Option<&str>) -> LibraryResult<Vec<BorrowerDto>>;
}
