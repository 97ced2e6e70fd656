pub mod service;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::core::library::LibraryResult;
use crate::reports::dto::{BookRow, BorrowerRow, BorrowerSummaryDto, LoanDetailsDto, StatisticDto};

// Category of loans whose book was removed.
pub const OTHER_CATEGORY: &str = "Other";

#[async_trait]
pub(crate) trait ReportService: Sync + Send {
    async fn list_borrowers(&self) -> LibraryResult<Vec<BorrowerRow>>;
    async fn list_books(&self) -> LibraryResult<Vec<BookRow>>;
    // one row per loan ordered by loan_id, join misses leave the name empty
    async fn list_loan_details(&self) -> LibraryResult<Vec<LoanDetailsDto>>;
    async fn borrower_summaries(&self, keyword: Option<&str>) -> LibraryResult<Vec<BorrowerSummaryDto>>;
    async fn top_categories(&self, since: Option<NaiveDateTime>, limit: usize) -> LibraryResult<Vec<StatisticDto>>;
    async fn top_borrowers(&self, limit: usize) -> LibraryResult<Vec<StatisticDto>>;
}
