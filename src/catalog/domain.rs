pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::library::{BookStatus, LibraryResult};

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    // updates descriptive fields only; the status belongs to the loan lifecycle
    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn remove_book(&self, id: i64) -> LibraryResult<()>;
    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto>;
    async fn search_books(&self, keyword: Option<&str>) -> LibraryResult<Vec<BookDto>>;
    async fn find_books_by_status(&self, status: BookStatus) -> LibraryResult<Vec<BookDto>>;
}
