use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{BookStatus, LibraryError, LibraryResult};
use crate::core::repository::{scan_all, Collection};
use crate::counters::repository::CounterRepository;
use crate::gateway::events::{publish_committed, EventPublisher};

pub(crate) struct CatalogServiceImpl {
    page_size: usize,
    book_repository: Box<dyn BookRepository>,
    counter_repository: Box<dyn CounterRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      counter_repository: Box<dyn CounterRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            page_size: config.page_size,
            book_repository,
            counter_repository,
            events_publisher,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        if book.title.trim().is_empty() {
            return Err(LibraryError::validation("book title is required", None));
        }
        let mut entity = BookEntity::from(book);
        entity.book_id = self.counter_repository.next_id(Collection::Books.table_name()).await?;
        entity.version = 0;
        entity.book_status = BookStatus::Available;
        self.book_repository.create(&entity).await?;
        let saved = BookDto::from(&entity);
        publish_committed(self.events_publisher.as_ref(), DomainEvent::added(
            "books", "books", entity.book_id.to_string().as_str(), &HashMap::new(), &saved)).await;
        Ok(saved)
    }

    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        let existing = self.book_repository.get(book.book_id).await?;
        let mut entity = BookEntity::from(book);
        entity.book_status = existing.book_status;
        entity.created_at = existing.created_at;
        entity.updated_at = Utc::now().naive_utc();
        self.book_repository.update(&entity).await?;
        let saved = self.find_book_by_id(book.book_id).await?;
        publish_committed(self.events_publisher.as_ref(), DomainEvent::updated(
            "books", "books", book.book_id.to_string().as_str(), &HashMap::new(), &saved)).await;
        Ok(saved)
    }

    async fn remove_book(&self, id: i64) -> LibraryResult<()> {
        self.book_repository.delete_available(id).await?;
        info!("removed book {}", id);
        publish_committed(self.events_publisher.as_ref(), DomainEvent::deleted(
            "books", "books", id.to_string().as_str(), &HashMap::new(), &id)).await;
        Ok(())
    }

    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn search_books(&self, keyword: Option<&str>) -> LibraryResult<Vec<BookDto>> {
        let mut records = scan_all(self.book_repository.as_ref(), self.page_size).await?;
        records.sort_by_key(|b| b.book_id);
        Ok(records.iter().map(BookDto::from)
            .filter(|b| keyword.map(|k| b.matches(k)).unwrap_or(true))
            .collect())
    }

    async fn find_books_by_status(&self, status: BookStatus) -> LibraryResult<Vec<BookDto>> {
        let mut books = vec![];
        let mut next_page: Option<String> = None;
        loop {
            let res = self.book_repository.find_by_status(status, next_page.as_deref(), self.page_size).await?;
            books.extend(res.records.iter().map(BookDto::from));
            next_page = res.next_page;
            if next_page.is_none() {
                break;
            }
        }
        books.sort_by_key(|b| b.book_id);
        Ok(books)
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id,
            version: other.version,
            title: other.title.to_string(),
            author: other.author.to_string(),
            published_year: other.published_year,
            category: other.category.to_string(),
            book_status: other.book_status,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.book_id,
            version: other.version,
            title: other.title.to_string(),
            author: other.author.to_string(),
            published_year: other.published_year,
            category: other.category.to_string(),
            book_status: other.book_status,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::books::dto::BookDto;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::library::{BookStatus, LibraryError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::loans::factory::create_loan_service;
    use crate::seed::seed_reference_data;
    use crate::utils::date::parse_date;

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Box<dyn CatalogService>> = AsyncOnce::new(async {
                let config = Configuration::new(Uuid::new_v4().to_string().as_str());
                factory::create_catalog_service(&config, RepositoryStore::Memory).await
            });
    }

    #[tokio::test]
    async fn test_should_add_book() {
        let catalog_svc = SUT_SVC.get().await;

        let book = catalog_svc.add_book(&BookDto::new("Sách A", "Tác giả A", 2020, "Văn học"))
            .await.expect("should add book");
        assert!(book.book_id > 0);
        assert_eq!(BookStatus::Available, book.book_status);

        let loaded = catalog_svc.find_book_by_id(book.book_id).await.expect("should return book");
        assert_eq!(book, loaded);
    }

    #[tokio::test]
    async fn test_should_update_book() {
        let catalog_svc = SUT_SVC.get().await;

        let mut book = catalog_svc.add_book(&BookDto::new("Sách B", "Tác giả B", 2021, "Khoa học"))
            .await.expect("should add book");
        book.title = "Sách B (tái bản)".to_string();
        book.book_status = BookStatus::Borrowed;
        let saved = catalog_svc.update_book(&book).await.expect("should update book");
        assert_eq!("Sách B (tái bản)", saved.title.as_str());
        assert_eq!(BookStatus::Available, saved.book_status);
        assert_eq!(1, saved.version);

        let stale = catalog_svc.update_book(&book).await;
        assert!(matches!(stale, Err(LibraryError::InvalidState { .. })));
    }

    #[tokio::test]
    async fn test_should_search_books() {
        let catalog_svc = SUT_SVC.get().await;
        let author = Uuid::new_v4().to_string();
        let book = catalog_svc.add_book(&BookDto::new("Dune", author.as_str(), 1965, "Sci-Fi"))
            .await.expect("should add book");
        let res = catalog_svc.search_books(Some(author.to_uppercase().as_str())).await.expect("should search books");
        assert_eq!(vec![book.book_id], res.iter().map(|b| b.book_id).collect::<Vec<i64>>());
        let available = catalog_svc.find_books_by_status(BookStatus::Available).await.expect("should find books");
        assert!(available.iter().any(|b| b.book_id == book.book_id));
    }

    #[tokio::test]
    async fn test_should_remove_book() {
        let catalog_svc = SUT_SVC.get().await;

        let book = catalog_svc.add_book(&BookDto::new("Sách C", "Tác giả C", 2019, "Lịch sử"))
            .await.expect("should add book");
        catalog_svc.remove_book(book.book_id).await.expect("should remove book");

        let loaded = catalog_svc.find_book_by_id(book.book_id).await;
        assert!(matches!(loaded, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_not_remove_book_on_loan() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        seed_reference_data(&config, RepositoryStore::Memory).await.expect("should seed reference data");
        let catalog_svc = factory::create_catalog_service(&config, RepositoryStore::Memory).await;
        let loans = create_loan_service(&config, RepositoryStore::Memory).await;
        loans.borrow_book(1, 1, 1, parse_date("2022-01-01").unwrap()).await.expect("should borrow book");

        assert!(matches!(catalog_svc.remove_book(1).await, Err(LibraryError::InvalidState { .. })));
        let borrowed = catalog_svc.find_books_by_status(BookStatus::Borrowed).await.expect("should find books");
        assert_eq!(vec![1], borrowed.iter().map(|b| b.book_id).collect::<Vec<i64>>());
    }
}
