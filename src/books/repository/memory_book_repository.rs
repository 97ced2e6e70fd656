use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{BookStatus, LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::memory::{lock, MemoryDatabase, MemoryRecord, MemoryRepository};

pub(crate) type MemoryBookRepository = MemoryRepository<BookEntity>;

impl MemoryRecord for BookEntity {
    fn table(db: &MemoryDatabase) -> &Mutex<BTreeMap<i64, Self>> {
        &db.books
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    fn label() -> &'static str {
        "book"
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_by_status(&self, status: BookStatus,
                            page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        let predicate = HashMap::from([("book_status".to_string(), status.to_string())]);
        self.query(&predicate, page, page_size).await
    }

    async fn delete_available(&self, id: i64) -> LibraryResult<usize> {
        let mut books = lock(&self.database().books)?;
        match books.get(&id) {
            Some(stored) if stored.book_status == BookStatus::Available => {}
            Some(stored) => {
                return Err(LibraryError::invalid_state(
                    format!("book {} is {}", id, stored.book_status).as_str()));
            }
            None => return Err(LibraryError::not_found(format!("book not found for {}", id).as_str())),
        }
        books.remove(&id);
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::core::library::{BookStatus, LibraryError};
    use crate::core::repository::Repository;
    use crate::utils::memory::memory_database;

    #[tokio::test]
    async fn test_should_find_books_by_status() {
        let repo = MemoryBookRepository::new(memory_database(Uuid::new_v4().to_string().as_str()));
        for i in 1..=6 {
            let mut book = BookEntity::new(i, format!("title {}", i).as_str(), "author", 2000, "Novel");
            if i % 3 == 0 {
                book.book_status = BookStatus::Borrowed;
            }
            repo.create(&book).await.expect("should create book");
        }
        let borrowed = repo.find_by_status(BookStatus::Borrowed, None, 10).await.expect("should query books");
        assert_eq!(vec![3, 6], borrowed.records.iter().map(|b| b.book_id).collect::<Vec<i64>>());
        let available = repo.find_by_status(BookStatus::Available, None, 3).await.expect("should query books");
        assert_eq!(3, available.records.len());
        assert!(available.next_page.is_some());
    }

    #[tokio::test]
    async fn test_should_delete_only_available_book() {
        let repo = MemoryBookRepository::new(memory_database(Uuid::new_v4().to_string().as_str()));
        let mut book = BookEntity::new(1, "Sách A", "Tác giả A", 2022, "Lịch sử");
        book.book_status = BookStatus::Borrowed;
        repo.create(&book).await.expect("should create book");
        repo.create(&BookEntity::new(2, "Sách B", "Tác giả B", 2021, "Khoa học")).await.expect("should create book");

        assert!(matches!(repo.delete_available(1).await, Err(LibraryError::InvalidState { .. })));
        assert_eq!(BookStatus::Borrowed, repo.get(1).await.expect("should keep book").book_status);
        assert_eq!(1, repo.delete_available(2).await.expect("should delete book"));
        assert!(matches!(repo.delete_available(2).await, Err(LibraryError::NotFound { .. })));
    }
}
