use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{BookStatus, LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{from_ddb, get_item, number_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, query_items, string_date};

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(book_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", number_attribute(entity.book_id))
            .update_expression("SET version = :version, title = :title, author = :author, published_year = :published_year, category = :category, book_status = :book_status, updated_at = :updated_at")
            .expression_attribute_values(":old_version", number_attribute(entity.version))
            .expression_attribute_values(":version", number_attribute(entity.version + 1))
            .expression_attribute_values(":title", AttributeValue::S(entity.title.to_string()))
            .expression_attribute_values(":author", AttributeValue::S(entity.author.to_string()))
            .expression_attribute_values(":published_year", number_attribute(entity.published_year))
            .expression_attribute_values(":category", AttributeValue::S(entity.category.to_string()))
            .expression_attribute_values(":book_status", AttributeValue::S(entity.book_status.to_string()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        let item = get_item(&self.client, self.table_name.as_str(), "book_id", number_attribute(id)).await?;
        item.as_ref().map(map_to_book).ok_or_else(|| LibraryError::not_found(
            format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("book_id", number_attribute(id))
            .condition_expression("attribute_exists(book_id)")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn scan(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        self.query(&HashMap::new(), page, page_size).await
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        let (items, next_page) = query_items(&self.client, self.table_name.as_str(),
                                             Some((self.index_name.as_str(), "book_status")),
                                             predicate, page, page_size).await?;
        let records = items.iter().map(map_to_book).collect();
        Ok(from_ddb(page, page_size, next_page, records))
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn find_by_status(&self, status: BookStatus,
                            page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        let predicate = HashMap::from([
            ("book_status".to_string(), status.to_string()),
        ]);
        self.query(&predicate, page, page_size).await
    }

    async fn delete_available(&self, id: i64) -> LibraryResult<usize> {
        let res = self.client.delete_item()
            .table_name(self.table_name.as_str())
            .key("book_id", number_attribute(id))
            .condition_expression("attribute_exists(book_id) AND book_status = :available")
            .expression_attribute_values(":available", AttributeValue::S(BookStatus::Available.to_string()))
            .send()
            .await;
        match res.map_err(LibraryError::from) {
            Ok(_) => Ok(1),
            Err(LibraryError::NotFound { .. }) => {
                let book = self.get(id).await?;
                Err(LibraryError::invalid_state(format!("book {} is {}", id, book.book_status).as_str()))
            }
            Err(err) => Err(err),
        }
    }
}

pub(crate) fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        book_id: parse_number_attribute("book_id", map),
        version: parse_number_attribute("version", map),
        title: parse_string_attribute("title", map).unwrap_or_default(),
        author: parse_string_attribute("author", map).unwrap_or_default(),
        published_year: parse_number_attribute("published_year", map),
        category: parse_string_attribute("category", map).unwrap_or_default(),
        book_status: BookStatus::from(parse_string_attribute("book_status", map).unwrap_or_default()),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use rand::Rng;

    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::ddb_book_repository::{map_to_book, DDBBookRepository};
    use crate::core::library::{BookStatus, LibraryError};
    use crate::core::repository::{Collection, Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_table, parse_item, KeyDef};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = create_table(&client, "books", KeyDef::number("book_id"), Some(KeyDef::string("book_status"))).await;
                client
            });
    }

    fn new_book(title: &str) -> BookEntity {
        let id = rand::thread_rng().gen_range(1_000_000..i64::MAX / 2);
        BookEntity::new(id, title, "author", 2001, "Novel")
    }

    fn repository(client: Client) -> DDBBookRepository {
        DDBBookRepository::new(client, Collection::Books.table_name(), Collection::Books.index_name().as_str())
    }

    #[tokio::test]
    async fn test_should_map_book_item() {
        let book = BookEntity::new(5, "Sách A", "Tác giả A", 2022, "Lịch sử");
        let item = parse_item(serde_json::to_value(&book).expect("should serialize")).expect("should parse item");
        let mapped = map_to_book(&item);
        assert_eq!(book.book_id, mapped.book_id);
        assert_eq!(book.published_year, mapped.published_year);
        assert_eq!(book.book_status, mapped.book_status);
        assert_eq!(book.created_at, mapped.created_at);
    }

    #[tokio::test]
    #[ignore]
    async fn test_should_create_get_books() {
        let books_repo = repository(CLIENT.get().await.clone());
        let book = new_book("test book");
        assert_eq!(1, books_repo.create(&book).await.expect("should create book"));
        assert!(matches!(books_repo.create(&book).await, Err(LibraryError::DuplicateKey { .. })));

        let loaded = books_repo.get(book.book_id).await.expect("should return book");
        assert_eq!(book.book_id, loaded.book_id);
    }

    #[tokio::test]
    #[ignore]
    async fn test_should_create_update_books() {
        let books_repo = repository(CLIENT.get().await.clone());
        let mut book = new_book("test book");
        books_repo.create(&book).await.expect("should create book");

        book.title = "new title".to_string();
        book.book_status = BookStatus::Borrowed;
        assert_eq!(1, books_repo.update(&book).await.expect("should update book"));
        assert!(matches!(books_repo.update(&book).await, Err(LibraryError::InvalidState { .. })));

        let loaded = books_repo.get(book.book_id).await.expect("should return book");
        assert_eq!(book.title, loaded.title);
        assert_eq!(1, loaded.version);
        assert_eq!(BookStatus::Borrowed, loaded.book_status);
    }

    #[tokio::test]
    #[ignore]
    async fn test_should_create_query_books() {
        let books_repo = repository(CLIENT.get().await.clone());
        let title = format!("query title {}", rand::thread_rng().gen_range(0..1_000_000));
        for _ in 0..5 {
            let mut book = new_book(title.as_str());
            book.book_status = BookStatus::Borrowed;
            books_repo.create(&book).await.expect("should create book");
        }
        let predicate = HashMap::from([
            ("book_status".to_string(), BookStatus::Borrowed.to_string()),
            ("title".to_string(), title.clone()),
        ]);
        let res = books_repo.query(&predicate, None, 500).await.expect("should return books");
        assert_eq!(5, res.records.len());
        let res = books_repo.find_by_status(BookStatus::Borrowed, None, 500).await.expect("should return books");
        assert!(res.records.len() >= 5);
    }

    #[tokio::test]
    #[ignore]
    async fn test_should_create_delete_books() {
        let books_repo = repository(CLIENT.get().await.clone());
        let book = new_book("test book");
        books_repo.create(&book).await.expect("should create book");
        assert_eq!(1, books_repo.delete(book.book_id).await.expect("should delete book"));
        assert!(books_repo.get(book.book_id).await.is_err());
        assert!(matches!(books_repo.delete(book.book_id).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore]
    async fn test_should_not_delete_borrowed_book() {
        let books_repo = repository(CLIENT.get().await.clone());
        let mut book = new_book("borrowed book");
        book.book_status = BookStatus::Borrowed;
        books_repo.create(&book).await.expect("should create book");
        assert!(matches!(books_repo.delete_available(book.book_id).await, Err(LibraryError::InvalidState { .. })));
        assert!(books_repo.get(book.book_id).await.is_ok());

        let available = new_book("available book");
        books_repo.create(&available).await.expect("should create book");
        assert_eq!(1, books_repo.delete_available(available.book_id).await.expect("should delete book"));
        assert!(matches!(books_repo.delete_available(available.book_id).await, Err(LibraryError::NotFound { .. })));
    }
}
