use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::library::BookStatus;
use crate::utils::date::serializer;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub book_id: i64,
    pub version: i64,
    pub title: String,
    pub author: String,
    pub published_year: i64,
    pub category: String,
    pub book_status: BookStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookDto {
    pub fn new(title: &str, author: &str, published_year: i64, category: &str) -> BookDto {
        BookDto {
            book_id: 0,
            version: 0,
            title: title.to_string(),
            author: author.to_string(),
            published_year,
            category: category.to_string(),
            book_status: BookStatus::Available,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // case-insensitive match on title, author or category
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.title.to_lowercase().contains(&keyword) ||
            self.author.to_lowercase().contains(&keyword) ||
            self.category.to_lowercase().contains(&keyword)
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> i64 {
        self.book_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Book for BookDto {
    fn status(&self) -> BookStatus {
        self.book_status
    }
}

#[cfg(test)]
mod tests {
    use crate::books::dto::BookDto;
    use crate::core::library::BookStatus;

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookDto::new("Sách B", "Tác giả B", 2021, "Khoa học");
        assert_eq!("Sách B", book.title.as_str());
        assert_eq!(BookStatus::Available, book.book_status);
        assert!(book.matches("khoa"));
        assert!(book.matches("TÁC GIẢ"));
        assert!(!book.matches("lịch sử"));
    }
}
