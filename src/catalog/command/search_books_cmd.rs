use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::BookStatus;

pub(crate) struct SearchBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl SearchBooksCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchBooksCommandRequest {
    pub keyword: Option<String>,
    pub status: Option<BookStatus>,
}

#[derive(Debug, Serialize)]
pub struct SearchBooksCommandResponse {
    pub books: Vec<BookDto>,
}

#[async_trait]
impl Command<SearchBooksCommandRequest, SearchBooksCommandResponse> for SearchBooksCommand {
    async fn execute(&self, req: SearchBooksCommandRequest) -> Result<SearchBooksCommandResponse, CommandError> {
        let keyword = req.keyword.as_deref().filter(|k| !k.trim().is_empty());
        let books = match req.status {
            Some(status) => self.catalog_service.find_books_by_status(status).await?
                .into_iter().filter(|b| keyword.map(|k| b.matches(k)).unwrap_or(true)).collect(),
            None => self.catalog_service.search_books(keyword).await?,
        };
        Ok(SearchBooksCommandResponse { books })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::books::dto::BookDto;
    use crate::catalog::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::library::BookStatus;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_search_books() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let svc = factory::create_catalog_service(&config, RepositoryStore::Memory).await;
        for (title, category) in [("Sách A", "Văn học"), ("Sách B", "Khoa học"), ("Sách D", "Văn học")] {
            svc.add_book(&BookDto::new(title, "Tác giả", 2020, category)).await.expect("should add book");
        }
        let cmd = SearchBooksCommand::new(svc);
        let res = cmd.execute(SearchBooksCommandRequest { keyword: Some("văn".to_string()), status: None })
            .await.expect("should search books");
        assert_eq!(2, res.books.len());
        let res = cmd.execute(SearchBooksCommandRequest { keyword: None, status: Some(BookStatus::Borrowed) })
            .await.expect("should search books");
        assert!(res.books.is_empty());
    }
}
