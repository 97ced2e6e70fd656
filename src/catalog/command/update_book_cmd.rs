use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::BookStatus;

pub(crate) struct UpdateBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateBookCommandRequest {
    #[serde(default)]
    pub book_id: i64,
    pub version: i64,
    pub title: String,
    pub author: String,
    pub published_year: i64,
    #[serde(default)]
    pub category: String,
}

impl UpdateBookCommandRequest {
    pub fn build_book(&self) -> BookDto {
        BookDto {
            book_id: self.book_id,
            version: self.version,
            title: self.title.to_string(),
            author: self.author.to_string(),
            published_year: self.published_year,
            category: self.category.to_string(),
            // replaced by the stored status
            book_status: BookStatus::Available,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateBookCommandResponse {
    pub book: BookDto,
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.catalog_service.update_book(&book)
            .await.map_err(CommandError::from).map(|book| UpdateBookCommandResponse { book })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::books::dto::BookDto;
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_update_book() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let svc = factory::create_catalog_service(&config, RepositoryStore::Memory).await;
        let saved = svc.add_book(&BookDto::new("Sách A", "Tác giả A", 2020, "Văn học")).await.expect("should add book");
        let cmd = UpdateBookCommand::new(svc);
        let req = || UpdateBookCommandRequest {
            book_id: saved.book_id,
            version: 0,
            title: "Sách A".to_string(),
            author: "Tác giả A".to_string(),
            published_year: 2022,
            category: "Văn học".to_string(),
        };
        let res = cmd.execute(req()).await.expect("should update book");
        assert_eq!(2022, res.book.published_year);
        let stale = cmd.execute(req()).await;
        assert!(matches!(stale, Err(CommandError::InvalidState { .. })));
    }
}
