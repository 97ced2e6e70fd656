use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl RemoveBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveBookCommandRequest {
    pub(crate) book_id: i64,
}

#[derive(Debug, Serialize)]
pub struct RemoveBookCommandResponse {
    pub book_id: i64,
}

#[async_trait]
impl Command<RemoveBookCommandRequest, RemoveBookCommandResponse> for RemoveBookCommand {
    async fn execute(&self, req: RemoveBookCommandRequest) -> Result<RemoveBookCommandResponse, CommandError> {
        self.catalog_service.remove_book(req.book_id)
            .await.map_err(CommandError::from).map(|_| RemoveBookCommandResponse { book_id: req.book_id })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::books::dto::BookDto;
    use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_remove_book() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let svc = factory::create_catalog_service(&config, RepositoryStore::Memory).await;
        let saved = svc.add_book(&BookDto::new("Sách C", "Tác giả C", 2019, "Lịch sử")).await.expect("should add book");
        let cmd = RemoveBookCommand::new(svc);
        let res = cmd.execute(RemoveBookCommandRequest { book_id: saved.book_id }).await.expect("should remove book");
        assert_eq!(saved.book_id, res.book_id);
        let again = cmd.execute(RemoveBookCommandRequest { book_id: saved.book_id }).await;
        assert!(matches!(again, Err(CommandError::NotFound { .. })));
    }
}
