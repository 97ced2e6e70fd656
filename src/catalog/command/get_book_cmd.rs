use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl GetBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetBookCommandRequest {
    pub(crate) book_id: i64,
}

#[derive(Debug, Serialize)]
pub struct GetBookCommandResponse {
    pub book: BookDto,
}

#[async_trait]
impl Command<GetBookCommandRequest, GetBookCommandResponse> for GetBookCommand {
    async fn execute(&self, req: GetBookCommandRequest) -> Result<GetBookCommandResponse, CommandError> {
        self.catalog_service.find_book_by_id(req.book_id)
            .await.map_err(CommandError::from).map(|book| GetBookCommandResponse { book })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::books::dto::BookDto;
    use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_get_book() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let svc = factory::create_catalog_service(&config, RepositoryStore::Memory).await;
        let saved = svc.add_book(&BookDto::new("Sách B", "Tác giả B", 2021, "Khoa học")).await.expect("should add book");
        let cmd = GetBookCommand::new(svc);
        let res = cmd.execute(GetBookCommandRequest { book_id: saved.book_id }).await.expect("should get book");
        assert_eq!("Sách B", res.book.title.as_str());
        let missing = cmd.execute(GetBookCommandRequest { book_id: 404 }).await;
        assert!(matches!(missing, Err(CommandError::NotFound { .. })));
    }
}
