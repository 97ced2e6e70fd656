use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::reports::domain::ReportService;
use crate::reports::dto::BookRow;

pub(crate) struct ListBooksCommand {
    report_service: Box<dyn ReportService>,
}

impl ListBooksCommand {
    pub(crate) fn new(report_service: Box<dyn ReportService>) -> Self {
        Self {
            report_service,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListBooksCommandResponse {
    pub books: Vec<BookRow>,
}

#[async_trait]
impl Command<(), ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, _req: ()) -> Result<ListBooksCommandResponse, CommandError> {
        self.report_service.list_books()
            .await.map_err(CommandError::from).map(|books| ListBooksCommandResponse { books })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::library::BookStatus;
    use crate::core::repository::RepositoryStore;
    use crate::reports::command::list_books_cmd::ListBooksCommand;
    use crate::reports::factory;
    use crate::seed::seed_sample_data;

    #[tokio::test]
    async fn test_should_run_list_books() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        seed_sample_data(&config, RepositoryStore::Memory).await.expect("should seed sample data");
        let cmd = ListBooksCommand::new(factory::create_report_service(&config, RepositoryStore::Memory).await);
        let res = cmd.execute(()).await.expect("should list books");
        assert_eq!(vec![1, 2], res.books.iter().map(|b| b.book_id).collect::<Vec<i64>>());
        assert!(res.books.iter().all(|b| b.status == BookStatus::Available));
    }
}
