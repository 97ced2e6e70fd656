use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::reports::domain::ReportService;
use crate::reports::dto::BorrowerRow;

pub(crate) struct ListBorrowersCommand {
    report_service: Box<dyn ReportService>,
}

impl ListBorrowersCommand {
    pub(crate) fn new(report_service: Box<dyn ReportService>) -> Self {
        Self {
            report_service,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListBorrowersCommandResponse {
    pub borrowers: Vec<BorrowerRow>,
}

#[async_trait]
impl Command<(), ListBorrowersCommandResponse> for ListBorrowersCommand {
    async fn execute(&self, _req: ()) -> Result<ListBorrowersCommandResponse, CommandError> {
        self.report_service.list_borrowers()
            .await.map_err(CommandError::from).map(|borrowers| ListBorrowersCommandResponse { borrowers })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::reports::command::list_borrowers_cmd::ListBorrowersCommand;
    use crate::reports::factory;

    #[tokio::test]
    async fn test_should_run_list_borrowers_on_empty_branch() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let cmd = ListBorrowersCommand::new(factory::create_report_service(&config, RepositoryStore::Memory).await);
        let res = cmd.execute(()).await.expect("should list borrowers");
        assert!(res.borrowers.is_empty());
    }
}
