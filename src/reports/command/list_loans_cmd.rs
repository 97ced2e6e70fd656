use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::reports::domain::ReportService;
use crate::reports::dto::LoanDetailsDto;

pub(crate) struct ListLoansCommand {
    report_service: Box<dyn ReportService>,
}

impl ListLoansCommand {
    pub(crate) fn new(report_service: Box<dyn ReportService>) -> Self {
        Self {
            report_service,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListLoansCommandResponse {
    pub loans: Vec<LoanDetailsDto>,
}

#[async_trait]
impl Command<(), ListLoansCommandResponse> for ListLoansCommand {
    async fn execute(&self, _req: ()) -> Result<ListLoansCommandResponse, CommandError> {
        self.report_service.list_loan_details()
            .await.map_err(CommandError::from).map(|loans| ListLoansCommandResponse { loans })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::reports::command::list_loans_cmd::ListLoansCommand;
    use crate::reports::factory;
    use crate::seed::seed_sample_data;

    #[tokio::test]
    async fn test_should_run_list_loans() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        seed_sample_data(&config, RepositoryStore::Memory).await.expect("should seed sample data");
        let cmd = ListLoansCommand::new(factory::create_report_service(&config, RepositoryStore::Memory).await);
        let res = cmd.execute(()).await.expect("should list loans");
        assert_eq!(2, res.loans.len());
        assert!(res.loans.iter().all(|l| l.is_returned));
    }
}
