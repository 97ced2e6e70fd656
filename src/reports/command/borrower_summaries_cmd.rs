use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::reports::domain::ReportService;
use crate::reports::dto::BorrowerSummaryDto;

pub(crate) struct BorrowerSummariesCommand {
    report_service: Box<dyn ReportService>,
}

impl BorrowerSummariesCommand {
    pub(crate) fn new(report_service: Box<dyn ReportService>) -> Self {
        Self {
            report_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BorrowerSummariesCommandRequest {
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BorrowerSummariesCommandResponse {
    pub borrowers: Vec<BorrowerSummaryDto>,
}

#[async_trait]
impl Command<BorrowerSummariesCommandRequest, BorrowerSummariesCommandResponse> for BorrowerSummariesCommand {
    async fn execute(&self, req: BorrowerSummariesCommandRequest) -> Result<BorrowerSummariesCommandResponse, CommandError> {
        let keyword = req.keyword.as_deref().filter(|k| !k.trim().is_empty());
        self.report_service.borrower_summaries(keyword)
            .await.map_err(CommandError::from).map(|borrowers| BorrowerSummariesCommandResponse { borrowers })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::library::BorrowerStatus;
    use crate::core::repository::RepositoryStore;
    use crate::reports::command::borrower_summaries_cmd::{BorrowerSummariesCommand, BorrowerSummariesCommandRequest};
    use crate::reports::factory;
    use crate::seed::seed_sample_data;

    #[tokio::test]
    async fn test_should_run_borrower_summaries() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        seed_sample_data(&config, RepositoryStore::Memory).await.expect("should seed sample data");
        let cmd = BorrowerSummariesCommand::new(factory::create_report_service(&config, RepositoryStore::Memory).await);
        let res = cmd.execute(BorrowerSummariesCommandRequest { keyword: Some("0123".to_string()) })
            .await.expect("should summarize borrowers");
        assert_eq!(1, res.borrowers.len());
        assert_eq!(BorrowerStatus::AllReturned, res.borrowers[0].status);
    }
}
