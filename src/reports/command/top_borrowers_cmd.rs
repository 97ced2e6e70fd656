use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::reports::command::DEFAULT_TOP_LIMIT;
use crate::reports::domain::ReportService;
use crate::reports::dto::StatisticDto;

pub(crate) struct TopBorrowersCommand {
    report_service: Box<dyn ReportService>,
}

impl TopBorrowersCommand {
    pub(crate) fn new(report_service: Box<dyn ReportService>) -> Self {
        Self {
            report_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TopBorrowersCommandRequest {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TopBorrowersCommandResponse {
    pub borrowers: Vec<StatisticDto>,
}

#[async_trait]
impl Command<TopBorrowersCommandRequest, TopBorrowersCommandResponse> for TopBorrowersCommand {
    async fn execute(&self, req: TopBorrowersCommandRequest) -> Result<TopBorrowersCommandResponse, CommandError> {
        self.report_service.top_borrowers(req.limit.unwrap_or(DEFAULT_TOP_LIMIT))
            .await.map_err(CommandError::from).map(|borrowers| TopBorrowersCommandResponse { borrowers })
    }
}
