use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::reports::command::DEFAULT_TOP_LIMIT;
use crate::reports::domain::ReportService;
use crate::reports::dto::StatisticDto;

pub(crate) struct TopCategoriesCommand {
    report_service: Box<dyn ReportService>,
}

impl TopCategoriesCommand {
    pub(crate) fn new(report_service: Box<dyn ReportService>) -> Self {
        Self {
            report_service,
        }
    }
}

// `days` restricts the ranking to loans borrowed within the last days
#[derive(Debug, Default, Deserialize)]
pub struct TopCategoriesCommandRequest {
    pub days: Option<i64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TopCategoriesCommandResponse {
    pub categories: Vec<StatisticDto>,
}

#[async_trait]
impl Command<TopCategoriesCommandRequest, TopCategoriesCommandResponse> for TopCategoriesCommand {
    async fn execute(&self, req: TopCategoriesCommandRequest) -> Result<TopCategoriesCommandResponse, CommandError> {
        if let Some(days) = req.days.filter(|d| *d < 0) {
            return Err(CommandError::Validation { message: format!("invalid number of days {}", days), reason_code: None });
        }
        let since = req.days.map(|d| Utc::now().naive_utc() - Duration::days(d));
        self.report_service.top_categories(since, req.limit.unwrap_or(DEFAULT_TOP_LIMIT))
            .await.map_err(CommandError::from).map(|categories| TopCategoriesCommandResponse { categories })
    }
}
