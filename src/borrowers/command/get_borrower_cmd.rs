use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::borrowers::domain::BorrowerService;
use crate::borrowers::dto::BorrowerDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetBorrowerCommand {
    borrower_service: Box<dyn BorrowerService>,
}

impl GetBorrowerCommand {
    pub(crate) fn new(borrower_service: Box<dyn BorrowerService>) -> Self {
        Self {
            borrower_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetBorrowerCommandRequest {
    pub(crate) borrower_id: i64,
}

#[derive(Debug, Serialize)]
pub struct GetBorrowerCommandResponse {
    pub borrower: BorrowerDto,
}

#[async_trait]
impl Command<GetBorrowerCommandRequest, GetBorrowerCommandResponse> for GetBorrowerCommand {
    async fn execute(&self, req: GetBorrowerCommandRequest) -> Result<GetBorrowerCommandResponse, CommandError> {
        self.borrower_service.find_borrower_by_id(req.borrower_id)
            .await.map_err(CommandError::from).map(|borrower| GetBorrowerCommandResponse { borrower })
    }
}
