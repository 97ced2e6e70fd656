use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::borrowers::domain::BorrowerService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveBorrowerCommand {
    borrower_service: Box<dyn BorrowerService>,
}

impl RemoveBorrowerCommand {
    pub(crate) fn new(borrower_service: Box<dyn BorrowerService>) -> Self {
        Self {
            borrower_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveBorrowerCommandRequest {
    pub(crate) borrower_id: i64,
}

#[derive(Debug, Serialize)]
pub struct RemoveBorrowerCommandResponse {
    pub borrower_id: i64,
}

#[async_trait]
impl Command<RemoveBorrowerCommandRequest, RemoveBorrowerCommandResponse> for RemoveBorrowerCommand {
    async fn execute(&self, req: RemoveBorrowerCommandRequest) -> Result<RemoveBorrowerCommandResponse, CommandError> {
        self.borrower_service.remove_borrower(req.borrower_id)
            .await.map_err(CommandError::from).map(|_| RemoveBorrowerCommandResponse { borrower_id: req.borrower_id })
    }
}
