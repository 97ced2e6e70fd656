use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::borrowers::domain::BorrowerService;
use crate::borrowers::dto::BorrowerDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct SearchBorrowersCommand {
    borrower_service: Box<dyn BorrowerService>,
}

impl SearchBorrowersCommand {
    pub(crate) fn new(borrower_service: Box<dyn BorrowerService>) -> Self {
        Self {
            borrower_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchBorrowersCommandRequest {
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchBorrowersCommandResponse {
    pub borrowers: Vec<BorrowerDto>,
}

#[async_trait]
impl Command<SearchBorrowersCommandRequest, SearchBorrowersCommandResponse> for SearchBorrowersCommand {
    async fn execute(&self, req: SearchBorrowersCommandRequest) -> Result<SearchBorrowersCommandResponse, CommandError> {
        let keyword = req.keyword.as_deref().filter(|k| !k.trim().is_empty());
        self.borrower_service.search_borrowers(keyword)
            .await.map_err(CommandError::from).map(|borrowers| SearchBorrowersCommandResponse { borrowers })
    }
}
