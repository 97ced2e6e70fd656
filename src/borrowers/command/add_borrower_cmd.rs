use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::borrowers::domain::BorrowerService;
use crate::borrowers::dto::BorrowerDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBorrowerCommand {
    borrower_service: Box<dyn BorrowerService>,
}

impl AddBorrowerCommand {
    pub(crate) fn new(borrower_service: Box<dyn BorrowerService>) -> Self {
        Self {
            borrower_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBorrowerCommandRequest {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) phone: String,
    #[serde(default)]
    pub(crate) email: String,
}

impl AddBorrowerCommandRequest {
    pub fn new(name: &str, phone: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }

    pub fn build_borrower(&self) -> BorrowerDto {
        BorrowerDto::new(self.name.as_str(), self.phone.as_str(), self.email.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct AddBorrowerCommandResponse {
    pub borrower: BorrowerDto,
}

#[async_trait]
impl Command<AddBorrowerCommandRequest, AddBorrowerCommandResponse> for AddBorrowerCommand {
    async fn execute(&self, req: AddBorrowerCommandRequest) -> Result<AddBorrowerCommandResponse, CommandError> {
        let borrower = req.build_borrower();
        self.borrower_service.add_borrower(&borrower)
            .await.map_err(CommandError::from).map(|borrower| AddBorrowerCommandResponse { borrower })
    }
}
