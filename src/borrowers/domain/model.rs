use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BorrowerEntity is a library member who can borrow books.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BorrowerEntity {
    pub borrower_id: i64,
    pub version: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BorrowerEntity {
    pub fn new(borrower_id: i64, name: &str, phone: &str, email: &str) -> Self {
        Self {
            borrower_id,
            version: 0,
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for BorrowerEntity {
    fn id(&self) -> i64 {
        self.borrower_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}
