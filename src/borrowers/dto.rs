use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BorrowerDto {
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

impl BorrowerDto {
    pub fn new(name: &str, phone: &str, email: &str) -> Self {
        Self {
            borrower_id: 0,
            version: 0,
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // case-insensitive match on name or phone
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.name.to_lowercase().contains(&keyword) || self.phone.contains(&keyword)
    }
}

impl Identifiable for BorrowerDto {
    fn id(&self) -> i64 {
        self.borrower_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}
