use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::library::{BookStatus, BorrowerStatus, LoanStatus};
use crate::utils::date::{opt_serializer, serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerRow {
    pub borrower_id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRow {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub published_year: i64,
    pub category: String,
    pub status: BookStatus,
    pub status_label: String,
}

// LoanDetailsDto is one loan enriched with the names of the records it references.
// A name is None when the referenced record no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDetailsDto {
    pub loan_id: i64,
    pub borrower_id: i64,
    pub borrower_name: Option<String>,
    pub book_id: i64,
    pub book_title: Option<String>,
    pub employee_id: i64,
    pub employee_name: Option<String>,
    #[serde(with = "serializer")]
    pub borrow_date: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub return_date: Option<NaiveDateTime>,
    pub is_returned: bool,
    pub status: LoanStatus,
    pub status_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerSummaryDto {
    pub borrower_id: i64,
    pub name: String,
    pub phone: String,
    pub open_loans: usize,
    pub total_loans: usize,
    pub status: BorrowerStatus,
    pub status_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticDto {
    pub key: String,
    pub count: usize,
}

impl StatisticDto {
    pub fn new(key: &str, count: usize) -> Self {
        Self {
            key: key.to_string(),
            count,
        }
    }
}
