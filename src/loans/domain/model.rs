use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::LoanStatus;
use crate::utils::date::{opt_serializer, serializer};

// LoanEntity records one book lent to one borrower by one employee. A loan is open
// until it is returned and never reopens.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct LoanEntity {
    pub loan_id: i64,
    pub version: i64,
    pub borrower_id: i64,
    pub book_id: i64,
    pub employee_id: i64,
    #[serde(with = "serializer")]
    pub borrow_date: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub return_date: Option<NaiveDateTime>,
    pub is_returned: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl LoanEntity {
    pub fn new(loan_id: i64, borrower_id: i64, book_id: i64, employee_id: i64, borrow_date: NaiveDateTime) -> Self {
        Self {
            loan_id,
            version: 0,
            borrower_id,
            book_id,
            employee_id,
            borrow_date,
            return_date: None,
            is_returned: false,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // the closed copy of this loan, written back by the return operation
    pub fn returned(&self, return_date: NaiveDateTime) -> Self {
        let mut closed = self.clone();
        closed.is_returned = true;
        closed.return_date = Some(return_date);
        closed.updated_at = Utc::now().naive_utc();
        closed
    }

    pub fn status(&self) -> LoanStatus {
        LoanStatus::from_returned(self.is_returned)
    }
}

impl Identifiable for LoanEntity {
    fn id(&self) -> i64 {
        self.loan_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}
