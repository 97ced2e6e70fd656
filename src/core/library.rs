use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The entity is in a state that forbids the operation, e.g. borrowing a book that is
    // already borrowed or writing over a version that was modified concurrently.
    InvalidState {
        message: String,
    },
    // The backing store could not be reached or throttled the request. It is surfaced as-is
    // and never retried by the library core.
    StoreUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn invalid_state(message: &str) -> LibraryError {
        LibraryError::InvalidState { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::StoreUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                LibraryError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("403") {
                LibraryError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                LibraryError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            LibraryError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::AccessDenied { .. } => { false }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::InvalidState { .. } => { false }
            LibraryError::StoreUnavailable { retryable, .. } => { *retryable }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LibraryError::NotFound { .. })
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<bcrypt::BcryptError> for LibraryError {
    fn from(err: bcrypt::BcryptError) -> Self {
        LibraryError::runtime(
            format!("password hashing {:?}", err).as_str(), None)
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::InvalidState { message } => {
                write!(f, "{}", message)
            }
            LibraryError::StoreUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for Repository .
pub type LibraryResult<T> = Result<T, LibraryError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

// Locale used to render status labels for operators.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Locale {
    English,
    Vietnamese,
}

impl From<String> for Locale {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "vi" | "vietnamese" => Locale::Vietnamese,
            _ => Locale::English,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum BookStatus {
    Available,
    Borrowed,
}

impl BookStatus {
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (BookStatus::Available, Locale::English) => "Available",
            (BookStatus::Borrowed, Locale::English) => "Borrowed",
            (BookStatus::Available, Locale::Vietnamese) => "Có sẵn",
            (BookStatus::Borrowed, Locale::Vietnamese) => "Đã mượn",
        }
    }
}

// Also accepts the Vietnamese labels of imported documents.
impl From<String> for BookStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Borrowed" | "Đã mượn" | "Đang mượn" => BookStatus::Borrowed,
            _ => BookStatus::Available,
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BookStatus::Available => write!(f, "Available"),
            BookStatus::Borrowed => write!(f, "Borrowed"),
        }
    }
}

// LoanStatus is derived from Loan.is_returned and never stored.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum LoanStatus {
    Borrowed,
    Returned,
}

impl LoanStatus {
    pub fn from_returned(is_returned: bool) -> Self {
        if is_returned {
            LoanStatus::Returned
        } else {
            LoanStatus::Borrowed
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (LoanStatus::Borrowed, Locale::English) => "Borrowed",
            (LoanStatus::Returned, Locale::English) => "Returned",
            (LoanStatus::Borrowed, Locale::Vietnamese) => "Đang mượn",
            (LoanStatus::Returned, Locale::Vietnamese) => "Đã trả",
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::Borrowed => write!(f, "Borrowed"),
            LoanStatus::Returned => write!(f, "Returned"),
        }
    }
}

// BorrowerStatus summarizes the loan history of one borrower.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum BorrowerStatus {
    New,
    Borrowing,
    AllReturned,
}

impl BorrowerStatus {
    pub fn from_counts(open_loans: usize, total_loans: usize) -> Self {
        if total_loans == 0 {
            BorrowerStatus::New
        } else if open_loans > 0 {
            BorrowerStatus::Borrowing
        } else {
            BorrowerStatus::AllReturned
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (BorrowerStatus::New, Locale::English) => "New",
            (BorrowerStatus::Borrowing, Locale::English) => "Borrowing",
            (BorrowerStatus::AllReturned, Locale::English) => "All returned",
            (BorrowerStatus::New, Locale::Vietnamese) => "Vừa thêm",
            (BorrowerStatus::Borrowing, Locale::Vietnamese) => "Đang mượn",
            (BorrowerStatus::AllReturned, Locale::Vietnamese) => "Đã trả hết",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{BookStatus, BorrowerStatus, LibraryError, Locale, LoanStatus};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(LibraryError::database("test", None, false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_access_error() {
        assert!(matches!(LibraryError::access_denied("test", None), LibraryError::AccessDenied{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_duplicate_key_error() {
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
        assert!(LibraryError::not_found("test").is_not_found());
    }

    #[tokio::test]
    async fn test_should_create_invalid_state_error() {
        assert!(matches!(LibraryError::invalid_state("test"), LibraryError::InvalidState{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_unavailable_error() {
        assert!(matches!(LibraryError::unavailable("test", None, false), LibraryError::StoreUnavailable{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(LibraryError::database_or_unavailable("test", None, true), LibraryError::StoreUnavailable{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("404".to_string()), false), LibraryError::NotFound{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("403".to_string()), false), LibraryError::AccessDenied{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("500".to_string()), false), LibraryError::Database{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", None, false), LibraryError::Database{ .. }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert!(!LibraryError::database("test", None, false).retryable());
        assert!(!LibraryError::access_denied("test", None).retryable());
        assert!(!LibraryError::duplicate_key("test").retryable());
        assert!(!LibraryError::not_found("test").retryable());
        assert!(!LibraryError::invalid_state("test").retryable());
        assert!(!LibraryError::unavailable("test", None, false).retryable());
        assert!(LibraryError::unavailable("test", None, true).retryable());
        assert!(!LibraryError::validation("test", None).retryable());
        assert!(!LibraryError::serialization("test").retryable());
        assert!(!LibraryError::runtime("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_format_book_status() {
        for status in [BookStatus::Available, BookStatus::Borrowed] {
            let str_status = BookStatus::from(status.to_string());
            assert_eq!(status, str_status);
        }
        assert_eq!(BookStatus::Borrowed, BookStatus::from("Đã mượn".to_string()));
        assert_eq!(BookStatus::Available, BookStatus::from("Có sẵn".to_string()));
    }

    #[tokio::test]
    async fn test_should_label_loan_status() {
        assert_eq!(LoanStatus::Returned, LoanStatus::from_returned(true));
        assert_eq!(LoanStatus::Borrowed, LoanStatus::from_returned(false));
        assert_eq!("Returned", LoanStatus::Returned.label(Locale::English));
        assert_eq!("Đã trả", LoanStatus::Returned.label(Locale::Vietnamese));
        assert_eq!("Đang mượn", LoanStatus::Borrowed.label(Locale::Vietnamese));
    }

    #[tokio::test]
    async fn test_should_derive_borrower_status() {
        assert_eq!(BorrowerStatus::New, BorrowerStatus::from_counts(0, 0));
        assert_eq!(BorrowerStatus::Borrowing, BorrowerStatus::from_counts(1, 3));
        assert_eq!(BorrowerStatus::AllReturned, BorrowerStatus::from_counts(0, 3));
        assert_eq!(Locale::Vietnamese, Locale::from("vi".to_string()));
        assert_eq!(Locale::English, Locale::from("fr".to_string()));
    }
}
