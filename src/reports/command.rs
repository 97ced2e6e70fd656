pub mod borrower_summaries_cmd;
pub mod list_books_cmd;
pub mod list_borrowers_cmd;
pub mod list_loans_cmd;
pub mod top_borrowers_cmd;
pub mod top_categories_cmd;

// number of rows returned by the ranking reports when no limit is given
pub(crate) const DEFAULT_TOP_LIMIT: usize = 5;
