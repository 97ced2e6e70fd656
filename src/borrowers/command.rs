pub mod add_borrower_cmd;
pub mod get_borrower_cmd;
pub mod remove_borrower_cmd;
pub mod search_borrowers_cmd;
