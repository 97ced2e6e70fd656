pub mod borrow_book_cmd;
pub mod get_loan_cmd;
pub mod return_book_cmd;
