use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Put, TransactWriteItem, Update};
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::core::library::{BookStatus, LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::{query_all, Repository};
use crate::loans::domain::model::LoanEntity;
use crate::loans::repository::LoanRepository;
use crate::utils::ddb::{from_ddb, get_item, number_attribute, opt_string_date, parse_bool_attribute, parse_date_attribute, parse_item, parse_number_attribute, query_items, string_date, transaction_error};

#[derive(Debug)]
pub(crate) struct DDBLoanRepository {
    client: Client,
    table_name: String,
    index_name: String,
    books_table: String,
    borrowers_table: String,
    page_size: usize,
}

impl DDBLoanRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str, books_table: &str,
                      borrowers_table: &str, page_size: usize) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
            books_table: books_table.to_string(),
            borrowers_table: borrowers_table.to_string(),
            page_size,
        }
    }

    // book status change guarded by the status and version the caller read
    fn book_status_update(&self, book: &BookEntity, from: BookStatus, to: BookStatus) -> Update {
        Update::builder()
            .table_name(self.books_table.as_str())
            .key("book_id", number_attribute(book.book_id))
            .update_expression("SET book_status = :to_status, version = :version, updated_at = :updated_at")
            .condition_expression("book_status = :from_status AND version = :old_version")
            .expression_attribute_values(":to_status", AttributeValue::S(to.to_string()))
            .expression_attribute_values(":from_status", AttributeValue::S(from.to_string()))
            .expression_attribute_values(":old_version", number_attribute(book.version))
            .expression_attribute_values(":version", number_attribute(book.version + 1))
            .expression_attribute_values(":updated_at", string_date(Utc::now().naive_utc()))
            .build()
    }

    // adjusts the open loan count of a borrower that must still exist
    fn borrower_loans_update(&self, borrower_id: i64, delta: i64) -> Update {
        Update::builder()
            .table_name(self.borrowers_table.as_str())
            .key("borrower_id", number_attribute(borrower_id))
            .update_expression("SET open_loans = if_not_exists(open_loans, :zero) + :delta")
            .condition_expression("attribute_exists(borrower_id)")
            .expression_attribute_values(":zero", number_attribute(0))
            .expression_attribute_values(":delta", number_attribute(delta))
            .build()
    }
}

#[async_trait]
impl Repository<LoanEntity> for DDBLoanRepository {
    async fn create(&self, entity: &LoanEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(loan_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &LoanEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("loan_id", number_attribute(entity.loan_id))
            .update_expression("SET version = :version, borrower_id = :borrower_id, book_id = :book_id, employee_id = :employee_id, borrow_date = :borrow_date, return_date = :return_date, is_returned = :is_returned, updated_at = :updated_at")
            .expression_attribute_values(":old_version", number_attribute(entity.version))
            .expression_attribute_values(":version", number_attribute(entity.version + 1))
            .expression_attribute_values(":borrower_id", number_attribute(entity.borrower_id))
            .expression_attribute_values(":book_id", number_attribute(entity.book_id))
            .expression_attribute_values(":employee_id", number_attribute(entity.employee_id))
            .expression_attribute_values(":borrow_date", string_date(entity.borrow_date))
            .expression_attribute_values(":return_date", opt_string_date(entity.return_date))
            .expression_attribute_values(":is_returned", AttributeValue::Bool(entity.is_returned))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn get(&self, id: i64) -> LibraryResult<LoanEntity> {
        let item = get_item(&self.client, self.table_name.as_str(), "loan_id", number_attribute(id)).await?;
        item.as_ref().map(map_to_loan).ok_or_else(|| LibraryError::not_found(
            format!("loan not found for {}", id).as_str()))
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("loan_id", number_attribute(id))
            .condition_expression("attribute_exists(loan_id)")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn scan(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<LoanEntity>> {
        self.query(&HashMap::new(), page, page_size).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<LoanEntity>> {
        let (items, next_page) = query_items(&self.client, self.table_name.as_str(),
                                             Some((self.index_name.as_str(), "book_id")),
                                             predicate, page, page_size).await?;
        let records = items.iter().map(map_to_loan).collect();
        Ok(from_ddb(page, page_size, next_page, records))
    }
}

#[async_trait]
impl LoanRepository for DDBLoanRepository {
    async fn open_loan(&self, loan: &LoanEntity, book: &BookEntity) -> LibraryResult<()> {
        let val = serde_json::to_value(loan)?;
        let loan_put = Put::builder()
            .table_name(self.table_name.as_str())
            .condition_expression("attribute_not_exists(loan_id)")
            .set_item(Some(parse_item(val)?))
            .build();
        let book_update = self.book_status_update(book, BookStatus::Available, BookStatus::Borrowed);
        let borrower_update = self.borrower_loans_update(loan.borrower_id, 1);
        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(loan_put).build())
            .transact_items(TransactWriteItem::builder().update(book_update).build())
            .transact_items(TransactWriteItem::builder().update(borrower_update).build())
            .send()
            .await.map(|_| ()).map_err(|err| transaction_error(err, LibraryError::invalid_state))
    }

    async fn close_loan(&self, loan: &LoanEntity, book: &BookEntity) -> LibraryResult<()> {
        let loan_update = Update::builder()
            .table_name(self.table_name.as_str())
            .key("loan_id", number_attribute(loan.loan_id))
            .update_expression("SET is_returned = :returned, return_date = :return_date, version = :version, updated_at = :updated_at")
            .condition_expression("is_returned = :open AND version = :old_version")
            .expression_attribute_values(":returned", AttributeValue::Bool(true))
            .expression_attribute_values(":open", AttributeValue::Bool(false))
            .expression_attribute_values(":return_date", opt_string_date(loan.return_date))
            .expression_attribute_values(":old_version", number_attribute(loan.version))
            .expression_attribute_values(":version", number_attribute(loan.version + 1))
            .expression_attribute_values(":updated_at", string_date(Utc::now().naive_utc()))
            .build();
        let book_update = self.book_status_update(book, BookStatus::Borrowed, BookStatus::Available);
        let borrower_update = self.borrower_loans_update(loan.borrower_id, -1);
        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().update(loan_update).build())
            .transact_items(TransactWriteItem::builder().update(book_update).build())
            .transact_items(TransactWriteItem::builder().update(borrower_update).build())
            .send()
            .await.map(|_| ()).map_err(|err| transaction_error(err, LibraryError::invalid_state))
    }

    async fn find_open_by_book(&self, book_id: i64) -> LibraryResult<Option<LoanEntity>> {
        let predicate = HashMap::from([
            ("book_id".to_string(), book_id.to_string()),
            ("is_returned".to_string(), "false".to_string()),
        ]);
        Ok(query_all(self, &predicate, self.page_size).await?.into_iter().next())
    }

    async fn find_by_borrower(&self, borrower_id: i64) -> LibraryResult<Vec<LoanEntity>> {
        let predicate = HashMap::from([("borrower_id".to_string(), borrower_id.to_string())]);
        let mut loans = query_all(self, &predicate, self.page_size).await?;
        loans.sort_by_key(|l| l.loan_id);
        Ok(loans)
    }
}

fn map_to_loan(map: &HashMap<String, AttributeValue>) -> LoanEntity {
    LoanEntity {
        loan_id: parse_number_attribute("loan_id", map),
        version: parse_number_attribute("version", map),
        borrower_id: parse_number_attribute("borrower_id", map),
        book_id: parse_number_attribute("book_id", map),
        employee_id: parse_number_attribute("employee_id", map),
        borrow_date: parse_date_attribute("borrow_date", map).unwrap_or(Utc::now().naive_utc()),
        return_date: parse_date_attribute("return_date", map),
        is_returned: parse_bool_attribute("is_returned", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
