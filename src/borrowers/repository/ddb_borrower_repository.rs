use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::borrowers::domain::model::BorrowerEntity;
use crate::borrowers::repository::BorrowerRepository;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{from_ddb, get_item, number_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, query_items, string_date};

#[derive(Debug)]
pub(crate) struct DDBBorrowerRepository {
    client: Client,
    table_name: String,
}

impl DDBBorrowerRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BorrowerEntity> for DDBBorrowerRepository {
    async fn create(&self, entity: &BorrowerEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(borrower_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &BorrowerEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("borrower_id", number_attribute(entity.borrower_id))
            .update_expression("SET version = :version, #name = :name, phone = :phone, email = :email, updated_at = :updated_at")
            .expression_attribute_names("#name", "name")
            .expression_attribute_values(":old_version", number_attribute(entity.version))
            .expression_attribute_values(":version", number_attribute(entity.version + 1))
            .expression_attribute_values(":name", AttributeValue::S(entity.name.to_string()))
            .expression_attribute_values(":phone", AttributeValue::S(entity.phone.to_string()))
            .expression_attribute_values(":email", AttributeValue::S(entity.email.to_string()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn get(&self, id: i64) -> LibraryResult<BorrowerEntity> {
        let item = get_item(&self.client, self.table_name.as_str(), "borrower_id", number_attribute(id)).await?;
        item.as_ref().map(map_to_borrower).ok_or_else(|| LibraryError::not_found(
            format!("borrower not found for {}", id).as_str()))
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("borrower_id", number_attribute(id))
            .condition_expression("attribute_exists(borrower_id)")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn scan(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BorrowerEntity>> {
        self.query(&HashMap::new(), page, page_size).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BorrowerEntity>> {
        let (items, next_page) = query_items(&self.client, self.table_name.as_str(), None,
                                             predicate, page, page_size).await?;
        let records = items.iter().map(map_to_borrower).collect();
        Ok(from_ddb(page, page_size, next_page, records))
    }
}

// Loan transactions keep `open_loans` on the borrower item, so the delete can be
// conditioned on it.
#[async_trait]
impl BorrowerRepository for DDBBorrowerRepository {
    async fn delete_without_open_loans(&self, id: i64) -> LibraryResult<usize> {
        let res = self.client.delete_item()
            .table_name(self.table_name.as_str())
            .key("borrower_id", number_attribute(id))
            .condition_expression("attribute_exists(borrower_id) AND (attribute_not_exists(open_loans) OR open_loans = :zero)")
            .expression_attribute_values(":zero", number_attribute(0))
            .send()
            .await;
        match res.map_err(LibraryError::from) {
            Ok(_) => Ok(1),
            Err(LibraryError::NotFound { .. }) => {
                self.get(id).await?;
                Err(LibraryError::invalid_state(format!("borrower {} still has open loans", id).as_str()))
            }
            Err(err) => Err(err),
        }
    }
}

fn map_to_borrower(map: &HashMap<String, AttributeValue>) -> BorrowerEntity {
    BorrowerEntity {
        borrower_id: parse_number_attribute("borrower_id", map),
        version: parse_number_attribute("version", map),
        name: parse_string_attribute("name", map).unwrap_or_default(),
        phone: parse_string_attribute("phone", map).unwrap_or_default(),
        email: parse_string_attribute("email", map).unwrap_or_default(),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
