use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Delete, Put, TransactWriteItem};
use chrono::Utc;

use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::employees::domain::model::EmployeeEntity;
use crate::employees::repository::EmployeeRepository;
use crate::utils::ddb::{from_ddb, get_item, number_attribute, parse_bool_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, query_items, string_date, transaction_error};

// Usernames are kept unique with one marker item per username, written in the same
// transaction as the employee.
#[derive(Debug)]
pub(crate) struct DDBEmployeeRepository {
    client: Client,
    table_name: String,
    usernames_table: String,
}

impl DDBEmployeeRepository {
    pub(crate) fn new(client: Client, table_name: &str, usernames_table: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            usernames_table: usernames_table.to_string(),
        }
    }
}

#[async_trait]
impl Repository<EmployeeEntity> for DDBEmployeeRepository {
    async fn create(&self, entity: &EmployeeEntity) -> LibraryResult<usize> {
        let val = serde_json::to_value(entity)?;
        let employee = Put::builder()
            .table_name(self.table_name.as_str())
            .condition_expression("attribute_not_exists(employee_id)")
            .set_item(Some(parse_item(val)?))
            .build();
        let marker = Put::builder()
            .table_name(self.usernames_table.as_str())
            .condition_expression("attribute_not_exists(username)")
            .item("username", AttributeValue::S(entity.username.clone()))
            .item("employee_id", number_attribute(entity.employee_id))
            .build();
        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(employee).build())
            .transact_items(TransactWriteItem::builder().put(marker).build())
            .send()
            .await.map(|_| 1).map_err(|err| transaction_error(err, LibraryError::duplicate_key))
    }

    // username is immutable once created, so the marker is left alone
    async fn update(&self, entity: &EmployeeEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("employee_id", number_attribute(entity.employee_id))
            .update_expression("SET version = :version, #name = :name, #position = :position, #password = :password, is_admin = :is_admin, work_date = :work_date, schedule_days = :schedule_days, updated_at = :updated_at")
            .expression_attribute_names("#name", "name")
            .expression_attribute_names("#position", "position")
            .expression_attribute_names("#password", "password")
            .expression_attribute_values(":old_version", number_attribute(entity.version))
            .expression_attribute_values(":version", number_attribute(entity.version + 1))
            .expression_attribute_values(":name", AttributeValue::S(entity.name.to_string()))
            .expression_attribute_values(":position", AttributeValue::S(entity.position.to_string()))
            .expression_attribute_values(":password", AttributeValue::S(entity.password.to_string()))
            .expression_attribute_values(":is_admin", AttributeValue::Bool(entity.is_admin))
            .expression_attribute_values(":work_date", string_date(entity.work_date))
            .expression_attribute_values(":schedule_days", AttributeValue::S(entity.schedule_days.to_string()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn get(&self, id: i64) -> LibraryResult<EmployeeEntity> {
        let item = get_item(&self.client, self.table_name.as_str(), "employee_id", number_attribute(id)).await?;
        item.as_ref().map(map_to_employee).ok_or_else(|| LibraryError::not_found(
            format!("employee not found for {}", id).as_str()))
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let existing = self.get(id).await?;
        let employee = Delete::builder()
            .table_name(self.table_name.as_str())
            .key("employee_id", number_attribute(id))
            .condition_expression("attribute_exists(employee_id)")
            .build();
        let marker = Delete::builder()
            .table_name(self.usernames_table.as_str())
            .key("username", AttributeValue::S(existing.username))
            .build();
        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().delete(employee).build())
            .transact_items(TransactWriteItem::builder().delete(marker).build())
            .send()
            .await.map(|_| 1).map_err(|err| transaction_error(err, LibraryError::not_found))
    }

    async fn scan(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<EmployeeEntity>> {
        self.query(&HashMap::new(), page, page_size).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<EmployeeEntity>> {
        let (items, next_page) = query_items(&self.client, self.table_name.as_str(), None,
                                             predicate, page, page_size).await?;
        let records = items.iter().map(map_to_employee).collect();
        Ok(from_ddb(page, page_size, next_page, records))
    }
}

#[async_trait]
impl EmployeeRepository for DDBEmployeeRepository {
    async fn find_by_username(&self, username: &str) -> LibraryResult<EmployeeEntity> {
        let marker = get_item(&self.client, self.usernames_table.as_str(), "username",
                              AttributeValue::S(username.to_string())).await?;
        match marker {
            Some(map) => self.get(parse_number_attribute("employee_id", &map)).await,
            None => Err(LibraryError::not_found(format!("employee not found for {}", username).as_str())),
        }
    }
}

fn map_to_employee(map: &HashMap<String, AttributeValue>) -> EmployeeEntity {
    EmployeeEntity {
        employee_id: parse_number_attribute("employee_id", map),
        version: parse_number_attribute("version", map),
        name: parse_string_attribute("name", map).unwrap_or_default(),
        position: parse_string_attribute("position", map).unwrap_or_default(),
        username: parse_string_attribute("username", map).unwrap_or_default(),
        password: parse_string_attribute("password", map).unwrap_or_default(),
        is_admin: parse_bool_attribute("is_admin", map),
        work_date: parse_date_attribute("work_date", map).unwrap_or(Utc::now().naive_utc()),
        schedule_days: parse_string_attribute("schedule_days", map).unwrap_or_default(),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use rand::Rng;
    use uuid::Uuid;

    use crate::core::library::LibraryError;
    use crate::core::repository::{Collection, Repository, RepositoryStore, USERNAMES_TABLE};
    use crate::employees::domain::model::EmployeeEntity;
    use crate::employees::repository::EmployeeRepository;
    use crate::employees::repository::ddb_employee_repository::DDBEmployeeRepository;
    use crate::utils::ddb::{build_db_client, create_table, KeyDef};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = create_table(&client, Collection::Employees.table_name(), KeyDef::number("employee_id"), None).await;
                let _ = create_table(&client, USERNAMES_TABLE, KeyDef::string("username"), None).await;
                client
            });
    }

    fn new_employee() -> EmployeeEntity {
        let id = rand::thread_rng().gen_range(1_000_000..i64::MAX / 2);
        EmployeeEntity::new(id, "Nhân viên", "Thủ thư", Uuid::new_v4().to_string().as_str(), "secret", false)
    }

    #[tokio::test]
    #[ignore]
    async fn test_should_create_get_employees() {
        let repo = DDBEmployeeRepository::new(CLIENT.get().await.clone(), Collection::Employees.table_name(), USERNAMES_TABLE);
        let employee = new_employee();
        assert_eq!(1, repo.create(&employee).await.expect("should create employee"));
        let loaded = repo.find_by_username(employee.username.as_str()).await.expect("should find employee");
        assert_eq!(employee.employee_id, loaded.employee_id);

        let mut other = new_employee();
        other.username = employee.username.clone();
        assert!(matches!(repo.create(&other).await, Err(LibraryError::DuplicateKey { .. })));
    }

    #[tokio::test]
    #[ignore]
    async fn test_should_create_delete_employees() {
        let repo = DDBEmployeeRepository::new(CLIENT.get().await.clone(), Collection::Employees.table_name(), USERNAMES_TABLE);
        let employee = new_employee();
        repo.create(&employee).await.expect("should create employee");
        assert_eq!(1, repo.delete(employee.employee_id).await.expect("should delete employee"));
        assert!(repo.get(employee.employee_id).await.is_err());
        assert!(repo.find_by_username(employee.username.as_str()).await.is_err());
    }
}
