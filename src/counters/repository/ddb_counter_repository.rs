use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use crate::core::library::{LibraryError, LibraryResult};
use crate::counters::repository::CounterRepository;
use crate::utils::ddb::{get_item, number_attribute, parse_number_attribute};

#[derive(Debug)]
pub struct DDBCounterRepository {
    client: Client,
    table_name: String,
}

impl DDBCounterRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl CounterRepository for DDBCounterRepository {
    async fn next_id(&self, name: &str) -> LibraryResult<i64> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .update_item()
            .table_name(table_name)
            .key("name", AttributeValue::S(name.to_string()))
            .update_expression("ADD last_id :incr")
            .expression_attribute_values(":incr", number_attribute(1))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await.map_err(LibraryError::from)?;
        if let Some(attrs) = out.attributes() {
            return Ok(parse_number_attribute("last_id", attrs));
        }
        Err(LibraryError::database(format!("counter {} was not incremented", name).as_str(), None, false))
    }

    async fn last_id(&self, name: &str) -> LibraryResult<i64> {
        let table_name: &str = self.table_name.as_ref();
        let item = get_item(&self.client, table_name, "name", AttributeValue::S(name.to_string())).await?;
        Ok(item.map(|map| parse_number_attribute("last_id", &map)).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::core::repository::{COUNTERS_TABLE, RepositoryStore};
    use crate::counters::repository::CounterRepository;
    use crate::counters::repository::ddb_counter_repository::DDBCounterRepository;
    use crate::utils::ddb::{build_db_client, create_table, KeyDef};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = create_table(&client, COUNTERS_TABLE, KeyDef::string("name"), None).await;
                client
            });
    }

    #[tokio::test]
    #[ignore]
    async fn test_should_increment_ddb_counter() {
        let repo = DDBCounterRepository::new(CLIENT.get().await.clone(), COUNTERS_TABLE);
        let name = Uuid::new_v4().to_string();
        assert_eq!(0, repo.last_id(name.as_str()).await.expect("should read counter"));
        assert_eq!(1, repo.next_id(name.as_str()).await.expect("should increment"));
        assert_eq!(2, repo.next_id(name.as_str()).await.expect("should increment"));
        assert_eq!(2, repo.last_id(name.as_str()).await.expect("should read counter"));
    }
}
