use std::cmp;
use std::collections::HashMap;
use std::env;
use std::time::Duration;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeDefinition, AttributeValue, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection, ProjectionType, ProvisionedThroughput, ScalarAttributeType, TableStatus};
use chrono::NaiveDateTime;
use serde_json::{Number, Value};
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::{predicate_op, RepositoryStore};
use crate::utils::date::{format_date, parse_date};

const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:8000";

// Key attribute of a table or of its global secondary index.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KeyDef<'a> {
    pub name: &'a str,
    pub numeric: bool,
}

impl<'a> KeyDef<'a> {
    pub(crate) fn string(name: &'a str) -> Self {
        Self { name, numeric: false }
    }

    pub(crate) fn number(name: &'a str) -> Self {
        Self { name, numeric: true }
    }

    fn attribute_type(&self) -> ScalarAttributeType {
        if self.numeric { ScalarAttributeType::N } else { ScalarAttributeType::S }
    }
}

pub(crate) async fn create_table(client: &Client,
                                 table_name: &str, pk: KeyDef<'_>,
                                 gsi_pk: Option<KeyDef<'_>>) -> LibraryResult<()> {
    let mut request = client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(pk.name)
                .key_type(KeyType::Hash)
                .build(),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(pk.name)
                .attribute_type(pk.attribute_type())
                .build(),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(10)
                .write_capacity_units(10)
                .build(),
        );
    if let Some(gsi_pk) = gsi_pk {
        let gsi = GlobalSecondaryIndex::builder()
            .index_name(format!("{}_ndx", table_name))
            .key_schema(KeySchemaElement::builder()
                .attribute_name(gsi_pk.name)
                .key_type(KeyType::Hash).build())
            .projection(Projection::builder().projection_type(ProjectionType::All).build())
            .provisioned_throughput(
                ProvisionedThroughput::builder().read_capacity_units(10).write_capacity_units(10).build())
            .build();
        request = request
            .global_secondary_indexes(gsi)
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(gsi_pk.name)
                    .attribute_type(gsi_pk.attribute_type())
                    .build(),
            );
    }

    match request.send().await {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Creating).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to create {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

async fn wait_until_table_status_is_not(client: &Client, table_name: &str, other_status: TableStatus) {
    for _i in 0..30 {
        if let Ok(status) = describe_table(client, table_name).await {
            if status != other_status {
                return;
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

async fn describe_table(client: &Client, table_name: &str) -> LibraryResult<TableStatus> {
    match client
        .describe_table()
        .table_name(table_name)
        .send()
        .await
    {
        Ok(out) => {
            if let Some(table) = out.table() {
                if let Some(status) = table.table_status() {
                    return Ok(status.clone());
                }
            }
            Err(LibraryError::runtime(format!("failed to describe {} table",
                                              table_name).as_str(), None))
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to describe {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

pub(crate) fn parse_item(value: Value) -> Result<HashMap<String, AttributeValue>, String> {
    match value_to_item(value) {
        AttributeValue::M(map) => Ok(map),
        other => Err(format!("failed to parse{:?}", other)),
    }
}

pub(crate) fn parse_string_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<String> {
    if let Some(AttributeValue::S(str)) = map.get(name) {
        return Some(str.clone());
    }
    None
}

pub(crate) fn parse_bool_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> bool {
    if let Some(AttributeValue::Bool(b)) = map.get(name) {
        return *b;
    }
    false
}

pub(crate) fn parse_date_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<NaiveDateTime> {
    if let Some(AttributeValue::S(str)) = map.get(name) {
        // e.g. 2022-09-24T04:40:35.726029
        return parse_date(str);
    }
    None
}

pub(crate) fn opt_string_date(opt_date: Option<NaiveDateTime>) -> AttributeValue {
    if let Some(date) = opt_date {
        return string_date(date);
    }
    AttributeValue::Null(true)
}

pub(crate) fn string_date(date: NaiveDateTime) -> AttributeValue {
    AttributeValue::S(format_date(date))
}

pub(crate) fn number_attribute(n: i64) -> AttributeValue {
    AttributeValue::N(n.to_string())
}

pub(crate) fn parse_number_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> i64 {
    if let Some(AttributeValue::N(str)) = map.get(name) {
        if let Ok(n) = str.parse::<i64>() {
            return n;
        }
    }
    0
}

// Predicate values arrive as strings; ids, years and versions are stored as numbers and
// `is_*` flags as booleans.
pub(crate) fn typed_attribute(field: &str, value: &str) -> AttributeValue {
    let numeric = field.ends_with("_id") || field == "published_year" || field == "version" || field == "last_id";
    if numeric {
        if let Ok(n) = value.parse::<i64>() {
            return AttributeValue::N(n.to_string());
        }
    }
    if field.starts_with("is_") {
        if let Ok(b) = value.parse::<bool>() {
            return AttributeValue::Bool(b);
        }
    }
    AttributeValue::S(value.to_string())
}

// Builds condition/filter expressions with placeholder names so reserved words
// (name, status, position, ...) can be used as attribute names.
#[derive(Debug, Default)]
pub(crate) struct ExpressionBuilder {
    pub(crate) expr: String,
    pub(crate) names: HashMap<String, String>,
    pub(crate) values: HashMap<String, AttributeValue>,
}

impl ExpressionBuilder {
    pub(crate) fn add_filter_expr(&mut self, k: &str, v: &str) {
        let (field, op) = predicate_op(k);
        let placeholder = field.replace(|c: char| !c.is_ascii_alphanumeric() && c != '_', "_");
        if !self.expr.is_empty() {
            self.expr.push_str(" AND ");
        }
        if op == "contains" {
            self.expr.push_str(format!("contains(#{}, :{})", placeholder, placeholder).as_str());
        } else {
            self.expr.push_str(format!("#{} {} :{}", placeholder, op, placeholder).as_str());
        }
        self.names.insert(format!("#{}", placeholder), field.to_string());
        self.values.insert(format!(":{}", placeholder), typed_attribute(field, v));
    }

    fn names(&self) -> Option<HashMap<String, String>> {
        if self.names.is_empty() { None } else { Some(self.names.clone()) }
    }

    fn values(&self) -> Option<HashMap<String, AttributeValue>> {
        if self.values.is_empty() { None } else { Some(self.values.clone()) }
    }
}

// Runs `predicate` against a table. When the predicate pins the hash key of the table's
// index by equality the index is queried, otherwise the table is scanned with a filter.
pub(crate) async fn query_items(client: &Client, table_name: &str, index: Option<(&str, &str)>,
                                predicate: &HashMap<String, String>,
                                page: Option<&str>, page_size: usize)
                                -> LibraryResult<(Vec<HashMap<String, AttributeValue>>, Option<String>)> {
    let exclusive_start_key = to_ddb_page(page);
    if let Some((index_name, hash_key)) = index {
        if let Some(hash_value) = predicate.get(hash_key) {
            let mut key_cond = ExpressionBuilder::default();
            key_cond.add_filter_expr(hash_key, hash_value);
            let mut filter = ExpressionBuilder::default();
            for (k, v) in predicate {
                if k != hash_key {
                    filter.add_filter_expr(k, v);
                }
            }
            let mut names = key_cond.names.clone();
            names.extend(filter.names.clone());
            let mut values = key_cond.values.clone();
            values.extend(filter.values.clone());
            let mut request = client
                .query()
                .table_name(table_name)
                .index_name(index_name)
                .limit(cmp::min(page_size, 500) as i32)
                .consistent_read(false)
                .set_exclusive_start_key(exclusive_start_key)
                .key_condition_expression(key_cond.expr.clone())
                .set_expression_attribute_names(Some(names))
                .set_expression_attribute_values(Some(values));
            if !filter.expr.is_empty() {
                request = request.filter_expression(filter.expr.clone());
            }
            return request
                .send()
                .await.map_err(LibraryError::from).map(|req| {
                let items = req.items.clone().unwrap_or_default();
                (items, from_ddb_page(req.last_evaluated_key()))
            });
        }
    }
    let mut filter = ExpressionBuilder::default();
    for (k, v) in predicate {
        filter.add_filter_expr(k, v);
    }
    let mut request = client
        .scan()
        .table_name(table_name)
        .limit(cmp::min(page_size, 500) as i32)
        .consistent_read(false)
        .set_exclusive_start_key(exclusive_start_key)
        .set_expression_attribute_names(filter.names())
        .set_expression_attribute_values(filter.values());
    if !filter.expr.is_empty() {
        request = request.filter_expression(filter.expr.clone());
    }
    request
        .send()
        .await.map_err(LibraryError::from).map(|req| {
        let items = req.items.clone().unwrap_or_default();
        (items, from_ddb_page(req.last_evaluated_key()))
    })
}

// Looks up one item by its primary key with a consistent read.
pub(crate) async fn get_item(client: &Client, table_name: &str, key: &str,
                             value: AttributeValue) -> LibraryResult<Option<HashMap<String, AttributeValue>>> {
    client
        .query()
        .table_name(table_name)
        .limit(2)
        .consistent_read(true)
        .key_condition_expression("#pk = :pk")
        .expression_attribute_names("#pk", key)
        .expression_attribute_values(":pk", value)
        .send()
        .await.map_err(LibraryError::from).and_then(|req| {
        if let Some(items) = req.items {
            if items.len() > 1 {
                return Err(LibraryError::database(format!("too many {} for {}", table_name, key).as_str(), None, false));
            }
            return Ok(items.into_iter().next());
        }
        Ok(None)
    })
}

// The page token is the JSON form of the last evaluated key: strings stay strings and
// numeric keys become JSON numbers.
pub(crate) fn to_ddb_page(page: Option<&str>) -> Option<HashMap<String, AttributeValue>> {
    if let Some(page) = page {
        if let Ok(map) = serde_json::from_str::<HashMap<String, Value>>(page) {
            let mut attr_map = HashMap::new();
            for (k, v) in map {
                match v {
                    Value::String(s) => { attr_map.insert(k, AttributeValue::S(s)); }
                    Value::Number(n) => { attr_map.insert(k, AttributeValue::N(n.to_string())); }
                    _ => {}
                }
            }
            if !attr_map.is_empty() {
                return Some(attr_map);
            }
        }
    }
    None
}

pub(crate) fn from_ddb_page(last_evaluated_key: Option<&HashMap<String, AttributeValue>>) -> Option<String> {
    if let Some(attr_map) = last_evaluated_key {
        let mut map = serde_json::Map::new();
        for (k, v) in attr_map {
            match v {
                AttributeValue::S(val) => { map.insert(k.clone(), Value::String(val.to_string())); }
                AttributeValue::N(val) => {
                    if let Ok(n) = val.parse::<i64>() {
                        map.insert(k.clone(), Value::Number(Number::from(n)));
                    }
                }
                _ => {}
            }
        }
        if map.is_empty() {
            return None;
        }
        return serde_json::to_string(&Value::Object(map)).ok();
    }
    None
}

pub(crate) fn from_ddb<T>(page: Option<&str>, page_size: usize,
                          next_page: Option<String>,
                          records: Vec<T>) -> PaginatedResult<T> {
    PaginatedResult::new(page, page_size, next_page, records)
}


fn value_to_item(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(a) => AttributeValue::L(a.into_iter().map(value_to_item).collect()),
        Value::Object(o) => {
            AttributeValue::M(o.into_iter().map(|(k, v)| (k, value_to_item(v))).collect())
        }
    }
}

// helper method to build db-client with tracing enabled
pub(crate) async fn build_db_client(store: RepositoryStore) -> Client {
    match store {
        RepositoryStore::LocalDynamoDB => {
            // See https://docs.aws.amazon.com/sdk-for-rust/latest/dg/dynamodb-local.html
            let endpoint = env::var("LIBRARY_DDB_ENDPOINT").unwrap_or_else(|_| DEFAULT_LOCAL_ENDPOINT.to_string());
            let dynamodb_local_config = aws_sdk_dynamodb::Config::builder()
                .region(Region::new("local"))
                .credentials_provider(
                    Credentials::new("AKIDLOCALSTACK", "localstacksecret", None, None, "faked"))
                .endpoint_url(endpoint)
                .build();
            Client::from_conf(dynamodb_local_config)
        }
        _ => {
            //Get config from environment.
            let config = aws_config::load_from_env().await;
            //Create the DynamoDB client.
            Client::new(&config)
        }
    }
}

// helper method to build sns-client with tracing enabled
pub async fn build_sns_client() -> aws_sdk_sns::Client {
    //Get config from environment.
    let config = aws_config::load_from_env().await;
    //Create the SNS client.
    aws_sdk_sns::Client::new(&config)
}

// required to enable CloudWatch error logging by the runtime
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // this needs to be set to false, otherwise ANSI color codes will
        // show up in a confusing manner in CloudWatch logs.
        .with_ansi(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .json()
        .init();
}

// A cancelled transaction means one of its condition checks failed; `on_cancel` decides
// which domain error that is for the caller.
pub(crate) fn transaction_error(err: SdkError<TransactWriteItemsError>,
                                on_cancel: fn(&str) -> LibraryError) -> LibraryError {
    if let SdkError::ServiceError(ctx) = &err {
        if ctx.err().is_transaction_canceled_exception() {
            return on_cancel(format!("transaction cancelled {:?}", ctx.err()).as_str());
        }
    }
    LibraryError::from(err)
}

impl From<SdkError<UpdateItemError>> for LibraryError {
    fn from(err: SdkError<UpdateItemError>) -> Self {
        if let SdkError::ServiceError(ctx) = &err {
            if ctx.err().is_conditional_check_failed_exception() {
                return LibraryError::invalid_state(
                    format!("record is missing or was modified concurrently {:?}", ctx.err()).as_str());
            }
        }
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<PutItemError>> for LibraryError {
    fn from(err: SdkError<PutItemError>) -> Self {
        if let SdkError::ServiceError(ctx) = &err {
            if ctx.err().is_conditional_check_failed_exception() {
                return LibraryError::duplicate_key(format!("record already exists {:?}", ctx.err()).as_str());
            }
        }
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<DeleteItemError>> for LibraryError {
    fn from(err: SdkError<DeleteItemError>) -> Self {
        if let SdkError::ServiceError(ctx) = &err {
            if ctx.err().is_conditional_check_failed_exception() {
                return LibraryError::not_found(format!("record not found {:?}", ctx.err()).as_str());
            }
        }
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<QueryError>> for LibraryError {
    fn from(err: SdkError<QueryError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<ScanError>> for LibraryError {
    fn from(err: SdkError<ScanError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<TransactWriteItemsError>> for LibraryError {
    fn from(err: SdkError<TransactWriteItemsError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

fn retryable_sdk_error<T>(err: &SdkError<T>) -> (bool, Option<String>) {
    match err {
        SdkError::ConstructionFailure(_) => { (false, Some("ConstructionFailure".to_string())) }
        SdkError::TimeoutError(_) => { (true, Some("TimeoutError".to_string())) }
        SdkError::DispatchFailure(_) => { (true, Some("DispatchFailure".to_string())) }
        SdkError::ResponseError { .. } => { (true, Some("ResponseError".to_string())) }
        SdkError::ServiceError(ctx) => {
            (ctx.raw().http().status().is_server_error() || has_exceeded_limit(ctx.raw().http().body().bytes()), Some(ctx.raw().http().status().to_string()))
        }
        _ => { (true, Some("Unknown".to_string())) }
    }
}

// throttling responses mention "...LimitExceeded" / "...ThroughputExceeded"
fn has_exceeded_limit(opts: Option<&[u8]>) -> bool {
    if let Some(b) = opts {
        return b.windows(6).any(|w| w == b"ceeded");
    }
    false
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use aws_sdk_dynamodb::types::AttributeValue;
    use serde_json::json;
    use crate::utils::date::parse_date;
    use crate::utils::ddb::{from_ddb_page, has_exceeded_limit, opt_string_date, parse_date_attribute, parse_item, parse_number_attribute, to_ddb_page, typed_attribute, ExpressionBuilder};

    #[tokio::test]
    async fn test_should_build_filter_expression() {
        let mut builder = ExpressionBuilder::default();
        builder.add_filter_expr("name", "Admin");
        builder.add_filter_expr("borrow_date:>=", "2022-01-01T00:00:00");
        assert!(builder.expr.contains("#name = :name"));
        assert!(builder.expr.contains(" AND "));
        assert!(builder.expr.contains("#borrow_date >= :borrow_date"));
        assert_eq!(Some(&"name".to_string()), builder.names.get("#name"));
        assert_eq!(Some(&AttributeValue::S("Admin".to_string())), builder.values.get(":name"));

        let mut builder = ExpressionBuilder::default();
        builder.add_filter_expr("title:contains", "Rust");
        assert_eq!("contains(#title, :title)", builder.expr.as_str());
    }

    #[tokio::test]
    async fn test_should_type_predicate_values() {
        assert_eq!(AttributeValue::N("7".to_string()), typed_attribute("book_id", "7"));
        assert_eq!(AttributeValue::Bool(false), typed_attribute("is_returned", "false"));
        assert_eq!(AttributeValue::S("1984".to_string()), typed_attribute("title", "1984"));
    }

    #[tokio::test]
    async fn test_should_round_trip_page_token() {
        let key = HashMap::from([
            ("loan_id".to_string(), AttributeValue::N("12".to_string())),
            ("name".to_string(), AttributeValue::S("loans".to_string())),
        ]);
        let token = from_ddb_page(Some(&key)).expect("should build token");
        let parsed = to_ddb_page(Some(token.as_str())).expect("should parse token");
        assert_eq!(key, parsed);
        assert!(to_ddb_page(Some("not json")).is_none());
        assert!(from_ddb_page(None).is_none());
    }

    #[tokio::test]
    async fn test_should_parse_item() {
        let item = parse_item(json!({"book_id": 3, "title": "Sách A", "return_date": null, "borrow_date": "2022-01-01T00:00:00"}))
            .expect("should parse item");
        assert_eq!(3, parse_number_attribute("book_id", &item));
        assert_eq!(Some(AttributeValue::Null(true)), item.get("return_date").cloned());
        assert_eq!(parse_date("2022-01-01"), parse_date_attribute("borrow_date", &item));
        assert_eq!(AttributeValue::Null(true), opt_string_date(None));
    }

    #[tokio::test]
    async fn test_should_detect_throttling() {
        assert!(has_exceeded_limit(Some(b"ProvisionedThroughputExceeded")));
        assert!(!has_exceeded_limit(Some(b"ok")));
        assert!(!has_exceeded_limit(None));
    }
}
