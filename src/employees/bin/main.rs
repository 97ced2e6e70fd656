use axum::{
    routing::{get, post, put},
    Router,
};
use lambda_http::{run, Error};
use library_manager::core::controller::{set_local_runtime_env, AppState};
use library_manager::core::repository::RepositoryStore;
use library_manager::employees::controller::{add_employee, find_employee_by_id, login, on_duty, record_work_date};
use library_manager::utils::ddb::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = AppState::from_env();
    if state.store != RepositoryStore::DynamoDB {
        set_local_runtime_env();
    }

    let app = Router::new()
        .route("/employees", post(add_employee))
        .route("/employees/login", post(login))
        .route("/employees/on_duty/:day", get(on_duty))
        .route("/employees/:id", get(find_employee_by_id))
        .route("/employees/:id/work_date", put(record_work_date))
        .with_state(state);

    run(app).await
}
