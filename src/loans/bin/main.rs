use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use library_manager::core::controller::{set_local_runtime_env, AppState};
use library_manager::core::repository::RepositoryStore;
use library_manager::loans::controller::{borrow_book, find_loan_by_id, return_book};
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
        .route("/loans", post(borrow_book))
        .route("/loans/:id", get(find_loan_by_id))
        .route("/loans/:id/return", post(return_book))
        .with_state(state);

    run(app).await
}
