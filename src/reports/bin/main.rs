use axum::{
    routing::get,
    Router,
};
use lambda_http::{run, Error};
use library_manager::core::controller::{set_local_runtime_env, AppState};
use library_manager::core::repository::RepositoryStore;
use library_manager::reports::controller::{borrower_summaries, list_books, list_borrowers, list_loans, top_borrowers, top_categories};
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
        .route("/reports/loans", get(list_loans))
        .route("/reports/books", get(list_books))
        .route("/reports/borrowers", get(list_borrowers))
        .route("/reports/borrower_summaries", get(borrower_summaries))
        .route("/reports/categories", get(top_categories))
        .route("/reports/top_borrowers", get(top_borrowers))
        .with_state(state);

    run(app).await
}
