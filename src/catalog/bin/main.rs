use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use library_manager::catalog::controller::{add_book, find_book_by_id, remove_book, search_books, update_book};
use library_manager::core::controller::{set_local_runtime_env, AppState};
use library_manager::core::repository::RepositoryStore;
use library_manager::utils::ddb::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = AppState::from_env();
    if state.store != RepositoryStore::DynamoDB {
        set_local_runtime_env();
    }

    let app = Router::new()
        .route("/books", post(add_book).get(search_books))
        .route("/books/:id",
               get(find_book_by_id).put(update_book).delete(remove_book))
        .with_state(state);

    run(app).await
}
