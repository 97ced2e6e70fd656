use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use library_manager::borrowers::controller::{add_borrower, find_borrower_by_id, remove_borrower, search_borrowers};
use library_manager::core::controller::{set_local_runtime_env, AppState};
use library_manager::core::repository::RepositoryStore;
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
        .route("/borrowers", post(add_borrower).get(search_borrowers))
        .route("/borrowers/:id",
               get(find_borrower_by_id).delete(remove_borrower))
        .with_state(state);

    run(app).await
}
