use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;
use crate::borrowers::command::add_borrower_cmd::{AddBorrowerCommand, AddBorrowerCommandRequest, AddBorrowerCommandResponse};
use crate::borrowers::command::get_borrower_cmd::{GetBorrowerCommand, GetBorrowerCommandRequest, GetBorrowerCommandResponse};
use crate::borrowers::command::remove_borrower_cmd::{RemoveBorrowerCommand, RemoveBorrowerCommandRequest, RemoveBorrowerCommandResponse};
use crate::borrowers::command::search_borrowers_cmd::{SearchBorrowersCommand, SearchBorrowersCommandRequest, SearchBorrowersCommandResponse};
use crate::borrowers::domain::BorrowerService;
use crate::borrowers::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

async fn build_service(state: AppState) -> Box<dyn BorrowerService> {
    factory::create_borrower_service(&state.config, state.store).await
}

pub async fn add_borrower(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddBorrowerCommandResponse>, ServerError> {
    let req: AddBorrowerCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = AddBorrowerCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn search_borrowers(
    State(state): State<AppState>,
    Query(req): Query<SearchBorrowersCommandRequest>) -> Result<Json<SearchBorrowersCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = SearchBorrowersCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn find_borrower_by_id(
    State(state): State<AppState>,
    Path(borrower_id): Path<i64>) -> Result<Json<GetBorrowerCommandResponse>, ServerError> {
    let req = GetBorrowerCommandRequest { borrower_id };
    let svc = build_service(state).await;
    let res = GetBorrowerCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn remove_borrower(
    State(state): State<AppState>,
    Path(borrower_id): Path<i64>) -> Result<Json<RemoveBorrowerCommandResponse>, ServerError> {
    let req = RemoveBorrowerCommandRequest { borrower_id };
    let svc = build_service(state).await;
    let res = RemoveBorrowerCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
