use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::loans::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest, BorrowBookCommandResponse};
use crate::loans::command::get_loan_cmd::{GetLoanCommand, GetLoanCommandRequest, GetLoanCommandResponse};
use crate::loans::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest, ReturnBookCommandResponse};
use crate::loans::domain::LoanService;
use crate::loans::factory;

async fn build_service(state: AppState) -> Box<dyn LoanService> {
    factory::create_loan_service(&state.config, state.store).await
}

pub async fn borrow_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<BorrowBookCommandResponse>, ServerError> {
    let req: BorrowBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = BorrowBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn return_book(
    State(state): State<AppState>,
    Path(loan_id): Path<i64>,
    json: Json<Value>) -> Result<Json<ReturnBookCommandResponse>, ServerError> {
    let mut req: ReturnBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.loan_id = loan_id;
    let svc = build_service(state).await;
    let res = ReturnBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn find_loan_by_id(
    State(state): State<AppState>,
    Path(loan_id): Path<i64>) -> Result<Json<GetLoanCommandResponse>, ServerError> {
    let req = GetLoanCommandRequest { loan_id };
    let svc = build_service(state).await;
    let res = GetLoanCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
