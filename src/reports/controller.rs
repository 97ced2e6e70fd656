use axum::{
    extract::{Query, State},
    response::Json,
};
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::reports::command::borrower_summaries_cmd::{BorrowerSummariesCommand, BorrowerSummariesCommandRequest, BorrowerSummariesCommandResponse};
use crate::reports::command::list_books_cmd::{ListBooksCommand, ListBooksCommandResponse};
use crate::reports::command::list_borrowers_cmd::{ListBorrowersCommand, ListBorrowersCommandResponse};
use crate::reports::command::list_loans_cmd::{ListLoansCommand, ListLoansCommandResponse};
use crate::reports::command::top_borrowers_cmd::{TopBorrowersCommand, TopBorrowersCommandRequest, TopBorrowersCommandResponse};
use crate::reports::command::top_categories_cmd::{TopCategoriesCommand, TopCategoriesCommandRequest, TopCategoriesCommandResponse};
use crate::reports::domain::ReportService;
use crate::reports::factory;

async fn build_service(state: AppState) -> Box<dyn ReportService> {
    factory::create_report_service(&state.config, state.store).await
}

pub async fn list_loans(State(state): State<AppState>) -> Result<Json<ListLoansCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = ListLoansCommand::new(svc).execute(()).await?;
    Ok(Json(res))
}

pub async fn list_books(State(state): State<AppState>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = ListBooksCommand::new(svc).execute(()).await?;
    Ok(Json(res))
}

pub async fn list_borrowers(State(state): State<AppState>) -> Result<Json<ListBorrowersCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = ListBorrowersCommand::new(svc).execute(()).await?;
    Ok(Json(res))
}

pub async fn borrower_summaries(
    State(state): State<AppState>,
    Query(req): Query<BorrowerSummariesCommandRequest>) -> Result<Json<BorrowerSummariesCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = BorrowerSummariesCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn top_categories(
    State(state): State<AppState>,
    Query(req): Query<TopCategoriesCommandRequest>) -> Result<Json<TopCategoriesCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = TopCategoriesCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn top_borrowers(
    State(state): State<AppState>,
    Query(req): Query<TopBorrowersCommandRequest>) -> Result<Json<TopBorrowersCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = TopBorrowersCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
