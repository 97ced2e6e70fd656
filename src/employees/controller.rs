use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::employees::command::add_employee_cmd::{AddEmployeeCommand, AddEmployeeCommandRequest, AddEmployeeCommandResponse};
use crate::employees::command::get_employee_cmd::{GetEmployeeCommand, GetEmployeeCommandRequest, GetEmployeeCommandResponse};
use crate::employees::command::login_cmd::{LoginCommand, LoginCommandRequest, LoginCommandResponse};
use crate::employees::command::on_duty_cmd::{OnDutyCommand, OnDutyCommandRequest, OnDutyCommandResponse};
use crate::employees::command::record_work_date_cmd::{RecordWorkDateCommand, RecordWorkDateCommandRequest, RecordWorkDateCommandResponse};
use crate::employees::domain::EmployeeService;
use crate::employees::factory;

async fn build_service(state: AppState) -> Box<dyn EmployeeService> {
    factory::create_employee_service(&state.config, state.store).await
}

pub async fn add_employee(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddEmployeeCommandResponse>, ServerError> {
    let req: AddEmployeeCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = AddEmployeeCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn find_employee_by_id(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>) -> Result<Json<GetEmployeeCommandResponse>, ServerError> {
    let req = GetEmployeeCommandRequest { employee_id };
    let svc = build_service(state).await;
    let res = GetEmployeeCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn login(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<LoginCommandResponse>, ServerError> {
    let req: LoginCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = LoginCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn record_work_date(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
    json: Json<Value>) -> Result<Json<RecordWorkDateCommandResponse>, ServerError> {
    let mut req: RecordWorkDateCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.employee_id = employee_id;
    let svc = build_service(state).await;
    let res = RecordWorkDateCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub async fn on_duty(
    State(state): State<AppState>,
    Path(day): Path<u32>) -> Result<Json<OnDutyCommandResponse>, ServerError> {
    let req = OnDutyCommandRequest { day };
    let svc = build_service(state).await;
    let res = OnDutyCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
