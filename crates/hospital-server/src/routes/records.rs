use axum::{extract::State, response::IntoResponse};
use hospital_api::{ApiError, Record};
use hospital_storage::{Procedure, ProcedureCall};

use super::{listing, run_query};
use crate::server::AppState;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let call = ProcedureCall::nullary(Procedure::ListRecords);
    let records: Vec<Record> = run_query(&state, call).await?;
    Ok(listing(records))
}
