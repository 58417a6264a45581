use axum::{extract::State, response::IntoResponse};
use hospital_api::{ApiError, Room};
use hospital_storage::{Procedure, ProcedureCall};

use super::{listing, run_query};
use crate::server::AppState;

pub async fn list_available(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let call = ProcedureCall::nullary(Procedure::ListAvailableRooms);
    let rooms: Vec<Room> = run_query(&state, call).await?;
    Ok(listing(rooms))
}
