use axum::{body::Bytes, extract::State, http::StatusCode};
use hospital_api::{ApiError, Prescription};

use super::{parse_body, run_command};
use crate::mapping::IntoCall;
use crate::server::AppState;

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let req: Prescription = parse_body(&state, &body)?;
    run_command(&state, req.into_call()).await?;
    Ok(StatusCode::CREATED)
}
