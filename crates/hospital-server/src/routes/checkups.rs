use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use hospital_api::{ApiError, ApiResponse, Checkup, NewCheckup};

use super::{parse_body, rejected, run_command};
use crate::mapping::{CheckupUpdate, IntoCall, path_id};
use crate::server::AppState;

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let req: NewCheckup = parse_body(&state, &body)?;
    run_command(&state, req.into_call()).await?;
    Ok(StatusCode::CREATED)
}

/// `PUT /api/checkups/{id}`: records the result and echoes the decoded body.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let checkup_id = path_id(&raw_id).map_err(rejected)?;
    let checkup: Checkup = parse_body(&state, &body)?;
    let update = CheckupUpdate {
        checkup_id,
        checkup: checkup.clone(),
    };
    run_command(&state, update.into_call()).await?;
    Ok(ApiResponse::ok(checkup))
}
