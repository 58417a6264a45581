//! `/api` routes: one handler per stored procedure.

mod appointments;
mod checkups;
mod doctors;
mod patients;
mod prescriptions;
mod records;
mod rooms;

use axum::{
    Router,
    body::Bytes,
    http::{HeaderValue, header},
    routing::{get, post, put},
};
use hospital_api::{ApiError, ApiResponse};
use hospital_storage::{ProcedureCall, StorageError};
use serde::Serialize;

use crate::mapping::{FieldMap, FromFields, FromProcedureRow, MappingError, decode_rows};
use crate::server::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/patients", post(patients::create).get(patients::list))
        .route("/patients/admit", post(patients::admit))
        .route("/patients/admitted", get(patients::list_admitted))
        .route("/patients/{id}/discharge", post(patients::discharge))
        .route("/doctors", get(doctors::list))
        .route("/doctors/{id}/appointments", get(doctors::appointments))
        .route("/appointments", post(appointments::create))
        .route("/checkups", post(checkups::create))
        .route("/checkups/{id}", put(checkups::update))
        .route("/prescriptions", post(prescriptions::create))
        .route("/records", get(records::list))
        .route("/rooms/available", get(rooms::list_available))
}

/// Parses the raw body into a typed request.
pub(crate) fn parse_body<T: FromFields>(state: &AppState, body: &Bytes) -> Result<T, ApiError> {
    let fields = FieldMap::from_slice(body, state.numeric_policy).map_err(rejected)?;
    T::from_fields(&fields).map_err(rejected)
}

pub(crate) fn rejected(err: MappingError) -> ApiError {
    tracing::debug!(error = %err, "request rejected");
    err.into()
}

/// Runs a command procedure.
pub(crate) async fn run_command(
    state: &AppState,
    call: Result<ProcedureCall, StorageError>,
) -> Result<(), ApiError> {
    let call = call.map_err(internal_call_error)?;
    state.store.execute(&call).await.map_err(|e| {
        tracing::error!(procedure = %call.procedure(), error = %e, "procedure call failed");
        ApiError::from(e)
    })
}

/// Runs a query procedure and decodes its rows.
pub(crate) async fn run_query<T: FromProcedureRow>(
    state: &AppState,
    call: Result<ProcedureCall, StorageError>,
) -> Result<Vec<T>, ApiError> {
    let call = call.map_err(internal_call_error)?;
    let procedure = call.procedure();
    let rows = state.store.query(&call).await.and_then(|rows| decode_rows(procedure, &rows));
    rows.map_err(|e| {
        tracing::error!(procedure = %procedure, error = %e, "procedure call failed");
        ApiError::from(e)
    })
}

fn internal_call_error(e: StorageError) -> ApiError {
    tracing::error!(error = %e, "malformed procedure call");
    ApiError::from(e)
}

/// JSON array response for listings; always fresh.
pub(crate) fn listing<T: Serialize>(items: Vec<T>) -> ApiResponse<Vec<T>> {
    ApiResponse::ok(items).with_header(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))
}
