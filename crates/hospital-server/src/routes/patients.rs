use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use hospital_api::{Admission, ApiError, ApiResponse, Discharge, NewPatient, Patient, StatusMessage};
use hospital_storage::{Procedure, ProcedureCall};

use super::{listing, parse_body, run_command, run_query};
use crate::mapping::{IntoCall, path_id};
use crate::server::AppState;

/// `POST /api/patients`: echoes the accepted patient.
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: NewPatient = parse_body(&state, &body)?;
    let echo = Patient::from(req.clone());
    run_command(&state, req.into_call()).await?;
    Ok(ApiResponse::ok(echo))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let call = ProcedureCall::nullary(Procedure::ListAllPatients);
    let patients: Vec<Patient> = run_query(&state, call).await?;
    Ok(listing(patients))
}

pub async fn admit(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: Admission = parse_body(&state, &body)?;
    run_command(&state, req.into_call()).await?;
    Ok(ApiResponse::ok(StatusMessage::new("Patient admitted successfully")))
}

/// `POST /api/patients/{id}/discharge`: the patient comes from the body.
pub async fn discharge(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: Discharge = parse_body(&state, &body)?;
    if path_id(&raw_id).ok() != Some(req.patient_id) {
        tracing::debug!(
            path_id = %raw_id,
            patient_id = req.patient_id,
            "discharge path id differs from body"
        );
    }
    run_command(&state, req.into_call()).await?;
    Ok(ApiResponse::ok(StatusMessage::new("Patient discharged successfully")))
}

pub async fn list_admitted(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let call = ProcedureCall::nullary(Procedure::ListAdmittedPatients);
    let patients: Vec<Patient> = run_query(&state, call).await?;
    Ok(listing(patients))
}
