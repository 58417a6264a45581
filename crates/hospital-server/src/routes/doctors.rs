use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use hospital_api::{ApiError, Appointment, Doctor};
use hospital_storage::{Procedure, ProcedureCall};

use super::{listing, rejected, run_query};
use crate::mapping::{DoctorAppointments, IntoCall, path_id};
use crate::server::AppState;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let call = ProcedureCall::nullary(Procedure::ListDoctors);
    let doctors: Vec<Doctor> = run_query(&state, call).await?;
    Ok(listing(doctors))
}

pub async fn appointments(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let doctor_id = path_id(&raw_id).map_err(rejected)?;
    let call = DoctorAppointments { doctor_id }.into_call();
    let appointments: Vec<Appointment> = run_query(&state, call).await?;
    Ok(listing(appointments))
}
