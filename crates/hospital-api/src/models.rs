//! Transfer shapes exchanged with API clients.
//!
//! The database owns every entity; these types only carry what a single
//! request or procedure result holds. Fields an operation does not populate
//! are `None` and are left out of the JSON output.

use serde::{Deserialize, Serialize};

/// A patient as returned by the patient listings and intake echo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

/// Patient intake payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub email: String,
    pub gender: String,
    pub birthday: String,
}

impl From<NewPatient> for Patient {
    fn from(p: NewPatient) -> Self {
        Self {
            name: Some(p.name),
            email: Some(p.email),
            gender: Some(p.gender),
            birthday: Some(p.birthday),
            ..Default::default()
        }
    }
}

/// Assigns a patient to a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub patient_id: i64,
    pub room_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discharge {
    pub patient_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: i64,
    pub name: String,
    pub specialization: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<i64>,
    pub appointment_date: String,
    pub appointment_start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_end_time: Option<String>,
}

/// Scheduling payload. The patient is identified by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub email: String,
    pub doctor_id: i64,
    pub appointment_date: String,
    pub appointment_start_time: String,
}

/// Aggregate linking a checkup and a prescription to a patient and doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub record_id: i64,
    pub checkup_id: i64,
    pub prescription_id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A checkup as echoed by the update operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Checkup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkup_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkup_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// Checkup creation payload; the foreign keys are nullable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckup {
    pub record_id: Option<i64>,
    pub checkup_date: String,
    pub checkup_type: String,
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
}

/// Prescription creation payload; the foreign keys are nullable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prescription {
    pub record_id: Option<i64>,
    pub medication: String,
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: i64,
}

/// Static success payload for state-changing operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
