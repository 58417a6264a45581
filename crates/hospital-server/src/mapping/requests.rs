//! Per-operation request schemas.
//!
//! Each schema reads its fields in declared order (first failure wins) and
//! knows how to package itself as a `ProcedureCall` with parameters in the
//! procedure's positional order.

use hospital_api::{Admission, Checkup, Discharge, NewAppointment, NewCheckup, NewPatient, Prescription};
use hospital_storage::{Procedure, ProcedureCall, SqlValue, StorageError};

use super::{FieldMap, MappingError};

/// Builds a typed request from a JSON body.
pub trait FromFields: Sized {
    fn from_fields(fields: &FieldMap) -> Result<Self, MappingError>;
}

/// Packages a typed request as a stored-procedure call.
pub trait IntoCall {
    fn into_call(self) -> Result<ProcedureCall, StorageError>;
}

impl FromFields for NewPatient {
    fn from_fields(fields: &FieldMap) -> Result<Self, MappingError> {
        Ok(Self {
            name: fields.require_str("name")?,
            email: fields.require_str("email")?,
            gender: fields.require_str("gender")?,
            birthday: fields.require_str("birthday")?,
        })
    }
}

impl IntoCall for NewPatient {
    fn into_call(self) -> Result<ProcedureCall, StorageError> {
        ProcedureCall::new(
            Procedure::InsertPatient,
            vec![
                self.name.into(),
                self.email.into(),
                self.gender.into(),
                self.birthday.into(),
            ],
        )
    }
}

impl FromFields for Admission {
    fn from_fields(fields: &FieldMap) -> Result<Self, MappingError> {
        Ok(Self {
            patient_id: fields.require_int("patient_id")?,
            room_id: fields.require_int("room_id")?,
        })
    }
}

impl IntoCall for Admission {
    fn into_call(self) -> Result<ProcedureCall, StorageError> {
        ProcedureCall::new(
            Procedure::AdmitPatient,
            vec![self.patient_id.into(), self.room_id.into()],
        )
    }
}

impl FromFields for Discharge {
    fn from_fields(fields: &FieldMap) -> Result<Self, MappingError> {
        Ok(Self {
            patient_id: fields.require_int("patient_id")?,
        })
    }
}

impl IntoCall for Discharge {
    fn into_call(self) -> Result<ProcedureCall, StorageError> {
        ProcedureCall::new(Procedure::DischargePatient, vec![self.patient_id.into()])
    }
}

impl FromFields for NewAppointment {
    fn from_fields(fields: &FieldMap) -> Result<Self, MappingError> {
        Ok(Self {
            email: fields.require_str("email")?,
            doctor_id: fields.require_int("doctor_id")?,
            appointment_date: fields.require_str("appointment_date")?,
            appointment_start_time: fields.require_str("appointment_start_time")?,
        })
    }
}

impl IntoCall for NewAppointment {
    fn into_call(self) -> Result<ProcedureCall, StorageError> {
        ProcedureCall::new(
            Procedure::ScheduleAppointment,
            vec![
                self.email.into(),
                self.doctor_id.into(),
                self.appointment_date.into(),
                self.appointment_start_time.into(),
            ],
        )
    }
}

impl FromFields for NewCheckup {
    fn from_fields(fields: &FieldMap) -> Result<Self, MappingError> {
        Ok(Self {
            checkup_date: fields.require_str("checkup_date")?,
            checkup_type: fields.require_str("checkup_type")?,
            record_id: fields.optional_int("record_id")?,
            patient_id: fields.optional_int("patient_id")?,
            doctor_id: fields.optional_int("doctor_id")?,
        })
    }
}

impl IntoCall for NewCheckup {
    fn into_call(self) -> Result<ProcedureCall, StorageError> {
        ProcedureCall::new(
            Procedure::InsertCheckup,
            vec![
                self.record_id.into(),
                self.checkup_date.into(),
                self.checkup_type.into(),
                self.patient_id.into(),
                self.doctor_id.into(),
            ],
        )
    }
}

impl FromFields for Prescription {
    fn from_fields(fields: &FieldMap) -> Result<Self, MappingError> {
        Ok(Self {
            medication: fields.require_str("medication")?,
            record_id: fields.optional_int("record_id")?,
            patient_id: fields.optional_int("patient_id")?,
            doctor_id: fields.optional_int("doctor_id")?,
        })
    }
}

impl IntoCall for Prescription {
    fn into_call(self) -> Result<ProcedureCall, StorageError> {
        ProcedureCall::new(
            Procedure::InsertPrescription,
            vec![
                self.record_id.into(),
                self.medication.into(),
                self.patient_id.into(),
                self.doctor_id.into(),
            ],
        )
    }
}

/// Body of a checkup update: `result` is required, the rest is echoed back.
impl FromFields for Checkup {
    fn from_fields(fields: &FieldMap) -> Result<Self, MappingError> {
        Ok(Self {
            result: Some(fields.require_str("result")?),
            record_id: fields.optional_int("record_id")?,
            patient_id: fields.optional_int("patient_id")?,
            doctor_id: fields.optional_int("doctor_id")?,
            checkup_date: fields.optional_str("checkup_date")?,
            checkup_type: fields.optional_str("checkup_type")?,
        })
    }
}

/// A checkup update addressed by path id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckupUpdate {
    pub checkup_id: i64,
    pub checkup: Checkup,
}

impl IntoCall for CheckupUpdate {
    fn into_call(self) -> Result<ProcedureCall, StorageError> {
        ProcedureCall::new(
            Procedure::UpdateCheckup,
            vec![
                self.checkup_id.into(),
                SqlValue::Text(self.checkup.result),
            ],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoctorAppointments {
    pub doctor_id: i64,
}

impl IntoCall for DoctorAppointments {
    fn into_call(self) -> Result<ProcedureCall, StorageError> {
        ProcedureCall::new(Procedure::GetDoctorAppointments, vec![self.doctor_id.into()])
    }
}
