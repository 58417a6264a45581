//! The stored-procedure catalogue.
//!
//! Every database operation the API performs is one of the [`Procedure`]
//! variants below. Each variant declares its SQL name, whether it is a
//! command or a row-returning query, the SQL types of its positional
//! parameters and, for queries, the ordered result columns. Backends render
//! SQL from these declarations; they never see free-form SQL.

use std::fmt;

use crate::error::StorageError;

/// SQL type of a procedure parameter or result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Integer,
    Text,
    Date,
    Time,
}

impl SqlType {
    /// Name used in explicit `::type` casts on placeholders.
    #[must_use]
    pub fn cast_name(self) -> &'static str {
        match self {
            SqlType::Integer => "integer",
            SqlType::Text => "text",
            SqlType::Date => "date",
            SqlType::Time => "time",
        }
    }

    /// Cast applied to a result column so it decodes as [`SqlValue`].
    ///
    /// Integer columns widen to `bigint`; date and time columns are rendered
    /// as text in the database's canonical format.
    #[must_use]
    pub fn projection_cast(self) -> &'static str {
        match self {
            SqlType::Integer => "bigint",
            SqlType::Text | SqlType::Date | SqlType::Time => "text",
        }
    }

    /// Whether values of this type travel as [`SqlValue::Int`].
    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(self, SqlType::Integer)
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cast_name())
    }
}

/// A value bound to a parameter or read from a result column.
///
/// `None` is SQL NULL. NULL is typed so backends can bind it with the
/// right parameter type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Int(Option<i64>),
    Text(Option<String>),
}

impl SqlValue {
    #[must_use]
    pub fn int(value: i64) -> Self {
        SqlValue::Int(Some(value))
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        SqlValue::Text(Some(value.into()))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Int(None) | SqlValue::Text(None))
    }

    /// Whether this value can be bound to a parameter of `sql_type`.
    #[must_use]
    pub fn fits(&self, sql_type: SqlType) -> bool {
        match self {
            SqlValue::Int(_) => sql_type.is_integer(),
            SqlValue::Text(_) => !sql_type.is_integer(),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::int(value)
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(value: Option<i64>) -> Self {
        SqlValue::Int(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(Some(value))
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::text(value)
    }
}

/// How a procedure is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureKind {
    /// `CALL name(...)`, no result rows.
    Command,
    /// `SELECT ... FROM name(...)`, zero or more rows.
    Query,
}

/// A named, typed result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: SqlType,
}

// Expands to a struct literal so column slices are promoted to `'static`.
macro_rules! col {
    ($name:literal, $ty:ident) => {
        Column {
            name: $name,
            sql_type: SqlType::$ty,
        }
    };
}

/// The stored procedures exposed through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    InsertPatient,
    ListAllPatients,
    AdmitPatient,
    DischargePatient,
    ListAdmittedPatients,
    ListDoctors,
    GetDoctorAppointments,
    ScheduleAppointment,
    InsertCheckup,
    UpdateCheckup,
    InsertPrescription,
    ListRecords,
    ListAvailableRooms,
}

impl Procedure {
    pub const ALL: [Procedure; 13] = [
        Procedure::InsertPatient,
        Procedure::ListAllPatients,
        Procedure::AdmitPatient,
        Procedure::DischargePatient,
        Procedure::ListAdmittedPatients,
        Procedure::ListDoctors,
        Procedure::GetDoctorAppointments,
        Procedure::ScheduleAppointment,
        Procedure::InsertCheckup,
        Procedure::UpdateCheckup,
        Procedure::InsertPrescription,
        Procedure::ListRecords,
        Procedure::ListAvailableRooms,
    ];

    /// SQL name of the procedure.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Procedure::InsertPatient => "sp_insert_patient",
            Procedure::ListAllPatients => "sp_list_all_patients",
            Procedure::AdmitPatient => "sp_admit_patient",
            Procedure::DischargePatient => "sp_discharge_patient",
            Procedure::ListAdmittedPatients => "sp_list_admitted_patients",
            Procedure::ListDoctors => "sp_list_doctors",
            Procedure::GetDoctorAppointments => "sp_get_doctor_appointments",
            Procedure::ScheduleAppointment => "sp_schedule_appointment",
            Procedure::InsertCheckup => "sp_insert_checkup",
            Procedure::UpdateCheckup => "sp_update_checkup",
            Procedure::InsertPrescription => "sp_insert_prescription",
            Procedure::ListRecords => "sp_list_records",
            Procedure::ListAvailableRooms => "sp_list_available_rooms",
        }
    }

    #[must_use]
    pub fn kind(self) -> ProcedureKind {
        if self.columns().is_empty() {
            ProcedureKind::Command
        } else {
            ProcedureKind::Query
        }
    }

    /// Positional parameter types, in call order.
    #[must_use]
    pub fn params(self) -> &'static [SqlType] {
        use SqlType::*;
        match self {
            Procedure::InsertPatient => &[Text, Text, Text, Date],
            Procedure::AdmitPatient => &[Integer, Integer],
            Procedure::DischargePatient => &[Integer],
            Procedure::GetDoctorAppointments => &[Integer],
            Procedure::ScheduleAppointment => &[Text, Integer, Date, Time],
            // record_id, date, type, patient_id, doctor_id
            Procedure::InsertCheckup => &[Integer, Date, Text, Integer, Integer],
            Procedure::UpdateCheckup => &[Integer, Text],
            // record_id, medication, patient_id, doctor_id
            Procedure::InsertPrescription => &[Integer, Text, Integer, Integer],
            Procedure::ListAllPatients
            | Procedure::ListAdmittedPatients
            | Procedure::ListDoctors
            | Procedure::ListRecords
            | Procedure::ListAvailableRooms => &[],
        }
    }

    /// Result columns, in scan order. Empty for commands.
    #[must_use]
    pub fn columns(self) -> &'static [Column] {
        match self {
            Procedure::ListAllPatients => &[col!("patient_id", Integer)],
            Procedure::ListAdmittedPatients => {
                &[col!("patient_id", Integer), col!("room_id", Integer)]
            }
            Procedure::ListDoctors => &[
                col!("doctor_id", Integer),
                col!("name", Text),
                col!("specialization", Text),
            ],
            Procedure::GetDoctorAppointments => &[
                col!("appointment_date", Date),
                col!("appointment_start_time", Time),
                col!("appointment_end_time", Time),
            ],
            Procedure::ListRecords => &[
                col!("record_id", Integer),
                col!("checkup_id", Integer),
                col!("prescription_id", Integer),
                col!("patient_id", Integer),
                col!("doctor_id", Integer),
            ],
            Procedure::ListAvailableRooms => &[col!("room_id", Integer)],
            Procedure::InsertPatient
            | Procedure::AdmitPatient
            | Procedure::DischargePatient
            | Procedure::ScheduleAppointment
            | Procedure::InsertCheckup
            | Procedure::UpdateCheckup
            | Procedure::InsertPrescription => &[],
        }
    }

    /// Renders the SQL statement for this procedure.
    ///
    /// Every placeholder carries an explicit cast so that text-encoded dates
    /// and 64-bit integers resolve against the procedure signature.
    #[must_use]
    pub fn sql(self) -> String {
        let args = self
            .params()
            .iter()
            .enumerate()
            .map(|(i, t)| format!("${}::{}", i + 1, t.cast_name()))
            .collect::<Vec<_>>()
            .join(", ");

        match self.kind() {
            ProcedureKind::Command => format!("CALL {}({args})", self.name()),
            ProcedureKind::Query => {
                let projection = self
                    .columns()
                    .iter()
                    .map(|c| format!("{0}::{1} AS {0}", c.name, c.sql_type.projection_cast()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("SELECT {projection} FROM {}({args})", self.name())
            }
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A procedure together with its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureCall {
    procedure: Procedure,
    params: Vec<SqlValue>,
}

impl ProcedureCall {
    /// Builds a call, checking arity and parameter types against the
    /// catalogue.
    pub fn new(procedure: Procedure, params: Vec<SqlValue>) -> Result<Self, StorageError> {
        let expected = procedure.params();
        if params.len() != expected.len() {
            return Err(StorageError::internal(format!(
                "{procedure} takes {} parameter(s), got {}",
                expected.len(),
                params.len()
            )));
        }
        if let Some((i, (value, sql_type))) = params
            .iter()
            .zip(expected)
            .enumerate()
            .find(|(_, (value, sql_type))| !value.fits(**sql_type))
        {
            return Err(StorageError::internal(format!(
                "{procedure} parameter {} expects {sql_type}, got {value:?}",
                i + 1
            )));
        }
        Ok(Self { procedure, params })
    }

    /// A call with no arguments.
    pub fn nullary(procedure: Procedure) -> Result<Self, StorageError> {
        Self::new(procedure, Vec::new())
    }

    #[must_use]
    pub fn procedure(&self) -> Procedure {
        self.procedure
    }

    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}
