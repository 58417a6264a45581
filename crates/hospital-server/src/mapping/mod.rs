//! Request-to-procedure mapping.
//!
//! Request bodies arrive as loosely-typed JSON. [`FieldMap`] wraps the parsed
//! object and hands out typed fields; the per-operation schemas in
//! [`requests`] use it to build a `ProcedureCall`, and [`rows`] decodes
//! procedure results back into the API's transfer types.

pub mod requests;
pub mod rows;

use hospital_api::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

pub use requests::{CheckupUpdate, DoctorAppointments, FromFields, IntoCall};
pub use rows::{FromProcedureRow, RowReader, decode_rows};

/// Treatment of JSON numbers with a fractional part on integer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericPolicy {
    /// Drop the fractional part (`3.7` becomes `3`).
    #[default]
    Truncate,
    /// Refuse the value with a validation error.
    Reject,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Body is not valid JSON or not an object.
    #[error("{0}")]
    Body(String),
}

impl MappingError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(f) | Self::InvalidField { field: f, .. } => Some(f),
            Self::Body(_) => None,
        }
    }
}

impl From<MappingError> for ApiError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::Body(msg) => ApiError::deserialization(msg),
            other => ApiError::validation(other.to_string()),
        }
    }
}

/// A parsed JSON request object with typed field accessors.
#[derive(Debug, Clone)]
pub struct FieldMap {
    fields: Map<String, Value>,
    policy: NumericPolicy,
}

impl FieldMap {
    /// Parses raw body bytes. Anything but a JSON object is rejected.
    pub fn from_slice(body: &[u8], policy: NumericPolicy) -> Result<Self, MappingError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| MappingError::Body(e.to_string()))?;
        Self::from_value(value, policy)
    }

    pub fn from_value(value: Value, policy: NumericPolicy) -> Result<Self, MappingError> {
        match value {
            Value::Object(fields) => Ok(Self { fields, policy }),
            other => Err(MappingError::Body(format!(
                "request body must be a JSON object, got {}",
                json_type(&other)
            ))),
        }
    }

    pub fn policy(&self) -> NumericPolicy {
        self.policy
    }

    /// A present, non-null value.
    fn present(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    pub fn require_str(&self, field: &'static str) -> Result<String, MappingError> {
        match self.present(field) {
            None => Err(MappingError::MissingField(field)),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(expected(field, "a string", other)),
        }
    }

    pub fn optional_str(&self, field: &'static str) -> Result<Option<String>, MappingError> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(expected(field, "a string", other)),
        }
    }

    pub fn require_int(&self, field: &'static str) -> Result<i64, MappingError> {
        match self.present(field) {
            None => Err(MappingError::MissingField(field)),
            Some(Value::Number(n)) => coerce_int(field, n, self.policy),
            Some(other) => Err(expected(field, "a number", other)),
        }
    }

    /// Absent and `null` both yield `None`; `0` yields `Some(0)`.
    pub fn optional_int(&self, field: &'static str) -> Result<Option<i64>, MappingError> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::Number(n)) => coerce_int(field, n, self.policy).map(Some),
            Some(other) => Err(expected(field, "a number", other)),
        }
    }
}

/// Parses an integer path segment.
pub fn path_id(raw: &str) -> Result<i64, MappingError> {
    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| MappingError::invalid("id", format!("expected an integer, got '{raw}'")))?;
    in_key_range("id", id)
}

/// Procedure keys are SQL `integer`; anything wider would fail in the database.
fn in_key_range(field: &'static str, value: i64) -> Result<i64, MappingError> {
    if i32::try_from(value).is_ok() {
        Ok(value)
    } else {
        Err(MappingError::invalid(field, "number out of range"))
    }
}

fn coerce_int(field: &'static str, n: &Number, policy: NumericPolicy) -> Result<i64, MappingError> {
    if let Some(i) = n.as_i64() {
        return in_key_range(field, i);
    }
    if n.is_u64() {
        return Err(MappingError::invalid(field, "number out of range"));
    }

    let f = n
        .as_f64()
        .filter(|f| f.is_finite())
        .ok_or_else(|| MappingError::invalid(field, "expected a finite number"))?;

    if f.fract() != 0.0 && policy == NumericPolicy::Reject {
        return Err(MappingError::invalid(
            field,
            format!("expected an integer, got {f}"),
        ));
    }

    let truncated = f.trunc();
    if truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX) {
        return Err(MappingError::invalid(field, "number out of range"));
    }
    Ok(truncated as i64)
}

fn expected(field: &'static str, what: &str, got: &Value) -> MappingError {
    MappingError::invalid(field, format!("expected {what}, got {}", json_type(got)))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
