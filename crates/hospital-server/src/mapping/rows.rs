//! Decoding of procedure result rows into transfer types.

use hospital_api::{Appointment, Doctor, Patient, Record, Room};
use hospital_storage::{Column, Procedure, Row, SqlValue, StorageError};

/// Builds a value from one result row.
pub trait FromProcedureRow: Sized {
    fn from_row(row: &RowReader<'_>) -> Result<Self, StorageError>;
}

/// Name-based view over one row of a known procedure.
pub struct RowReader<'a> {
    procedure: Procedure,
    columns: &'static [Column],
    values: &'a [SqlValue],
}

impl<'a> RowReader<'a> {
    pub fn new(procedure: Procedure, values: &'a [SqlValue]) -> Result<Self, StorageError> {
        let columns = procedure.columns();
        if values.len() != columns.len() {
            return Err(StorageError::decode(format!(
                "{procedure} row has {} value(s), expected {}",
                values.len(),
                columns.len()
            )));
        }
        Ok(Self {
            procedure,
            columns,
            values,
        })
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    fn value(&self, name: &str) -> Result<&SqlValue, StorageError> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .map(|i| &self.values[i])
            .ok_or_else(|| {
                StorageError::decode(format!("{} has no column {name}", self.procedure))
            })
    }

    pub fn opt_int(&self, name: &str) -> Result<Option<i64>, StorageError> {
        match self.value(name)? {
            SqlValue::Int(v) => Ok(*v),
            SqlValue::Text(_) => Err(self.type_error(name, "integer")),
        }
    }

    pub fn int(&self, name: &str) -> Result<i64, StorageError> {
        self.opt_int(name)?.ok_or_else(|| self.null_error(name))
    }

    pub fn opt_text(&self, name: &str) -> Result<Option<String>, StorageError> {
        match self.value(name)? {
            SqlValue::Text(v) => Ok(v.clone()),
            SqlValue::Int(_) => Err(self.type_error(name, "text")),
        }
    }

    pub fn text(&self, name: &str) -> Result<String, StorageError> {
        self.opt_text(name)?.ok_or_else(|| self.null_error(name))
    }

    fn type_error(&self, name: &str, expected: &str) -> StorageError {
        StorageError::decode(format!(
            "{} column {name}: expected {expected}",
            self.procedure
        ))
    }

    fn null_error(&self, name: &str) -> StorageError {
        StorageError::decode(format!(
            "{} column {name}: unexpected NULL",
            self.procedure
        ))
    }
}

/// Decodes every row of a query result; the first bad row fails the lot.
pub fn decode_rows<T: FromProcedureRow>(
    procedure: Procedure,
    rows: &[Row],
) -> Result<Vec<T>, StorageError> {
    rows.iter()
        .map(|values| T::from_row(&RowReader::new(procedure, values)?))
        .collect()
}

impl FromProcedureRow for Patient {
    fn from_row(row: &RowReader<'_>) -> Result<Self, StorageError> {
        let room_id = if row.has_column("room_id") {
            row.opt_int("room_id")?
        } else {
            None
        };
        Ok(Self {
            patient_id: Some(row.int("patient_id")?),
            room_id,
            ..Default::default()
        })
    }
}

impl FromProcedureRow for Doctor {
    fn from_row(row: &RowReader<'_>) -> Result<Self, StorageError> {
        Ok(Self {
            doctor_id: row.int("doctor_id")?,
            name: row.text("name")?,
            specialization: row.text("specialization")?,
        })
    }
}

impl FromProcedureRow for Appointment {
    fn from_row(row: &RowReader<'_>) -> Result<Self, StorageError> {
        Ok(Self {
            appointment_date: row.text("appointment_date")?,
            appointment_start_time: row.text("appointment_start_time")?,
            appointment_end_time: row.opt_text("appointment_end_time")?,
            ..Default::default()
        })
    }
}

impl FromProcedureRow for Record {
    fn from_row(row: &RowReader<'_>) -> Result<Self, StorageError> {
        Ok(Self {
            record_id: row.int("record_id")?,
            checkup_id: row.int("checkup_id")?,
            prescription_id: row.int("prescription_id")?,
            patient_id: row.int("patient_id")?,
            doctor_id: row.int("doctor_id")?,
            created_at: None,
            updated_at: None,
        })
    }
}

impl FromProcedureRow for Room {
    fn from_row(row: &RowReader<'_>) -> Result<Self, StorageError> {
        Ok(Self {
            room_id: row.int("room_id")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admitted_patients_carry_room() {
        let rows = vec![vec![SqlValue::int(1), SqlValue::int(2)]];
        let patients: Vec<Patient> = decode_rows(Procedure::ListAdmittedPatients, &rows).unwrap();
        assert_eq!(patients[0].patient_id, Some(1));
        assert_eq!(patients[0].room_id, Some(2));
    }

    #[test]
    fn listed_patients_are_id_only() {
        let rows = vec![vec![SqlValue::int(5)]];
        let patients: Vec<Patient> = decode_rows(Procedure::ListAllPatients, &rows).unwrap();
        assert_eq!(
            patients,
            vec![Patient {
                patient_id: Some(5),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn appointment_end_time_may_be_null() {
        let rows = vec![vec![
            SqlValue::text("2024-06-01"),
            SqlValue::text("09:00:00"),
            SqlValue::Text(None),
        ]];
        let appts: Vec<Appointment> =
            decode_rows(Procedure::GetDoctorAppointments, &rows).unwrap();
        assert_eq!(appts[0].appointment_end_time, None);
        assert_eq!(appts[0].appointment_start_time, "09:00:00");
    }

    #[test]
    fn wrong_arity_is_a_decode_error() {
        let rows = vec![vec![SqlValue::int(1)]];
        let err = decode_rows::<Doctor>(Procedure::ListDoctors, &rows).unwrap_err();
        assert!(matches!(err, StorageError::Decode { .. }));
    }

    #[test]
    fn null_in_required_column_is_a_decode_error() {
        let rows = vec![vec![
            SqlValue::int(1),
            SqlValue::Text(None),
            SqlValue::text("cardiology"),
        ]];
        let err = decode_rows::<Doctor>(Procedure::ListDoctors, &rows).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn wrong_type_is_a_decode_error() {
        let rows = vec![vec![SqlValue::text("one")]];
        let err = decode_rows::<Room>(Procedure::ListAvailableRooms, &rows).unwrap_err();
        assert!(matches!(err, StorageError::Decode { .. }));
    }

    #[test]
    fn empty_result_decodes_to_empty_vec() {
        let rooms: Vec<Room> = decode_rows(Procedure::ListAvailableRooms, &[]).unwrap();
        assert!(rooms.is_empty());
    }
}
