//! The storage trait implemented by every procedure backend.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::procedure::{ProcedureCall, SqlValue};

/// A result row: one value per declared column, in scan order.
pub type Row = Vec<SqlValue>;

/// Executes stored procedures on behalf of the API.
///
/// Implementations must be thread-safe (`Send + Sync`); every call acquires
/// whatever connection it needs and releases it before returning, on success
/// and on error alike.
///
/// # Example
///
/// ```ignore
/// use hospital_storage::{Procedure, ProcedureCall, ProcedureStore, StorageError};
///
/// async fn rooms(store: &dyn ProcedureStore) -> Result<usize, StorageError> {
///     let call = ProcedureCall::nullary(Procedure::ListAvailableRooms)?;
///     Ok(store.query(&call).await?.len())
/// }
/// ```
#[async_trait]
pub trait ProcedureStore: Send + Sync {
    /// Runs a command procedure, discarding any result.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` when no connection is available and
    /// `StorageError::Query` when the procedure fails.
    async fn execute(&self, call: &ProcedureCall) -> Result<(), StorageError>;

    /// Runs a query procedure and returns its rows.
    ///
    /// Zero matching rows is an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute), plus `StorageError::Decode` when a row
    /// does not match the procedure's declared columns.
    async fn query(&self, call: &ProcedureCall) -> Result<Vec<Row>, StorageError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), StorageError>;

    /// Short backend identifier for logs.
    fn backend_name(&self) -> &'static str;
}
