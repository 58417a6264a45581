//! PostgreSQL implementation of the `ProcedureStore` trait.

use async_trait::async_trait;
use sqlx_core::query::query;
use sqlx_core::row::Row as _;
use sqlx_postgres::{PgPool, PgRow};
use tracing::{debug, instrument, warn};

use hospital_storage::{
    Column, Procedure, ProcedureCall, ProcedureKind, ProcedureStore, Row, SqlValue, StorageError,
};

use crate::config::PostgresConfig;
use crate::error::{PostgresError, is_undefined_function};
use crate::pool;

/// Stored-procedure backend over a shared PostgreSQL connection pool.
///
/// Each call checks a connection out of the pool for the duration of a
/// single statement; sqlx returns it on drop, so it is released on every
/// exit path.
#[derive(Debug, Clone)]
pub struct PostgresProcedureStore {
    pool: PgPool,
}

impl PostgresProcedureStore {
    /// Creates a store with a new connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool configuration is invalid.
    pub fn new(config: &PostgresConfig) -> Result<Self, StorageError> {
        let pool = pool::create_pool(config)?;
        Ok(Self { pool })
    }

    /// Creates a store from an existing connection pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn run(&self, call: &ProcedureCall) -> Result<Vec<PgRow>, PostgresError> {
        let sql = call.procedure().sql();
        let mut q = query(&sql);
        for param in call.params() {
            q = match param {
                SqlValue::Int(v) => q.bind(*v),
                SqlValue::Text(v) => q.bind(v.as_deref()),
            };
        }

        let result = match call.procedure().kind() {
            ProcedureKind::Command => q.execute(&self.pool).await.map(|_| Vec::new()),
            ProcedureKind::Query => q.fetch_all(&self.pool).await,
        };

        result.map_err(|e| {
            if is_undefined_function(&e) {
                warn!(
                    procedure = %call.procedure(),
                    "stored procedure is not installed in the database"
                );
            }
            PostgresError::from(e)
        })
    }
}

#[async_trait]
impl ProcedureStore for PostgresProcedureStore {
    #[instrument(skip(self, call), fields(procedure = %call.procedure()))]
    async fn execute(&self, call: &ProcedureCall) -> Result<(), StorageError> {
        self.run(call).await?;
        debug!("procedure executed");
        Ok(())
    }

    #[instrument(skip(self, call), fields(procedure = %call.procedure()))]
    async fn query(&self, call: &ProcedureCall) -> Result<Vec<Row>, StorageError> {
        let rows = self.run(call).await?;
        let columns = call.procedure().columns();
        let decoded = rows
            .iter()
            .map(|row| decode_row(call.procedure(), row, columns))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rows = decoded.len(), "procedure returned rows");
        Ok(decoded)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        pool::test_connection(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Reads the declared columns of one row, in order.
fn decode_row(procedure: Procedure, row: &PgRow, columns: &[Column]) -> Result<Row, StorageError> {
    if row.len() != columns.len() {
        return Err(StorageError::decode(format!(
            "{procedure} returned {} column(s), expected {}",
            row.len(),
            columns.len()
        )));
    }

    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let value = if column.sql_type.is_integer() {
                row.try_get::<Option<i64>, _>(i).map(SqlValue::Int)
            } else {
                row.try_get::<Option<String>, _>(i).map(SqlValue::Text)
            };
            value.map_err(|e| {
                StorageError::decode(format!("{procedure} column {}: {e}", column.name))
            })
        })
        .collect()
}
