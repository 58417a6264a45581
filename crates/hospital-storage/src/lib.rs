//! # hospital-storage
//!
//! Storage abstraction for the hospital API.
//!
//! The API never issues free-form SQL. Each operation maps onto one entry of
//! the [`Procedure`] catalogue, is packaged as a [`ProcedureCall`] with its
//! positional [`SqlValue`] arguments, and is handed to a [`ProcedureStore`]
//! backend. This crate defines those types; backends live in separate crates.

mod error;
mod procedure;
mod traits;

pub use error::{ErrorCategory, StorageError};
pub use procedure::{Column, Procedure, ProcedureCall, ProcedureKind, SqlType, SqlValue};
pub use traits::{ProcedureStore, Row};

/// Type alias for a shareable store.
pub type DynProcedureStore = std::sync::Arc<dyn ProcedureStore>;
