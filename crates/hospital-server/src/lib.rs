pub mod config;
pub mod handlers;
pub mod mapping;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod server;

pub use config::{AppConfig, LoggingConfig, MappingConfig, PostgresStorageConfig, ServerConfig};
pub use mapping::NumericPolicy;
pub use observability::init_tracing;
pub use server::{AppState, HospitalServer, ServerBuilder, build_app};
