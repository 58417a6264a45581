use std::net::SocketAddr;

use axum::{Router, http::StatusCode, middleware, routing::get};
use hospital_storage::{DynProcedureStore, StorageError};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::{config::AppConfig, handlers, mapping::NumericPolicy, middleware as app_middleware, routes};

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: DynProcedureStore,
    pub numeric_policy: NumericPolicy,
}

impl AppState {
    pub fn new(store: DynProcedureStore, cfg: &AppConfig) -> Self {
        Self {
            store,
            numeric_policy: cfg.mapping.fractional_numbers,
        }
    }
}

pub struct HospitalServer {
    addr: SocketAddr,
    app: Router,
}

pub fn build_app(cfg: &AppConfig, state: AppState) -> Router {
    let body_limit = cfg.server.body_limit_bytes;
    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .nest("/api", routes::api_routes())
        .fallback(handlers::fallback)
        .with_state(state)
        // Layers run outermost-last: request id -> cors -> compression -> trace -> error body -> timeout -> body limit
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            cfg.request_timeout(),
        ))
        .layer(middleware::map_response(app_middleware::structured_errors))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    use tracing::field::Empty;
                    let req_id = req
                        .extensions()
                        .get::<axum::http::HeaderValue>()
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                        http.status_code = Empty,
                        request_id = %req_id
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(app_middleware::request_id))
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
    store: Option<DynProcedureStore>,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
            store: None,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    /// Uses the given store instead of connecting to PostgreSQL.
    pub fn with_store(mut self, store: DynProcedureStore) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn build(self) -> Result<HospitalServer, StorageError> {
        let store: DynProcedureStore = match self.store {
            Some(store) => store,
            None => {
                let pg = self.config.storage.postgres.to_postgres_config();
                let store: DynProcedureStore = hospital_db_postgres::create_store(&pg)?;
                store
            }
        };
        tracing::info!(
            backend = store.backend_name(),
            fractional_numbers = ?self.config.mapping.fractional_numbers,
            "Procedure store ready"
        );

        let state = AppState::new(store, &self.config);
        let app = build_app(&self.config, state);

        Ok(HospitalServer {
            addr: self.addr,
            app,
        })
    }
}

impl HospitalServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
