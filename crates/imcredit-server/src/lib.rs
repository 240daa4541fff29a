//! imcredit Server - Author list API
//!
//! JSON HTTP API over an [`AuthorStore`]. Clients poll the author list and
//! render outputs themselves; `/output` renders the same text server-side.

pub mod error;
pub mod http;

use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use imcredit_core::{AuthorStore, CreditConfig, SqliteAuthorStore};

pub use error::{ApiError, ApiResult};

/// Shared application state
pub struct AppState {
    pub store: Box<dyn AuthorStore>,
}

impl AppState {
    pub fn new(store: impl AuthorStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Open the SQLite database at `db_path`
    pub fn with_database(db_path: &Path) -> imcredit_core::Result<Self> {
        let store = SqliteAuthorStore::open(db_path)?;
        tracing::info!("Opened database {}", db_path.display());
        Ok(Self::new(store))
    }

    /// Fresh in-memory database
    pub fn in_memory() -> imcredit_core::Result<Self> {
        Ok(Self::new(SqliteAuthorStore::open_in_memory()?))
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        // Project endpoints
        .route("/projects", post(http::create_project))
        .route("/projects-list", get(http::list_projects))
        .route("/projects/{id}", get(http::get_project))
        .route("/projects/{id}/output", get(http::get_output))
        // Author endpoints
        .route(
            "/projects/{id}/authors",
            get(http::list_authors).post(http::create_author),
        )
        .route("/projects/{id}/authors/reorder", post(http::reorder_author))
        .route(
            "/projects/{id}/authors/{author_id}",
            put(http::update_author).delete(http::delete_author),
        )
        // System endpoints
        .route("/roles", get(http::list_roles))
        .route("/health", get(http::health));

    Router::new()
        .nest("/api", api)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve on an already bound listener
pub async fn serve_on(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    tracing::info!("imcredit server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, state).await
}

/// Open the configured database and serve until the process exits
pub async fn run(config: &CreditConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::with_database(&config.server.db_path)?);
    serve(&config.server.addr, state).await
}
