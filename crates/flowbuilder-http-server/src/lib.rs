//! FlowBuilder HTTP server
//!
//! Exposes [`WorkflowService`] as a JSON REST API:
//!
//! | method | path | |
//! |---|---|---|
//! | GET | `/api/workflows` | list |
//! | POST | `/api/workflows` | create |
//! | GET | `/api/workflows/:id` | fetch one |
//! | PUT | `/api/workflows/:id` | partial update |
//! | DELETE | `/api/workflows/:id` | delete |
//! | POST | `/api/workflows/:id/execute` | execution stub |
//! | GET | `/api/ping`, `/api/demo` | smoke tests |

pub mod config;
pub mod constants;
pub mod extract;
pub mod handlers;
pub mod response;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use flowbuilder_workflow_service::{InMemoryWorkflowStore, WorkflowService};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub use config::{ConfigError, ServerConfig};
pub use response::{ApiError, ApiResponse};

/// Shared state for axum handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WorkflowService>,
}

/// Errors that stop the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Service over an in-memory store, seeded unless disabled
pub fn build_service(config: &ServerConfig) -> WorkflowService {
    let store = if config.seed_samples {
        InMemoryWorkflowStore::with_samples()
    } else {
        InMemoryWorkflowStore::new()
    };
    WorkflowService::new(Arc::new(store))
}

/// Build the application router
pub fn build_router(service: Arc<WorkflowService>, config: &ServerConfig) -> Router {
    let app = Router::new()
        .route(
            "/api/workflows",
            get(handlers::list_workflows).post(handlers::create_workflow),
        )
        .route(
            "/api/workflows/:id",
            get(handlers::get_workflow)
                .put(handlers::update_workflow)
                .delete(handlers::delete_workflow),
        )
        .route("/api/workflows/:id/execute", post(handlers::execute_workflow))
        .route("/api/ping", get(handlers::ping))
        .route("/api/demo", get(handlers::demo))
        .with_state(AppState { service });

    if config.cors_allow_any {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app.layer(cors)
    } else {
        app
    }
}

/// Bind the configured address and serve until `shutdown` resolves
pub async fn run<F>(config: ServerConfig, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let service = Arc::new(build_service(&config));
    let app = build_router(service, &config);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local: SocketAddr = listener.local_addr().map_err(ServerError::Serve)?;

    log::info!("FlowBuilder server listening on http://{}", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    log::info!("FlowBuilder server stopped");
    Ok(())
}
