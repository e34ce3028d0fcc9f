//! HTTP API application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request bodies and the JSON projection of a customer
//! - `errors.rs`: response envelopes and error mapping

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use rolodex_customers::CustomerRepository;
use rolodex_infra::CustomerFactory;

pub mod dto;
pub mod errors;
pub mod routes;

/// State shared by every handler.
#[derive(Debug)]
pub struct AppState {
    pub factory: CustomerFactory,
}

impl AppState {
    /// Run repository work on the blocking pool.
    ///
    /// Store adapters are synchronous (the SQLite one blocks on its own
    /// runtime), so they must never run on an async worker thread.
    pub async fn with_repository<F>(self: &Arc<Self>, work: F) -> Response
    where
        F: FnOnce(CustomerRepository) -> Response + Send + 'static,
    {
        let state = Arc::clone(self);
        let joined = tokio::task::spawn_blocking(move || match state.factory.create_repository() {
            Ok(repository) => work(repository),
            Err(e) => errors::factory_error_to_response(e),
        })
        .await;

        joined.unwrap_or_else(|e| {
            tracing::error!("repository task failed: {e}");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "request failed",
            )
        })
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(factory: CustomerFactory) -> Router {
    let state = Arc::new(AppState { factory });

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
