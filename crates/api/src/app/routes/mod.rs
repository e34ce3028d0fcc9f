use axum::Router;

pub mod customers;
pub mod system;

/// Router for all customer endpoints.
pub fn router() -> Router {
    Router::new().nest("/customers", customers::router())
}
