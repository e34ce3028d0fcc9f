use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use rolodex_core::{CustomerId, DomainError};
use rolodex_customers::{CustomerError, DataAccessError};
use rolodex_infra::FactoryError;

pub fn customer_error_to_response(err: CustomerError) -> axum::response::Response {
    match err {
        CustomerError::Domain(DomainError::Validation(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        CustomerError::Domain(e) => {
            tracing::error!("customer invariant violated: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "invariant_violation", e.to_string())
        }
        CustomerError::NotPersisted | CustomerError::Store(DataAccessError::NotFound(_)) => {
            not_found()
        }
        CustomerError::Store(e) => {
            tracing::error!("customer store failure: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
        e @ CustomerError::PartialSave { .. } => {
            tracing::error!("{e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "partial_save", e.to_string())
        }
    }
}

pub fn factory_error_to_response(err: FactoryError) -> axum::response::Response {
    tracing::error!("customer store unavailable: {err}");
    json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", err.to_string())
}

pub fn not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", "Customer not found")
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Path ids must be positive integers.
pub fn parse_customer_id(s: &str) -> Result<CustomerId, axum::response::Response> {
    match s.parse::<CustomerId>() {
        Ok(id) if id.is_persisted() => Ok(id),
        _ => Err(json_error(
            StatusCode::BAD_REQUEST,
            "invalid_id",
            "Invalid customer ID",
        )),
    }
}
