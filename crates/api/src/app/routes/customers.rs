use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use rolodex_core::Entity;

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

pub async fn list_customers(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    state
        .with_repository(|repo| match repo.try_get_list() {
            Ok(customers) => {
                let data = customers.iter().map(dto::customer_to_json).collect::<Vec<_>>();
                (
                    StatusCode::OK,
                    Json(json!({ "success": true, "count": data.len(), "data": data })),
                )
                    .into_response()
            }
            Err(e) => errors::customer_error_to_response(e),
        })
        .await
}

pub async fn get_customer(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_customer_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    state
        .with_repository(move |repo| match repo.try_get_customer_by_id(id) {
            Ok(Some(customer)) => (
                StatusCode::OK,
                Json(json!({ "success": true, "data": dto::customer_to_json(&customer) })),
            )
                .into_response(),
            Ok(None) => errors::not_found(),
            Err(e) => errors::customer_error_to_response(e),
        })
        .await
}

pub async fn create_customer(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::CustomerRequest>,
) -> axum::response::Response {
    state
        .with_repository(move |repo| {
            let mut customer = repo.get_new_customer();
            body.apply_to(&mut customer);

            match customer.try_save() {
                Ok(_) => {
                    tracing::info!(customer_id = %customer.id(), "customer created");
                    (
                        StatusCode::CREATED,
                        Json(json!({
                            "success": true,
                            "data": dto::customer_to_json(&customer),
                            "message": "Customer created successfully",
                        })),
                    )
                        .into_response()
                }
                Err(e) => errors::customer_error_to_response(e),
            }
        })
        .await
}

pub async fn update_customer(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CustomerRequest>,
) -> axum::response::Response {
    let id = match errors::parse_customer_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    state
        .with_repository(move |repo| {
            let mut customer = match repo.try_get_customer_by_id(id) {
                Ok(Some(c)) => c,
                Ok(None) => return errors::not_found(),
                Err(e) => return errors::customer_error_to_response(e),
            };
            body.apply_to(&mut customer);

            match customer.try_save() {
                Ok(_) => {
                    tracing::info!(customer_id = %id, "customer updated");
                    (
                        StatusCode::OK,
                        Json(json!({
                            "success": true,
                            "data": dto::customer_to_json(&customer),
                            "message": "Customer updated successfully",
                        })),
                    )
                        .into_response()
                }
                Err(e) => errors::customer_error_to_response(e),
            }
        })
        .await
}

pub async fn delete_customer(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_customer_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    state
        .with_repository(move |repo| {
            let mut customer = match repo.try_get_customer_by_id(id) {
                Ok(Some(c)) => c,
                Ok(None) => return errors::not_found(),
                Err(e) => return errors::customer_error_to_response(e),
            };

            match customer.try_delete() {
                Ok(()) => {
                    tracing::info!(customer_id = %id, "customer deleted");
                    (
                        StatusCode::OK,
                        Json(json!({
                            "success": true,
                            "message": "Customer deleted successfully",
                        })),
                    )
                        .into_response()
                }
                Err(e) => errors::customer_error_to_response(e),
            }
        })
        .await
}
