use axum::http::StatusCode;
use axum::response::IntoResponse;

/// GET liveness check for load balancers. Touches neither the store nor the model.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is accepting requests", body = String)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "healthy")
}
