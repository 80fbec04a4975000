use crate::models::responses::HealthResponse;
use crate::Backend;
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::error;

pub async fn health_check(
    State(backend): State<Backend>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, state) = match backend.test_connection().await {
        Ok(()) => (StatusCode::OK, "running"),
        Err(e) => {
            error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        }
    };

    (
        status,
        Json(HealthResponse {
            service: "product-search".to_string(),
            status: state.to_string(),
        }),
    )
}
