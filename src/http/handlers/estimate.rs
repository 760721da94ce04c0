use crate::domain::report::EstimateRequest;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_estimate(
    State(state): State<AppState>,
    Json(req): Json<EstimateRequest>,
) -> impl IntoResponse {
    match state.report_service.estimate(req) {
        Ok(report) => (axum::http::StatusCode::OK, Json(report)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}
