use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{
    application::{dtos::ServiceBannerResponse, HealthStatusResponse, InferenceService},
    domain::{DomainError, PredictionResult},
};

#[derive(Clone)]
pub struct AppState {
    service: Arc<InferenceService>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Builds the service router: banner, prediction, and health endpoints.
pub fn router(service: Arc<InferenceService>) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/predict", post(predict))
        .route("/health", get(health))
        .with_state(AppState { service })
}

async fn banner(State(state): State<AppState>) -> Json<ServiceBannerResponse> {
    Json(ServiceBannerResponse {
        status: "Heart disease prediction service is running".to_string(),
        model_loaded: state.service.is_ready(),
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthStatusResponse> {
    Json(state.service.health())
}

async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<PredictionResult>, (StatusCode, Json<ErrorResponse>)> {
    match state.service.predict_raw(&payload) {
        Ok(result) => {
            info!(
                "prediction served: class={} probability={:.4}",
                result.prediction, result.probability
            );
            Ok(Json(result))
        }
        Err(err) => {
            match &err {
                DomainError::Validation(msg) => warn!("rejected payload: {msg}"),
                other => error!("prediction failed: {other}"),
            }
            Err(error_response(err))
        }
    }
}

/// Maps each error variant onto a distinct status so callers can tell
/// retryable server conditions from their own input mistakes.
fn error_response(err: DomainError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        DomainError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED"),
        DomainError::Unavailable(_) | DomainError::ArtifactLoad(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
        }
        DomainError::Inference(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INFERENCE_FAILED"),
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
        }),
    )
}
