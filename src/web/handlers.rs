//! Handlers for the web boundary
//!
//! Validation errors carry the exact messages the API has always returned;
//! engine failures map to a 5xx with no cache write behind them.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::errors::TranslationError;
use crate::web::types::{
    AppState, ErrorResponse, HealthResponse, TranslateRequest, TranslateResponse, WarningResponse,
};

/// Translate one text with the model named in the route
pub async fn translate_model(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let text = request.text.unwrap_or_default();
    let src_lang = request.src_lang.unwrap_or_default();
    let tgt_lang = request.tgt_lang.unwrap_or_default();

    match state.service.translate(&model, &text, &src_lang, &tgt_lang).await {
        Ok(translation) => Ok(Json(TranslateResponse { translation })),
        Err(error) => Err(error_response(error)),
    }
}

/// Fallback for the model-less translate route.
///
/// Preserved as an explicit 200 warning rather than an error.
pub async fn translate_fallback() -> Json<WarningResponse> {
    Json(WarningResponse {
        warning: "Please select a valid model".to_string(),
    })
}

/// Health report: 200 iff every registered model is up
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let registry = state.service.registry();
    let models = registry.status_snapshot();

    if registry.is_healthy() {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                models,
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthResponse {
                status: "unhealthy".to_string(),
                models,
            }),
        )
    }
}

/// Map a translation error to its HTTP status and body
fn error_response(error: TranslationError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &error {
        TranslationError::Engine(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::BAD_REQUEST,
    };

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}
