//! Request, response and state types for the web boundary

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::translation_service::TranslationService;

/// Shared application state handed to every handler
pub struct AppState {
    /// Translation dispatcher, owning the registry and cache
    pub service: TranslationService,
}

/// Translation request body
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    /// Text to translate
    #[serde(default)]
    pub text: Option<String>,

    /// Source language code
    #[serde(default)]
    pub src_lang: Option<String>,

    /// Target language code
    #[serde(default)]
    pub tgt_lang: Option<String>,
}

/// Successful translation response
#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    /// Translated text
    pub translation: String,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// Fallback response for the model-less translate route
#[derive(Debug, Serialize)]
pub struct WarningResponse {
    /// Warning message, field name preserved from the original API
    #[serde(rename = "Warning")]
    pub warning: String,
}

/// Health report listing every model with its status label
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" iff every model is up
    pub status: String,

    /// Model name to "UP" / "DOWN - <reason>" label
    pub models: BTreeMap<String, String>,
}
