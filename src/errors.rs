/*!
 * Error types for the lingohub service.
 *
 * This module contains custom error types for different parts of the service,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to an inference runner
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error when making a runner request fails
    #[error("Runner request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing a runner response fails
    #[error("Failed to parse runner response: {0}")]
    ParseError(String),

    /// Error returned by the runner itself
    #[error("Runner responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the runner
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur while fetching model artifacts from object storage.
///
/// These surface only during startup model loading, where they downgrade the
/// affected model to Down status. They are never produced mid-request.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error when a storage request fails
    #[error("Artifact fetch failed: {0}")]
    RequestFailed(String),

    /// Error when the artifact manifest is missing or malformed
    #[error("Invalid artifact manifest: {0}")]
    Manifest(String),

    /// Downloaded file digest did not match the manifest
    #[error("Checksum mismatch for artifact '{file}'")]
    ChecksumMismatch {
        /// File name within the model bundle
        file: String,
    },

    /// Error from a local filesystem operation
    #[error("Artifact I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while handling a translation request.
///
/// The Display strings of the validation variants double as the HTTP error
/// messages returned by the web boundary.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Request carried no text to translate
    #[error("No text provided")]
    EmptyInput,

    /// Source or target language was missing from the request
    #[error("Source and target languages must be specified")]
    MissingLanguage,

    /// Requested model name is not registered
    #[error("Model '{0}' not found")]
    UnknownModel(String),

    /// Requested model failed to load at startup
    #[error("Model '{name}' is currently unavailable")]
    ModelUnavailable {
        /// Model name
        name: String,
        /// Load failure captured at startup
        reason: String,
    },

    /// Target language has no token in the model's tables
    #[error("Target language '{0}' is not supported")]
    UnsupportedLanguage(String),

    /// Error from the translation engine during generation
    #[error("Translation engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the configuration layer
    #[error("Config error: {0}")]
    Config(String),

    /// Error from an engine
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Error from artifact storage
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Error from translation dispatch
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Config(error.to_string())
    }
}
