/*!
 * Engine implementations for the translation models.
 *
 * An engine is the opaque generation capability behind a model: given encoded
 * input it produces decoded text, and may fail or be unavailable. The only
 * implementation talks HTTP to a per-model inference runner, but the trait is
 * the seam that lets tests substitute doubles.
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::EngineError;
use crate::registry::ModelId;

/// Identifier of a token in a model's vocabulary
pub type TokenId = u32;

/// Input handed to an engine for one generation call.
///
/// The source language travels as an explicit parameter here; engines must
/// not keep per-request language state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInput {
    /// Text to translate, with any strategy-level markers already prepended
    pub text: String,

    /// Source language directive, when the model needs one
    pub source_lang: Option<String>,

    /// Token the generated output must begin with, when the model needs one
    pub forced_bos_token: Option<TokenId>,
}

/// Raw output of a generation call; may still carry control tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput {
    /// Decoded text as produced by the runner
    pub text: String,
}

/// Common trait for all translation engines
///
/// This trait defines the interface every engine implementation must follow,
/// allowing the encoding strategies and the dispatcher to treat them
/// interchangeably.
#[async_trait]
pub trait Engine: Send + Sync + Debug {
    /// Run one generation call
    async fn generate(&self, input: &EngineInput) -> Result<EngineOutput, EngineError>;

    /// Look up a target-language token id in the model's language table.
    /// Used by the directional-token model families.
    fn lang_token(&self, lang: &str) -> Option<TokenId>;

    /// Look up a token id by exact string in the model's full vocabulary.
    /// Used by the shared-vocabulary model family.
    fn vocab_token(&self, token: &str) -> Option<TokenId>;
}

/// Acquires an engine for a model at startup.
///
/// A load failure is captured by the registry as that model's Down reason;
/// it is never retried for the life of the process.
#[async_trait]
pub trait EngineLoader: Send + Sync {
    /// Attempt to acquire the engine for a model
    async fn load(&self, id: ModelId) -> anyhow::Result<Arc<dyn Engine>>;
}

pub mod runner;
