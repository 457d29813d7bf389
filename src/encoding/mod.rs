/*!
 * Encoding strategies for the translation models.
 *
 * Every model family has its own convention for embedding source/target
 * language directives into the input handed to the engine, and its own
 * control tokens to trim from the output. Each convention lives in one
 * strategy implementation:
 * - mbart50: directional tokens, five-character language codes
 * - m2m100: directional tokens, two-letter language codes
 * - nllb: shared vocabulary, literal language markers in the text
 * - opus_mt: pivot-style `>>xx<<` directive, source language inferred
 *
 * The dispatcher selects a strategy purely by model id; adding a model means
 * registering one new implementation here, not editing dispatch logic.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::engines::{Engine, EngineInput, EngineOutput};
use crate::errors::TranslationError;
use crate::registry::ModelId;

/// Special tokens common to the seq2seq tokenizers
static SPECIAL_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?s>|<pad>|<unk>").expect("special token pattern is valid")
});

/// Strip shared special tokens from decoded output
pub(crate) fn strip_special_tokens(text: &str) -> String {
    SPECIAL_TOKENS.replace_all(text, "").to_string()
}

/// Model-specific rule for embedding language directives into engine input
/// and trimming control tokens from engine output.
pub trait EncodingStrategy: Send + Sync {
    /// Build the engine input for one request.
    ///
    /// Fails with `UnsupportedLanguage` when the target language has no
    /// token in the model's tables; the engine is never called in that case.
    fn encode(
        &self,
        engine: &dyn Engine,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<EngineInput, TranslationError>;

    /// Trim control tokens from the engine output and return plain text
    fn decode(&self, output: EngineOutput) -> String;
}

/// Registry of encoding strategies keyed by model id
pub struct StrategySet {
    strategies: HashMap<ModelId, Box<dyn EncodingStrategy>>,
}

impl StrategySet {
    /// Create an empty strategy set
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Register a strategy for a model, replacing any previous one
    pub fn register(&mut self, id: ModelId, strategy: Box<dyn EncodingStrategy>) {
        self.strategies.insert(id, strategy);
    }

    /// Look up the strategy for a model
    pub fn get(&self, id: ModelId) -> Option<&dyn EncodingStrategy> {
        self.strategies.get(&id).map(|s| s.as_ref())
    }

    /// Number of registered strategies
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether the set holds no strategies
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategySet {
    fn default() -> Self {
        let mut set = Self::new();
        set.register(ModelId::Mbart50, Box::new(mbart50::Mbart50Strategy));
        set.register(ModelId::M2m100, Box::new(m2m100::M2m100Strategy));
        set.register(ModelId::Nllb, Box::new(nllb::NllbStrategy));
        set.register(ModelId::OpusMt, Box::new(opus_mt::OpusMtStrategy));
        set
    }
}

pub mod m2m100;
pub mod mbart50;
pub mod nllb;
pub mod opus_mt;
