use log::{debug, info};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheKey, ResultCache};
use crate::encoding::StrategySet;
use crate::errors::TranslationError;
use crate::language_utils::display_name;
use crate::registry::{ModelId, ModelRegistry, ModelStatus};

// Dispatcher for translation requests: validation, cache lookup, model
// selection and engine invocation.

/// Translation service
pub struct TranslationService {
    /// Registry of served models
    registry: Arc<ModelRegistry>,

    /// Encoding strategies keyed by model
    strategies: StrategySet,

    /// Result cache
    cache: Arc<dyn ResultCache>,

    /// Time-to-live for cached translations
    cache_ttl: Duration,
}

impl TranslationService {
    /// Create a new translation service over a populated registry
    pub fn new(registry: Arc<ModelRegistry>, cache: Arc<dyn ResultCache>, cache_ttl: Duration) -> Self {
        Self {
            registry,
            strategies: StrategySet::default(),
            cache,
            cache_ttl,
        }
    }

    /// Registry backing this service
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Translate one text with the named model.
    ///
    /// Validation happens before any cache or engine access; a cache hit
    /// short-circuits the engine entirely; engine failures are surfaced
    /// without retry and without a cache write.
    pub async fn translate(
        &self,
        model_name: &str,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError> {
        if text.is_empty() {
            return Err(TranslationError::EmptyInput);
        }
        if source_lang.is_empty() || target_lang.is_empty() {
            return Err(TranslationError::MissingLanguage);
        }

        let model = ModelId::from_str(model_name)
            .map_err(|_| TranslationError::UnknownModel(model_name.to_string()))?;

        let descriptor = self
            .registry
            .get(model)
            .ok_or_else(|| TranslationError::UnknownModel(model_name.to_string()))?;
        if let ModelStatus::Down(reason) = &descriptor.status {
            return Err(TranslationError::ModelUnavailable {
                name: model.to_string(),
                reason: reason.clone(),
            });
        }

        let key = CacheKey::new(model, source_lang, target_lang, text);
        if let Some(cached) = self.cache.get(&key) {
            debug!(
                "Serving '{}' {} -> {} from cache",
                model, source_lang, target_lang
            );
            return Ok(cached);
        }

        let strategy = self
            .strategies
            .get(model)
            .ok_or_else(|| TranslationError::UnknownModel(model_name.to_string()))?;
        let engine = self.registry.engine(model)?;

        let input = strategy.encode(engine.as_ref(), text, source_lang, target_lang)?;
        let output = engine.generate(&input).await?;
        let translation = strategy.decode(output);

        self.cache.put(&key, &translation, self.cache_ttl);

        info!(
            "Translated {} chars with '{}' ({} -> {})",
            text.len(),
            model,
            display_name(source_lang).unwrap_or(source_lang),
            display_name(target_lang).unwrap_or(target_lang)
        );
        Ok(translation)
    }
}
