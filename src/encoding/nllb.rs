use once_cell::sync::Lazy;
use regex::Regex;

use crate::encoding::{strip_special_tokens, EncodingStrategy};
use crate::engines::{Engine, EngineInput, EngineOutput};
use crate::errors::TranslationError;

/// Leading script-tagged language code, e.g. `eng_Latn` or `zho_Hans`
static LEADING_LANG_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[a-z]{3}_[A-Z][a-z]{3}\s*").expect("nllb lang code pattern is valid")
});

/// Encoding for NLLB-200.
///
/// NLLB shares one vocabulary across languages: the source language marker is
/// prepended to the raw text before tokenization, and the forced target token
/// is found by exact-string lookup in the full vocabulary. The lookup is
/// checked here explicitly so an unsupported target produces a clear error
/// instead of a silent failure inside the engine.
pub struct NllbStrategy;

impl EncodingStrategy for NllbStrategy {
    fn encode(
        &self,
        engine: &dyn Engine,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<EngineInput, TranslationError> {
        let forced_bos = engine
            .vocab_token(target_lang)
            .ok_or_else(|| TranslationError::UnsupportedLanguage(target_lang.to_string()))?;

        Ok(EngineInput {
            text: format!("{} {}", source_lang, text),
            source_lang: None,
            forced_bos_token: Some(forced_bos),
        })
    }

    fn decode(&self, output: EngineOutput) -> String {
        let text = strip_special_tokens(&output.text);
        LEADING_LANG_CODE.replace(&text, "").trim().to_string()
    }
}
