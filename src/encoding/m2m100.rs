use once_cell::sync::Lazy;
use regex::Regex;

use crate::encoding::{strip_special_tokens, EncodingStrategy};
use crate::engines::{Engine, EngineInput, EngineOutput};
use crate::errors::TranslationError;

/// Leading `__xx__` directional marker
static LEADING_LANG_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*__[a-z]{2,3}__\s*").expect("m2m100 lang marker pattern is valid")
});

/// Encoding for the M2M100 family.
///
/// Same directional-token mechanism as mBART50 but with bare two-letter
/// language codes (`en`, `fr`) and `__xx__` control markers. Kept as its own
/// strategy rather than unified with mbart50: the default code conventions
/// differ per family and must not be mixed.
pub struct M2m100Strategy;

impl EncodingStrategy for M2m100Strategy {
    fn encode(
        &self,
        engine: &dyn Engine,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<EngineInput, TranslationError> {
        let forced_bos = engine
            .lang_token(target_lang)
            .ok_or_else(|| TranslationError::UnsupportedLanguage(target_lang.to_string()))?;

        Ok(EngineInput {
            text: text.to_string(),
            source_lang: Some(source_lang.to_string()),
            forced_bos_token: Some(forced_bos),
        })
    }

    fn decode(&self, output: EngineOutput) -> String {
        let text = strip_special_tokens(&output.text);
        LEADING_LANG_MARKER.replace(&text, "").trim().to_string()
    }
}
