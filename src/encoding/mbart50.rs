use once_cell::sync::Lazy;
use regex::Regex;

use crate::encoding::{strip_special_tokens, EncodingStrategy};
use crate::engines::{Engine, EngineInput, EngineOutput};
use crate::errors::TranslationError;

/// Leading directional language code, e.g. `fr_XX` or `zh_CN`
static LEADING_LANG_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[a-z]{2,3}_[A-Z]{2}\s*").expect("mbart50 lang code pattern is valid")
});

/// Encoding for the mBART50 family.
///
/// mBART50 uses five-character language codes (`en_XX`, `fr_XX`, `zh_CN`).
/// The source language travels as an explicit tokenizer directive and
/// generation is forced to begin with the target language's directional
/// token. Not interchangeable with the m2m100 variant: the code conventions
/// and fallback tables differ between the two families.
pub struct Mbart50Strategy;

impl EncodingStrategy for Mbart50Strategy {
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
        LEADING_LANG_CODE.replace(&text, "").trim().to_string()
    }
}
