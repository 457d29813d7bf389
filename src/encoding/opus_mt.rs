use once_cell::sync::Lazy;
use regex::Regex;

use crate::encoding::{strip_special_tokens, EncodingStrategy};
use crate::engines::{Engine, EngineInput, EngineOutput};
use crate::errors::TranslationError;

/// `>>xx<<` target directives anywhere in the text
static LANG_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r">>[a-z_]{2,8}<<\s*").expect("opus_mt directive pattern is valid")
});

/// Encoding for the Helsinki-NLP Opus-MT multilingual models.
///
/// A bracketed target directive (`>>fr<<`) is prepended to the raw text; the
/// engine infers the source language and no generation forcing is needed.
pub struct OpusMtStrategy;

impl EncodingStrategy for OpusMtStrategy {
    fn encode(
        &self,
        _engine: &dyn Engine,
        text: &str,
        _source_lang: &str,
        target_lang: &str,
    ) -> Result<EngineInput, TranslationError> {
        Ok(EngineInput {
            text: format!(">>{}<< {}", target_lang, text),
            source_lang: None,
            forced_bos_token: None,
        })
    }

    fn decode(&self, output: EngineOutput) -> String {
        let text = strip_special_tokens(&output.text);
        LANG_DIRECTIVE.replace_all(&text, "").trim().to_string()
    }
}
