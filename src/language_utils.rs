use isolang::Language;

/// Language utilities for the model-specific code conventions
///
/// The served models spell language codes differently: bare ISO 639-1
/// (`en`), mBART-style regional codes (`en_XX`), NLLB script-tagged codes
/// (`eng_Latn`) and `__en__` control markers. These helpers reduce any of
/// them to the bare ISO piece for logging and comparison; they are never
/// used to rewrite a request's codes.
/// Strip model-specific decoration down to the bare ISO code
pub fn base_code(code: &str) -> &str {
    let trimmed = code.trim().trim_matches('_');
    trimmed.split('_').next().unwrap_or(trimmed)
}

/// Human-readable language name for a code in any supported spelling
pub fn display_name(code: &str) -> Option<&'static str> {
    let base = base_code(code);
    let language = match base.len() {
        2 => Language::from_639_1(&base.to_lowercase()),
        3 => Language::from_639_3(&base.to_lowercase()),
        _ => None,
    }?;
    Some(language.to_name())
}

/// Whether two codes refer to the same language, across spellings
pub fn language_codes_match(a: &str, b: &str) -> bool {
    let (a, b) = (base_code(a).to_lowercase(), base_code(b).to_lowercase());
    if a == b {
        return true;
    }

    let resolve = |code: &str| match code.len() {
        2 => Language::from_639_1(code),
        3 => Language::from_639_3(code),
        _ => None,
    };
    match (resolve(&a), resolve(&b)) {
        (Some(lang_a), Some(lang_b)) => lang_a == lang_b,
        _ => false,
    }
}
