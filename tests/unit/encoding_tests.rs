/*!
 * Tests for the model encoding strategies
 */

use lingohub::encoding::m2m100::M2m100Strategy;
use lingohub::encoding::mbart50::Mbart50Strategy;
use lingohub::encoding::nllb::NllbStrategy;
use lingohub::encoding::opus_mt::OpusMtStrategy;
use lingohub::encoding::{EncodingStrategy, StrategySet};
use lingohub::engines::EngineOutput;
use lingohub::errors::TranslationError;
use lingohub::registry::ModelId;

use crate::common::mock_engines::MockEngine;

#[test]
fn test_mbart50_encode_withSupportedTarget_shouldForceLangToken() {
    let engine = MockEngine::new("ok").lang_token("fr_XX", 250008);
    let strategy = Mbart50Strategy;

    let input = strategy
        .encode(&engine, "Hello world", "en_XX", "fr_XX")
        .unwrap();

    assert_eq!(input.text, "Hello world");
    assert_eq!(input.source_lang.as_deref(), Some("en_XX"));
    assert_eq!(input.forced_bos_token, Some(250008));
}

#[test]
fn test_mbart50_encode_withUnknownTarget_shouldReturnUnsupported() {
    let engine = MockEngine::new("ok").lang_token("fr_XX", 250008);
    let strategy = Mbart50Strategy;

    match strategy.encode(&engine, "Hello world", "en_XX", "xx_XX") {
        Err(TranslationError::UnsupportedLanguage(lang)) => assert_eq!(lang, "xx_XX"),
        other => panic!("Expected UnsupportedLanguage, got {:?}", other),
    }
}

#[test]
fn test_mbart50_decode_withLangCodeAndSpecials_shouldTrim() {
    let strategy = Mbart50Strategy;

    let text = strategy.decode(EngineOutput {
        text: "fr_XX Bonjour le monde</s>".to_string(),
    });

    assert_eq!(text, "Bonjour le monde");
}

#[test]
fn test_m2m100_encode_withSupportedTarget_shouldForceLangToken() {
    let engine = MockEngine::new("ok").lang_token("fr", 128028);
    let strategy = M2m100Strategy;

    let input = strategy.encode(&engine, "Hello world", "en", "fr").unwrap();

    assert_eq!(input.text, "Hello world");
    assert_eq!(input.source_lang.as_deref(), Some("en"));
    assert_eq!(input.forced_bos_token, Some(128028));
}

#[test]
fn test_m2m100_encode_withFiveCharCode_shouldReturnUnsupported() {
    // m2m100 tables carry two-letter codes; mbart-style codes must not match
    let engine = MockEngine::new("ok").lang_token("fr", 128028);
    let strategy = M2m100Strategy;

    assert!(matches!(
        strategy.encode(&engine, "Hello world", "en", "fr_XX"),
        Err(TranslationError::UnsupportedLanguage(_))
    ));
}

#[test]
fn test_m2m100_decode_withLangMarker_shouldTrim() {
    let strategy = M2m100Strategy;

    let text = strategy.decode(EngineOutput {
        text: "__fr__ Bonjour le monde".to_string(),
    });

    assert_eq!(text, "Bonjour le monde");
}

#[test]
fn test_nllb_encode_withSupportedTarget_shouldPrependSourceMarker() {
    let engine = MockEngine::new("ok").vocab_entry("fra_Latn", 256057);
    let strategy = NllbStrategy;

    let input = strategy
        .encode(&engine, "Hello world", "eng_Latn", "fra_Latn")
        .unwrap();

    assert_eq!(input.text, "eng_Latn Hello world");
    assert_eq!(input.source_lang, None);
    assert_eq!(input.forced_bos_token, Some(256057));
}

#[test]
fn test_nllb_encode_withTargetMissingFromVocab_shouldReturnUnsupported() {
    let engine = MockEngine::new("ok").vocab_entry("fra_Latn", 256057);
    let strategy = NllbStrategy;

    match strategy.encode(&engine, "Hello world", "eng_Latn", "elv_Latn") {
        Err(TranslationError::UnsupportedLanguage(lang)) => assert_eq!(lang, "elv_Latn"),
        other => panic!("Expected UnsupportedLanguage, got {:?}", other),
    }
}

#[test]
fn test_nllb_decode_withLeadingLangCode_shouldTrim() {
    let strategy = NllbStrategy;

    let text = strategy.decode(EngineOutput {
        text: "fra_Latn Bonjour le monde</s>".to_string(),
    });

    assert_eq!(text, "Bonjour le monde");
}

#[test]
fn test_opusMt_encode_shouldPrependTargetDirective() {
    let engine = MockEngine::new("ok");
    let strategy = OpusMtStrategy;

    let input = strategy.encode(&engine, "Hello world", "en", "fr").unwrap();

    assert_eq!(input.text, ">>fr<< Hello world");
    assert_eq!(input.source_lang, None);
    assert_eq!(input.forced_bos_token, None);
}

#[test]
fn test_opusMt_decode_withDirectives_shouldStripThem() {
    let strategy = OpusMtStrategy;

    let text = strategy.decode(EngineOutput {
        text: ">>fr<< Bonjour le monde".to_string(),
    });

    assert_eq!(text, "Bonjour le monde");
}

#[test]
fn test_strategySet_default_shouldRegisterEveryModel() {
    let set = StrategySet::default();

    assert_eq!(set.len(), 4);
    for id in ModelId::ALL {
        assert!(set.get(id).is_some(), "Missing strategy for {}", id);
    }
}

#[test]
fn test_strategySet_register_shouldReplaceExistingStrategy() {
    let mut set = StrategySet::default();
    set.register(ModelId::OpusMt, Box::new(OpusMtStrategy));

    assert_eq!(set.len(), 4);
}
