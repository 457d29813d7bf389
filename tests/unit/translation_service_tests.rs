/*!
 * Tests for the translation dispatcher
 */

use std::sync::Arc;

use lingohub::errors::TranslationError;
use lingohub::registry::{ModelDescriptor, ModelId};

use crate::common::mock_engines::MockEngine;
use crate::common::{registry_with, service_with};

fn mbart_engine(response: &str) -> MockEngine {
    MockEngine::new(response)
        .lang_token("en_XX", 250004)
        .lang_token("fr_XX", 250008)
}

#[tokio::test]
async fn test_translate_withEmptyText_shouldReturnEmptyInput() {
    let service = service_with(registry_with(vec![]));

    // Validation fires before any registry lookup, even for unknown models
    let result = service.translate("no_such_model", "", "en", "fr").await;

    assert!(matches!(result, Err(TranslationError::EmptyInput)));
}

#[tokio::test]
async fn test_translate_withMissingSourceLang_shouldReturnMissingLanguage() {
    let service = service_with(registry_with(vec![]));

    let result = service.translate("mbart50", "hello", "", "fr").await;

    assert!(matches!(result, Err(TranslationError::MissingLanguage)));
}

#[tokio::test]
async fn test_translate_withMissingTargetLang_shouldReturnMissingLanguage() {
    let service = service_with(registry_with(vec![]));

    let result = service.translate("mbart50", "hello", "en", "").await;

    assert!(matches!(result, Err(TranslationError::MissingLanguage)));
}

#[tokio::test]
async fn test_translate_withUnknownModel_shouldReturnUnknownModel() {
    let service = service_with(registry_with(vec![]));

    match service.translate("gpt4", "hello", "en", "fr").await {
        Err(TranslationError::UnknownModel(name)) => assert_eq!(name, "gpt4"),
        other => panic!("Expected UnknownModel, got {:?}", other),
    }
}

#[tokio::test]
async fn test_translate_withDownModel_shouldReturnUnavailable() {
    let engine = mbart_engine("fr_XX Bonjour");
    let registry = registry_with(vec![
        ModelDescriptor::up(ModelId::Mbart50, Arc::new(engine)),
        ModelDescriptor::down(ModelId::Nllb, "artifact missing"),
    ]);
    let service = service_with(registry);

    // The down model is never dispatched to, even though another model is up
    match service.translate("nllb", "hello", "eng_Latn", "fra_Latn").await {
        Err(TranslationError::ModelUnavailable { name, .. }) => assert_eq!(name, "nllb"),
        other => panic!("Expected ModelUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_translate_withUpModel_shouldReturnDecodedText() {
    let engine = mbart_engine("fr_XX Bonjour le monde</s>");
    let tracker = engine.tracker();
    let service = service_with(registry_with(vec![ModelDescriptor::up(
        ModelId::Mbart50,
        Arc::new(engine),
    )]));

    let translation = service
        .translate("mbart50", "Hello world", "en_XX", "fr_XX")
        .await
        .unwrap();

    assert_eq!(translation, "Bonjour le monde");
    assert_eq!(tracker.lock().unwrap().generate_calls, 1);
}

#[tokio::test]
async fn test_translate_withRepeatedRequest_shouldServeFromCache() {
    let engine = mbart_engine("fr_XX Bonjour");
    let tracker = engine.tracker();
    let service = service_with(registry_with(vec![ModelDescriptor::up(
        ModelId::Mbart50,
        Arc::new(engine),
    )]));

    let first = service
        .translate("mbart50", "hello", "en_XX", "fr_XX")
        .await
        .unwrap();
    let second = service
        .translate("mbart50", "hello", "en_XX", "fr_XX")
        .await
        .unwrap();

    assert_eq!(first, second);
    // Strict short-circuit: the engine saw exactly one call
    assert_eq!(tracker.lock().unwrap().generate_calls, 1);
}

#[tokio::test]
async fn test_translate_withDifferentText_shouldNotShareCacheEntries() {
    let engine = mbart_engine("fr_XX Bonjour");
    let tracker = engine.tracker();
    let service = service_with(registry_with(vec![ModelDescriptor::up(
        ModelId::Mbart50,
        Arc::new(engine),
    )]));

    service
        .translate("mbart50", "hello", "en_XX", "fr_XX")
        .await
        .unwrap();
    service
        .translate("mbart50", "goodbye", "en_XX", "fr_XX")
        .await
        .unwrap();

    assert_eq!(tracker.lock().unwrap().generate_calls, 2);
}

#[tokio::test]
async fn test_translate_withSourceLangParameter_shouldPassItToEngine() {
    let engine = mbart_engine("fr_XX Bonjour");
    let tracker = engine.tracker();
    let service = service_with(registry_with(vec![ModelDescriptor::up(
        ModelId::Mbart50,
        Arc::new(engine),
    )]));

    service
        .translate("mbart50", "hello", "en_XX", "fr_XX")
        .await
        .unwrap();

    let input = tracker.lock().unwrap().last_input.clone().unwrap();
    assert_eq!(input.source_lang.as_deref(), Some("en_XX"));
    assert_eq!(input.forced_bos_token, Some(250008));
}

#[tokio::test]
async fn test_translate_withEngineFailure_shouldSurfaceErrorWithoutCaching() {
    let engine = mbart_engine("fr_XX Bonjour");
    let tracker = engine.tracker();
    engine.fail_next_call();
    let service = service_with(registry_with(vec![ModelDescriptor::up(
        ModelId::Mbart50,
        Arc::new(engine),
    )]));

    let failed = service.translate("mbart50", "hello", "en_XX", "fr_XX").await;
    assert!(matches!(failed, Err(TranslationError::Engine(_))));

    // Failure was not cached: the retry goes back to the engine and succeeds
    let retried = service
        .translate("mbart50", "hello", "en_XX", "fr_XX")
        .await
        .unwrap();
    assert_eq!(retried, "Bonjour");
    assert_eq!(tracker.lock().unwrap().generate_calls, 2);
}

#[tokio::test]
async fn test_translate_withUnsupportedNllbTarget_shouldNeverCallEngine() {
    let engine = MockEngine::new("ok").vocab_entry("fra_Latn", 256057);
    let tracker = engine.tracker();
    let service = service_with(registry_with(vec![ModelDescriptor::up(
        ModelId::Nllb,
        Arc::new(engine),
    )]));

    let result = service
        .translate("nllb", "hello", "eng_Latn", "elv_Latn")
        .await;

    assert!(matches!(
        result,
        Err(TranslationError::UnsupportedLanguage(_))
    ));
    assert_eq!(tracker.lock().unwrap().generate_calls, 0);
}

#[tokio::test]
async fn test_translate_withHelsinkiAlias_shouldDispatchToOpusMt() {
    let engine = MockEngine::new(">>fr<< Bonjour");
    let service = service_with(registry_with(vec![ModelDescriptor::up(
        ModelId::OpusMt,
        Arc::new(engine),
    )]));

    let translation = service
        .translate("helsinki_nlp", "hello", "en", "fr")
        .await
        .unwrap();

    assert_eq!(translation, "Bonjour");
}
