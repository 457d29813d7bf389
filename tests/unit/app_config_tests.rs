/*!
 * Tests for app configuration
 */

use std::io::Write;

use lingohub::app_config::{CacheBackend, Config};
use lingohub::registry::ModelId;

#[test]
fn test_config_default_shouldUseDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.server.bind_addr, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.cache.backend, CacheBackend::Memory);
    assert_eq!(config.cache.ttl_secs, 3600);
    assert!(config.artifact_store.is_none());
}

#[test]
fn test_config_default_shouldConfigureEveryModel() {
    let config = Config::default();

    for id in ModelId::ALL {
        let model = config.models.get(id);
        assert!(
            model.runner_endpoint.starts_with("http://"),
            "Missing runner endpoint for {}",
            id
        );
    }
}

#[test]
fn test_config_validate_withDefaults_shouldPass() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_config_validate_withBadRunnerEndpoint_shouldFail() {
    let mut config = Config::default();
    config.models.nllb.runner_endpoint = "not a url".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withZeroTtl_shouldFail() {
    let mut config = Config::default();
    config.cache.ttl_secs = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_config_fromFile_withPartialJson_shouldFillDefaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "server": {{ "port": 9000 }},
            "cache": {{ "backend": "redis", "ttl_secs": 120 }}
        }}"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.bind_addr, "0.0.0.0");
    assert_eq!(config.cache.backend, CacheBackend::Redis);
    assert_eq!(config.cache.ttl_secs, 120);
}

#[test]
fn test_config_fromFile_withMissingFile_shouldFail() {
    assert!(Config::from_file("/nonexistent/lingohub-conf.json").is_err());
}

#[test]
fn test_config_fromFile_withInvalidJson_shouldFail() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json at all").unwrap();

    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_config_applyEnvOverrides_withRunnerEndpoint_shouldOverride() {
    // Env vars are process-global; this is the only test touching this one
    unsafe {
        std::env::set_var("M2M100_RUNNER", "http://runner.internal:9999");
    }

    let mut config = Config::default();
    config.apply_env_overrides();

    unsafe {
        std::env::remove_var("M2M100_RUNNER");
    }

    assert_eq!(
        config.models.m2m100.runner_endpoint,
        "http://runner.internal:9999"
    );
}

#[test]
fn test_modelConfig_resolvedArtifactDir_withExplicitDir_shouldUseIt() {
    let mut config = Config::default();
    config.models.mbart50.artifact_dir = Some("/srv/models/mbart50".into());

    let dir = config.models.mbart50.resolved_artifact_dir(ModelId::Mbart50);
    assert_eq!(dir, std::path::PathBuf::from("/srv/models/mbart50"));
}

#[test]
fn test_modelConfig_resolvedArtifactDir_withoutExplicitDir_shouldEndWithModelName() {
    let config = Config::default();

    let dir = config.models.opus_mt.resolved_artifact_dir(ModelId::OpusMt);
    assert!(dir.ends_with("opus_mt"), "Unexpected dir: {}", dir.display());
}
