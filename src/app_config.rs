use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use url::Url;

use crate::registry::ModelId;

/// Application configuration module
/// This module handles the service configuration including loading,
/// validating and applying environment overrides to configuration settings.
/// Represents the service configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Per-model inference runner settings
    #[serde(default)]
    pub models: ModelsConfig,

    /// Result cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Object storage for model artifacts (optional)
    #[serde(default)]
    pub artifact_store: Option<ArtifactStoreConfig>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Configuration for a single model's inference runner
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ModelConfig {
    /// Runner endpoint URL
    pub runner_endpoint: String,

    /// Local directory for the model's artifact bundle.
    /// Defaults to a per-model directory under the user cache dir.
    #[serde(default)]
    pub artifact_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[serde(default = "default_runner_timeout_secs")]
    pub timeout_secs: u64,
}

impl ModelConfig {
    fn with_endpoint(endpoint: &str) -> Self {
        Self {
            runner_endpoint: endpoint.to_string(),
            artifact_dir: None,
            timeout_secs: default_runner_timeout_secs(),
        }
    }

    /// Resolve the artifact directory for a model, falling back to the
    /// user cache dir when none is configured.
    pub fn resolved_artifact_dir(&self, id: ModelId) -> PathBuf {
        self.artifact_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("lingohub")
                .join("models")
                .join(id.as_str())
        })
    }
}

/// Runner settings for every served model
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ModelsConfig {
    /// mBART50 runner
    #[serde(default = "default_mbart50_config")]
    pub mbart50: ModelConfig,

    /// M2M100 runner
    #[serde(default = "default_m2m100_config")]
    pub m2m100: ModelConfig,

    /// NLLB runner
    #[serde(default = "default_nllb_config")]
    pub nllb: ModelConfig,

    /// Helsinki-NLP Opus-MT runner
    #[serde(default = "default_opus_mt_config")]
    pub opus_mt: ModelConfig,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            mbart50: default_mbart50_config(),
            m2m100: default_m2m100_config(),
            nllb: default_nllb_config(),
            opus_mt: default_opus_mt_config(),
        }
    }
}

impl ModelsConfig {
    /// Look up the configuration for a model
    pub fn get(&self, id: ModelId) -> &ModelConfig {
        match id {
            ModelId::Mbart50 => &self.mbart50,
            ModelId::M2m100 => &self.m2m100,
            ModelId::Nllb => &self.nllb,
            ModelId::OpusMt => &self.opus_mt,
        }
    }
}

/// Result cache backend type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process map with TTL expiry
    #[default]
    Memory,
    /// External Redis store
    Redis,
}

/// Result cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    /// Backend to store translation results in
    #[serde(default)]
    pub backend: CacheBackend,

    /// Redis connection URL (only used by the redis backend)
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Prefix applied to every cache key in external backends
    #[serde(default = "default_cache_key_prefix")]
    pub key_prefix: String,

    /// Time-to-live for cached translations in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            redis_url: default_redis_url(),
            key_prefix: default_cache_key_prefix(),
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

/// Object storage location for model artifact bundles
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ArtifactStoreConfig {
    /// Storage endpoint URL (S3-style HTTP gateway)
    pub endpoint: String,

    /// Bucket holding one directory per model
    #[serde(default = "default_artifact_bucket")]
    pub bucket: String,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, apply environment overrides
    /// and validate the result
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open config file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Build a default configuration with environment overrides applied
    pub fn default_with_env() -> Result<Self> {
        let mut config = Config::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// Mirrors the deployment surface: runner endpoints per model, cache
    /// backend selection and the artifact store location.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = env::var("MBART50_RUNNER") {
            self.models.mbart50.runner_endpoint = endpoint;
        }
        if let Ok(endpoint) = env::var("M2M100_RUNNER") {
            self.models.m2m100.runner_endpoint = endpoint;
        }
        if let Ok(endpoint) = env::var("NLLB_RUNNER") {
            self.models.nllb.runner_endpoint = endpoint;
        }
        if let Ok(endpoint) = env::var("OPUS_MT_RUNNER") {
            self.models.opus_mt.runner_endpoint = endpoint;
        }
        if let Ok(backend) = env::var("CACHE_BACKEND") {
            match backend.to_lowercase().as_str() {
                "redis" => self.cache.backend = CacheBackend::Redis,
                "memory" => self.cache.backend = CacheBackend::Memory,
                _ => {}
            }
        }
        if let Ok(url) = env::var("REDIS_URL") {
            self.cache.redis_url = url;
        }
        if let Ok(ttl) = env::var("CACHE_TTL_SECS") {
            if let Ok(secs) = ttl.parse::<u64>() {
                self.cache.ttl_secs = secs;
            }
        }
        if let Ok(endpoint) = env::var("ARTIFACT_STORE_ENDPOINT") {
            let bucket = env::var("ARTIFACT_STORE_BUCKET")
                .unwrap_or_else(|_| default_artifact_bucket());
            self.artifact_store = Some(ArtifactStoreConfig { endpoint, bucket });
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for id in ModelId::ALL {
            let model = self.models.get(id);
            Url::parse(&model.runner_endpoint).map_err(|e| {
                anyhow!(
                    "Invalid runner endpoint for model '{}': {} ({})",
                    id,
                    model.runner_endpoint,
                    e
                )
            })?;
        }
        if self.cache.backend == CacheBackend::Redis {
            Url::parse(&self.cache.redis_url)
                .map_err(|e| anyhow!("Invalid redis URL: {} ({})", self.cache.redis_url, e))?;
        }
        if let Some(store) = &self.artifact_store {
            Url::parse(&store.endpoint)
                .map_err(|e| anyhow!("Invalid artifact store endpoint: {} ({})", store.endpoint, e))?;
            if store.bucket.is_empty() {
                return Err(anyhow!("Artifact store bucket must not be empty"));
            }
        }
        if self.cache.ttl_secs == 0 {
            return Err(anyhow!("Cache TTL must be greater than zero"));
        }
        Ok(())
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_runner_timeout_secs() -> u64 {
    120
}

fn default_mbart50_config() -> ModelConfig {
    ModelConfig::with_endpoint("http://localhost:9091")
}

fn default_m2m100_config() -> ModelConfig {
    ModelConfig::with_endpoint("http://localhost:9092")
}

fn default_nllb_config() -> ModelConfig {
    ModelConfig::with_endpoint("http://localhost:9093")
}

fn default_opus_mt_config() -> ModelConfig {
    ModelConfig::with_endpoint("http://localhost:9094")
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_cache_key_prefix() -> String {
    "lingohub:translation:".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_artifact_bucket() -> String {
    "models".to_string()
}
