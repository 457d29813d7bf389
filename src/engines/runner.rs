use anyhow::Context;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::ModelsConfig;
use crate::artifacts::ArtifactStore;
use crate::engines::{Engine, EngineInput, EngineLoader, EngineOutput, TokenId};
use crate::errors::EngineError;
use crate::registry::ModelId;

/// HTTP client for a model's inference runner
pub struct RunnerClient {
    /// HTTP client for runner requests
    client: Client,
    /// Runner endpoint URL
    endpoint: String,
}

/// Generation request sent to a runner
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    /// Input text, markers included
    text: String,

    /// Source language directive for the tokenizer
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<String>,

    /// Token id the output must begin with
    #[serde(skip_serializing_if = "Option::is_none")]
    forced_bos_token_id: Option<TokenId>,
}

impl GenerateRequest {
    /// Create a new generation request
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: None,
            forced_bos_token_id: None,
        }
    }

    /// Set the source language directive
    pub fn source_lang(mut self, lang: impl Into<String>) -> Self {
        self.source_lang = Some(lang.into());
        self
    }

    /// Force generation to begin with the given token
    pub fn forced_bos_token_id(mut self, token: TokenId) -> Self {
        self.forced_bos_token_id = Some(token);
        self
    }
}

/// Generation response from a runner
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    /// Decoded output text
    pub text: String,
}

/// Model metadata served by a runner at load time
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerMetadata {
    /// Model identifier reported by the runner
    pub model: String,

    /// Language code to token id table
    #[serde(default)]
    pub lang_code_to_id: HashMap<String, TokenId>,

    /// Full vocabulary table (token string to id)
    #[serde(default)]
    pub vocab: HashMap<String, TokenId>,
}

impl RunnerClient {
    /// Create a new runner client
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Runner endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the runner's model metadata
    pub async fn metadata(&self) -> Result<RunnerMetadata, EngineError> {
        let url = format!("{}/metadata", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(EngineError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<RunnerMetadata>()
            .await
            .map_err(|e| EngineError::ParseError(e.to_string()))
    }

    /// Run one generation request
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, EngineError> {
        let url = format!("{}/generate", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(EngineError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| EngineError::ParseError(e.to_string()))
    }
}

fn map_request_error(error: reqwest::Error) -> EngineError {
    if error.is_connect() {
        EngineError::ConnectionError(error.to_string())
    } else {
        EngineError::RequestFailed(error.to_string())
    }
}

/// Engine backed by an inference runner.
///
/// Language and vocabulary tables are captured once at load time, so both
/// lookups are local; only generation goes over the wire.
pub struct RunnerEngine {
    client: RunnerClient,
    metadata: RunnerMetadata,
}

impl RunnerEngine {
    /// Wrap a connected client and its fetched metadata
    pub fn new(client: RunnerClient, metadata: RunnerMetadata) -> Self {
        Self { client, metadata }
    }

    /// Model name reported by the runner
    pub fn model(&self) -> &str {
        &self.metadata.model
    }
}

impl fmt::Debug for RunnerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerEngine")
            .field("model", &self.metadata.model)
            .field("endpoint", &self.client.endpoint)
            .field("languages", &self.metadata.lang_code_to_id.len())
            .field("vocab", &self.metadata.vocab.len())
            .finish()
    }
}

#[async_trait]
impl Engine for RunnerEngine {
    async fn generate(&self, input: &EngineInput) -> Result<EngineOutput, EngineError> {
        let mut request = GenerateRequest::new(&input.text);
        if let Some(lang) = &input.source_lang {
            request = request.source_lang(lang);
        }
        if let Some(token) = input.forced_bos_token {
            request = request.forced_bos_token_id(token);
        }

        debug!("Runner generate: {} chars to '{}'", input.text.len(), self.client.endpoint);
        let response = self.client.generate(request).await?;
        Ok(EngineOutput { text: response.text })
    }

    fn lang_token(&self, lang: &str) -> Option<TokenId> {
        self.metadata.lang_code_to_id.get(lang).copied()
    }

    fn vocab_token(&self, token: &str) -> Option<TokenId> {
        self.metadata.vocab.get(token).copied()
    }
}

/// Loads engines by syncing artifacts and probing the model's runner
pub struct RunnerLoader {
    models: ModelsConfig,
    store: Option<ArtifactStore>,
}

impl RunnerLoader {
    /// Create a loader over the configured runners
    pub fn new(models: ModelsConfig, store: Option<ArtifactStore>) -> Self {
        Self { models, store }
    }
}

#[async_trait]
impl EngineLoader for RunnerLoader {
    async fn load(&self, id: ModelId) -> anyhow::Result<Arc<dyn Engine>> {
        let config = self.models.get(id);

        if let Some(store) = &self.store {
            let dest = config.resolved_artifact_dir(id);
            store
                .sync_model(id, &dest)
                .await
                .with_context(|| format!("Artifact sync failed for model '{}'", id))?;
        }

        let client = RunnerClient::new(
            &config.runner_endpoint,
            Duration::from_secs(config.timeout_secs),
        );
        let metadata = client
            .metadata()
            .await
            .with_context(|| format!("Runner unreachable at {}", config.runner_endpoint))?;

        info!(
            "Loaded model '{}' from {} ({} languages)",
            id,
            config.runner_endpoint,
            metadata.lang_code_to_id.len()
        );
        Ok(Arc::new(RunnerEngine::new(client, metadata)))
    }
}
