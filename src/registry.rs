/*!
 * Model registry: load status and engine handles for every served model.
 *
 * The registry is populated once at startup by attempting to acquire each
 * model's engine. Load failures are captured as a Down status with the
 * failure reason; they downgrade only that model and are never retried for
 * the life of the process.
 */

use anyhow::{anyhow, Result};
use log::{info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::engines::{Engine, EngineLoader};
use crate::errors::TranslationError;

/// Identifier of a served model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModelId {
    /// mBART50 many-to-many
    Mbart50,
    /// M2M100
    M2m100,
    /// NLLB-200
    Nllb,
    /// Helsinki-NLP Opus-MT
    OpusMt,
}

impl ModelId {
    /// Every model the service registers, in health-report order
    pub const ALL: [ModelId; 4] = [
        ModelId::Mbart50,
        ModelId::M2m100,
        ModelId::Nllb,
        ModelId::OpusMt,
    ];

    /// Canonical model name as used in routes and health output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mbart50 => "mbart50",
            Self::M2m100 => "m2m100",
            Self::Nllb => "nllb",
            Self::OpusMt => "opus_mt",
        }
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mbart50" => Ok(Self::Mbart50),
            "m2m100" => Ok(Self::M2m100),
            "nllb" => Ok(Self::Nllb),
            // helsinki_nlp is the model family, opus_mt the route name
            "opus_mt" | "helsinki_nlp" | "helsinkinlp" => Ok(Self::OpusMt),
            _ => Err(anyhow!("Unknown model name: {}", s)),
        }
    }
}

/// Load status of a model, fixed for the process lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelStatus {
    /// Engine acquired and ready
    Up,
    /// Engine acquisition failed with the captured reason
    Down(String),
}

impl ModelStatus {
    /// Render the status label used by the health endpoint
    pub fn label(&self) -> String {
        match self {
            Self::Up => "UP".to_string(),
            Self::Down(reason) => format!("DOWN - {}", reason),
        }
    }

    /// Whether the model is serving
    pub fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}

/// A registered model: status plus engine handle when Up
#[derive(Debug)]
pub struct ModelDescriptor {
    /// Model identifier
    pub id: ModelId,
    /// Load status
    pub status: ModelStatus,
    /// Engine handle, present iff status is Up
    pub engine: Option<Arc<dyn Engine>>,
}

impl ModelDescriptor {
    /// Descriptor for a successfully loaded model
    pub fn up(id: ModelId, engine: Arc<dyn Engine>) -> Self {
        Self {
            id,
            status: ModelStatus::Up,
            engine: Some(engine),
        }
    }

    /// Descriptor for a model whose load failed
    pub fn down(id: ModelId, reason: impl Into<String>) -> Self {
        Self {
            id,
            status: ModelStatus::Down(reason.into()),
            engine: None,
        }
    }
}

/// Registry of every served model
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: BTreeMap<ModelId, ModelDescriptor>,
}

impl ModelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            models: BTreeMap::new(),
        }
    }

    /// Insert a descriptor, replacing any previous entry for the model
    pub fn insert(&mut self, descriptor: ModelDescriptor) {
        self.models.insert(descriptor.id, descriptor);
    }

    /// Attempt to acquire every model sequentially.
    ///
    /// Never fails: a model whose load errors is registered as Down with the
    /// error chain as its reason.
    pub async fn initialize(loader: &dyn EngineLoader) -> Self {
        let mut registry = Self::new();

        for id in ModelId::ALL {
            match loader.load(id).await {
                Ok(engine) => {
                    info!("Model '{}' is up", id);
                    registry.insert(ModelDescriptor::up(id, engine));
                }
                Err(e) => {
                    let reason = format!("{:#}", e);
                    warn!("Model '{}' failed to load: {}", id, reason);
                    registry.insert(ModelDescriptor::down(id, reason));
                }
            }
        }

        registry
    }

    /// Look up a model by id
    pub fn get(&self, id: ModelId) -> Option<&ModelDescriptor> {
        self.models.get(&id)
    }

    /// Fetch the engine for a model, requiring Up status
    pub fn engine(&self, id: ModelId) -> Result<Arc<dyn Engine>, TranslationError> {
        let descriptor = self
            .models
            .get(&id)
            .ok_or_else(|| TranslationError::UnknownModel(id.to_string()))?;

        match (&descriptor.status, &descriptor.engine) {
            (ModelStatus::Up, Some(engine)) => Ok(Arc::clone(engine)),
            (ModelStatus::Down(reason), _) => Err(TranslationError::ModelUnavailable {
                name: id.to_string(),
                reason: reason.clone(),
            }),
            // Up without an engine handle cannot be constructed through the
            // public descriptor constructors
            (ModelStatus::Up, None) => Err(TranslationError::ModelUnavailable {
                name: id.to_string(),
                reason: "engine handle missing".to_string(),
            }),
        }
    }

    /// Per-model status labels for health reporting
    pub fn status_snapshot(&self) -> BTreeMap<String, String> {
        self.models
            .values()
            .map(|d| (d.id.to_string(), d.status.label()))
            .collect()
    }

    /// Overall health: healthy iff every registered model is Up
    pub fn is_healthy(&self) -> bool {
        !self.models.is_empty() && self.models.values().all(|d| d.status.is_up())
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the registry holds no models
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
