/*!
 * Common test utilities for the lingohub test suite
 */

pub mod mock_engines;

use std::sync::Arc;
use std::time::Duration;

use lingohub::cache::MemoryCache;
use lingohub::registry::{ModelDescriptor, ModelRegistry};
use lingohub::translation_service::TranslationService;

/// Initialize test logging once; honors RUST_LOG
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a registry from prepared descriptors
pub fn registry_with(descriptors: Vec<ModelDescriptor>) -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    for descriptor in descriptors {
        registry.insert(descriptor);
    }
    registry
}

/// Build a translation service over a registry with an in-memory cache
/// and the default TTL
pub fn service_with(registry: ModelRegistry) -> TranslationService {
    TranslationService::new(
        Arc::new(registry),
        Arc::new(MemoryCache::new()),
        Duration::from_secs(3600),
    )
}
