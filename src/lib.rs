/*!
 * # lingohub
 *
 * A Rust service exposing multiple pretrained sequence-to-sequence
 * translation models behind a uniform HTTP API.
 *
 * ## Features
 *
 * - Four served model families (mBART50, M2M100, NLLB, Helsinki-NLP Opus-MT),
 *   each with its own input-encoding convention
 * - Per-model load status captured at startup and reported by `/health`
 * - Result cache with TTL expiry, in-process or Redis-backed
 * - Model artifact retrieval from object storage with checksum verification
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `registry`: Model load status and engine handles
 * - `engines`: Translation engine seam and the inference-runner client
 * - `encoding`: Model-specific encoding strategies:
 *   - `encoding::mbart50`: directional tokens, five-character codes
 *   - `encoding::m2m100`: directional tokens, two-letter codes
 *   - `encoding::nllb`: shared-vocabulary literal markers
 *   - `encoding::opus_mt`: pivot-style `>>xx<<` directives
 * - `translation_service`: Request validation and dispatch
 * - `cache` / `redis_cache`: Result cache backends
 * - `artifacts`: Object-storage artifact sync
 * - `web`: HTTP boundary (routes, handlers, server)
 * - `language_utils`: Language code helpers
 * - `errors`: Custom error types for the service
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod artifacts;
pub mod cache;
pub mod encoding;
pub mod engines;
pub mod errors;
pub mod language_utils;
pub mod redis_cache;
pub mod registry;
pub mod translation_service;
pub mod web;

// Re-export main types for easier usage
pub use app_config::Config;
pub use cache::{CacheKey, MemoryCache, ResultCache};
pub use errors::{AppError, EngineError, StorageError, TranslationError};
pub use registry::{ModelId, ModelRegistry, ModelStatus};
pub use translation_service::TranslationService;
