/*!
 * Result cache for translations.
 *
 * Successful translations are stored under a composite key of model, source
 * language, target language and text, and served on subsequent identical
 * requests without invoking the engine. Entries expire after a TTL; there is
 * no capacity bound beyond expiry.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::registry::ModelId;

/// Delimiter joining the key fields; cannot occur in language codes and is
/// vanishingly unlikely in text
const KEY_DELIMITER: char = '\u{1f}';

/// Composite key identifying one translation result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Model the translation was produced by
    model: ModelId,

    /// Source language code
    source_lang: String,

    /// Target language code
    target_lang: String,

    /// Source text
    text: String,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(model: ModelId, source_lang: &str, target_lang: &str, text: &str) -> Self {
        Self {
            model,
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            text: text.to_string(),
        }
    }

    /// Render the key as a single deterministic string.
    ///
    /// Two requests with identical fields render identically regardless of
    /// call order or time.
    pub fn render(&self) -> String {
        let mut key = String::with_capacity(
            self.model.as_str().len()
                + self.source_lang.len()
                + self.target_lang.len()
                + self.text.len()
                + 3,
        );
        key.push_str(self.model.as_str());
        key.push(KEY_DELIMITER);
        key.push_str(&self.source_lang);
        key.push(KEY_DELIMITER);
        key.push_str(&self.target_lang);
        key.push(KEY_DELIMITER);
        key.push_str(&self.text);
        key
    }
}

/// Store for computed translations.
///
/// Implementations must honor TTL expiry and read-your-writes: a `get` after
/// a returned `put` observes the stored text until the TTL elapses.
/// Last-write-wins on concurrent `put` is acceptable since values are
/// deterministic per key.
pub trait ResultCache: Send + Sync {
    /// Fetch a live cached translation
    fn get(&self, key: &CacheKey) -> Option<String>;

    /// Store a translation under the key with the given TTL
    fn put(&self, key: &CacheKey, translation: &str, ttl: Duration);
}

/// A cached translation with its expiry instant
struct CacheEntry {
    translation: String,
    expires_at: Instant,
}

/// In-process result cache with TTL expiry
pub struct MemoryCache {
    /// Internal cache storage
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,
}

impl MemoryCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Drop every entry and reset the counters
    pub fn clear(&self) {
        self.entries.write().clear();
        *self.hits.write() = 0;
        *self.misses.write() = 0;

        debug!("Result cache cleared");
    }

    /// Number of stored entries, expired ones included until they are read
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn record_hit(&self) {
        let mut hits = self.hits.write();
        *hits += 1;
    }

    fn record_miss(&self) {
        let mut misses = self.misses.write();
        *misses += 1;
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryCache {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<String> {
        let rendered = key.render();

        {
            let entries = self.entries.read();
            match entries.get(&rendered) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    self.record_hit();
                    debug!("Cache hit for '{}'", truncate_text(&rendered, 40));
                    return Some(entry.translation.clone());
                }
                Some(_) => {}
                None => {
                    self.record_miss();
                    return None;
                }
            }
        }

        // Entry exists but expired: drop it under the write lock
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(&rendered) {
            if entry.expires_at <= Instant::now() {
                entries.remove(&rendered);
            }
        }
        self.record_miss();
        debug!("Cache entry expired for '{}'", truncate_text(&rendered, 40));
        None
    }

    fn put(&self, key: &CacheKey, translation: &str, ttl: Duration) {
        let rendered = key.render();
        let mut entries = self.entries.write();

        entries.insert(
            rendered,
            CacheEntry {
                translation: translation.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_length).collect();
        format!("{}...", truncated)
    }
}
