/*!
 * Redis-backed result cache.
 *
 * Optional external backend for translation results, letting several service
 * instances share one cache. Expiry is delegated to redis via SETEX; backend
 * errors degrade to a cache miss so a broken cache never fails a request.
 */

use log::warn;
use redis::{Client, RedisResult};
use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::app_config::CacheConfig;
use crate::cache::{CacheKey, ResultCache};

/// Result cache backed by an external Redis store
#[derive(Clone)]
pub struct RedisCache {
    client: Client,
    key_prefix: String,
}

impl RedisCache {
    /// Create a new Redis cache from the cache configuration
    pub fn new(config: &CacheConfig) -> RedisResult<Self> {
        let client = Client::open(config.redis_url.as_str())?;
        Ok(Self {
            client,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// Test the Redis connection
    pub fn test_connection(&self) -> RedisResult<()> {
        let mut conn = self.client.get_connection()?;
        redis::cmd("PING").query::<String>(&mut conn)?;
        Ok(())
    }

    /// Render a bounded redis key for a cache key.
    ///
    /// The composite key embeds the full source text, so it is digested
    /// before use as a redis key.
    fn redis_key(&self, key: &CacheKey) -> String {
        let digest = Sha256::digest(key.render().as_bytes());
        format!("{}{:x}", self.key_prefix, digest)
    }
}

impl ResultCache for RedisCache {
    fn get(&self, key: &CacheKey) -> Option<String> {
        let redis_key = self.redis_key(key);

        let mut conn = match self.client.get_connection() {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Redis connection failed, treating as cache miss: {}", e);
                return None;
            }
        };

        match redis::cmd("GET").arg(&redis_key).query::<Option<String>>(&mut conn) {
            Ok(cached) => cached,
            Err(e) => {
                warn!("Redis GET failed, treating as cache miss: {}", e);
                None
            }
        }
    }

    fn put(&self, key: &CacheKey, translation: &str, ttl: Duration) {
        let redis_key = self.redis_key(key);

        let mut conn = match self.client.get_connection() {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Redis connection failed, skipping cache write: {}", e);
                return;
            }
        };

        let ttl_secs = ttl.as_secs().max(1);
        if let Err(e) = redis::cmd("SETEX")
            .arg(&redis_key)
            .arg(ttl_secs)
            .arg(translation)
            .query::<()>(&mut conn)
        {
            warn!("Redis SETEX failed, skipping cache write: {}", e);
        }
    }
}
