//! TTL-bounded caching of lookup results and the service description.
//!
//! The pipeline only needs atomic per-key get/put with a TTL on write, so
//! the backend is a trait: Redis, memcached, or the bundled [`MemoryStore`]
//! all qualify. Writes happen only for confirmed-valid results and reads
//! are filtered, so concurrent callers racing to fill the same key cost a
//! redundant remote call at worst, never a wrong answer.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::result::{ValidationResult, Validity};

/// TTL for confirmed-valid lookup results.
pub const RESULT_TTL: Duration = Duration::from_secs(3600);

/// TTL for the cached service-description document. Short, to bound the
/// damage window if the registry publishes a malformed document.
pub const CONTRACT_TTL: Duration = Duration::from_secs(60);

/// Single well-known key for the service-description document.
pub const CONTRACT_KEY: &str = "vat:wsdl";

/// Result-cache key for a (prefix, canonical number) pair.
pub fn result_key(prefix: &str, number: &str) -> String {
    format!("vat:{prefix}{number}")
}

/// Key/value store with TTL-on-write semantics.
///
/// Implementations must provide atomic get/put per key; no cross-key
/// transactions are assumed or needed.
#[async_trait]
pub trait TtlStore: Send + Sync {
    /// Read a live entry, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Option<String>;

    /// Write an entry that expires after `ttl`.
    async fn put(&self, key: &str, value: String, ttl: Duration);
}

/// In-process [`TtlStore`] backed by a mutex-guarded map.
///
/// Expired entries are dropped on read. Suitable for single-process
/// deployments and tests; multi-process deployments want a shared store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TtlStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let expired = match entries.get(key) {
            Some((value, deadline)) => {
                if Instant::now() < *deadline {
                    return Some(value.clone());
                }
                true
            }
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        None
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), (value, Instant::now() + ttl));
    }
}

/// The cached-response filter: a cache read is trusted only if it
/// deserializes to a result record whose validity is `Valid`. Malformed
/// payloads and non-valid results are treated as absent, so a bad cache
/// write can never resurface as a wrong answer.
pub(crate) fn filter_cached(raw: &str) -> Option<ValidationResult> {
    let result: ValidationResult = serde_json::from_str(raw).ok()?;
    (result.validity == Validity::Valid).then_some(result)
}
