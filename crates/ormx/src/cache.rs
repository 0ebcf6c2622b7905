//! Read-through cache for rows fetched by primary key.
//!
//! Entries are keyed by `table/id` and hold the row serialized as JSON. A
//! payload that no longer decodes is treated as a miss and dropped.

use std::collections::{HashMap, VecDeque};
use std::fmt::Display;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::context::RequestContext;

/// Key/value store with per-entry expiry.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    fn set(&self, key: String, payload: Vec<u8>, ttl: Duration);

    fn remove(&self, key: &str);
}

/// Join key parts with `/`.
pub fn cache_key<I>(parts: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    parts
        .into_iter()
        .map(|part| part.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Cached row of `table` with primary key `id`.
///
/// Always a miss when the request reads from the primary. A payload that
/// fails to decode is removed.
pub fn load_cached<T: DeserializeOwned>(
    cache: &dyn Cache,
    ctx: &RequestContext,
    table: &str,
    id: impl Display,
) -> Option<T> {
    if ctx.reads_from_primary() {
        return None;
    }
    let key = cache_key([table.to_string(), id.to_string()]);
    let payload = cache.get(&key)?;
    match serde_json::from_slice(&payload) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(target: "ormx", %key, error = %err, "dropping undecodable cache entry");
            cache.remove(&key);
            None
        }
    }
}

/// Store `value` as the cached row of `table` with primary key `id`.
///
/// Serialization failures only mean the row is not cached.
pub fn store_cached<T: Serialize>(
    cache: &dyn Cache,
    table: &str,
    id: impl Display,
    value: &T,
    ttl: Duration,
) {
    let key = cache_key([table.to_string(), id.to_string()]);
    match serde_json::to_vec(value) {
        Ok(payload) => cache.set(key, payload, ttl),
        Err(err) => {
            tracing::warn!(target: "ormx", %key, error = %err, "failed to serialize row for caching");
        }
    }
}

/// In-process LRU cache with per-entry expiry.
#[derive(Debug)]
pub struct MemoryCache {
    inner: Mutex<MemoryCacheInner>,
}

#[derive(Debug)]
struct MemoryCacheInner {
    capacity: usize,
    map: HashMap<String, Entry>,
    order: VecDeque<String>,
}

#[derive(Debug)]
struct Entry {
    payload: Vec<u8>,
    expires_at: Instant,
}

impl MemoryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(MemoryCacheInner {
                capacity,
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryCacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let mut inner = self.lock();
        let now = Instant::now();
        let expired: Vec<String> = inner
            .map
            .iter()
            .filter(|(_, entry)| entry.expires_at <= now)
            .map(|(key, _)| key.clone())
            .collect();
        for key in expired {
            inner.map.remove(&key);
            inner.remove_from_order(&key);
        }
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut inner = self.lock();
        let expired = inner.map.get(key)?.expires_at <= Instant::now();
        if expired {
            inner.map.remove(key);
            inner.remove_from_order(key);
            return None;
        }
        inner.touch(key);
        inner.map.get(key).map(|entry| entry.payload.clone())
    }

    fn set(&self, key: String, payload: Vec<u8>, ttl: Duration) {
        let mut inner = self.lock();
        let entry = Entry {
            payload,
            expires_at: Instant::now() + ttl,
        };
        if inner.map.insert(key.clone(), entry).is_some() {
            inner.touch(&key);
        } else {
            inner.order.push_back(key);
        }
        inner.evict_if_needed();
    }

    fn remove(&self, key: &str) {
        let mut inner = self.lock();
        if inner.map.remove(key).is_some() {
            inner.remove_from_order(key);
        }
    }
}

impl MemoryCacheInner {
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k.as_str() == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }

    fn remove_from_order(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k.as_str() == key) {
            let _ = self.order.remove(pos);
        }
    }

    fn evict_if_needed(&mut self) {
        if self.capacity == 0 {
            self.map.clear();
            self.order.clear();
            return;
        }

        while self.map.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            let _ = self.map.remove(&oldest);
        }
    }
}
