use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{NonceStore, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    /// Soonest deadline first. Records left behind by overwrites or consumes
    /// are skipped when they surface.
    deadlines: BinaryHeap<Reverse<(Instant, String)>>,
}

impl Inner {
    fn evict_expired(&mut self, now: Instant) -> usize {
        let mut evicted = 0;
        while let Some(Reverse((deadline, _))) = self.deadlines.peek() {
            if *deadline > now {
                break;
            }
            let Some(Reverse((_, key))) = self.deadlines.pop() else {
                break;
            };
            if self.entries.get(&key).is_some_and(|entry| entry.is_expired(now)) {
                self.entries.remove(&key);
                evicted += 1;
            }
        }
        evicted
    }
}

/// In-process [`NonceStore`].
///
/// Every `put` first evicts whatever has expired, so the map only ever holds
/// entries issued within the last TTL. Reads also drop a stale entry they hit.
#[derive(Debug, Clone, Default)]
pub struct MemoryNonceStore(Arc<Mutex<Inner>>);

impl MemoryNonceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        self.0.lock().await.evict_expired(Instant::now())
    }

    pub async fn len(&self) -> usize {
        self.0.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.0.lock().await.entries.is_empty()
    }
}

#[async_trait]
impl NonceStore for MemoryNonceStore {
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .ok_or_else(|| StoreError::Backend("ttl out of range".to_string()))?;
        let mut inner = self.0.lock().await;
        inner.evict_expired(now);
        inner.entries.insert(key.to_string(), Entry { value, expires_at });
        inner.deadlines.push(Reverse((expires_at, key.to_string())));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String, StoreError> {
        let mut inner = self.0.lock().await;
        let entry = inner.entries.get(key).cloned().ok_or(StoreError::NotFound)?;
        if entry.is_expired(Instant::now()) {
            inner.entries.remove(key);
            return Err(StoreError::Expired);
        }
        Ok(entry.value)
    }

    async fn consume(&self, key: &str) -> Result<String, StoreError> {
        let entry = self
            .0
            .lock()
            .await
            .entries
            .remove(key)
            .ok_or(StoreError::NotFound)?;
        if entry.is_expired(Instant::now()) {
            return Err(StoreError::Expired);
        }
        Ok(entry.value)
    }
}
