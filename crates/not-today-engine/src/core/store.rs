//! Persisted depth counters.
//!
//! The backing store is an abstract string key-value map. Any failure to read
//! (store missing, key missing, garbage value) falls back to the default
//! state; write failures are logged and dropped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::depth::MAX_DEPTH;
use crate::error::{Error, Result};

/// Key holding the current depth.
pub const DEPTH_KEY: &str = "not_today_depth";
/// Key holding the number of completed press-release cycles.
pub const PULL_COUNT_KEY: &str = "not_today_pull_count";

/// Abstract string store (browser localStorage, in-memory map, ...).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for native hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Depth counters surviving across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthState {
    pub depth: u8,
    pub pull_count: u32,
}

/// Load/save boundary around a [`KeyValueStore`].
pub struct DepthStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> DepthStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted state, or the default if anything is missing or corrupt.
    pub fn load(&self) -> DepthState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => DepthState::default(),
            Err(err) => {
                log::warn!("depth state unreadable, starting fresh: {}", err);
                DepthState::default()
            }
        }
    }

    fn try_load(&self) -> Result<Option<DepthState>> {
        let depth = self.store.get(DEPTH_KEY)?;
        let pull_count = self.store.get(PULL_COUNT_KEY)?;
        let (Some(depth), Some(pull_count)) = (depth, pull_count) else {
            return Ok(None);
        };
        let depth = parse_count(DEPTH_KEY, &depth)?;
        Ok(Some(DepthState {
            depth: depth.min(u32::from(MAX_DEPTH)) as u8,
            pull_count: parse_count(PULL_COUNT_KEY, &pull_count)?,
        }))
    }

    /// Write both counters. Failures are logged, never returned.
    pub fn save(&mut self, state: DepthState) {
        let result = self
            .store
            .set(DEPTH_KEY, &state.depth.to_string())
            .and_then(|()| self.store.set(PULL_COUNT_KEY, &state.pull_count.to_string()));
        if let Err(err) = result {
            log::warn!("could not persist depth state: {}", err);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

fn parse_count(key: &str, raw: &str) -> Result<u32> {
    raw.trim().parse::<u32>().map_err(|_| Error::CorruptValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}
