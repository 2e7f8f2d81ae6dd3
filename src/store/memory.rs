//! Implements the very simple `Backend` trait using in-memory data.
//!
//! Clones share the same underlying map, so a caller can hand one clone to a `Store` and keep
//! another to look at (or tamper with) what was stored.

use crate::store::Backend;
use crate::Result;
use anyhow::anyhow;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    data: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    /// Create a new `MemoryBackend` seeded with `data`.
    pub fn new(data: HashMap<String, String>) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.data
            .lock()
            .map_err(|_| anyhow!("The in-memory store was poisoned by a panicking thread"))
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_data() {
        let mut a = MemoryBackend::default();
        let b = a.clone();
        assert_eq!(b.get("k").unwrap(), None);
        a.set("k", "v1").unwrap();
        a.set("k", "v2").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_seeded() {
        let backend = MemoryBackend::new(HashMap::from([("k".to_string(), "[]".to_string())]));
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("[]"));
    }
}
