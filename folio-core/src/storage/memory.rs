use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::StorageError;

use super::SlotStorage;

/// In-process slot storage, optionally capped at a byte quota the way
/// browser local storage is.
#[derive(Debug, Default)]
pub struct MemorySlots {
    slots: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose total key + value bytes may not exceed `quota`.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            slots: Mutex::new(BTreeMap::new()),
            quota: Some(quota),
        }
    }

    /// Total bytes currently held (keys + values).
    pub fn used_bytes(&self) -> usize {
        let slots = self.slots.lock().expect("memory slots mutex poisoned");
        slots.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

#[async_trait::async_trait]
impl SlotStorage for MemorySlots {
    async fn get(&self, key: &str) -> crate::error::Result<Option<String>> {
        let slots = self.slots.lock().expect("memory slots mutex poisoned");
        Ok(slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> crate::error::Result<()> {
        let mut slots = self.slots.lock().expect("memory slots mutex poisoned");
        if let Some(quota) = self.quota {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                }
                .into());
            }
        }
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> crate::error::Result<()> {
        let mut slots = self.slots.lock().expect("memory slots mutex poisoned");
        slots.remove(key);
        Ok(())
    }

    async fn keys(&self) -> crate::error::Result<Vec<String>> {
        let slots = self.slots.lock().expect("memory slots mutex poisoned");
        Ok(slots.keys().cloned().collect())
    }
}
