use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;

/// Memoizes analysis text by the SHA-256 of the raw image bytes. No eviction.
pub struct AnalysisCache {
    enabled: bool,
    entries: Mutex<HashMap<String, String>>,
}

impl AnalysisCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn key(image_bytes: &[u8]) -> String {
        hex::encode(Sha256::digest(image_bytes))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    pub fn insert(&self, key: String, markdown: String) {
        if !self.enabled {
            return;
        }
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, markdown);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
