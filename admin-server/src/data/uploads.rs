use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::domain::error::DomainError;

/// One uploaded file held in memory, addressed by a random hex id.
#[derive(Debug, Clone)]
pub(crate) struct StoredUpload {
    pub(crate) id: String,
    pub(crate) filename: String,
    pub(crate) mime: String,
    pub(crate) size: u64,
    pub(crate) bytes: Vec<u8>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub(crate) struct UploadStore {
    entries: Mutex<HashMap<String, StoredUpload>>,
}

impl UploadStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores the bytes and returns the assigned id.
    pub(crate) fn put(
        &self,
        filename: String,
        mime: String,
        bytes: Vec<u8>,
    ) -> Result<String, DomainError> {
        let id = random_hex_id();
        let upload = StoredUpload {
            id: id.clone(),
            filename,
            mime,
            size: bytes.len() as u64,
            bytes,
            created_at: Utc::now(),
        };
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| DomainError::Unexpected("upload store lock poisoned".to_string()))?;
        entries.insert(id.clone(), upload);
        Ok(id)
    }

    pub(crate) fn get(&self, id: &str) -> Result<Option<StoredUpload>, DomainError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| DomainError::Unexpected("upload store lock poisoned".to_string()))?;
        Ok(entries.get(id).cloned())
    }
}

fn random_hex_id() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
