//! Namespaced key-value persistence.
//!
//! Every persisted UI store (wizard answers, project metadata, registrations,
//! banner dismissal) lives under one key, serialized as a JSON document in
//! `.bizplan/storage/<key>.json`. Missing keys read as `None`.

use crate::error::Result;
use crate::paths;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

pub const WIZARD_KEY: &str = "wizard-storage";
pub const PROJECT_KEY: &str = "project-storage";
pub const PRE_REGISTRATIONS_KEY: &str = "pre-registrations";
pub const BANNER_DISMISSED_KEY: &str = "promo-banner-dismissed-until";

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = paths::storage_path(&self.root, key);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    /// Read a key, falling back to `T::default()` when it was never written.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        Ok(self.get(key)?.unwrap_or_default())
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = paths::storage_path(&self.root, key);
        let data = serde_json::to_string_pretty(value)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn remove(&self, key: &str) -> Result<bool> {
        crate::io::remove_if_exists(&paths::storage_path(&self.root, key))
    }
}
