//! Runtime configuration — store layout and the tier table.
//!
//! Loaded from JSON. Every field has a default, so `{}` is a valid
//! config that targets the production `users` collection layout
//! (`correo`, `credito`, `codes`, `perfil`) with the production tier
//! table.

use std::path::Path;

use credit_core::tiers::{TierEntry, TierTable, TierTableError};
use serde::{Deserialize, Serialize};

/// Configuration load failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tier table: {0}")]
    Tiers(#[from] TierTableError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Collection holding account documents.
    pub collection: String,
    /// Indexed field matched against the session's contact identifier.
    pub contact_field: String,
    pub balance_field: String,
    pub codes_field: String,
    pub role_field: String,
    /// Code → tier rows. `None` selects the production table.
    pub tiers: Option<Vec<TierEntry>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            collection: "users".into(),
            contact_field: "correo".into(),
            balance_field: "credito".into(),
            codes_field: "codes".into(),
            role_field: "perfil".into(),
            tiers: None,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(s)?;
        // Surface a bad table at load time rather than on first scan.
        config.tier_table()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Build the immutable tier table this config describes.
    pub fn tier_table(&self) -> Result<TierTable, TierTableError> {
        match &self.tiers {
            None => Ok(TierTable::default()),
            Some(rows) => TierTable::try_from(rows.clone()),
        }
    }
}
