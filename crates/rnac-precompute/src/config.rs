//! Precompute configuration

use rnac_common::{Result, RncError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ontology file used when `RNAC_SO_ONTOLOGY` is unset.
pub const DEFAULT_SO_ONTOLOGY: &str = "so-simple.obo";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecomputeConfig {
    /// Sequence Ontology in OBO format, optionally gzipped.
    pub so_ontology: PathBuf,
}

impl Default for PrecomputeConfig {
    fn default() -> Self {
        Self {
            so_ontology: PathBuf::from(DEFAULT_SO_ONTOLOGY),
        }
    }
}

impl PrecomputeConfig {
    /// Load from `.env` and the process environment (`RNAC_SO_ONTOLOGY`).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match lookup("RNAC_SO_ONTOLOGY") {
            Some(path) => Self {
                so_ontology: PathBuf::from(path.trim()),
            },
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.so_ontology.as_os_str().is_empty() {
            return Err(RncError::Config("RNAC_SO_ONTOLOGY must not be empty".into()));
        }
        Ok(())
    }

    /// Whether the ontology file has to be decompressed while loading.
    pub fn is_gzipped(&self) -> bool {
        self.so_ontology
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path() {
        let config = PrecomputeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.so_ontology, PathBuf::from("so-simple.obo"));
        assert!(!config.is_gzipped());
    }

    #[test]
    fn test_override_path() {
        let config = PrecomputeConfig::from_lookup(|key| {
            (key == "RNAC_SO_ONTOLOGY").then(|| "/data/so.obo.gz".to_string())
        })
        .unwrap();
        assert_eq!(config.so_ontology, PathBuf::from("/data/so.obo.gz"));
        assert!(config.is_gzipped());
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(PrecomputeConfig::from_lookup(|_| Some("  ".to_string())).is_err());
    }
}
