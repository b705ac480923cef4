//! Entry validity configuration

use rnac_common::{Result, RncError};
use serde::{Deserialize, Serialize};

// ============================================================================
// Defaults
// ============================================================================

/// Shortest sequence accepted for import.
pub const DEFAULT_MIN_SEQUENCE_LENGTH: usize = 10;

/// Longest sequence accepted for import.
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 1_000_000;

/// Largest accepted fraction of `N` bases.
pub const DEFAULT_MAX_N_FRACTION: f64 = 0.1;

/// Sequences up to this length go to the short sequence stream.
pub const DEFAULT_SHORT_SEQUENCE_LIMIT: usize = 4000;

/// Rules deciding whether an entry is written at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidityRules {
    pub min_length: usize,
    pub max_length: usize,
    pub max_n_fraction: f64,
}

impl Default for ValidityRules {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_SEQUENCE_LENGTH,
            max_length: DEFAULT_MAX_SEQUENCE_LENGTH,
            max_n_fraction: DEFAULT_MAX_N_FRACTION,
        }
    }
}

impl ValidityRules {
    pub fn validate(&self) -> Result<()> {
        if self.min_length > self.max_length {
            return Err(RncError::Config(format!(
                "min sequence length ({}) is larger than max ({})",
                self.min_length, self.max_length
            )));
        }
        if !(0.0..=1.0).contains(&self.max_n_fraction) {
            return Err(RncError::Config(format!(
                "N fraction must be within [0, 1], got {}",
                self.max_n_fraction
            )));
        }
        Ok(())
    }
}

/// Data model settings loaded from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub validity: ValidityRules,
    pub short_sequence_limit: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            validity: ValidityRules::default(),
            short_sequence_limit: DEFAULT_SHORT_SEQUENCE_LIMIT,
        }
    }
}

impl DataConfig {
    /// Load from `.env` and the process environment.
    ///
    /// Environment variables:
    /// - `RNAC_MIN_SEQUENCE_LENGTH`
    /// - `RNAC_MAX_SEQUENCE_LENGTH`
    /// - `RNAC_MAX_N_FRACTION`
    /// - `RNAC_SHORT_SEQUENCE_LIMIT`
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            validity: ValidityRules {
                min_length: parse_or(&lookup, "RNAC_MIN_SEQUENCE_LENGTH", DEFAULT_MIN_SEQUENCE_LENGTH)?,
                max_length: parse_or(&lookup, "RNAC_MAX_SEQUENCE_LENGTH", DEFAULT_MAX_SEQUENCE_LENGTH)?,
                max_n_fraction: parse_or(&lookup, "RNAC_MAX_N_FRACTION", DEFAULT_MAX_N_FRACTION)?,
            },
            short_sequence_limit: parse_or(
                &lookup,
                "RNAC_SHORT_SEQUENCE_LIMIT",
                DEFAULT_SHORT_SEQUENCE_LIMIT,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.validity.validate()?;
        if self.short_sequence_limit == 0 {
            return Err(RncError::Config("short sequence limit must be greater than 0".into()));
        }
        Ok(())
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| RncError::Config(format!("{} has an invalid value: {:?}", key, raw))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DataConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DataConfig::default());
        assert_eq!(config.validity.min_length, 10);
        assert_eq!(config.validity.max_length, 1_000_000);
        assert_eq!(config.short_sequence_limit, 4000);
    }

    #[test]
    fn test_overrides() {
        let config = DataConfig::from_lookup(lookup(&[
            ("RNAC_MIN_SEQUENCE_LENGTH", "20"),
            ("RNAC_MAX_N_FRACTION", "0.25"),
        ]))
        .unwrap();
        assert_eq!(config.validity.min_length, 20);
        assert_eq!(config.validity.max_n_fraction, 0.25);
    }

    #[test]
    fn test_invalid_values() {
        assert!(DataConfig::from_lookup(lookup(&[("RNAC_MAX_SEQUENCE_LENGTH", "lots")])).is_err());
        assert!(DataConfig::from_lookup(lookup(&[("RNAC_MAX_N_FRACTION", "1.5")])).is_err());
        assert!(DataConfig::from_lookup(lookup(&[
            ("RNAC_MIN_SEQUENCE_LENGTH", "100"),
            ("RNAC_MAX_SEQUENCE_LENGTH", "50"),
        ]))
        .is_err());
    }
}
