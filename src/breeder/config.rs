//! Breeder configuration

use crate::error::{GenomeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Switches for one breeding event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreederConfig {
    /// Consult the rule set at all
    pub mutations_enabled: bool,
    /// Skip the probability roll of every rule
    pub force_mutations: bool,
    /// Run colour drift on the offspring after a rule fires
    pub color_drift: bool,
    /// Nudge each offspring layer's plane and trait bytes after a rule fires
    pub trait_drift: bool,
}

impl Default for BreederConfig {
    fn default() -> Self {
        Self {
            mutations_enabled: true,
            force_mutations: false,
            color_drift: true,
            trait_drift: true,
        }
    }
}

impl BreederConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GenomeError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GenomeError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| GenomeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BreederConfig::default();
        assert!(config.mutations_enabled);
        assert!(!config.force_mutations);
        assert!(config.color_drift);
        assert!(config.trait_drift);
    }

    #[test]
    fn test_partial_json() {
        let config = BreederConfig::from_json(r#"{ "force_mutations": true }"#).unwrap();
        assert!(config.force_mutations);
        assert!(config.mutations_enabled);

        let roundtrip = BreederConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(roundtrip, config);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            BreederConfig::from_json("{ not json"),
            Err(GenomeError::Config(_))
        ));
        assert!(matches!(
            BreederConfig::load("/nonexistent/koi/breeder.json"),
            Err(GenomeError::Config(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("koi-breeder-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "color_drift": false }"#).unwrap();
        let config = BreederConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(!config.color_drift);
        assert!(config.trait_drift);
    }
}
