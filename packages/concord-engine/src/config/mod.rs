//! Engine configuration
//!
//! Small versioned YAML schema. Everything has a default, so an absent
//! config file and an empty `version: 1` file behave identically.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, Result};
use crate::features::concordance::ResolverLimits;

/// Schema version this build reads and writes.
pub const CONFIG_VERSION: u32 = 1;

/// YAML schema v1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Resolution bounds
    #[serde(default)]
    pub resolver: ResolverLimits,

    /// Emit a warn-level trace event for every skipped seed
    #[serde(default = "default_log_failures")]
    pub log_failures: bool,
}

fn default_log_failures() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            version: CONFIG_VERSION,
            resolver: ResolverLimits::default(),
            log_failures: true,
        }
    }
}

impl EngineConfig {
    /// Load and validate a YAML config file.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: EngineConfig = serde_yaml::from_str(&raw).map_err(|e| {
            EngineError::config(format!("failed to parse {}: {e}", path.display()))
        })?;
        if config.version != CONFIG_VERSION {
            return Err(EngineError::config(format!(
                "unsupported config version {} (expected {})",
                config.version, CONFIG_VERSION
            )));
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolver.max_hops == 0 {
            return Err(EngineError::config("resolver.max_hops must be at least 1"));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| EngineError::config(format!("failed to serialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn load(yaml: &str) -> Result<EngineConfig> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        EngineConfig::from_yaml(file.path())
    }

    #[test]
    fn test_yaml_roundtrip() {
        let yaml = EngineConfig::default().to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("max_hops: 1000"));
        let reloaded: EngineConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(reloaded, EngineConfig::default());
    }

    #[test]
    fn test_yaml_loading_with_overrides() {
        let config = load(
            r#"
version: 1
resolver:
  max_hops: 25
log_failures: false
"#,
        )
        .unwrap();
        assert_eq!(config.resolver.max_hops, 25);
        assert!(!config.log_failures);
    }

    #[test]
    fn test_yaml_defaults_fill_missing_fields() {
        let config = load("version: 1\n").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_yaml_missing_version() {
        assert!(load("log_failures: true\n").is_err());
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let err = load("version: 2\n").unwrap_err();
        assert!(err.to_string().contains("unsupported config version 2"));
    }

    #[test]
    fn test_yaml_unknown_field_rejected() {
        assert!(load("version: 1\nresolver:\n  max_hopz: 3\n").is_err());
        assert!(load("version: 1\nverbose: true\n").is_err());
    }

    #[test]
    fn test_zero_hop_ceiling_rejected() {
        let err = load("version: 1\nresolver:\n  max_hops: 0\n").unwrap_err();
        assert!(err.to_string().contains("max_hops"));
    }
}
