//! TOML configuration for helix generation.
//!
//! A config file names the helix parameters, the workgroup size used by both
//! dispatch paths, and CPU pool settings. Every table uses `#[serde(default)]`
//! so partial files work:
//!
//! ```toml
//! workgroup_size = 64
//!
//! [helix]
//! radius2 = 5.0
//! num_steps = 640
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, HelixParams, ParallelConfig, Result, WORKGROUP_SIZE};

/// Top-level configuration container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelixConfig {
    /// Invocations per workgroup on both CPU and GPU
    pub workgroup_size: u32,
    /// Helix parameters
    pub helix: HelixParams,
    /// CPU thread pool settings
    pub parallel: ParallelConfig,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            workgroup_size: WORKGROUP_SIZE,
            helix: HelixParams::default(),
            parallel: ParallelConfig::default(),
        }
    }
}

impl HelixConfig {
    /// Parse a configuration from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded helix config from {}", path.display());
        Ok(config)
    }

    /// Save the configuration to a TOML file (pretty-printed)
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the helix parameters and the workgroup size
    pub fn validate(&self) -> Result<()> {
        if self.workgroup_size == 0 {
            return Err(Error::Config("workgroup_size must be at least 1".to_string()));
        }
        self.helix.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = HelixConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = HelixConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r"
[helix]
radius2 = 5.0
num_steps = 640
";
        let config = HelixConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.helix.radius2, 5.0);
        assert_eq!(config.helix.num_steps, 640);
        // Everything else should be default
        assert_eq!(config.helix.radius1, 1.0);
        assert_eq!(config.helix.height, 24.0);
        assert_eq!(config.workgroup_size, 64);
        assert!(config.parallel.enabled);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(HelixConfig::from_toml_str("").unwrap(), HelixConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            HelixConfig::from_toml_str("workgroup_size = 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            HelixConfig::from_toml_str("[helix]\nnum_steps = 0"),
            Err(Error::InvalidParams(_))
        ));
        assert!(matches!(
            HelixConfig::from_toml_str("[helix]\nradius1 = \"wide\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("helixcrate-config-{}", std::process::id()));
        let path = dir.join("helix.toml");

        let mut config = HelixConfig::default();
        config.helix = config.helix.with_radii(2.0, 3.0).with_steps(48);
        config.workgroup_size = 128;

        config.save(&path).unwrap();
        let loaded = HelixConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/nonexistent/helixcrate/helix.toml");
        assert!(matches!(HelixConfig::load(path), Err(Error::Io(_))));
    }
}
