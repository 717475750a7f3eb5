//! Tool configuration from YAML

use serde::Deserialize;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

/// File name looked up in the project directory when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "nsbundle.yaml";

/// External programs used by the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Mobile-app CLI executable
    #[serde(default = "default_cli")]
    pub cli: String,

    /// Bundler executable
    #[serde(default = "default_bundler")]
    pub bundler: String,

    /// Config file passed to the bundler as `--config=<file>`
    #[serde(default = "default_bundler_config")]
    pub bundler_config: String,
}

fn default_cli() -> String {
    "tns".to_string()
}

fn default_bundler() -> String {
    "webpack".to_string()
}

fn default_bundler_config() -> String {
    "webpack.config.js".to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            cli: default_cli(),
            bundler: default_bundler(),
            bundler_config: default_bundler_config(),
        }
    }
}

impl ToolConfig {
    /// Load tool configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse tool configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ToolConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the explicit config file, or `nsbundle.yaml` in the project
    /// directory when it exists, or fall back to the defaults
    pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let candidate: PathBuf = project_dir.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::from_file(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the tool configuration
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("cli", &self.cli),
            ("bundler", &self.bundler),
            ("bundler_config", &self.bundler_config),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("Tool config field '{}' must not be empty", field);
            }
        }
        Ok(())
    }
}
