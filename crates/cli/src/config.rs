//! Configuration file support for algorithm comparisons

use anyhow::{Context, Result};
use hashprobe_core::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings of a `compare` run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Message file, one message per line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    /// Algorithms to compare, in output order
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<HashAlgorithm>,
    /// Random messages to use instead of an input file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random: Option<RandomConfig>,
}

/// Random message generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomConfig {
    #[serde(default = "default_count")]
    pub count: usize,
    /// Message length in bytes
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            length: default_length(),
            seed: None,
        }
    }
}

fn default_algorithms() -> Vec<HashAlgorithm> {
    vec![
        HashAlgorithm::Adler32,
        HashAlgorithm::Adler32x,
        HashAlgorithm::Lch32,
        HashAlgorithm::Crc32,
    ]
}

fn default_count() -> usize {
    10_000
}

fn default_length() -> usize {
    32
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            input: None,
            algorithms: default_algorithms(),
            random: None,
        }
    }
}

impl CompareConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                extension
            )),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let content = match extension {
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "toml" => toml::to_string_pretty(self)?,
            _ => {
                return Err(anyhow::anyhow!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                    extension
                ))
            }
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Check that the run is well defined: exactly one message source, at
    /// least one algorithm, non-empty random messages.
    pub fn validate(&self) -> hashprobe_core::Result<()> {
        use hashprobe_core::Error::InvalidConfig;

        if self.algorithms.is_empty() {
            return Err(InvalidConfig("no algorithms to compare".to_string()));
        }
        match (&self.input, &self.random) {
            (Some(_), Some(_)) => Err(InvalidConfig(
                "set either an input file or a random section, not both".to_string(),
            )),
            (None, None) => Err(InvalidConfig(
                "no messages: set an input file or a random section".to_string(),
            )),
            (None, Some(random)) if random.length == 0 => {
                Err(InvalidConfig("random message length must be at least 1".to_string()))
            }
            _ => Ok(()),
        }
    }
}
