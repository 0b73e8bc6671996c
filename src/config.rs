use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Harness configuration, usually read from a TOML file:
///
/// ```toml
/// [skipped]
/// body = "streams are not comparable"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Probe name to skip reason.
    #[serde(default)]
    pub skipped: IndexMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to deserialize config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl HarnessConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        content.parse()
    }

    pub fn skip(mut self, probe: &str, reason: &str) -> Self {
        self.skipped.insert(probe.to_string(), reason.to_string());
        self
    }
}

impl FromStr for HarnessConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str::<HarnessConfig>(s)?)
    }
}
