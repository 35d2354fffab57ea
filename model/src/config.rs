use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming a JSON file that overrides the default configuration.
pub const CONFIG_ENV_VAR: &str = "DIGITAL_TWIN_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static text shown on the card.
///
/// Fields missing from a configuration file keep their default.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TwinConfig {
    pub machine_id: String,
    pub title: String,
    pub subtitle: String,
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self {
            machine_id: "#DT-001".into(),
            title: "Digital Twin".into(),
            subtitle: "Machine Temperature".into(),
        }
    }
}

impl TwinConfig {
    /// Reads the configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json_data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_str::<Self>(&json_data)?)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`] if it is set, the defaults otherwise.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("Loading configuration from {}", Path::new(&path).display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = TwinConfig::default();

        assert_eq!(config.machine_id, "#DT-001");
        assert_eq!(config.title, "Digital Twin");
        assert_eq!(config.subtitle, "Machine Temperature");
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = config_file("{}");

        assert_eq!(TwinConfig::from_file(file.path()).unwrap(), TwinConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = config_file(r##"{ "machine_id": "#DT-042" }"##);
        let config = TwinConfig::from_file(file.path()).unwrap();

        assert_eq!(config.machine_id, "#DT-042");
        assert_eq!(config.title, "Digital Twin");
        assert_eq!(config.subtitle, "Machine Temperature");
    }

    #[test]
    fn test_config_file_is_removed_with_fixture() {
        let file = config_file(r#"{ "title": "Press 4" }"#);
        let path = file.path().to_path_buf();
        assert_eq!(TwinConfig::from_file(&path).unwrap().title, "Press 4");

        drop(file);
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file() {
        let err = TwinConfig::from_file("/nonexistent/digital-twin.json").unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/digital-twin.json"));
    }

    #[test]
    fn test_invalid_file() {
        let file = config_file("{ machine_id: ");
        let err = TwinConfig::from_file(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
