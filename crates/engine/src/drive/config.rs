//! Drive configuration via `sqlnav.toml`
//!
//! A drive is described by its data source and its connection mode. The
//! same settings can come from a TOML file or from the bracketed root
//! descriptor used at the start of a path (`[Data Source=app.db]`).

use serde::{Deserialize, Serialize};
use sqlnav_core::{split_store_prefix, NavError, NavResult};
use std::path::Path;

/// Config file name conventionally placed next to the database.
pub const CONFIG_FILE_NAME: &str = "sqlnav.toml";

/// Data source that opens a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Drive configuration loaded from `sqlnav.toml`.
///
/// # Example
///
/// ```toml
/// data_source = "app.db"
/// persistent_connection = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Path of the database file, or `:memory:`.
    #[serde(default = "default_data_source")]
    pub data_source: String,
    /// Keep one connection open for the lifetime of the drive.
    ///
    /// Ignored (treated as `true`) for in-memory data sources.
    #[serde(default = "default_persistent")]
    pub persistent_connection: bool,
}

fn default_data_source() -> String {
    IN_MEMORY.to_string()
}

fn default_persistent() -> bool {
    true
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            data_source: default_data_source(),
            persistent_connection: default_persistent(),
        }
    }
}

impl DriveConfig {
    /// Config for an in-memory database.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Config for a database file.
    pub fn file(path: impl AsRef<Path>, persistent_connection: bool) -> Self {
        Self {
            data_source: path.as_ref().to_string_lossy().into_owned(),
            persistent_connection,
        }
    }

    /// True if the data source names an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.data_source.to_ascii_lowercase().contains(IN_MEMORY)
    }

    /// Effective connection mode.
    ///
    /// Every new in-memory connection is a fresh empty database, so an
    /// in-memory drive is always persistent.
    pub fn is_persistent(&self) -> bool {
        self.persistent_connection || self.is_in_memory()
    }

    /// Render the bracketed root descriptor for this drive.
    pub fn root(&self) -> String {
        format!("[Data Source={}]", self.data_source)
    }

    /// Build a config from a root descriptor.
    ///
    /// Accepts `[Data Source=app.db; Version=3]`, a bare `[app.db]`, or an
    /// unbracketed data source. Unknown keys are ignored. An empty root
    /// means in-memory.
    pub fn from_root(root: &str) -> NavResult<Self> {
        let descriptor = match split_store_prefix(root) {
            Some((descriptor, _)) => descriptor,
            None => root.trim_matches(['/', '\\']),
        };
        let descriptor = descriptor.trim();
        if descriptor.is_empty() {
            return Ok(Self::default());
        }
        if !descriptor.contains('=') {
            return Ok(Self {
                data_source: descriptor.to_string(),
                ..Self::default()
            });
        }

        let mut data_source = None;
        for pair in descriptor.split(';') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            if key.trim().eq_ignore_ascii_case("data source") {
                data_source = Some(value.trim().to_string());
            }
        }
        match data_source {
            Some(source) if !source.is_empty() => Ok(Self {
                data_source: source,
                ..Self::default()
            }),
            _ => Err(NavError::config(format!(
                "root '{}' does not name a data source",
                root
            ))),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# SQLNav drive configuration
#
# Database file, or ":memory:" for a private in-memory database.
data_source = ":memory:"

# Keep a single connection open for the lifetime of the drive (default: true).
# When false, every session opens and closes its own connection.
# In-memory databases always use a persistent connection.
persistent_connection = true
"#
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> NavResult<Self> {
        let config: DriveConfig = toml::from_str(content)
            .map_err(|e| NavError::config(format!("Failed to parse drive config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> NavResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NavError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> NavResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| NavError::internal(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            NavError::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    fn validate(&self) -> NavResult<()> {
        if self.data_source.trim().is_empty() {
            return Err(NavError::config("data_source must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_in_memory_and_persistent() {
        let config = DriveConfig::default();
        assert_eq!(config.data_source, ":memory:");
        assert!(config.is_in_memory());
        assert!(config.is_persistent());
    }

    #[test]
    fn in_memory_forces_persistent() {
        let config = DriveConfig {
            data_source: ":memory:".to_string(),
            persistent_connection: false,
        };
        assert!(config.is_persistent());

        let file = DriveConfig::file("app.db", false);
        assert!(!file.is_persistent());
    }

    #[test]
    fn default_toml_parses_correctly() {
        let config = DriveConfig::from_toml_str(DriveConfig::default_toml()).unwrap();
        assert_eq!(config, DriveConfig::default());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = DriveConfig::from_toml_str("data_source = \"app.db\"").unwrap();
        assert_eq!(config.data_source, "app.db");
        assert!(config.persistent_connection);

        let empty = DriveConfig::from_toml_str("").unwrap();
        assert_eq!(empty, DriveConfig::default());
    }

    #[test]
    fn empty_data_source_is_rejected() {
        let err = DriveConfig::from_toml_str("data_source = \"  \"").unwrap_err();
        assert!(matches!(err, NavError::Config { .. }));
    }

    #[test]
    fn root_round_trip() {
        let config = DriveConfig::file("c:\\temp\\data.sqlite", true);
        let root = config.root();
        assert_eq!(root, "[Data Source=c:\\temp\\data.sqlite]");
        assert_eq!(DriveConfig::from_root(&root).unwrap().data_source, config.data_source);
    }

    #[test]
    fn from_root_accepts_connection_string_pairs() {
        let config = DriveConfig::from_root("\\\\[Data Source=app.db; Version=3]").unwrap();
        assert_eq!(config.data_source, "app.db");

        let config = DriveConfig::from_root("[version=3;data source = other.db]").unwrap();
        assert_eq!(config.data_source, "other.db");

        let bare = DriveConfig::from_root("[plain.db]").unwrap();
        assert_eq!(bare.data_source, "plain.db");

        assert!(DriveConfig::from_root("").unwrap().is_in_memory());
        assert!(DriveConfig::from_root("[Version=3]").is_err());
    }

    #[test]
    fn write_to_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = DriveConfig::file(dir.path().join("nav.db"), false);
        config.write_to_file(&path).unwrap();

        let loaded = DriveConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn from_file_missing_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = DriveConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, NavError::Config { .. }));
    }
}
