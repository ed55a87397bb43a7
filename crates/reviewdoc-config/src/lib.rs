use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub emit: EmitConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
}

/// Settings for the nested line-tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    /// Spaces per depth level when rendering the line tree.
    pub indent_width: usize,
    /// Recorded on every document so the review service can tell which emitter produced it.
    pub parser_version: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            parser_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Settings for the schema walker and the flat token writer it drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub indent_width: usize,
    /// Objects with more properties than this render one property per line.
    pub max_inline_properties: usize,
    /// Arrays with more elements than this render one element per line.
    pub max_inline_elements: usize,
    pub max_inline_string_length: usize,
    /// Render operation parameter lists as tables instead of nested objects.
    pub parameter_tables: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            max_inline_properties: 3,
            max_inline_elements: 4,
            max_inline_string_length: 50,
            parameter_tables: false,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the user config, falling back to defaults when no file exists.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/reviewdoc");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/reviewdoc/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.emit.indent_width, 4);
        assert_eq!(config.emit.parser_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.schema.indent_width, 2);
        assert_eq!(config.schema.max_inline_properties, 3);
        assert_eq!(config.schema.max_inline_elements, 4);
        assert_eq!(config.schema.max_inline_string_length, 50);
        assert!(!config.schema.parameter_tables);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut original = Config::default();
        original.emit.indent_width = 2;
        original.schema.parameter_tables = true;

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config_content = r#"
[schema]
max_inline_string_length = 20
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.schema.max_inline_string_length, 20);
        assert_eq!(config.schema.indent_width, 2);
        assert_eq!(config.emit, EmitConfig::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[emit]\nindent_width = \"wide\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/dir/config.toml");
        let mut test_config = Config::default();
        test_config.emit.parser_version = "9.9.9".to_string();

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
