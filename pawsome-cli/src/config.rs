use pawsome_core::BackendConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// `backend` section of the config file
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct BackendSection {
    url: Option<String>,
    anon_key: Option<String>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    backend: Option<BackendSection>,
    data_dir: Option<PathBuf>,
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the hosted backend project
    pub backend_url: ConfigValue<String>,
    /// Public anon key of the project
    pub anon_key: ConfigValue<String>,
    /// Directory holding the saved session
    pub data_dir: ConfigValue<PathBuf>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut backend_url = ConfigValue::new(String::new(), ConfigSource::Default);
        let mut anon_key = ConfigValue::new(String::new(), ConfigSource::Default);
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(backend) = file_config.backend {
                if let Some(url) = backend.url {
                    backend_url = ConfigValue::new(url, ConfigSource::File);
                }
                if let Some(key) = backend.anon_key {
                    anon_key = ConfigValue::new(key, ConfigSource::File);
                }
            }
            if let Some(dir) = file_config.data_dir {
                // Relative paths are relative to the config file
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
        }

        if let Ok(url) = std::env::var("PAWSOME_BACKEND_URL") {
            backend_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(key) = std::env::var("PAWSOME_ANON_KEY") {
            anon_key = ConfigValue::new(key, ConfigSource::Environment);
        }
        if let Ok(dir) = std::env::var("PAWSOME_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }

        Ok(Self {
            backend_url,
            anon_key,
            data_dir,
            config_file,
        })
    }

    /// Connection settings, or an error when the backend is not configured.
    pub fn backend(&self) -> Result<BackendConfig, ConfigError> {
        if self.backend_url.value.trim().is_empty() {
            return Err(ConfigError::Missing("backend.url"));
        }
        if self.anon_key.value.trim().is_empty() {
            return Err(ConfigError::Missing("backend.anon_key"));
        }
        Ok(BackendConfig::new(
            self.backend_url.value.trim(),
            self.anon_key.value.trim(),
        ))
    }

    /// Anon key with the middle hidden, for display.
    pub fn masked_anon_key(&self) -> String {
        let key = &self.anon_key.value;
        if key.is_empty() {
            "(not set)".to_string()
        } else if key.len() > 8 && key.is_ascii() {
            format!("{}...{}", &key[..4], &key[key.len() - 4..])
        } else {
            "****".to_string()
        }
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/pawsome/
    /// - macOS: ~/Library/Application Support/pawsome/
    /// - Windows: %APPDATA%/pawsome/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pawsome")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/pawsome/
    /// - macOS: ~/Library/Application Support/pawsome/
    /// - Windows: %APPDATA%/pawsome/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pawsome")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    Missing(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::Missing(key) => write!(
                f,
                "{} is not configured. Run 'paw config init' and edit the config file.",
                key
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
