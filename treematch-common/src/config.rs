//! Configuration loading and root folder resolution
//!
//! Every setting resolves with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or unreadable TOML file is never fatal: the loader logs a warning
//! and continues with defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "TREEMATCH_ROOT_FOLDER";
/// Environment variable carrying the soil provider API key
pub const SOIL_API_KEY_ENV: &str = "TREEMATCH_SOIL_API_KEY";
/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "treematch.db";

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_SOIL_API_BASE_URL: &str = "https://api.isda-africa.com/v1/soilproperty";
pub const DEFAULT_SOIL_DEPTH: &str = "0-20";
pub const DEFAULT_SOIL_TIMEOUT_SECS: u64 = 10;

/// Contents of `config.toml`
///
/// All fields are optional so a partial file only overrides what it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<String>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub soil_api: SoilApiToml,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `[soil_api]` table of the TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoilApiToml {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub depth: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Resolved soil provider settings handed to the HTTP client
#[derive(Debug, Clone)]
pub struct SoilApiConfig {
    pub base_url: String,
    /// `None` when no source configured a usable key
    pub api_key: Option<String>,
    pub depth: String,
    pub timeout_secs: u64,
}

impl Default for SoilApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SOIL_API_BASE_URL.to_string(),
            api_key: None,
            depth: DEFAULT_SOIL_DEPTH.to_string(),
            timeout_secs: DEFAULT_SOIL_TIMEOUT_SECS,
        }
    }
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load the config file, falling back to defaults when it is missing or invalid
    ///
    /// `explicit_path` wins over the platform default location.
    pub fn load_or_default(explicit_path: Option<&Path>) -> Self {
        let path = match explicit_path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => {
                    warn!("Could not determine config directory, using defaults");
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Resolve soil provider settings (ENV → TOML → default for the key)
    pub fn soil_api_config(&self) -> SoilApiConfig {
        let defaults = SoilApiConfig::default();
        SoilApiConfig {
            base_url: self
                .soil_api
                .base_url
                .clone()
                .unwrap_or(defaults.base_url),
            api_key: resolve_soil_api_key(self),
            depth: self.soil_api.depth.clone().unwrap_or(defaults.depth),
            timeout_secs: match self.soil_api.timeout_secs {
                Some(0) => {
                    warn!(
                        "soil_api.timeout_secs = 0 would fail every lookup, using {}s",
                        defaults.timeout_secs
                    );
                    defaults.timeout_secs
                }
                Some(secs) => secs,
                None => defaults.timeout_secs,
            },
        }
    }
}

/// Resolve the soil provider API key
///
/// **Priority:** ENV → TOML. Blank values are ignored.
pub fn resolve_soil_api_key(toml_config: &TomlConfig) -> Option<String> {
    let env_key = std::env::var(SOIL_API_KEY_ENV).ok();
    let toml_key = toml_config.soil_api.api_key.clone();

    if let (Some(env), Some(toml)) = (&env_key, &toml_key) {
        if is_valid_key(env) && is_valid_key(toml) {
            warn!("Soil API key found in environment and TOML. Using environment.");
        }
    }

    if let Some(key) = env_key.filter(|k| is_valid_key(k)) {
        info!("Soil API key loaded from environment variable");
        return Some(key);
    }

    if let Some(key) = toml_key.filter(|k| is_valid_key(k)) {
        info!("Soil API key loaded from TOML config");
        return Some(key);
    }

    None
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Root folder resolution: CLI → ENV → TOML → OS default
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.root_folder {
        return PathBuf::from(path);
    }

    default_root_folder()
}

/// Create the root folder if needed and return the database path inside it
pub fn ensure_root_folder(root_folder: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root_folder).map_err(|e| {
        Error::Config(format!(
            "Cannot create root folder {}: {}",
            root_folder.display(),
            e
        ))
    })?;
    Ok(root_folder.join(DATABASE_FILE_NAME))
}

/// Platform config file location: `<config dir>/treematch/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("treematch").join("config.toml"))
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("treematch"))
        .unwrap_or_else(|| PathBuf::from("./treematch_data"))
}
