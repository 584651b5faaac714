//! Configuration loading and config file resolution

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::validation::ValidationRules;
use crate::{Error, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "RECIPEBOX_CONFIG";

/// Categories offered when the config does not list any
pub const DEFAULT_CATEGORIES: [&str; 5] = ["Dinner", "Dessert", "Vegan", "Breakfast", "Soup"];

/// Server configuration (TOML)
///
/// Every field has a default so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Where uploaded images are written
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Accepted recipe categories; empty accepts any
    pub categories: Vec<String>,
    /// Load the sample recipes at startup
    pub seed_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 5000,
            uploads_dir: PathBuf::from("uploads"),
            max_upload_bytes: 5 * 1024 * 1024,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            seed_demo_data: false,
        }
    }
}

impl ServerConfig {
    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules::with_categories(self.categories.clone())
    }

    /// Parse from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Config file resolution, highest priority first:
/// 1. Command-line argument
/// 2. `RECIPEBOX_CONFIG` environment variable
/// 3. `<user config dir>/recipebox/config.toml`, if it exists
///
/// Returns None when nothing applies (compiled defaults are used).
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|d| d.join("recipebox").join("config.toml"))
        .filter(|p| p.exists())
}

/// Load configuration with graceful degradation
///
/// A missing file is not fatal: log a warning and use defaults. A file that
/// exists but does not parse is an error.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig> {
    let Some(path) = path else {
        info!("No config file found, using defaults");
        return Ok(ServerConfig::default());
    };

    match std::fs::read_to_string(path) {
        Ok(content) => {
            let config = ServerConfig::from_toml_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Config file {} not found, using defaults", path.display());
            Ok(ServerConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}
