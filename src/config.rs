use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "weather-dashboard.toml";
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const DEFAULT_API_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub assets_dir: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
}

/// On-disk shape of the config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api_key: Option<String>,
    api_url: Option<String>,
    assets_dir: Option<PathBuf>,
    window_width: Option<f32>,
    window_height: Option<f32>,
}

impl Config {
    /// Loads `weather-dashboard.toml` from the working directory if present,
    /// then lets `OPENWEATHER_API_KEY` override the key.
    pub fn load() -> Result<Self, ConfigError> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        Self::load_from(Path::new(CONFIG_FILE), env_key)
    }

    fn load_from(path: &Path, env_key: Option<String>) -> Result<Self, ConfigError> {
        let file = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!("Read config from {}", path.display());
            toml::from_str::<ConfigFile>(&raw)?
        } else {
            ConfigFile::default()
        };

        let api_key = env_key
            .or(file.api_key)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            api_url: file.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            assets_dir: file.assets_dir.unwrap_or_else(|| PathBuf::from("assets")),
            window_width: file.window_width.unwrap_or(820.0),
            window_height: file.window_height.unwrap_or(700.0),
        })
    }
}
