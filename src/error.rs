use std::path::PathBuf;

/// Why a single city lookup failed. Never shown to the user directly: every
/// variant surfaces as "<city> not found!", but the distinction is logged.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("weather API returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Parse(String),
}

/// Startup failure while loading the themed asset set.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("missing asset file: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to decode image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to decode sound {}: {source}", .path.display())]
    Sound {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no API key configured (set OPENWEATHER_API_KEY or api_key in the config file)")]
    MissingApiKey,
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(String),
    #[error("failed to decode sound clip: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("failed to start playback: {0}")]
    Play(#[from] rodio::PlayError),
}
