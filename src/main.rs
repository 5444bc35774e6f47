mod app;
mod assets;
mod audio;
mod components;
mod config;
mod dashboard;
mod error;
mod graph;
mod layout;
mod theme;
mod view;
mod weather;

use anyhow::Context;
use app::{Flags, WeatherApp};
use assets::AssetSet;
use config::Config;
use iced::{window, Application, Settings, Size};
use weather::WeatherClient;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,weather_dashboard=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    if let Err(err) = run() {
        tracing::error!("{err:#}");
        return Err(err);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Everything fallible happens before the window exists.
    let config = Config::load().context("failed to load configuration")?;
    let assets = AssetSet::load(&config.assets_dir).with_context(|| {
        format!("failed to load assets from {}", config.assets_dir.display())
    })?;
    let client = WeatherClient::new(&config).context("failed to build HTTP client")?;
    let audio = audio::default_backend();

    tracing::info!("Starting weather dashboard");
    let settings = Settings {
        window: window::Settings {
            size: Size::new(config.window_width, config.window_height),
            exit_on_close_request: false,
            ..window::Settings::default()
        },
        ..Settings::with_flags(Flags {
            client,
            assets,
            audio,
            window_width: config.window_width as u32,
        })
    };

    WeatherApp::run(settings).map_err(|e| anyhow::anyhow!("window event loop failed: {e}"))
}
