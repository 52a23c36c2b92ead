mod api;
mod app;
mod config;
mod download;
mod error;
mod playback;
mod task;
mod translation;
mod upload;
mod utils;

#[cfg(test)]
mod test_support;

use app::EchoSynthApp;
use config::Config;
use eframe::CreationContext;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("echosynth=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!("Using processing API at {}", config.api_base_url);

    let client = match api::ApiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    let app = EchoSynthApp::new(runtime, client);
    if let Err(e) = eframe::run_native(
        "EchoSynth",
        options,
        Box::new(|_cc: &CreationContext| Box::new(app)),
    ) {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
