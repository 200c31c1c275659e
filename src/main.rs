// src/main.rs
use anyhow::Result;
use eframe::egui;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use postdeck::api::DeskClient;
use postdeck::net::RequestManager;
use postdeck::{AppState, DeskApp, Settings};

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("falling back to default settings: {e}");
            Settings::default()
        }
    };
    if let Err(e) = postdeck::settings::write_template_if_missing() {
        warn!("could not write settings template: {e}");
    }

    let client = DeskClient::new(&settings.server_url, settings.request_timeout_secs)?;
    let request_manager = RequestManager::new(client)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1080.0, 760.0])
            .with_title("Postdeck"),
        ..Default::default()
    };

    eframe::run_native(
        "Postdeck",
        options,
        Box::new(move |cc| Box::new(DeskApp::new(AppState::new(request_manager), &cc.egui_ctx))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
