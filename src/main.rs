mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load().context("loading dashboard settings")?;

    // The dashboard cannot run without its table, so a bad file stops here.
    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    log::info!(
        "Loaded {} records ({} platforms, {} genres)",
        dataset.len(),
        dataset.platforms.len(),
        dataset.genres.len()
    );

    let mut state = AppState::new(config.initial_year);
    state.set_dataset(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Video Game Sales Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
