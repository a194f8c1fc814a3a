mod app;
mod catalog;
mod cli;
mod color;
mod data;
mod reactive;
mod state;
mod ui;
mod views;

use anyhow::Context;
use app::ReadCountApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let catalog = cli.load_catalog()?;
    if catalog.is_empty() {
        log::warn!("no datasets in the catalog; pass --catalog or --prefix");
    }
    let state = AppState::new(Box::new(catalog), Some(cli.dataset.clone()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Read Counts – Sample Set Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(ReadCountApp::new(state)))),
    )
    // eframe::Error is not Send + Sync on every backend, so only its message
    // can be carried into anyhow.
    .map_err(|e| anyhow::anyhow!(e.to_string()))
    .context("running the viewer")
}
