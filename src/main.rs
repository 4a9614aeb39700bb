use std::path::PathBuf;

use eframe::egui;
use sismo_viewer::app::SismoApp;
use sismo_viewer::config::ViewerConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let cli_data_file = std::env::args_os().nth(1).map(PathBuf::from);
    let config = ViewerConfig::from_env(cli_data_file.clone()).unwrap_or_else(|e| {
        log::error!("Falling back to default config: {e:#}");
        ViewerConfig {
            data_file: cli_data_file,
            ..ViewerConfig::default()
        }
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sismo Viewer – Earthquake Catalog",
        options,
        Box::new(|_cc| Ok(Box::new(SismoApp::new(config)))),
    )
}
