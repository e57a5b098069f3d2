mod app;
mod config;
mod dicom;
mod error;
mod generation;
mod grayscale;
mod launch;
mod renderer;
mod series;
mod viewport;
mod worker;
mod worklist;

use clap::Parser;
use log::info;

use crate::config::{settings_file_path, ViewerConfig};
use crate::launch::LaunchArgs;

fn main() -> eframe::Result<()> {
    let args = LaunchArgs::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let settings_path = settings_file_path();
    let mut config = ViewerConfig::load_or_default(settings_path.as_deref());
    args.apply_overrides(&mut config);
    info!("Using backend {}", config.backend.base_url);

    let initial_request = args.launch_request();

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(app::window_title())
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([640.0, 480.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        app::APP_TITLE,
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(app::DicomViewerApp::new(
                cc.egui_ctx.clone(),
                config,
                settings_path,
                initial_request,
            )))
        }),
    )
}
