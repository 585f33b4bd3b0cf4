use std::sync::Arc;

use eframe::egui;
use log::{
    error,
    info,
};
use tangocho::{
    gui::ReviewApp,
    persistence::{
        load_json_or_default,
        Settings,
        BACKEND_URL_ENV,
    },
    remote::HttpRemote,
};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = load_json_or_default::<Settings>(Settings::FILE_NAME)
        .with_backend_override(std::env::var(BACKEND_URL_ENV).ok());

    let remote = match HttpRemote::new(&settings.backend_url, settings.request_timeout()) {
        Ok(remote) => remote,
        Err(e) => {
            error!("Failed to set up the backend client: {}", e);
            std::process::exit(1);
        }
    };
    info!("Backend: {}", remote.base_url());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Tangocho")
            .with_inner_size([1100.0, 760.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Tangocho",
        options,
        Box::new(move |cc| Ok(Box::new(ReviewApp::new(cc, settings, Arc::new(remote))))),
    )
}
