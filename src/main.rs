mod app;
mod color;
mod state;
mod ui;

use airport_explorer::config::ExplorerConfig;
use app::AirportExplorerApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let (config, config_error) = match ExplorerConfig::discover() {
        Ok(config) => (config, None),
        Err(e) => {
            log::warn!("Falling back to default config: {e}");
            (ExplorerConfig::default(), Some(e))
        }
    };

    let mut state = AppState::new(config);
    let data_path = state.config.data_path.clone();
    state.load_path(&data_path);
    state.config_warning = config_error.map(|e| format!("Config error, using defaults: {e}"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "New England Airports Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(AirportExplorerApp::new(state)))),
    )
}
