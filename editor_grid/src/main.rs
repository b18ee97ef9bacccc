mod app;
mod config;
mod filemanager;
mod grid_view;
mod palette;
mod selection;

use app::PixelEditor;
use config::EditorConfig;

fn main() -> Result<(), eframe::Error> {
    lib_grid::init_logging();

    let config = EditorConfig::default();
    let title = config.window_title.clone();
    let app = PixelEditor::new(config);
    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        &title,
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )?;

    Ok(())
}
