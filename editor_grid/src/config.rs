use lib_grid::Color;

use crate::palette::Swatch;

/// Start-up settings for the editor window.
#[derive(Clone, Debug)]
pub struct EditorConfig {
    pub window_title: String,
    /// Size used by "New" and shown in the size controls before anything is loaded.
    pub default_size: (u32, u32),
    pub new_image_fill: Color,
    /// Edge length of one grid cell on screen, in points.
    pub cell_size: f32,
    pub max_dimension: u32,
    pub swatches: Vec<Swatch>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_title: "Pixel editor".to_owned(),
            default_size: (16, 16),
            new_image_fill: Color::BLUE,
            cell_size: 25.0,
            max_dimension: 1_000_000,
            swatches: vec![
                Swatch::new("Set to empty", Color::WHITE),
                Swatch::new("Set to fluid", Color::BLUE),
                Swatch::new("Set to obstacle", Color::BLACK),
            ],
        }
    }
}
