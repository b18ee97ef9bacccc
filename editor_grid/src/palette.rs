use eframe::egui::Color32;
use lib_grid::Color;

pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), color.a())
}

pub fn from_color32(color: Color32) -> Color {
    Color(color.to_srgba_unmultiplied())
}

/// A named color button in the side panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Swatch {
    pub label: String,
    pub color: Color,
}

impl Swatch {
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

pub struct Palette {
    swatches: Vec<Swatch>,
    custom_color: Color,
}

impl Palette {
    pub fn new(swatches: Vec<Swatch>) -> Self {
        Self {
            swatches,
            custom_color: Color::rgb(255, 0, 0),
        }
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn custom_color(&self) -> Color {
        self.custom_color
    }

    pub fn set_custom_color(&mut self, color: Color) {
        self.custom_color = color;
    }
}
