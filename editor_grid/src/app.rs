use std::path::PathBuf;

use eframe::egui::{self, Key, KeyboardShortcut, Layout, Modifiers, Vec2};
use eframe::Frame;
use lib_grid::{Color, GridAdapter, GridError};
use log::{error, info};

use crate::config::EditorConfig;
use crate::filemanager::{self, FileError};
use crate::grid_view::{self, GridViewResponse};
use crate::palette::{from_color32, to_color32, Palette};
use crate::selection::Selection;

const NEW_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::N);
const OPEN_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
const SAVE_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
const SAVE_AS_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(
    Modifiers {
        alt: false,
        ctrl: false,
        shift: true,
        mac_cmd: false,
        command: true,
    },
    Key::S,
);
const QUIT_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Q);

/// Resizes `grid` to `size`, creating an image filled with `fill` first when
/// none is loaded.
pub fn apply_size(
    grid: &mut GridAdapter,
    (width, height): (u32, u32),
    fill: Color,
) -> Result<(), GridError> {
    if !grid.has_raster() {
        grid.set_raster(width, height, fill)?;
    }
    grid.resize(width, height)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Quit,
}

pub struct PixelEditor {
    grid: GridAdapter,
    config: EditorConfig,
    palette: Palette,
    selection: Selection,
    /// Values in the "x Size" / "y Size" controls.
    size: (u32, u32),
    current_dir: PathBuf,
    save_enabled: bool,
    status: String,
    hovered: Option<(u32, u32)>,
}

impl PixelEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            grid: GridAdapter::new(),
            palette: Palette::new(config.swatches.clone()),
            selection: Selection::new(),
            size: config.default_size,
            current_dir: filemanager::start_dir(),
            save_enabled: false,
            status: String::from("Ready"),
            hovered: None,
            config,
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    fn report_error(&mut self, action: &str, err: FileError) {
        match err {
            FileError::DialogCanceled => self.set_status(format!("{} canceled", action)),
            FileError::Grid(e) => self.report_grid_error(action, e),
        }
    }

    fn remember_dir(&mut self, path: &std::path::Path) {
        if let Some(dir) = filemanager::parent_dir(path) {
            self.current_dir = dir;
        }
    }

    fn report_grid_error(&mut self, action: &str, err: GridError) {
        error!("{} failed: {}", action, err);
        self.set_status(format!("{} failed: {}", action, err));
    }

    fn new_image(&mut self) {
        let (width, height) = self.size;
        match self
            .grid
            .set_raster(width, height, self.config.new_image_fill)
        {
            Ok(()) => self.set_status(format!("New {}x{} picture", width, height)),
            Err(e) => self.report_grid_error("New", e),
        }
    }

    fn open_image(&mut self) {
        match filemanager::open_image(&mut self.grid, &self.current_dir) {
            Ok(path) => {
                self.remember_dir(&path);
                self.set_status(format!("Opened {}", path.display()));
            }
            Err(e) => self.report_error("Open", e),
        }
    }

    fn save_image(&mut self, ask_for_path: bool) {
        let result = if ask_for_path {
            filemanager::save_image_as(&mut self.grid, &self.current_dir)
        } else {
            filemanager::save_image(&mut self.grid, &self.current_dir)
        };

        match result {
            Ok(path) => {
                self.remember_dir(&path);
                self.set_status(format!("Saved {}", path.display()));
            }
            Err(e) => self.report_error("Save", e),
        }
    }

    fn apply_size(&mut self) {
        let (width, height) = self.size;
        match apply_size(&mut self.grid, self.size, self.config.new_image_fill) {
            Ok(()) => self.set_status(format!("Resized to {}x{}", width, height)),
            Err(e) => self.report_grid_error("Resize", e),
        }
    }

    fn colorize_selection(&mut self, color: Color) {
        if self.selection.is_empty() {
            self.set_status("Nothing selected");
            return;
        }

        match self.grid.colorize(self.selection.cells(), color) {
            Ok(count) => self.set_status(format!("Set {} cells to {}", count, color)),
            Err(e) => self.report_grid_error("Colorize", e),
        }
    }

    fn run(&mut self, ctx: &egui::Context, command: Command) {
        match command {
            Command::New => self.new_image(),
            Command::Open => self.open_image(),
            Command::Save if self.save_enabled => self.save_image(false),
            Command::SaveAs if self.save_enabled => self.save_image(true),
            Command::Save | Command::SaveAs => {}
            Command::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Save as goes first, otherwise Ctrl+S would also match Ctrl+Shift+S.
        let bindings = [
            (SAVE_AS_SHORTCUT, Command::SaveAs),
            (SAVE_SHORTCUT, Command::Save),
            (NEW_SHORTCUT, Command::New),
            (OPEN_SHORTCUT, Command::Open),
            (QUIT_SHORTCUT, Command::Quit),
        ];

        let triggered = ctx.input_mut(|input| {
            bindings
                .iter()
                .find(|(shortcut, _)| input.consume_shortcut(shortcut))
                .map(|&(_, command)| command)
        });

        if let Some(command) = triggered {
            self.run(ctx, command);
        }
    }

    /// Reacts to what the grid reported since the last frame.
    fn sync_with_grid(&mut self, ctx: &egui::Context) {
        let invalidation = self.grid.take_invalidation();
        if invalidation.is_clean() {
            return;
        }

        if invalidation.is_full() {
            let (width, height) = self.grid.dimensions();
            self.size = (width, height);
            self.selection.retain_within(height, width);
            self.save_enabled = self.grid.has_raster();
            info!("Grid replaced: {}x{}", width, height);
        }
        ctx.request_repaint();
    }

    fn draw_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let mut command = None;
                    let item = |label: &str, shortcut: &KeyboardShortcut| {
                        egui::Button::new(label).shortcut_text(ctx.format_shortcut(shortcut))
                    };

                    if ui.add(item("New", &NEW_SHORTCUT)).clicked() {
                        command = Some(Command::New);
                    }
                    if ui.add(item("Open", &OPEN_SHORTCUT)).clicked() {
                        command = Some(Command::Open);
                    }
                    ui.separator();
                    if ui
                        .add_enabled(self.save_enabled, item("Save", &SAVE_SHORTCUT))
                        .clicked()
                    {
                        command = Some(Command::Save);
                    }
                    if ui
                        .add_enabled(self.save_enabled, item("Save as...", &SAVE_AS_SHORTCUT))
                        .clicked()
                    {
                        command = Some(Command::SaveAs);
                    }
                    ui.separator();
                    if ui.add(item("Exit", &QUIT_SHORTCUT)).clicked() {
                        command = Some(Command::Quit);
                    }

                    if let Some(command) = command {
                        ui.close_menu();
                        self.run(ctx, command);
                    }
                });
            });
        });
    }

    fn draw_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some((row, col)) = self.hovered {
                        if let Ok(color) = self.grid.cell_color(row, col) {
                            ui.label(format!("row {}, col {}: {}", row, col, color));
                        }
                    }
                    if !self.selection.is_empty() {
                        ui.label(format!("{} selected", self.selection.len()));
                        ui.separator();
                    }
                });
            });
        });
    }

    fn draw_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("tool_panel")
            .resizable(false)
            .min_width(200.0)
            .max_width(200.0)
            .show(ctx, |ui| {
                ui.heading("Size");
                ui.add_space(8.0);

                let max = self.config.max_dimension;
                egui::Grid::new("size_controls")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("x Size");
                        ui.add(egui::DragValue::new(&mut self.size.0).range(0..=max));
                        ui.end_row();

                        ui.label("y Size");
                        ui.add(egui::DragValue::new(&mut self.size.1).range(0..=max));
                        ui.end_row();
                    });

                if ui.button("Apply").clicked() {
                    self.apply_size();
                }

                ui.add_space(16.0);
                ui.heading("Colors");
                ui.add_space(8.0);

                let button_size = Vec2::new(ui.available_width(), 30.0);
                let mut chosen = None;
                for swatch in self.palette.swatches() {
                    let button = egui::Button::new(&swatch.label)
                        .fill(to_color32(swatch.color))
                        .min_size(button_size);
                    if ui.add(button).clicked() {
                        chosen = Some(swatch.color);
                    }
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let mut picker_color = to_color32(self.palette.custom_color());
                    ui.color_edit_button_srgba(&mut picker_color);
                    self.palette.set_custom_color(from_color32(picker_color));

                    if ui.button("Set to custom").clicked() {
                        chosen = Some(self.palette.custom_color());
                    }
                });

                if let Some(color) = chosen {
                    self.colorize_selection(color);
                }

                ui.add_space(16.0);
                ui.heading("Selection");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Select all").clicked() {
                        self.selection
                            .select_all(self.grid.row_count(), self.grid.column_count());
                    }
                    if ui.button("Clear").clicked() {
                        self.selection.clear();
                    }
                });

                // Instructions
                ui.add_space(16.0);
                ui.label("Controls:");
                ui.label("• Click to select a cell");
                ui.label("• Ctrl + click to toggle");
                ui.label("• Shift + click to select a block");
            });
    }

    fn draw_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let GridViewResponse { clicked, hovered } =
                grid_view::show_grid(ui, &self.grid, &self.selection, self.config.cell_size);

            self.hovered = hovered;
            if let Some(click) = clicked {
                self.selection.click(click.row, click.col, click.mode);
            }
        });
    }
}

impl eframe::App for PixelEditor {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.handle_shortcuts(ctx);
        self.draw_menu_bar(ctx);
        self.draw_status_bar(ctx);
        self.draw_side_panel(ctx);
        self.draw_central_panel(ctx);
        self.sync_with_grid(ctx);
    }
}
