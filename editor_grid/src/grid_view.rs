use std::ops::Range;

use eframe::egui::{self, Color32, Sense, Stroke};
use egui_extras::{Column, TableBuilder};
use lib_grid::GridAdapter;

use crate::palette::to_color32;
use crate::selection::{ClickMode, Selection};

const CELL_SPACING: f32 = 1.0;

const SELECTED_STROKE: Stroke = Stroke {
    width: 2.0,
    color: Color32::YELLOW,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellClick {
    pub row: u32,
    pub col: u32,
    pub mode: ClickMode,
}

#[derive(Default, Clone, Copy, Debug)]
pub struct GridViewResponse {
    pub clicked: Option<CellClick>,
    pub hovered: Option<(u32, u32)>,
}

/// Columns of a `cols` wide grid that intersect the horizontal span
/// `min_x..max_x`, given each column takes `stride` points.
fn visible_columns(cols: u32, stride: f32, min_x: f32, max_x: f32) -> Range<u32> {
    let first = (min_x.max(0.0) / stride).floor() as u32;
    let last = (max_x.max(0.0) / stride).ceil() as u32 + 1;
    first.min(cols)..last.min(cols)
}

/// Width of a spacer standing in for `count` hidden columns.
fn spacer_width(count: u32, stride: f32) -> Option<f32> {
    // The table adds one spacing gap after the spacer itself.
    (count > 0).then(|| count as f32 * stride - CELL_SPACING)
}

fn click_mode(modifiers: egui::Modifiers) -> ClickMode {
    if modifiers.shift {
        ClickMode::Extend
    } else if modifiers.command {
        ClickMode::Toggle
    } else {
        ClickMode::Replace
    }
}

/// Draws the grid as a table of colored squares, one per pixel.
///
/// Only the rows and columns inside the scroll viewport are laid out.
pub fn show_grid(
    ui: &mut egui::Ui,
    grid: &GridAdapter,
    selection: &Selection,
    cell_size: f32,
) -> GridViewResponse {
    let rows = grid.row_count();
    let cols = grid.column_count();
    let mut response = GridViewResponse::default();

    if rows == 0 || cols == 0 {
        ui.centered_and_justified(|ui| {
            ui.label("No image. Use File → New or File → Open.");
        });
        return response;
    }

    let modifiers = ui.input(|i| i.modifiers);

    egui::ScrollArea::horizontal().show_viewport(ui, |ui, viewport| {
        ui.spacing_mut().item_spacing = egui::vec2(CELL_SPACING, CELL_SPACING);

        let stride = cell_size + CELL_SPACING;
        let visible = visible_columns(cols, stride, viewport.min.x, viewport.max.x);
        // Columns left and right of the viewport collapse into one spacer
        // column each, so only visible cells are laid out.
        let leading = spacer_width(visible.start, stride);
        let trailing = spacer_width(cols - visible.end, stride);

        let mut table = TableBuilder::new(ui)
            .striped(false)
            .resizable(false)
            .vscroll(true);
        if let Some(width) = leading {
            table = table.column(Column::exact(width));
        }
        table = table.columns(Column::exact(cell_size), visible.len());
        if let Some(width) = trailing {
            table = table.column(Column::exact(width));
        }

        table.body(|body| {
            body.rows(cell_size, rows as usize, |mut table_row| {
                let row = table_row.index() as u32;
                if leading.is_some() {
                    table_row.col(|_| {});
                }
                for col in visible.clone() {
                    table_row.col(|ui| {
                        let rect = ui.max_rect();
                        let cell = ui.allocate_rect(rect, Sense::click());
                        let color = grid.cell_color(row, col).unwrap_or_default();

                        ui.painter().rect_filled(rect, 0.0, to_color32(color));
                        if selection.contains(row, col) {
                            ui.painter()
                                .rect_stroke(rect.shrink(1.0), 0.0, SELECTED_STROKE);
                        }

                        if cell.hovered() {
                            response.hovered = Some((row, col));
                        }
                        if cell.clicked() {
                            response.clicked = Some(CellClick {
                                row,
                                col,
                                mode: click_mode(modifiers),
                            });
                        }
                    });
                }
                if trailing.is_some() {
                    table_row.col(|_| {});
                }
            });
        });
    });

    response
}
