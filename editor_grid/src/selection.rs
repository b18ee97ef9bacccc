use std::collections::BTreeSet;

/// How a click on a cell changes the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickMode {
    /// Select only the clicked cell.
    Replace,
    /// Flip the clicked cell in or out of the selection.
    Toggle,
    /// Select the rectangle between the anchor and the clicked cell.
    Extend,
}

/// Selected grid cells, stored as `(row, col)`.
#[derive(Default, Debug)]
pub struct Selection {
    cells: BTreeSet<(u32, u32)>,
    anchor: Option<(u32, u32)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.cells.contains(&(row, col))
    }

    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.cells.iter().copied()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.anchor = None;
    }

    pub fn click(&mut self, row: u32, col: u32, mode: ClickMode) {
        match (mode, self.anchor) {
            (ClickMode::Extend, Some((anchor_row, anchor_col))) => {
                self.cells.clear();
                for r in anchor_row.min(row)..=anchor_row.max(row) {
                    for c in anchor_col.min(col)..=anchor_col.max(col) {
                        self.cells.insert((r, c));
                    }
                }
                // Anchor stays put so further shift-clicks pivot around it.
                return;
            }
            (ClickMode::Toggle, _) => {
                if !self.cells.remove(&(row, col)) {
                    self.cells.insert((row, col));
                }
            }
            (ClickMode::Replace, _) | (ClickMode::Extend, None) => {
                self.cells.clear();
                self.cells.insert((row, col));
            }
        }
        self.anchor = Some((row, col));
    }

    pub fn select_all(&mut self, rows: u32, cols: u32) {
        self.cells = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .collect();
        self.anchor = None;
    }

    /// Drops cells that fall outside a `rows` x `cols` grid.
    pub fn retain_within(&mut self, rows: u32, cols: u32) {
        self.cells.retain(|&(r, c)| r < rows && c < cols);
        if matches!(self.anchor, Some((r, c)) if r >= rows || c >= cols) {
            self.anchor = None;
        }
    }
}
