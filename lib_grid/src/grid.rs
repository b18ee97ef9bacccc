use std::mem;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::codec::{ImageCodec, StandardCodec};
use crate::color::Color;
use crate::error::GridError;
use crate::notify::{Change, Invalidation, ListenerId, Listeners};
use crate::raster::Raster;

/// Presents a [`Raster`] as a grid of rows and columns.
///
/// Rows map to the raster's y axis and columns to its x axis. Every mutation
/// goes through the grid so that listeners and the pending [`Invalidation`]
/// see it. Replacing the raster (new, open, resize) is reported as
/// [`Change::Full`]; writing single cells is reported per cell.
pub struct GridAdapter<C: ImageCodec = StandardCodec> {
    raster: Option<Raster>,
    file: Option<PathBuf>,
    codec: C,
    listeners: Listeners,
    pending: Invalidation,
}

impl Default for GridAdapter<StandardCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl GridAdapter<StandardCodec> {
    pub fn new() -> Self {
        Self::with_codec(StandardCodec)
    }
}

impl<C: ImageCodec> GridAdapter<C> {
    pub fn with_codec(codec: C) -> Self {
        Self {
            raster: None,
            file: None,
            codec,
            listeners: Listeners::new(),
            pending: Invalidation::default(),
        }
    }

    pub fn row_count(&self) -> u32 {
        self.raster.as_ref().map_or(0, Raster::height)
    }

    pub fn column_count(&self) -> u32 {
        self.raster.as_ref().map_or(0, Raster::width)
    }

    /// `(columns, rows)`, i.e. the raster's width and height.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.column_count(), self.row_count())
    }

    pub fn has_raster(&self) -> bool {
        self.raster.is_some()
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(Change) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Drains the changes recorded since the last call.
    pub fn take_invalidation(&mut self) -> Invalidation {
        mem::take(&mut self.pending)
    }

    fn notify(&mut self, change: Change) {
        self.pending.record(change);
        self.listeners.emit(change);
    }

    fn replace_raster(&mut self, raster: Raster) {
        self.raster = Some(raster);
        self.notify(Change::Full);
    }

    fn check_bounds(&self, row: u32, col: u32) -> Result<(), GridError> {
        let (cols, rows) = self.dimensions();
        if row >= rows || col >= cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        Ok(())
    }

    pub fn cell_color(&self, row: u32, col: u32) -> Result<Color, GridError> {
        self.check_bounds(row, col)?;
        self.raster
            .as_ref()
            .and_then(|raster| raster.pixel(col, row))
            .ok_or(GridError::NoRaster)
    }

    /// Replaces the image with a `width` x `height` one filled with `fill`.
    ///
    /// Fails with [`GridError::TooLarge`] when the image can't be allocated;
    /// the current image is kept in that case.
    pub fn set_raster(&mut self, width: u32, height: u32, fill: Color) -> Result<(), GridError> {
        let raster = Raster::new(width, height, fill).map_err(|e| {
            error!("New image failed: {}", e);
            e
        })?;
        info!("New {}x{} image filled with {}", width, height, fill);
        self.replace_raster(raster);
        Ok(())
    }

    /// Opens `path`. On failure the current image and path are kept.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), GridError> {
        let path = path.as_ref();
        let raster = self.codec.read(path).map_err(|e| {
            error!("Failed to open {:?}: {}", path, e);
            e
        })?;

        self.file = Some(path.to_path_buf());
        self.replace_raster(raster);
        Ok(())
    }

    /// Writes the image to `path`, or to the stored path when `path` is `None`.
    ///
    /// A given path is stored only once the write succeeded. Returns the path
    /// that was written.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf, GridError> {
        let raster = self.raster.as_ref().ok_or_else(|| {
            warn!("Save requested with no image loaded");
            GridError::NoRaster
        })?;

        let target = path
            .map(Path::to_path_buf)
            .or_else(|| self.file.clone())
            .ok_or(GridError::NoPath)?;

        self.codec.write(raster, &target).map_err(|e| {
            error!("Failed to save {:?}: {}", target, e);
            e
        })?;

        self.file = Some(target.clone());
        Ok(target)
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<PathBuf, GridError> {
        self.save(Some(path.as_ref()))
    }

    /// Replaces the image with a nearest-neighbour resample at the new size.
    ///
    /// Fails with [`GridError::NoRaster`] when nothing is loaded; callers
    /// create an image with [`GridAdapter::set_raster`] first.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), GridError> {
        let raster = self.raster.as_ref().ok_or(GridError::NoRaster)?;
        info!(
            "Resizing {}x{} -> {}x{}",
            raster.width(),
            raster.height(),
            width,
            height
        );
        let resized = raster.resized(width, height)?;
        self.replace_raster(resized);
        Ok(())
    }

    pub fn set_cell_color(&mut self, row: u32, col: u32, color: Color) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        if let Some(raster) = self.raster.as_mut() {
            raster.set_pixel(col, row, color);
        }
        self.notify(Change::Cell { row, col });
        Ok(())
    }

    /// Sets every `(row, col)` in `cells` to `color`.
    ///
    /// All cells are checked before any is written, so an out-of-bounds entry
    /// leaves the image untouched.
    pub fn colorize<I>(&mut self, cells: I, color: Color) -> Result<usize, GridError>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let cells: Vec<(u32, u32)> = cells.into_iter().collect();
        for &(row, col) in &cells {
            self.check_bounds(row, col)?;
        }

        for &(row, col) in &cells {
            self.set_cell_color(row, col, color)?;
        }
        debug!("Colorized {} cells with {}", cells.len(), color);
        Ok(cells.len())
    }
}
