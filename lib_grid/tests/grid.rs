mod common;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use common::{gradient_4x2, RED};
use lib_grid::{Change, Color, GridAdapter, GridError, ImageCodec, Raster};

fn recorder(grid: &mut GridAdapter) -> Rc<RefCell<Vec<Change>>> {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    grid.subscribe(move |change| sink.borrow_mut().push(change));
    changes
}

#[test]
fn test_empty_grid_has_no_cells() {
    let grid = GridAdapter::new();

    assert!(!grid.has_raster());
    assert_eq!(grid.row_count(), 0);
    assert_eq!(grid.column_count(), 0);
    assert!(matches!(
        grid.cell_color(0, 0),
        Err(GridError::OutOfBounds { rows: 0, cols: 0, .. })
    ));
}

#[test]
fn test_set_raster_reports_dimensions_and_fill() {
    for (width, height) in [(0, 0), (1, 1), (4, 3), (3, 4), (0, 5), (16, 1)] {
        let mut grid = GridAdapter::new();
        grid.set_raster(width, height, RED).unwrap();

        assert_eq!(grid.row_count(), height);
        assert_eq!(grid.column_count(), width);
        for row in 0..height {
            for col in 0..width {
                assert_eq!(grid.cell_color(row, col).unwrap(), RED);
            }
        }
    }
}

#[test]
fn test_set_raster_emits_full_invalidation() {
    let mut grid = GridAdapter::new();
    let changes = recorder(&mut grid);

    grid.set_raster(2, 2, Color::WHITE).unwrap();

    assert_eq!(*changes.borrow(), vec![Change::Full]);
    assert!(grid.take_invalidation().is_full());
}

#[test]
fn test_set_cell_color_changes_one_cell() {
    let mut grid = GridAdapter::new();
    grid.set_raster(4, 3, Color::WHITE).unwrap();
    grid.take_invalidation();
    let changes = recorder(&mut grid);

    grid.set_cell_color(1, 2, Color::BLACK).unwrap();

    assert_eq!(*changes.borrow(), vec![Change::Cell { row: 1, col: 2 }]);
    for row in 0..3 {
        for col in 0..4 {
            let expected = if (row, col) == (1, 2) {
                Color::BLACK
            } else {
                Color::WHITE
            };
            assert_eq!(grid.cell_color(row, col).unwrap(), expected);
        }
    }

    let invalidation = grid.take_invalidation();
    assert!(!invalidation.is_full());
    assert_eq!(invalidation.cells().collect::<Vec<_>>(), vec![(1, 2)]);
}

#[test]
fn test_cell_access_uses_row_then_column() {
    let mut grid = GridAdapter::new();
    grid.set_raster(4, 2, Color::WHITE).unwrap();

    grid.set_cell_color(1, 3, RED).unwrap();

    assert_eq!(grid.raster().unwrap().pixel(3, 1), Some(RED));
    assert!(grid.set_cell_color(3, 1, RED).is_err());
}

#[test]
fn test_set_cell_color_out_of_bounds() {
    let mut grid = GridAdapter::new();
    grid.set_raster(2, 2, Color::WHITE).unwrap();
    grid.take_invalidation();
    let changes = recorder(&mut grid);

    let result = grid.set_cell_color(2, 0, RED);

    assert!(matches!(
        result,
        Err(GridError::OutOfBounds { row: 2, col: 0, rows: 2, cols: 2 })
    ));
    assert!(changes.borrow().is_empty());
    assert!(grid.take_invalidation().is_clean());
}

#[test]
fn test_colorize_writes_every_cell() {
    let mut grid = GridAdapter::new();
    grid.set_raster(3, 3, Color::WHITE).unwrap();
    let changes = recorder(&mut grid);

    let written = grid
        .colorize([(0, 0), (1, 1), (2, 2)], Color::BLUE)
        .unwrap();

    assert_eq!(written, 3);
    assert_eq!(changes.borrow().len(), 3);
    assert_eq!(grid.cell_color(1, 1).unwrap(), Color::BLUE);
    assert_eq!(grid.cell_color(0, 1).unwrap(), Color::WHITE);
}

#[test]
fn test_colorize_rejects_before_writing() {
    let mut grid = GridAdapter::new();
    grid.set_raster(2, 2, Color::WHITE).unwrap();
    let before = grid.raster().cloned();

    let result = grid.colorize([(0, 0), (5, 5)], Color::BLACK);

    assert!(matches!(result, Err(GridError::OutOfBounds { .. })));
    assert_eq!(grid.raster().cloned(), before);
}

#[test]
fn test_invalidation_collapses() {
    let mut grid = GridAdapter::new();
    grid.set_raster(2, 2, Color::WHITE).unwrap();
    grid.set_cell_color(0, 0, RED).unwrap();
    grid.set_raster(3, 3, Color::WHITE).unwrap();
    grid.set_cell_color(1, 1, RED).unwrap();

    let invalidation = grid.take_invalidation();
    assert!(invalidation.is_full());
    assert_eq!(invalidation.cells().count(), 0);
    assert!(grid.take_invalidation().is_clean());

    grid.set_cell_color(0, 1, RED).unwrap();
    grid.set_cell_color(0, 1, Color::BLACK).unwrap();
    let invalidation = grid.take_invalidation();
    assert_eq!(invalidation.cells().collect::<Vec<_>>(), vec![(0, 1)]);
}

#[test]
fn test_unsubscribe_stops_callbacks() {
    let mut grid = GridAdapter::new();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = grid.subscribe(move |_| *sink.borrow_mut() += 1);

    grid.set_raster(1, 1, RED).unwrap();
    assert!(grid.unsubscribe(id));
    assert!(!grid.unsubscribe(id));
    grid.set_raster(1, 1, RED).unwrap();

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_resize_without_raster_fails() {
    let mut grid = GridAdapter::new();
    let changes = recorder(&mut grid);

    assert!(matches!(grid.resize(4, 4), Err(GridError::NoRaster)));
    assert!(!grid.has_raster());
    assert!(changes.borrow().is_empty());
}

#[test]
fn test_resize_replaces_raster() {
    let mut grid = GridAdapter::new();
    grid.set_raster(2, 2, Color::WHITE).unwrap();
    grid.set_cell_color(0, 0, RED).unwrap();
    grid.take_invalidation();
    let changes = recorder(&mut grid);

    grid.resize(4, 6).unwrap();

    assert_eq!(grid.column_count(), 4);
    assert_eq!(grid.row_count(), 6);
    assert_eq!(*changes.borrow(), vec![Change::Full]);
    // Top-left source pixel covers the top-left 2x3 block.
    assert_eq!(grid.cell_color(2, 1).unwrap(), RED);
    assert_eq!(grid.cell_color(3, 2).unwrap(), Color::WHITE);
}

#[test]
fn test_repeated_resize_is_identical() {
    let mut first = GridAdapter::new();
    let mut second = GridAdapter::new();
    for grid in [&mut first, &mut second] {
        grid.set_raster(4, 2, Color::WHITE).unwrap();
        grid.set_cell_color(1, 3, RED).unwrap();
        grid.resize(9, 5).unwrap();
    }

    assert_eq!(first.raster(), second.raster());

    let before = first.raster().cloned();
    first.resize(9, 5).unwrap();
    assert_eq!(first.raster().cloned(), before);
}

#[test]
fn test_save_without_raster_or_path() {
    let mut grid = GridAdapter::new();
    let changes = recorder(&mut grid);

    assert!(matches!(grid.save(None), Err(GridError::NoRaster)));
    assert!(!grid.has_raster());
    assert!(grid.file_path().is_none());
    assert!(changes.borrow().is_empty());
}

#[test]
fn test_save_with_raster_but_no_path() {
    let mut grid = GridAdapter::new();
    grid.set_raster(1, 1, RED).unwrap();

    assert!(matches!(grid.save(None), Err(GridError::NoPath)));
    assert!(grid.file_path().is_none());
}

#[test]
fn test_save_given_path_with_no_raster_keeps_path_unset() {
    let mut grid = GridAdapter::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never_written.png");

    assert!(matches!(grid.save(Some(path.as_path())), Err(GridError::NoRaster)));
    assert!(grid.file_path().is_none());
    assert!(!path.exists());
}

#[test]
fn test_load_missing_file_keeps_state() {
    let mut grid = GridAdapter::new();
    grid.set_raster(4, 3, Color::WHITE).unwrap();
    grid.take_invalidation();

    let dir = tempfile::tempdir().unwrap();
    let result = grid.load(dir.path().join("missing.png"));

    assert!(matches!(result, Err(GridError::Decode { .. })));
    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.column_count(), 4);
    assert!(grid.file_path().is_none());
    assert!(grid.take_invalidation().is_clean());
}

#[test]
fn test_load_invalid_file_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("garbage.png");
    std::fs::write(&file, b"definitely not a png").unwrap();
    let mut grid = GridAdapter::new();

    assert!(matches!(grid.load(&file), Err(GridError::Decode { .. })));
    assert!(!grid.has_raster());
}

#[test]
fn test_new_edit_save_load_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.png");

    let mut grid = GridAdapter::new();
    grid.set_raster(4, 3, Color::WHITE).unwrap();
    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.column_count(), 4);

    grid.set_cell_color(1, 2, Color::BLACK).unwrap();
    let written = grid.save(Some(file.as_path())).unwrap();
    assert_eq!(written, file);
    assert_eq!(grid.file_path(), Some(file.as_path()));

    let mut reloaded = GridAdapter::new();
    let changes = recorder(&mut reloaded);
    reloaded.load(&file).unwrap();

    assert_eq!(*changes.borrow(), vec![Change::Full]);
    assert_eq!(reloaded.row_count(), 3);
    assert_eq!(reloaded.column_count(), 4);
    assert_eq!(reloaded.file_path(), Some(file.as_path()));
    for row in 0..3 {
        for col in 0..4 {
            let expected = if (row, col) == (1, 2) {
                Color::BLACK
            } else {
                Color::WHITE
            };
            assert_eq!(reloaded.cell_color(row, col).unwrap(), expected);
        }
    }
}

#[test]
fn test_plain_save_reuses_stored_path() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("reuse.png");
    let mut grid = GridAdapter::new();
    grid.set_raster(2, 2, Color::WHITE).unwrap();
    grid.save_as(&file).unwrap();

    grid.set_cell_color(0, 0, RED).unwrap();
    assert_eq!(grid.save(None).unwrap(), file);

    let mut reloaded = GridAdapter::new();
    reloaded.load(&file).unwrap();
    assert_eq!(reloaded.cell_color(0, 0).unwrap(), RED);
}

#[test]
fn test_failed_save_keeps_previous_path() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.png");
    let mut grid = GridAdapter::new();
    grid.set_raster(2, 2, Color::WHITE).unwrap();
    grid.save(Some(good.as_path())).unwrap();

    let bad = dir.path().join("no_such_dir").join("bad.png");
    let result = grid.save(Some(bad.as_path()));

    assert!(matches!(result, Err(GridError::Write { .. })));
    assert_eq!(grid.file_path(), Some(good.as_path()));
}

#[test]
fn test_save_unknown_extension_is_encode_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("image.unknown");
    let mut grid = GridAdapter::new();
    grid.set_raster(2, 2, Color::WHITE).unwrap();

    assert!(matches!(
        grid.save(Some(file.as_path())),
        Err(GridError::Encode { .. })
    ));
    assert!(grid.file_path().is_none());
}

#[test]
fn test_load_replaces_previous_image() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("gradient.png");
    let mut source = GridAdapter::new();
    source.set_raster(1, 1, RED).unwrap();
    std::fs::write(
        &file,
        lib_grid::StandardCodec::encode(&gradient_4x2(), image::ImageFormat::Png).unwrap(),
    )
    .unwrap();

    source.load(&file).unwrap();

    assert_eq!(source.dimensions(), (4, 2));
    assert_eq!(source.raster(), Some(&gradient_4x2()));
}

/// Codec that keeps everything in memory, to exercise the codec seam.
#[derive(Default)]
struct MemoryCodec {
    files: RefCell<Vec<(std::path::PathBuf, Raster)>>,
}

impl ImageCodec for MemoryCodec {
    fn read(&self, path: &Path) -> Result<Raster, GridError> {
        self.files
            .borrow()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, raster)| raster.clone())
            .ok_or_else(|| GridError::Decode {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(std::io::ErrorKind::NotFound.into()),
            })
    }

    fn write(&self, raster: &Raster, path: &Path) -> Result<(), GridError> {
        let mut files = self.files.borrow_mut();
        files.retain(|(p, _)| p != path);
        files.push((path.to_path_buf(), raster.clone()));
        Ok(())
    }
}

#[test]
fn test_custom_codec_round_trip() {
    let mut grid = GridAdapter::with_codec(MemoryCodec::default());
    grid.set_raster(3, 2, Color::WHITE).unwrap();
    grid.set_cell_color(1, 0, RED).unwrap();
    grid.save_as("memory.png").unwrap();
    let saved = grid.raster().cloned();

    grid.set_raster(1, 1, Color::BLACK).unwrap();
    grid.load("memory.png").unwrap();

    assert_eq!(grid.raster().cloned(), saved);
    assert!(grid.load("other.png").is_err());
}

#[test]
fn test_set_raster_too_large_keeps_state() {
    let mut grid = GridAdapter::new();
    grid.set_raster(4, 3, Color::WHITE).unwrap();
    grid.take_invalidation();
    let changes = recorder(&mut grid);

    let result = grid.set_raster(1_000_000, 1_000_000, Color::BLUE);

    assert!(matches!(
        result,
        Err(GridError::TooLarge { width: 1_000_000, height: 1_000_000 })
    ));
    assert_eq!(grid.dimensions(), (4, 3));
    assert_eq!(grid.cell_color(0, 0).unwrap(), Color::WHITE);
    assert!(changes.borrow().is_empty());
    assert!(grid.take_invalidation().is_clean());
}

#[test]
fn test_resize_too_large_keeps_state() {
    let mut grid = GridAdapter::new();
    grid.set_raster(2, 2, RED).unwrap();
    grid.take_invalidation();

    let result = grid.resize(u32::MAX, u32::MAX);

    assert!(matches!(result, Err(GridError::TooLarge { .. })));
    assert_eq!(grid.dimensions(), (2, 2));
    assert!(grid.take_invalidation().is_clean());
}
