use std::path::{Path, PathBuf};

use directories::UserDirs;
use lib_grid::{GridAdapter, GridError};
use log::info;
use thiserror::Error;

const FILTER_NAME: &str = "Images";
const FILTER_EXTENSIONS: &[&str] = &["png"];

#[derive(Error, Debug)]
pub enum FileError {
    #[error("File dialog was canceled")]
    DialogCanceled,

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Folder the next dialog should start in: the user's home, or the working directory.
pub fn start_dir() -> PathBuf {
    UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default()
}

/// Directory part of `path`, used to remember where the last file lived.
pub fn parent_dir(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

pub fn open_image(grid: &mut GridAdapter, dir: &Path) -> Result<PathBuf, FileError> {
    let path = rfd::FileDialog::new()
        .set_title("Open picture")
        .set_directory(dir)
        .add_filter(FILTER_NAME, FILTER_EXTENSIONS)
        .pick_file()
        .ok_or(FileError::DialogCanceled)?;

    grid.load(&path)?;
    info!("Opened {:?}", path);
    Ok(path)
}

pub fn save_image_as(grid: &mut GridAdapter, dir: &Path) -> Result<PathBuf, FileError> {
    let path = rfd::FileDialog::new()
        .set_title("Save picture")
        .set_directory(dir)
        .add_filter(FILTER_NAME, FILTER_EXTENSIONS)
        .save_file()
        .ok_or(FileError::DialogCanceled)?;

    Ok(grid.save_as(path)?)
}

/// Saves to the image's own path, asking for one if it has none yet.
pub fn save_image(grid: &mut GridAdapter, dir: &Path) -> Result<PathBuf, FileError> {
    if grid.file_path().is_none() {
        return save_image_as(grid, dir);
    }
    Ok(grid.save(None)?)
}
