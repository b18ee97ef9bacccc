use std::io;
use std::path::PathBuf;

use image::ImageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("Failed to encode image {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("Failed to write image {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("A {width}x{height} image is too large to allocate")]
    TooLarge { width: u32, height: u32 },

    #[error("No image is loaded")]
    NoRaster,

    #[error("No file path given and none stored")]
    NoPath,

    #[error("Cell ({row}, {col}) is out of bounds for a {rows}x{cols} grid")]
    OutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },
}
