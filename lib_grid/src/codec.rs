use std::io::Cursor;
use std::path::Path;

use image::error::{ParameterError, ParameterErrorKind};
use image::{DynamicImage, ImageError, ImageFormat, RgbImage, RgbaImage};
use log::{debug, info};

use crate::color::Color;
use crate::error::GridError;
use crate::raster::Raster;

/// Turns image files into rasters and back.
pub trait ImageCodec {
    fn read(&self, path: &Path) -> Result<Raster, GridError>;

    fn write(&self, raster: &Raster, path: &Path) -> Result<(), GridError>;
}

/// Codec backed by the `image` crate. The file format follows the path extension.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardCodec;

impl StandardCodec {
    pub fn decode(bytes: &[u8]) -> Result<Raster, ImageError> {
        let image = image::load_from_memory(bytes)?;
        raster_from_image(&image)
    }

    pub fn encode(raster: &Raster, format: ImageFormat) -> Result<Vec<u8>, ImageError> {
        let mut cursor = Cursor::new(Vec::new());
        image_from_raster(raster).write_to(&mut cursor, format)?;
        Ok(cursor.into_inner())
    }
}

impl ImageCodec for StandardCodec {
    fn read(&self, path: &Path) -> Result<Raster, GridError> {
        let decode_error = |source| GridError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let image = image::open(path).map_err(decode_error)?;
        let raster = raster_from_image(&image).map_err(decode_error)?;
        info!(
            "Decoded {:?}: {}x{}",
            path,
            raster.width(),
            raster.height()
        );
        Ok(raster)
    }

    fn write(&self, raster: &Raster, path: &Path) -> Result<(), GridError> {
        let encode_error = |source| GridError::Encode {
            path: path.to_path_buf(),
            source,
        };

        let format = ImageFormat::from_path(path).map_err(encode_error)?;
        let bytes = Self::encode(raster, format).map_err(encode_error)?;
        debug!("Encoded {} bytes as {:?}", bytes.len(), format);

        std::fs::write(path, &bytes).map_err(|source| GridError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Wrote {:?}", path);
        Ok(())
    }
}

fn raster_from_image(image: &DynamicImage) -> Result<Raster, ImageError> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba.pixels().map(|pixel| Color(pixel.0)).collect();
    Raster::from_pixels(width, height, pixels).ok_or_else(|| {
        ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ))
    })
}

fn image_from_raster(raster: &Raster) -> DynamicImage {
    let (width, height) = raster.dimensions();
    let pixel = |x: u32, y: u32| raster.pixel(x, y).unwrap_or_default();

    if raster.pixels().iter().all(Color::is_opaque) {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            let color = pixel(x, y);
            image::Rgb([color.r(), color.g(), color.b()])
        }))
    } else {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba(pixel(x, y).0)
        }))
    }
}
