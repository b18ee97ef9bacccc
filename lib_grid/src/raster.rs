use crate::color::Color;
use crate::error::GridError;

/// Largest number of pixels a raster may hold (1 GiB of RGBA).
pub const MAX_PIXELS: usize = 1 << 28;

/// Reserves room for a `width` x `height` raster without aborting on failure.
fn allocate(width: u32, height: u32) -> Result<Vec<Color>, GridError> {
    let too_large = || GridError::TooLarge { width, height };
    let len = (width as usize)
        .checked_mul(height as usize)
        .filter(|&len| len <= MAX_PIXELS)
        .ok_or_else(too_large)?;

    let mut pixels = Vec::new();
    pixels.try_reserve_exact(len).map_err(|_| too_large())?;
    Ok(pixels)
}

/// Row-major 2D array of [`Color`] values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Raster {
    /// Allocates a `width` x `height` raster filled with `fill`. Either dimension may be 0.
    ///
    /// Fails with [`GridError::TooLarge`] past [`MAX_PIXELS`] or when the
    /// memory can't be reserved.
    pub fn new(width: u32, height: u32, fill: Color) -> Result<Self, GridError> {
        let mut pixels = allocate(width, height)?;
        // allocate() already checked that the product fits.
        pixels.resize(width as usize * height as usize, fill);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a raster from row-major pixels. Returns `None` if the pixel
    /// count doesn't match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        let len = (width as usize).checked_mul(height as usize)?;
        if pixels.len() != len {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// Writes one pixel. Returns `false` when (x, y) is outside the raster.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> bool {
        match self.index(x, y) {
            Some(index) => {
                self.pixels[index] = color;
                true
            }
            None => false,
        }
    }

    /// Nearest-neighbour resample to `width` x `height`.
    ///
    /// Destination pixel (x, y) takes source pixel
    /// (x * src_width / width, y * src_height / height). A source with a zero
    /// dimension has nothing to sample, so the result is filled with black.
    pub fn resized(&self, width: u32, height: u32) -> Result<Raster, GridError> {
        if self.is_empty() {
            return Raster::new(width, height, Color::BLACK);
        }

        let mut pixels = allocate(width, height)?;

        let src_width = self.width as u64;
        let src_height = self.height as u64;

        let columns: Vec<usize> = (0..width as u64)
            .map(|x| (x * src_width / width as u64) as usize)
            .collect();

        for y in 0..height as u64 {
            let src_y = (y * src_height / height as u64) as usize;
            let row = &self.pixels[src_y * self.width as usize..(src_y + 1) * self.width as usize];
            pixels.extend(columns.iter().map(|&src_x| row[src_x]));
        }

        Ok(Raster {
            width,
            height,
            pixels,
        })
    }
}
