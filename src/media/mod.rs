use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

use crate::app::Result;
use crate::fetcher::Fetcher;

/// Thumbnails are bounded to this many pixels on their longest edge,
/// preserving aspect ratio.
pub const MAX_THUMBNAIL_DIM: u32 = 500;

/// A decoded RGBA thumbnail ready for display.
#[derive(Clone)]
pub struct Bitmap {
    pixels: RgbaImage,
}

impl Bitmap {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// RGB components of the pixel at (x, y). Coordinates are clamped to the
    /// image bounds.
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let x = x.min(self.width().saturating_sub(1));
        let y = y.min(self.height().saturating_sub(1));
        let p = self.pixels.get_pixel(x, y).0;
        (p[0], p[1], p[2])
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Downloads and decodes one thumbnail. Each load is independent; failures
/// surface to the caller, which converts them into error notices without
/// touching sibling loads.
#[derive(Clone)]
pub struct ImageLoader {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl ImageLoader {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { fetcher }
    }

    pub async fn load(&self, url: &str) -> Result<Bitmap> {
        let bytes = self.fetcher.fetch(url).await?;
        let decoded = image::load_from_memory(&bytes)?;

        let bounded = if decoded.width() > MAX_THUMBNAIL_DIM || decoded.height() > MAX_THUMBNAIL_DIM
        {
            decoded.thumbnail(MAX_THUMBNAIL_DIM, MAX_THUMBNAIL_DIM)
        } else {
            decoded
        };

        Ok(Bitmap::new(bounded.to_rgba8()))
    }
}
