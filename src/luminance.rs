//! Luminance source adapter.
//!
//! Turns uploaded bytes into an 8-bit luma plane the symbol reader samples
//! from. Pixel decoding itself is delegated to the `image` crate.

use image::error::{DecodingError, ImageFormatHint};
use image::io::Reader as ImageReader;
use image::{DynamicImage, GenericImageView, ImageError, ImageResult};
use rayon::prelude::*;
use std::any::Any;
use std::io::Cursor;
use std::panic::{UnwindSafe, catch_unwind};

/// Luma weights scaled by 1024: Y = (306*R + 601*G + 117*B + 512) >> 10
const COEF_R: u32 = 306;
const COEF_G: u32 = 601;
const COEF_B: u32 = 117;
const ROUND: u32 = 0x200;

/// Grayscale sample grid, one byte per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaImage {
    width: u32,
    height: u32,
    luma: Vec<u8>,
}

impl LumaImage {
    /// Wrap an existing luma plane. Returns `None` if the buffer size does
    /// not match the dimensions.
    pub fn new(width: u32, height: u32, luma: Vec<u8>) -> Option<Self> {
        if luma.len() as u64 != u64::from(width) * u64::from(height) {
            return None;
        }
        Some(Self {
            width,
            height,
            luma,
        })
    }

    /// Convert a decoded image, consuming it so its pixel buffer is freed
    /// as soon as the luma plane exists.
    pub fn from_image(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let luma = match image {
            DynamicImage::ImageLuma8(gray) => gray.into_raw(),
            other => {
                let rgba = other.into_rgba8();
                rgba_to_luma(rgba.as_raw(), width as usize, height as usize)
            }
        };
        Self {
            width,
            height,
            luma,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Luma samples, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.luma
    }

    #[cfg(test)]
    fn get(&self, x: u32, y: u32) -> u8 {
        self.luma[(y as usize) * (self.width as usize) + x as usize]
    }
}

/// Read only the image header and return `(width, height)`.
pub fn probe_dimensions(bytes: &[u8]) -> ImageResult<(u32, u32)> {
    codec_call(|| {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .into_dimensions()
    })
}

/// Decode the full pixel grid of an uploaded image.
pub fn decode_pixels(bytes: &[u8]) -> ImageResult<DynamicImage> {
    codec_call(|| {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .decode()
    })
}

/// Run a codec call, reporting a panic as a decoding error of the input.
fn codec_call<T>(call: impl FnOnce() -> ImageResult<T> + UnwindSafe) -> ImageResult<T> {
    catch_unwind(call).unwrap_or_else(|payload| {
        let message = format!("image codec panicked: {}", panic_message(payload.as_ref()));
        Err(ImageError::Decoding(DecodingError::new(
            ImageFormatHint::Unknown,
            message,
        )))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic payload"
    }
}

/// Convert RGBA pixels to luma, processing rows in parallel.
///
/// Fully transparent pixels are treated as white.
pub fn rgba_to_luma(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut luma = vec![0u8; width * height];
    if width == 0 {
        return luma;
    }

    luma.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let row_start = y * width * 4;
            for (x, out) in row.iter_mut().enumerate() {
                let idx = row_start + x * 4;
                *out = pixel_luma(rgba[idx], rgba[idx + 1], rgba[idx + 2], rgba[idx + 3]);
            }
        });

    luma
}

#[inline]
fn pixel_luma(r: u8, g: u8, b: u8, a: u8) -> u8 {
    if a == 0 {
        return 0xFF;
    }
    let y = (COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32 + ROUND) >> 10;
    y.min(255) as u8
}
