//! qrdecode - barcode and QR code decoding over HTTP
//!
//! An uploaded image goes through three steps:
//!
//! 1. the [`guard`] refuses images that are degenerate or too large, using
//!    only the image header. A header that declares an oversized frame is
//!    refused even if the pixel data behind it is corrupt
//! 2. the pixels are converted to a [`luminance::LumaImage`]
//! 3. the [`pipeline`] tries several decode strategies, cheapest first,
//!    until one finds a symbol
//!
//! The decoded texts are rendered one per line by [`format::render`].
//! [`server`] exposes all of this as `POST /decode`.

#![warn(missing_docs)]

/// Process-wide limits
pub mod config;
/// Error types and their HTTP mapping
pub mod error;
/// Newline-terminated response rendering
pub mod format;
/// Image dimension checks
pub mod guard;
/// Decode hint sets
pub mod hints;
/// Image bytes to luma plane
pub mod luminance;
/// Ordered multi-strategy decode
pub mod pipeline;
/// Symbol reader capability and its rxing implementation
pub mod reader;
/// HTTP controller
pub mod server;

pub use config::Limits;
pub use error::{Error, Result};
pub use guard::ImageGuard;
pub use luminance::LumaImage;
pub use reader::{Decoded, RxingReader, SymbolReader};

/// Decode every symbol in an encoded image (PNG, JPEG, ...).
///
/// Runs the full request path: header probe, dimension guard, pixel
/// decode, luma conversion and the decode pipeline. Blocking.
pub fn decode_image_bytes(bytes: &[u8], limits: &Limits) -> Result<Vec<String>> {
    decode_image_bytes_with(&mut RxingReader::new(), bytes, limits)
}

/// [`decode_image_bytes`] with a caller-supplied symbol reader.
pub fn decode_image_bytes_with<R: SymbolReader>(
    reader: &mut R,
    bytes: &[u8],
    limits: &Limits,
) -> Result<Vec<String>> {
    let (width, height) = luminance::probe_dimensions(bytes)?;
    ImageGuard::from_limits(limits).validate(width, height)?;

    let source = {
        let decoded = luminance::decode_pixels(bytes)?;
        // The header may lie about the frame size
        let (width, height) = image::GenericImageView::dimensions(&decoded);
        ImageGuard::from_limits(limits).validate(width, height)?;
        LumaImage::from_image(decoded)
    };

    let symbols = pipeline::decode_symbols(reader, &source)?;
    drop(source);

    for symbol in &symbols {
        tracing::debug!(symbology = ?symbol.symbology, len = symbol.text.len(), "decoded symbol");
    }
    Ok(symbols.into_iter().map(|symbol| symbol.text).collect())
}
