//! Symbol reader capability consumed by the decode pipeline.
//!
//! The pipeline only needs three things from a barcode library: build a
//! bitmap with a given binarizer, decode one symbol, decode many symbols.
//! [`RxingReader`] provides them on top of `rxing`; tests plug in scripted
//! readers.

pub mod rxing_reader;

pub use rxing_reader::RxingReader;

use crate::error::ReadError;
use crate::hints::{DecodeHints, Symbology};
use crate::luminance::LumaImage;

/// Strategy used to turn luma samples into a black/white bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinarizerKind {
    /// Single global threshold from the luma histogram. Fast, suits clean scans.
    GlobalHistogram,
    /// Local block thresholds. Slower, tolerates uneven lighting.
    Hybrid,
}

/// One decoded symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Text payload, verbatim
    pub text: String,
    /// Symbology reported by the reader, if any
    pub symbology: Option<Symbology>,
}

impl Decoded {
    /// Result with unknown symbology
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            symbology: None,
        }
    }

    /// Attach the reported symbology
    pub fn with_symbology(mut self, symbology: Symbology) -> Self {
        self.symbology = Some(symbology);
        self
    }
}

/// Barcode library surface used by [`crate::pipeline::decode`].
pub trait SymbolReader {
    /// Binarized image the decode calls operate on
    type Bitmap;

    /// Build a bitmap from the luma source with the given binarizer
    fn binarize(&mut self, source: &LumaImage, kind: BinarizerKind) -> Self::Bitmap;

    /// Look for every symbol in the bitmap
    fn decode_multi(
        &mut self,
        bitmap: &mut Self::Bitmap,
        hints: &DecodeHints,
    ) -> Result<Vec<Decoded>, ReadError>;

    /// Look for a single symbol in the bitmap
    fn decode_one(
        &mut self,
        bitmap: &mut Self::Bitmap,
        hints: &DecodeHints,
    ) -> Result<Decoded, ReadError>;
}
