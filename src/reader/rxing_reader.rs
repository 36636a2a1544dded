//! `rxing` implementation of [`SymbolReader`].

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use rxing::common::{GlobalHistogramBinarizer, HybridBinarizer};
use rxing::multi::{GenericMultipleBarcodeReader, MultipleBarcodeReader};
use rxing::{
    BarcodeFormat, BinaryBitmap, DecodeHintType, DecodeHintValue, DecodingHintDictionary,
    Exceptions, Luma8LuminanceSource, MultiFormatReader, RXingResult, Reader,
};

use super::{BinarizerKind, Decoded, SymbolReader};
use crate::error::{ReadError, ReaderFailure};
use crate::hints::{DecodeHints, Symbology};
use crate::luminance::LumaImage;

/// Bitmap built by one of rxing's binarizers.
pub enum RxingBitmap {
    /// Global-histogram binarizer
    Histogram(BinaryBitmap<GlobalHistogramBinarizer<Luma8LuminanceSource>>),
    /// Hybrid (local block) binarizer
    Hybrid(BinaryBitmap<HybridBinarizer<Luma8LuminanceSource>>),
}

impl RxingBitmap {
    /// Binarizer this bitmap was built with
    pub fn kind(&self) -> BinarizerKind {
        match self {
            RxingBitmap::Histogram(_) => BinarizerKind::GlobalHistogram,
            RxingBitmap::Hybrid(_) => BinarizerKind::Hybrid,
        }
    }
}

/// [`SymbolReader`] backed by rxing's multi-format reader.
#[derive(Default)]
pub struct RxingReader {
    reader: MultiFormatReader,
}

impl RxingReader {
    /// Reader accepting every supported symbology
    pub fn new() -> Self {
        Self::default()
    }
}

impl SymbolReader for RxingReader {
    type Bitmap = RxingBitmap;

    fn binarize(&mut self, source: &LumaImage, kind: BinarizerKind) -> RxingBitmap {
        let luma = Luma8LuminanceSource::new(
            source.as_bytes().to_vec(),
            source.width(),
            source.height(),
        );
        match kind {
            BinarizerKind::GlobalHistogram => {
                RxingBitmap::Histogram(BinaryBitmap::new(GlobalHistogramBinarizer::new(luma)))
            }
            BinarizerKind::Hybrid => {
                RxingBitmap::Hybrid(BinaryBitmap::new(HybridBinarizer::new(luma)))
            }
        }
    }

    fn decode_multi(
        &mut self,
        bitmap: &mut RxingBitmap,
        hints: &DecodeHints,
    ) -> Result<Vec<Decoded>, ReadError> {
        let dictionary = hint_dictionary(hints);
        let mut multi = GenericMultipleBarcodeReader::new(MultiFormatReader::default());
        let results = guarded(|| match bitmap {
            RxingBitmap::Histogram(image) => multi.decode_multiple_with_hints(image, &dictionary),
            RxingBitmap::Hybrid(image) => multi.decode_multiple_with_hints(image, &dictionary),
        })?;
        Ok(results.iter().map(to_decoded).collect())
    }

    fn decode_one(
        &mut self,
        bitmap: &mut RxingBitmap,
        hints: &DecodeHints,
    ) -> Result<Decoded, ReadError> {
        let dictionary = hint_dictionary(hints);
        let reader = &mut self.reader;
        let result = guarded(|| match bitmap {
            RxingBitmap::Histogram(image) => reader.decode_with_hints(image, &dictionary),
            RxingBitmap::Hybrid(image) => reader.decode_with_hints(image, &dictionary),
        })?;
        Ok(to_decoded(&result))
    }
}

/// Run a library call, turning its errors and panics into [`ReadError`].
fn guarded<T>(call: impl FnOnce() -> Result<T, Exceptions>) -> Result<T, ReadError> {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(read_error(err)),
        Err(payload) => Err(ReadError::Fault(format!(
            "reader panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn read_error(err: Exceptions) -> ReadError {
    match err {
        Exceptions::NotFoundException(..) => ReaderFailure::NotFound.into(),
        Exceptions::FormatException(..) => ReaderFailure::FormatInvalid.into(),
        Exceptions::ChecksumException(..) => ReaderFailure::ChecksumInvalid.into(),
        other => ReadError::Fault(format!("{other:?}")),
    }
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

fn hint_dictionary(hints: &DecodeHints) -> DecodingHintDictionary {
    let mut dictionary = DecodingHintDictionary::new();
    if hints.try_harder {
        dictionary.insert(DecodeHintType::TRY_HARDER, DecodeHintValue::TryHarder(true));
    }
    dictionary.insert(
        DecodeHintType::POSSIBLE_FORMATS,
        DecodeHintValue::PossibleFormats(
            hints.symbologies.iter().map(|s| barcode_format(*s)).collect(),
        ),
    );
    if hints.pure_symbol {
        dictionary.insert(DecodeHintType::PURE_BARCODE, DecodeHintValue::PureBarcode(true));
    }
    dictionary
}

fn to_decoded(result: &RXingResult) -> Decoded {
    let decoded = Decoded::new(result.getText());
    match symbology(result.getBarcodeFormat()) {
        Some(kind) => decoded.with_symbology(kind),
        None => decoded,
    }
}

fn barcode_format(symbology: Symbology) -> BarcodeFormat {
    match symbology {
        Symbology::Aztec => BarcodeFormat::AZTEC,
        Symbology::Codabar => BarcodeFormat::CODABAR,
        Symbology::Code39 => BarcodeFormat::CODE_39,
        Symbology::Code93 => BarcodeFormat::CODE_93,
        Symbology::Code128 => BarcodeFormat::CODE_128,
        Symbology::DataMatrix => BarcodeFormat::DATA_MATRIX,
        Symbology::Ean8 => BarcodeFormat::EAN_8,
        Symbology::Ean13 => BarcodeFormat::EAN_13,
        Symbology::Itf => BarcodeFormat::ITF,
        Symbology::MaxiCode => BarcodeFormat::MAXICODE,
        Symbology::Pdf417 => BarcodeFormat::PDF_417,
        Symbology::QrCode => BarcodeFormat::QR_CODE,
        Symbology::Rss14 => BarcodeFormat::RSS_14,
        Symbology::RssExpanded => BarcodeFormat::RSS_EXPANDED,
        Symbology::UpcA => BarcodeFormat::UPC_A,
        Symbology::UpcE => BarcodeFormat::UPC_E,
        Symbology::UpcEanExtension => BarcodeFormat::UPC_EAN_EXTENSION,
    }
}

fn symbology(format: &BarcodeFormat) -> Option<Symbology> {
    Symbology::ALL
        .into_iter()
        .find(|&s| barcode_format(s) == *format)
}
