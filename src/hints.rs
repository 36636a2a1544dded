//! Decode hint sets shared by every request.

/// Symbologies the reader may report. Variants are the standard format
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Symbology {
    Aztec,
    Codabar,
    Code39,
    Code93,
    Code128,
    DataMatrix,
    Ean8,
    Ean13,
    Itf,
    MaxiCode,
    Pdf417,
    QrCode,
    Rss14,
    RssExpanded,
    UpcA,
    UpcE,
    UpcEanExtension,
}

impl Symbology {
    /// Every symbology the reader supports
    pub const ALL: [Symbology; 17] = [
        Symbology::Aztec,
        Symbology::Codabar,
        Symbology::Code39,
        Symbology::Code93,
        Symbology::Code128,
        Symbology::DataMatrix,
        Symbology::Ean8,
        Symbology::Ean13,
        Symbology::Itf,
        Symbology::MaxiCode,
        Symbology::Pdf417,
        Symbology::QrCode,
        Symbology::Rss14,
        Symbology::RssExpanded,
        Symbology::UpcA,
        Symbology::UpcE,
        Symbology::UpcEanExtension,
    ];
}

/// Options handed to every decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeHints {
    /// Spend more time looking for a symbol
    pub try_harder: bool,
    /// Symbologies the reader may try
    pub symbologies: &'static [Symbology],
    /// The image is a tightly cropped single symbol with no perspective
    pub pure_symbol: bool,
}

/// Photo-oriented hints: try harder, all symbologies.
pub const STANDARD_HINTS: DecodeHints = DecodeHints {
    try_harder: true,
    symbologies: &Symbology::ALL,
    pure_symbol: false,
};

/// [`STANDARD_HINTS`] plus the pure-symbol assumption.
pub const PURE_HINTS: DecodeHints = DecodeHints {
    pure_symbol: true,
    ..STANDARD_HINTS
};
