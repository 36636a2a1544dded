//! Multi-strategy decode pipeline.
//!
//! Attempts run cheapest first and stop as soon as one yields a symbol:
//!
//! 1. multi-symbol scan on the global-histogram bitmap
//! 2. pure-symbol scan on the same bitmap
//! 3. photo scan on the same bitmap
//! 4. photo scan on a hybrid bitmap
//!
//! Expected reader failures are recorded and the pipeline moves on; only
//! the last one matters if every attempt comes up empty.

use crate::error::{PipelineError, ReadError, ReaderFailure, Unreadable};
use crate::hints::{PURE_HINTS, STANDARD_HINTS};
use crate::luminance::LumaImage;
use crate::reader::{BinarizerKind, Decoded, SymbolReader};

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Every symbol on the global-histogram bitmap
    Multi,
    /// One tightly cropped symbol, no perspective search
    Pure,
    /// One symbol anywhere in the global-histogram bitmap
    Photo,
    /// One symbol on the locally thresholded bitmap
    Hybrid,
}

/// Results and last failure accumulated over one pipeline run.
#[derive(Debug, Default)]
struct DecodeState {
    results: Vec<Decoded>,
    last_failure: Option<ReaderFailure>,
}

impl DecodeState {
    fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn record_many(
        &mut self,
        stage: Stage,
        outcome: Result<Vec<Decoded>, ReadError>,
    ) -> Result<(), PipelineError> {
        match outcome {
            Ok(found) => {
                tracing::debug!(?stage, count = found.len(), "stage returned results");
                self.results.extend(found);
                Ok(())
            }
            Err(err) => self.record_error(stage, err),
        }
    }

    fn record_one(
        &mut self,
        stage: Stage,
        outcome: Result<Decoded, ReadError>,
    ) -> Result<(), PipelineError> {
        self.record_many(stage, outcome.map(|decoded| vec![decoded]))
    }

    fn record_error(&mut self, stage: Stage, err: ReadError) -> Result<(), PipelineError> {
        match err {
            ReadError::Failure(failure) => {
                tracing::debug!(?stage, %failure, "stage failed");
                self.last_failure = Some(failure);
                Ok(())
            }
            ReadError::Fault(detail) => {
                tracing::error!(?stage, %detail, "unexpected fault from symbol reader");
                Err(PipelineError::Fault(detail))
            }
        }
    }

    fn finish(self) -> Result<Vec<Decoded>, PipelineError> {
        if self.results.is_empty() {
            Err(PipelineError::Unreadable(classify(self.last_failure)))
        } else {
            Ok(self.results)
        }
    }
}

/// Collapse the last reader failure into the client-facing classification.
pub fn classify(last_failure: Option<ReaderFailure>) -> Unreadable {
    match last_failure {
        Some(ReaderFailure::FormatInvalid | ReaderFailure::ChecksumInvalid) => Unreadable::Format,
        Some(ReaderFailure::NotFound) | None => Unreadable::NotFound,
    }
}

/// Run every strategy until one finds a symbol, returning the decoded
/// symbols in discovery order.
pub fn decode_symbols<R: SymbolReader>(
    reader: &mut R,
    source: &LumaImage,
) -> Result<Vec<Decoded>, PipelineError> {
    let mut state = DecodeState::default();
    let mut histogram = reader.binarize(source, BinarizerKind::GlobalHistogram);

    let outcome = reader.decode_multi(&mut histogram, &STANDARD_HINTS);
    state.record_many(Stage::Multi, outcome)?;

    if state.is_empty() {
        let outcome = reader.decode_one(&mut histogram, &PURE_HINTS);
        state.record_one(Stage::Pure, outcome)?;
    }

    if state.is_empty() {
        let outcome = reader.decode_one(&mut histogram, &STANDARD_HINTS);
        state.record_one(Stage::Photo, outcome)?;
    }

    if state.is_empty() {
        let mut hybrid = reader.binarize(source, BinarizerKind::Hybrid);
        let outcome = reader.decode_one(&mut hybrid, &STANDARD_HINTS);
        state.record_one(Stage::Hybrid, outcome)?;
    }

    state.finish()
}

/// Like [`decode_symbols`] but returns only the decoded texts.
pub fn decode<R: SymbolReader>(
    reader: &mut R,
    source: &LumaImage,
) -> Result<Vec<String>, PipelineError> {
    let symbols = decode_symbols(reader, source)?;
    Ok(symbols.into_iter().map(|symbol| symbol.text).collect())
}
