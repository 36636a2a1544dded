//! Error types for the decode path and their HTTP status mapping.

use thiserror::Error;

/// Why the image guard refused an image.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Rejection {
    /// Width or height is 1 pixel or less
    #[error("dimensions too small: {width}x{height}")]
    TooSmall { width: u32, height: u32 },

    /// Pixel count above the configured ceiling
    #[error("dimensions too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },
}

/// Expected failure reported by a single decode attempt.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderFailure {
    /// No symbol located
    #[error("no symbol found")]
    NotFound,

    /// Symbol located, data does not parse
    #[error("symbol data is malformed")]
    FormatInvalid,

    /// Symbol located, error correction failed
    #[error("symbol checksum mismatch")]
    ChecksumInvalid,
}

/// Anything a symbol reader can return instead of a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// Expected failure, the pipeline moves on
    #[error(transparent)]
    Failure(#[from] ReaderFailure),

    /// Anything else, including a panic inside the reader
    #[error("unexpected reader fault: {0}")]
    Fault(String),
}

/// Client-facing classification when no symbol could be read.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unreadable {
    /// A symbol was located but its data is invalid
    #[error("format")]
    Format,

    /// Nothing symbol-shaped was located
    #[error("notfound")]
    NotFound,
}

/// Outcome of a pipeline run that produced no text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Every stage came up empty
    #[error("no readable symbol ({0})")]
    Unreadable(Unreadable),

    /// A stage hit an unexpected fault
    #[error("unexpected reader fault: {0}")]
    Fault(String),
}

/// Service-level error covering a whole decode request.
#[derive(Error, Debug)]
pub enum Error {
    /// Multipart body without a file part
    #[error("no file part in upload")]
    MissingUpload,

    /// Not multipart, or the multipart body does not parse
    #[error("malformed upload: {0}")]
    MalformedUpload(String),

    /// Body larger than the upload limit
    #[error("upload exceeds {limit} bytes")]
    UploadTooLarge {
        /// Limit in bytes
        limit: usize,
    },

    /// Bytes are not a decodable image
    #[error("failed to decode image: {0}")]
    BadImage(#[from] image::ImageError),

    /// Refused by the image guard
    #[error("image rejected: {0}")]
    Rejected(#[from] Rejection),

    /// No stage produced a symbol
    #[error("no readable symbol ({0})")]
    Unreadable(Unreadable),

    /// Unexpected collaborator fault
    #[error("unexpected reader fault: {0}")]
    Fault(String),
}

impl From<PipelineError> for Error {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Unreadable(kind) => Error::Unreadable(kind),
            PipelineError::Fault(detail) => Error::Fault(detail),
        }
    }
}

impl Error {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self {
            Error::UploadTooLarge { .. } | Error::Rejected(Rejection::TooLarge { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            Error::Fault(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::MissingUpload
            | Error::MalformedUpload(_)
            | Error::BadImage(_)
            | Error::Rejected(Rejection::TooSmall { .. })
            | Error::Unreadable(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Result alias for the decode path
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::MissingUpload.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::Rejected(Rejection::TooSmall {
                width: 1,
                height: 1
            })
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Rejected(Rejection::TooLarge {
                width: 6000,
                height: 6000
            })
            .status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            Error::UploadTooLarge { limit: 10 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            Error::Unreadable(Unreadable::Format).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Unreadable(Unreadable::NotFound).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Fault("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_pipeline_fault_is_not_unreadable() {
        let err: Error = PipelineError::Fault("index out of bounds".into()).into();
        assert!(matches!(err, Error::Fault(_)));
    }
}
