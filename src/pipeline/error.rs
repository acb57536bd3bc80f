//! Pipeline error taxonomy.
//!
//! Every stage returns `Result<_, PipelineError>`. The first error ends the
//! request and is written to the client verbatim: its message becomes the
//! response body and its kind decides the status code.

use thiserror::Error;

use super::timing::StageTimings;

/// Which side of the exchange caused the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller supplied something unusable (missing parameter, bad source).
    ClientInput,
    /// The source was retrieved but could not be processed.
    Processing,
}

/// Discriminated failure kind for a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required query parameter is absent or empty.
    MissingParameter,
    /// The source URL could not be fetched (transport error or non-2xx).
    Unreachable,
    /// The response body could not be read completely.
    UnreadableBody,
    /// The bytes are not a recognizable image of a supported format.
    UnrecognizedFormat,
    /// The decoder could not materialize an image from the bytes.
    InitFailed,
    /// The size transformation was invalid or failed.
    ResizeFailed,
    /// Re-encoding into the detected format failed.
    EncodeFailed,
}

impl ErrorKind {
    pub fn class(self) -> ErrorClass {
        match self {
            ErrorKind::MissingParameter | ErrorKind::Unreachable | ErrorKind::UnreadableBody => {
                ErrorClass::ClientInput
            }
            ErrorKind::UnrecognizedFormat
            | ErrorKind::InitFailed
            | ErrorKind::ResizeFailed
            | ErrorKind::EncodeFailed => ErrorClass::Processing,
        }
    }

    /// Short label used for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MissingParameter => "missing_parameter",
            ErrorKind::Unreachable => "unreachable",
            ErrorKind::UnreadableBody => "unreadable_body",
            ErrorKind::UnrecognizedFormat => "unrecognized_format",
            ErrorKind::InitFailed => "init_failed",
            ErrorKind::ResizeFailed => "resize_failed",
            ErrorKind::EncodeFailed => "encode_failed",
        }
    }
}

/// Maps an error kind to the HTTP status written to the client.
///
/// - `MissingParameter` → 401
/// - `Unreachable`, `UnreadableBody` → 400
/// - every processing kind → 501
pub fn status_code(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::MissingParameter => 401,
        ErrorKind::Unreachable | ErrorKind::UnreadableBody => 400,
        ErrorKind::UnrecognizedFormat
        | ErrorKind::InitFailed
        | ErrorKind::ResizeFailed
        | ErrorKind::EncodeFailed => 501,
    }
}

/// Terminal failure of one request.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PipelineError {
    kind: ErrorKind,
    message: String,
    timings: StageTimings,
}

impl PipelineError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timings: StageTimings::default(),
        }
    }

    pub fn missing_parameter(name: &str) -> Self {
        Self::new(ErrorKind::MissingParameter, format!("missing parameter: {}", name))
    }

    pub fn unreachable(cause: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Unreachable, format!("could not fetch image: {}", cause))
    }

    pub fn unreadable_body(cause: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::UnreadableBody,
            format!("could not read image data: {}", cause),
        )
    }

    pub fn unrecognized_format(cause: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::UnrecognizedFormat,
            format!("could not detect image format: {}", cause),
        )
    }

    pub fn init_failed(cause: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::InitFailed, format!("init failed: {}", cause))
    }

    pub fn resize_failed(cause: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::ResizeFailed, format!("resize failed: {}", cause))
    }

    pub fn encode_failed(cause: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::EncodeFailed, format!("encoding failed: {}", cause))
    }

    /// Attach the timings of the stages that completed before the failure.
    /// Kind and message are left untouched.
    pub fn with_timings(mut self, timings: StageTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    pub fn status_code(&self) -> u16 {
        status_code(self.kind)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timings(&self) -> &StageTimings {
        &self.timings
    }
}
