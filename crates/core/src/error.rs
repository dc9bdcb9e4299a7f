//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define one error enum shared by sources, decoders, the selector and the loader.
//! - Tag every variant with an [`ErrorKind`] so callers can classify failures.
//! - Carry aggregated causes for the selector and decoder groups.
//!
//! Does NOT handle:
//! - Logging or retrying failures (errors are always returned to the caller).
//! - Exit-code mapping (see the CLI crate).
//!
//! Invariants:
//! - `contains(kind)` is true for the error itself and for every aggregated cause,
//!   recursively, so `NoValidSource` and `DecodeExhausted` checks work on the aggregate.
//! - Aggregated failures keep their evaluation order; a decoder failure's index in
//!   `failures` is its position in the group.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error type used for foreign failures (transport errors, user decoders).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for confstore operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, reading or decoding configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Every selector rule was unmatched or rejected.
    #[error("no valid source found{}", join_causes(.causes))]
    NoValidSource { causes: Vec<Error> },

    /// A selector predicate did not match. Never reported on its own.
    #[error("source rule not matched")]
    RuleNotMatched,

    /// A matched rule's factory produced no source.
    #[error("source factory returned no source")]
    NilCapability,

    /// A network payload exceeded its configured ceiling.
    #[error("body too large: {} {observed} exceeds limit {limit}", size_label(.declared))]
    BodyTooLarge {
        observed: u64,
        limit: u64,
        /// True when the size came from the declared `Content-Length`.
        declared: bool,
    },

    /// A network fetch received a non-2xx response.
    #[error("http source: {method} {url} unexpected status {status}")]
    UnexpectedStatus {
        method: String,
        url: String,
        status: String,
    },

    /// The operation context was cancelled.
    #[error("operation cancelled")]
    Cancelled,

    /// The operation context deadline expired.
    #[error("operation deadline exceeded")]
    DeadlineExceeded,

    /// Every decoder in a group failed to decode.
    #[error("fallback unmarshal failed: {}", join_positions(.failures))]
    DecodeExhausted { failures: Vec<Error> },

    /// Every decoder in a group failed to encode.
    #[error("fallback marshal failed: {}", join_positions(.failures))]
    EncodeExhausted { failures: Vec<Error> },

    /// A decoder group with nothing to try.
    #[error("fallback {operation}: no decoders configured")]
    NoDecoders { operation: &'static str },

    /// The decoder cannot operate on the value it was given.
    #[error("invalid type for codec operation: expected {expected}")]
    InvalidType { expected: &'static str },

    /// A null value was given to a decoder that requires one.
    #[error("null value cannot be marshaled")]
    NilPointer,

    /// The network endpoint could not be parsed.
    #[error("invalid endpoint {url}: {message}")]
    InvalidEndpoint { url: String, message: String },

    /// The network request failed below the HTTP layer.
    #[error("http source: {method} {url}: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: BoxError,
    },

    /// A file or stream could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("{0}")]
    Message(String),

    #[error("{0}")]
    Other(#[source] BoxError),
}

/// Classification tag for [`Error`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoValidSource,
    RuleNotMatched,
    NilCapability,
    BodyTooLarge,
    UnexpectedStatus,
    Cancelled,
    DeadlineExceeded,
    DecodeExhausted,
    EncodeExhausted,
    NoDecoders,
    InvalidType,
    NilPointer,
    InvalidEndpoint,
    Transport,
    Io,
    Format,
    Other,
}

impl Error {
    /// Build an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Wrap a foreign error.
    pub fn other(error: impl Into<BoxError>) -> Self {
        Self::Other(error.into())
    }

    /// The kind of this error, ignoring aggregated causes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoValidSource { .. } => ErrorKind::NoValidSource,
            Self::RuleNotMatched => ErrorKind::RuleNotMatched,
            Self::NilCapability => ErrorKind::NilCapability,
            Self::BodyTooLarge { .. } => ErrorKind::BodyTooLarge,
            Self::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::DeadlineExceeded => ErrorKind::DeadlineExceeded,
            Self::DecodeExhausted { .. } => ErrorKind::DecodeExhausted,
            Self::EncodeExhausted { .. } => ErrorKind::EncodeExhausted,
            Self::NoDecoders { .. } => ErrorKind::NoDecoders,
            Self::InvalidType { .. } => ErrorKind::InvalidType,
            Self::NilPointer => ErrorKind::NilPointer,
            Self::InvalidEndpoint { .. } => ErrorKind::InvalidEndpoint,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Io { .. } => ErrorKind::Io,
            Self::Json(_) | Self::Yaml(_) | Self::Utf8(_) => ErrorKind::Format,
            Self::Message(_) | Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Aggregated causes of a selector or decoder-group failure.
    ///
    /// Empty for every other variant.
    pub fn causes(&self) -> &[Error] {
        match self {
            Self::NoValidSource { causes } => causes,
            Self::DecodeExhausted { failures } | Self::EncodeExhausted { failures } => failures,
            _ => &[],
        }
    }

    /// Returns true if this error, or any aggregated cause, has the given kind.
    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.kind() == kind || self.causes().iter().any(|cause| cause.contains(kind))
    }

    /// Check if this error came from the operation context rather than the source.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}

fn size_label(declared: &bool) -> &'static str {
    if *declared { "content-length" } else { "read" }
}

fn join_causes(causes: &[Error]) -> String {
    if causes.is_empty() {
        return String::new();
    }
    let joined = causes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!(": {joined}")
}

fn join_positions(failures: &[Error]) -> String {
    failures
        .iter()
        .enumerate()
        .map(|(i, e)| Positioned(i, e).to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

struct Positioned<'a>(usize, &'a Error);

impl fmt::Display for Positioned<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decoder[{}]: {}", self.0, self.1)
    }
}
