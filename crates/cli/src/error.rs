//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `confstore::Error` kinds to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for Ctrl+C wiring).
//!
//! Invariants:
//! - Exit codes 1-6 are reserved for specific error categories.
//! - Exit code 124 matches `timeout(1)`; 130 is SIGINT (128 + 2).

use confstore::{Error, ErrorKind};

/// Structured exit codes for `confstore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - the value was loaded and printed.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// No rule produced a source, or the source could not be read locally.
    SourceUnavailable = 2,

    /// Network failure below HTTP, or an unusable endpoint.
    ///
    /// Scripts may retry with backoff.
    TransportError = 3,

    /// The endpoint answered with a non-2xx status.
    UnexpectedStatus = 4,

    /// The remote payload exceeded `--max-body-size`.
    BodyTooLarge = 5,

    /// No decoder could read the payload.
    DecodeError = 6,

    /// `--timeout` elapsed.
    DeadlineExceeded = 124,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err.kind() {
            ErrorKind::NoValidSource
            | ErrorKind::RuleNotMatched
            | ErrorKind::NilCapability
            | ErrorKind::Io => ExitCode::SourceUnavailable,

            ErrorKind::Transport | ErrorKind::InvalidEndpoint => ExitCode::TransportError,

            ErrorKind::UnexpectedStatus => ExitCode::UnexpectedStatus,

            ErrorKind::BodyTooLarge => ExitCode::BodyTooLarge,

            ErrorKind::DecodeExhausted
            | ErrorKind::EncodeExhausted
            | ErrorKind::NoDecoders
            | ErrorKind::InvalidType
            | ErrorKind::NilPointer
            | ErrorKind::Format => ExitCode::DecodeError,

            ErrorKind::DeadlineExceeded => ExitCode::DeadlineExceeded,
            ErrorKind::Cancelled => ExitCode::Interrupted,

            ErrorKind::Other => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no `confstore::Error` is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<Error>())
            .map_or(ExitCode::GeneralError, ExitCode::from)
    }
}
