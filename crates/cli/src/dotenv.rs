//! `.env` loading ahead of argument parsing.
//!
//! Responsibilities:
//! - Load `.env` from the working directory so clap `env` fallbacks can see it.
//! - Honor the `DOTENV_DISABLED` gate used by hermetic tests.
//!
//! Invariants:
//! - A missing `.env` is not an error.
//! - Error messages never include raw `.env` line contents.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DotenvError {
    #[error("invalid .env syntax at byte {error_index}")]
    Parse { error_index: usize },

    #[error("failed to read .env: {kind}")]
    Io { kind: std::io::ErrorKind },

    #[error("failed to load .env")]
    Unknown,
}

/// True when `DOTENV_DISABLED` is `true` or `1`.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var("DOTENV_DISABLED").ok().as_deref(),
        Some("true") | Some("1")
    )
}

fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

/// Load environment variables from `.env` if present and not disabled.
pub fn load_dotenv() -> Result<(), DotenvError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(DotenvError::Parse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(DotenvError::Io {
            kind: io_err.kind(),
        }),
        Err(_) => Err(DotenvError::Unknown),
    }
}
