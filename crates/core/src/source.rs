//! The [`Source`] capability and its in-crate adapters.
//!
//! # Submodules
//! - `bytes`: fixed in-memory payloads and one-shot async readers
//! - `file`: local files with optional root, path expansion and BOM trimming
//! - `expand`: `$VAR` / `${VAR}` expansion over another source's payload
//!
//! # What this module does NOT handle:
//! - Network fetches (see the `confstore-http` crate)
//! - Choosing between sources (see [`crate::selector`])

mod bytes;
mod expand;
mod file;

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::OperationContext;
use crate::error::Result;

pub use self::bytes::{BytesSource, ReaderSource};
pub use self::expand::{ExpandEnv, expand_env_str};
pub use self::file::{FileSource, is_local_path};

/// A configuration origin producing raw bytes.
///
/// Implementations hold only their own configuration and may be read
/// concurrently. Every blocking step must honor `ctx`.
#[async_trait]
pub trait Source: Send + Sync {
    /// Read the entire payload.
    async fn read(&self, ctx: &OperationContext) -> Result<Vec<u8>>;
}

/// Owned, type-erased source as produced by selector rules.
pub type BoxSource = Box<dyn Source>;

#[async_trait]
impl<S: Source + ?Sized> Source for Box<S> {
    async fn read(&self, ctx: &OperationContext) -> Result<Vec<u8>> {
        (**self).read(ctx).await
    }
}

#[async_trait]
impl<S: Source + ?Sized> Source for Arc<S> {
    async fn read(&self, ctx: &OperationContext) -> Result<Vec<u8>> {
        (**self).read(ctx).await
    }
}

#[async_trait]
impl<S: Source + ?Sized> Source for &S {
    async fn read(&self, ctx: &OperationContext) -> Result<Vec<u8>> {
        (**self).read(ctx).await
    }
}
