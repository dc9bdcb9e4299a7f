//! In-memory sources.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::Mutex;

use super::Source;
use crate::context::OperationContext;
use crate::error::{Error, Result};

/// A source that always returns the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BytesSource {
    data: Vec<u8>,
}

impl BytesSource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

impl From<&str> for BytesSource {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BytesSource {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Vec<u8>> for BytesSource {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

#[async_trait]
impl Source for BytesSource {
    async fn read(&self, ctx: &OperationContext) -> Result<Vec<u8>> {
        ctx.check()?;
        Ok(self.data.clone())
    }
}

/// A source that drains an async reader.
///
/// The reader is consumed by the first read; later reads return whatever is
/// left in it, which is usually nothing.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: Mutex<R>,
    label: PathBuf,
}

impl<R> ReaderSource<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(reader),
            label: PathBuf::from("<reader>"),
        }
    }

    /// Name used in I/O error messages, e.g. `<stdin>`.
    pub fn with_label(mut self, label: impl Into<PathBuf>) -> Self {
        self.label = label.into();
        self
    }
}

#[async_trait]
impl<R> Source for ReaderSource<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn read(&self, ctx: &OperationContext) -> Result<Vec<u8>> {
        let mut reader = ctx.run(self.reader.lock()).await?;
        let mut data = Vec::new();
        ctx.run(reader.read_to_end(&mut data))
            .await?
            .map_err(|source| Error::Io {
                path: self.label.clone(),
                source,
            })?;
        Ok(data)
    }
}
