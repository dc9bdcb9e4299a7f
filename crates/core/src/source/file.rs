//! File-backed source.
//!
//! Responsibilities:
//! - Read a configuration file through `tokio::fs` under the operation context.
//! - Optionally resolve the path against an alternate root directory.
//! - Optionally expand environment placeholders in the path and trim a UTF-8 BOM.
//!
//! Does NOT handle:
//! - Expanding placeholders in the file contents (wrap with [`super::ExpandEnv`]).
//! - Watching the file for changes.
//!
//! Invariants:
//! - Path expansion happens before the root is applied.
//! - With a root set, the resolved path never leaves it: `..` and drive
//!   prefixes are rejected.
//! - Only a leading BOM is removed, and only when `trim_bom` is enabled.

use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::Source;
use super::expand::expand_env_str;
use crate::context::OperationContext;
use crate::error::{Error, Result};

/// UTF-8 byte-order mark.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A source reading a file from disk.
///
/// # Example
///
/// ```rust,ignore
/// use confstore::FileSource;
///
/// let source = FileSource::new("$HOME/app/config.json")
///     .expand_env()
///     .trim_bom();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
    root: Option<PathBuf>,
    expand_env: bool,
    trim_bom: bool,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            root: None,
            expand_env: false,
            trim_bom: false,
        }
    }

    /// Interpret the path relative to `root` instead of the working directory.
    ///
    /// Leading `/` on the configured path is ignored. Paths with `..` or a
    /// drive prefix are rejected at read time.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Expand `$VAR` / `${VAR}` in the path before reading.
    pub fn expand_env(mut self) -> Self {
        self.expand_env = true;
        self
    }

    /// Strip a leading UTF-8 byte-order mark.
    pub fn trim_bom(mut self) -> Self {
        self.trim_bom = true;
        self
    }

    /// The path as configured, before expansion and root resolution.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path that will actually be opened.
    ///
    /// Fails with an `InvalidInput` I/O error when a root is set and the path
    /// would escape it.
    pub fn resolved_path(&self) -> Result<PathBuf> {
        let path = if self.expand_env {
            PathBuf::from(expand_env_str(&self.path.to_string_lossy()).into_owned())
        } else {
            self.path.clone()
        };
        let Some(root) = &self.root else {
            return Ok(path);
        };

        let relative = path.strip_prefix("/").unwrap_or(&path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(Error::Io {
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("path escapes root {}", root.display()),
                ),
                path,
            });
        }
        Ok(root.join(relative))
    }
}

#[async_trait]
impl Source for FileSource {
    async fn read(&self, ctx: &OperationContext) -> Result<Vec<u8>> {
        let path = self.resolved_path()?;
        debug!(path = %path.display(), "Reading configuration file");

        let read = ctx.run(tokio::fs::read(&path)).await?;
        let mut data = read.map_err(|source| Error::Io { path, source })?;

        if self.trim_bom && data.starts_with(UTF8_BOM) {
            data.drain(..UTF8_BOM.len());
        }
        Ok(data)
    }
}

/// Reports whether `path` names a local filesystem location.
///
/// Empty strings are not local. Absolute paths are. Anything that parses as a
/// URL with a scheme is local only for `file:`; everything else is treated as
/// a relative path.
pub fn is_local_path(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    if Path::new(path).is_absolute() {
        return true;
    }
    match url::Url::parse(path) {
        // Single-letter schemes are Windows drive letters (`C:\config.json`).
        Ok(url) if url.scheme().len() > 1 => url.scheme() == "file",
        _ => true,
    }
}
