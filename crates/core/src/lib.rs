//! Pluggable configuration loading.
//!
//! A configuration value is read from a [`Source`] (file, in-memory bytes, an
//! async reader, or an HTTP endpoint from the `confstore-http` crate) and
//! decoded by a [`Decoder`] (JSON, YAML, raw text, or a closure pair).
//! [`SourceSelector`] picks the first viable source for a selection key, and
//! [`DecoderGroup`] tries several formats in order while keeping the
//! destination untouched on failure.
//!
//! Every blocking read is threaded through an [`OperationContext`] so callers
//! can cancel or bound it with a deadline.

pub mod codec;
pub mod context;
pub mod error;
pub mod loader;
pub mod selector;
pub mod source;

pub use codec::{Codec, Decoder, DecoderGroup, JsonDecoder, TextDecoder, YamlDecoder};
pub use context::{CancellationToken, OperationContext};
pub use error::{BoxError, Error, ErrorKind, Result};
pub use loader::{fill, fill_from, load, load_from};
pub use selector::{Reporting, Rule, SourceSelector};
pub use source::{
    BoxSource, BytesSource, ExpandEnv, FileSource, ReaderSource, Source, expand_env_str,
    is_local_path,
};
