//! HTTP(S) configuration source for `confstore`.
//!
//! [`HttpSource`] fetches a configuration payload with `reqwest`, honoring the
//! caller's [`confstore::OperationContext`] at every suspension point and
//! enforcing an optional response body ceiling.

mod body;
pub mod builder;
pub mod constants;
mod source;

pub use builder::HttpSourceBuilder;
pub use source::{HttpSource, is_remote_url};
