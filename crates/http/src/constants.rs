//! Defaults for HTTP-backed sources.

/// Method used when none is configured.
pub const DEFAULT_METHOD: &str = "GET";

/// Maximum number of redirects followed by the internally built client.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Response body ceiling in bytes; 0 disables the limit.
pub const DEFAULT_MAX_BODY_SIZE: u64 = 0;

/// Upper bound on bytes discarded when draining a rejected response body.
pub const MAX_DRAIN_BYTES: u64 = 256 * 1024;

/// Largest buffer reserved up front from a declared `Content-Length`.
pub const MAX_INITIAL_BODY_CAPACITY: u64 = 64 * 1024;
