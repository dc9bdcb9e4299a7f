//! Output rendering for loaded values.
//!
//! Structured formats are re-encoded as JSON through the library's own
//! [`JsonDecoder`]; text payloads are printed unchanged.

use confstore::{Decoder, JsonDecoder};
use serde_json::Value;

/// Encode `value` as JSON, pretty unless `compact`, with a trailing newline.
pub fn render_json(value: &Value, compact: bool) -> confstore::Result<Vec<u8>> {
    let encoder = if compact {
        JsonDecoder::new()
    } else {
        JsonDecoder::pretty()
    };
    let mut out = encoder.marshal(value)?;
    out.push(b'\n');
    Ok(out)
}
