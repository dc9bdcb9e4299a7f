//! Bounded response body streaming.
//!
//! Every chunk is awaited through the operation context so a stalled body is
//! interruptible mid-stream. Rejected bodies are drained best-effort, up to
//! [`MAX_DRAIN_BYTES`], so the connection can be reused.

use confstore::{Error, OperationContext, Result};
use reqwest::Response;
use tracing::trace;

use crate::constants::{MAX_DRAIN_BYTES, MAX_INITIAL_BODY_CAPACITY};

/// Read the whole body, failing once more than `limit` bytes arrive.
///
/// A `limit` of 0 disables the ceiling. A declared `Content-Length` above
/// the limit fails before any body byte is read.
pub(crate) async fn read_limited(
    ctx: &OperationContext,
    response: &mut Response,
    limit: u64,
    on_error: impl Fn(reqwest::Error) -> Error,
) -> Result<Vec<u8>> {
    let declared = response.content_length();
    if limit > 0
        && let Some(length) = declared
        && length > limit
    {
        return Err(Error::BodyTooLarge {
            observed: length,
            limit,
            declared: true,
        });
    }

    // The declared length is only a hint; the buffer grows with bytes received.
    let capacity = declared.map_or(0, |length| length.min(MAX_INITIAL_BODY_CAPACITY));
    let mut data = Vec::with_capacity(usize::try_from(capacity).unwrap_or(0));

    while let Some(chunk) = ctx.run(response.chunk()).await?.map_err(&on_error)? {
        data.extend_from_slice(&chunk);
        if limit > 0 && data.len() as u64 > limit {
            let observed = limit + 1;
            drain(ctx, response).await;
            return Err(Error::BodyTooLarge {
                observed,
                limit,
                declared: false,
            });
        }
    }
    Ok(data)
}

/// Discard what is left of the body, giving up on any error or after
/// [`MAX_DRAIN_BYTES`].
pub(crate) async fn drain(ctx: &OperationContext, response: &mut Response) {
    let mut drained = 0u64;
    while drained < MAX_DRAIN_BYTES {
        match ctx.run(response.chunk()).await {
            Ok(Ok(Some(chunk))) => drained += chunk.len() as u64,
            _ => break,
        }
    }
    trace!(drained, "Drained response body");
}
