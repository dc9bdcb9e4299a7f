//! CLI cancellation wiring.
//!
//! Responsibilities:
//! - Cancel the load's operation context when the user presses Ctrl+C.
//! - Centralize the cancellation message printed before exiting with 130.
//!
//! Does NOT handle:
//! - Deciding *when* to check for cancellation; every source read does that
//!   through the operation context.
//!
//! Invariants:
//! - Once cancelled, the context remains cancelled forever.

use confstore::OperationContext;

/// Cancel `ctx` on the first Ctrl+C.
pub fn cancel_on_ctrl_c(ctx: &OperationContext) {
    let token = ctx.token().clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            return;
        }
        tracing::debug!("Ctrl+C received, cancelling load");
        token.cancel();
    });
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}
