pub mod nodes;
pub mod ping;
pub mod request;
pub mod watch;

pub use nodes::run_nodes;
pub use ping::run_ping;
pub use request::run_request;
pub use watch::run_watch;

use trellis::ActionResult;

/// Fail with the cluster's own error text for a non-succeeded result
pub(crate) fn ensure_succeeded(result: &ActionResult) -> anyhow::Result<()> {
    if !result.is_succeeded() {
        anyhow::bail!(
            "Request failed ({}): {}",
            result.response_code(),
            result.error_message().unwrap_or("unknown error")
        );
    }
    Ok(())
}
