//! notepad-scribe
//!
//! Fetches posts and saves each one to `~/Desktop/tjm-project` through
//! Notepad. Takes no arguments; set `RUST_LOG` to change log verbosity.

use anyhow::{Context, Result};
use scribe::ScribeConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting notepad-scribe v{}", env!("CARGO_PKG_VERSION"));
    let config = ScribeConfig::default();

    match scribe::run(&config) {
        Ok(summary) => {
            info!(
                "Processed {} posts: {} via Notepad, {} written directly, {} failed",
                summary.fetched,
                summary.saved_by_editor,
                summary.written_by_fallback,
                summary.failed
            );
            Ok(())
        }
        // already logged by the run loop; a failed fetch ends the run quietly
        Err(e) if e.is_fetch_failure() => {
            error!("Nothing processed: {e}");
            Ok(())
        }
        Err(e) => Err(e).context("notepad-scribe run failed"),
    }
}
