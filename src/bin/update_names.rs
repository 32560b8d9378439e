//! Offline cache updater: resolve the players queued in `ru_pending.json`
//! into `ru_map.json`. Runs as its own process, never concurrently with the
//! reporters. Exits 1 on any uncaught error.

use std::path::Path;

use tracing::{error, info};

use nhl_recap_bot::cache::{NameCache, resolve_batch};
use nhl_recap_bot::error::Result;
use nhl_recap_bot::http::HttpClient;

fn main() {
    if let Err(e) = run() {
        error!(error = %e, "cache update failed");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_tracing(verbose_flag());

    let dir = Path::new(".");
    let mut cache = NameCache::load(dir)?;
    if cache.pending.is_empty() {
        info!("nothing pending");
        return Ok(());
    }
    info!(pending = cache.pending.len(), known = cache.map.len(), "resolving pending players");

    let http = HttpClient::new();
    let outcome = resolve_batch(&http, &cache);
    let resolved = outcome.resolved.len();
    cache.apply(outcome);
    cache.save()?;
    info!(resolved, still_pending = cache.pending.len(), "cache updated");
    Ok(())
}

fn verbose_flag() -> bool {
    std::env::var("DEBUG_VERBOSE").map(|v| v.trim() == "1").unwrap_or(false)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
