//! Daily reporter: render every final of the configured local day and post
//! the parts to Telegram (or print them with DRY_RUN=1). Exits 0 even when
//! the day had no games — a message is still sent.

use tracing::{error, info};

use nhl_recap_bot::config::Config;
use nhl_recap_bot::error::Result;
use nhl_recap_bot::http::HttpClient;
use nhl_recap_bot::names::SportsRuResolver;
use nhl_recap_bot::nhl::NhlApi;
use nhl_recap_bot::render::continuation_prefix;
use nhl_recap_bot::report::build_day;
use nhl_recap_bot::telegram::Telegram;

fn main() {
    if let Err(e) = run() {
        error!(error = %e, "daily report failed");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_tracing(verbose_flag());
    let config = Config::from_env()?;

    let telegram = if config.dry_run {
        None
    } else {
        let (token, chat_id) = config.telegram()?;
        Some(Telegram::new(token, chat_id))
    };

    let http = HttpClient::new();
    let api = NhlApi::new(http.clone());
    let resolver = SportsRuResolver::new(http);

    let date = config.report_date();
    info!(%date, tz = %config.tz, "building day report");
    let report = build_day(&api, &resolver, date, config.tz)?;

    match telegram {
        Some(telegram) => telegram.send_parts(&report.parts)?,
        None => {
            let total = report.parts.len();
            for (i, part) in report.parts.iter().enumerate() {
                if i > 0 {
                    println!("{}", continuation_prefix(i + 1, total));
                }
                println!("{}", part);
            }
        }
    }
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
