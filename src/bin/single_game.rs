//! Single-game reporter: resolve one game by GAME_PK or GAME_QUERY, render
//! it with per-round shootout detail, and post (or preview with DRY_RUN=1).

use tracing::{error, info};

use nhl_recap_bot::config::Config;
use nhl_recap_bot::error::{BotError, Result};
use nhl_recap_bot::http::HttpClient;
use nhl_recap_bot::names::SportsRuResolver;
use nhl_recap_bot::nhl::NhlApi;
use nhl_recap_bot::report::{GameSelector, build_single, ensure_final, select_game};
use nhl_recap_bot::telegram::Telegram;

fn main() {
    if let Err(e) = run() {
        error!(error = %e, "single game report failed");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_tracing(verbose_flag());
    let config = Config::from_env()?;

    let selector = GameSelector::from_options(config.game_pk, config.game_query.as_deref())?;
    let telegram = if config.dry_run {
        None
    } else {
        let (token, chat_id) = config.telegram()?;
        Some(Telegram::new(token, chat_id))
    };

    let http = HttpClient::new();
    let api = NhlApi::new(http.clone());
    let resolver = SportsRuResolver::new(http);

    let game = select_game(&api, &selector)?
        .ok_or_else(|| BotError::Usage(format!("no game matches {:?}", selector)))?;
    ensure_final(&game)?;
    info!(game_id = game.id, home = %game.home.abbrev, away = %game.away.abbrev, "rendering game");

    let block = build_single(&api, &resolver, &game)?;
    match telegram {
        Some(telegram) => telegram.send(&block)?,
        None => println!("{}", block),
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
