//! Russian surname resolution against sports.ru match pages. Best-effort by
//! design: any miss returns an empty map and the renderer keeps English
//! surnames. The trait seam exists so tests inject deterministic mappings.

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::http::HttpClient;
use crate::model::team::TeamRef;
use crate::text::{last_name_token, normalize_key, slugify};

const SPORTS_RU: &str = "https://www.sports.ru";
const POLITE_SLEEP: Duration = Duration::from_millis(150);

/// English last name → Russian last name, derived per match.
pub type NameMap = HashMap<String, String>;

pub trait NameResolver {
    fn resolve(&self, home: &TeamRef, away: &TeamRef) -> NameMap;
}

/// Team-name strings whose slug differs from plain slugification, keyed by
/// normalized name. The Utah franchise is listed under both of its eras.
static SLUG_OVERRIDES: &[(&str, &str)] = &[
    ("utah mammoth", "utah-mammoth"),
    ("utah hockey club", "utah-hockey-club"),
    ("new york rangers", "new-york-rangers"),
    ("new york islanders", "new-york-islanders"),
    ("st louis blues", "st-louis-blues"),
    ("tampa bay lightning", "tampa-bay-lightning"),
    ("tampa bay", "tampa-bay"),
    ("new york", "new-york"),
    ("st louis", "st-louis"),
    ("los angeles", "los-angeles"),
    ("new jersey", "new-jersey"),
    ("san jose", "san-jose"),
];

/// Extra historical slugs to try per franchise, beyond what the current
/// name produces.
static EXTRA_SLUGS: &[(&str, &str)] = &[("UTA", "utah-hockey-club")];

/// Override-table slug for a name, falling back to plain slugification.
/// Idempotent: feeding a produced slug back in returns the same slug.
pub fn override_slug(name: &str) -> String {
    let key = normalize_key(name);
    for (k, slug) in SLUG_OVERRIDES {
        if *k == key {
            return (*slug).to_string();
        }
    }
    slugify(name)
}

/// Candidate URL slugs for one team, in priority order, deduplicated.
pub fn slug_candidates(team: &TeamRef) -> Vec<String> {
    let place = team.place_name().unwrap_or("");
    let nick = team.nick_name().unwrap_or("");
    let full = format!("{} {}", place, nick);

    let mut out: Vec<String> = Vec::new();
    let mut push = |slug: String| {
        if !slug.is_empty() && !out.contains(&slug) {
            out.push(slug);
        }
    };

    push(override_slug(&full));
    push(slugify(&full));
    push(slugify(nick));
    push(slugify(place));
    push(override_slug(place));
    for (abbrev, slug) in EXTRA_SLUGS {
        if team.abbrev.eq_ignore_ascii_case(abbrev) {
            push((*slug).to_string());
        }
    }
    out
}

/// The cross-product of home × away slugs, four URL patterns per pair,
/// first-seen order preserved.
pub fn match_urls(home: &[String], away: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for h in home {
        for a in away {
            for url in [
                format!("{}/hockey/match/{}-vs-{}/stat/", SPORTS_RU, h, a),
                format!("{}/hockey/match/{}-vs-{}/stat/", SPORTS_RU, a, h),
                format!("{}/hockey/match/{}-vs-{}/", SPORTS_RU, h, a),
                format!("{}/hockey/match/{}-vs-{}/", SPORTS_RU, a, h),
            ] {
                if !out.contains(&url) {
                    out.push(url);
                }
            }
        }
    }
    out
}

/// Pulls every player anchor off a match page. Anchor text is Russian
/// ("Никита Кучеров" → "Кучеров"); the English form comes from the anchor
/// attributes or, failing that, from the href slug.
pub fn parse_player_map(html: &str) -> NameMap {
    let doc = Html::parse_document(html);
    let anchors = Selector::parse("a").unwrap_or_else(|_| unreachable!());

    let mut map = NameMap::new();
    for a in doc.select(&anchors) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        if !href.contains("/hockey/players/") && !href.contains("/hockey/player/") {
            continue;
        }

        let text = a.text().collect::<String>();
        let Some(ru_last) = text.split_whitespace().last().map(str::to_string) else {
            continue;
        };

        let english = ["title", "data-name", "data-player-name"]
            .iter()
            .find_map(|attr| {
                a.value()
                    .attr(attr)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .or_else(|| english_from_href(href));
        let Some(en_last) = english.as_deref().and_then(last_name_token) else {
            continue;
        };

        map.entry(en_last).or_insert(ru_last);
    }
    map
}

/// First path segment after the players prefix, dashes to spaces.
fn english_from_href(href: &str) -> Option<String> {
    let rest = href
        .split_once("/hockey/players/")
        .or_else(|| href.split_once("/hockey/player/"))
        .map(|(_, r)| r)?;
    let segment = rest.split('/').next()?.trim();
    if segment.is_empty() {
        return None;
    }
    Some(segment.replace('-', " "))
}

#[derive(Debug, Clone)]
pub struct SportsRuResolver {
    http: HttpClient,
}

impl SportsRuResolver {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

impl NameResolver for SportsRuResolver {
    fn resolve(&self, home: &TeamRef, away: &TeamRef) -> NameMap {
        let urls = match_urls(&slug_candidates(home), &slug_candidates(away));
        for (i, url) in urls.iter().enumerate() {
            if i > 0 {
                thread::sleep(POLITE_SLEEP);
            }
            let page = match self.http.get_page(url) {
                Ok(Some(page)) => page,
                Ok(None) => continue,
                Err(e) => {
                    debug!(url, error = %e, "match page fetch failed");
                    continue;
                }
            };
            let map = parse_player_map(&page.body);
            if !map.is_empty() {
                info!(url, names = map.len(), "resolved russian surnames");
                return map;
            }
        }
        debug!(home = %home.abbrev, away = %away.abbrev, "no match page yielded names");
        NameMap::new()
    }
}
