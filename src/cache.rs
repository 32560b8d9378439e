//! Offline resolver for the persistent name cache. `ru_pending.json` holds
//! players whose Russian initial+surname form is not yet known;
//! `ru_map.json` maps player id → `"И. Фамилия"`. One batch pass resolves
//! what it can against player profile pages, then both files are rewritten
//! atomically. The reporter never touches these files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::http::HttpClient;
use crate::text::{slugify, title_case};

pub const MAP_FILE: &str = "ru_map.json";
pub const PENDING_FILE: &str = "ru_pending.json";

const SPORTS_RU: &str = "https://www.sports.ru";
const PROFILE_PREFIXES: [&str; 2] = ["/hockey/person/", "/hockey/player/"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPlayer {
    pub id: i64,
    pub first: String,
    pub last: String,
}

/// The two cache files, loaded together. Map keys are player ids rendered
/// as JSON object keys (strings).
#[derive(Debug, Clone, Default)]
pub struct NameCache {
    pub map: BTreeMap<String, String>,
    pub pending: Vec<PendingPlayer>,
    dir: PathBuf,
}

impl NameCache {
    /// Load both files from `dir`; a missing file is an empty collection.
    pub fn load(dir: &Path) -> Result<Self> {
        let map = match fs::read_to_string(dir.join(MAP_FILE)) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        let pending = match fs::read_to_string(dir.join(PENDING_FILE)) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            map,
            pending,
            dir: dir.to_path_buf(),
        })
    }

    /// Fold a batch outcome in: resolved ids move to the map and leave
    /// pending, whatever is still unresolved stays queued.
    pub fn apply(&mut self, outcome: BatchOutcome) {
        for (id, name) in outcome.resolved {
            self.map.insert(id.to_string(), name);
        }
        self.pending = outcome
            .still_pending
            .into_iter()
            .filter(|p| !self.map.contains_key(&p.id.to_string()))
            .collect();
    }

    /// Rewrite both files via tmp-then-rename.
    pub fn save(&self) -> Result<()> {
        write_atomic(
            &self.dir.join(MAP_FILE),
            &serde_json::to_string_pretty(&self.map)?,
        )?;
        write_atomic(
            &self.dir.join(PENDING_FILE),
            &serde_json::to_string_pretty(&self.pending)?,
        )?;
        Ok(())
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Diff produced by one resolve pass; persistence happens afterwards in a
/// single atomic step.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub resolved: BTreeMap<i64, String>,
    pub still_pending: Vec<PendingPlayer>,
}

/// Resolve every pending player not already in the map. Three stages per
/// player: direct profile slug, site search, and finally a transliterated
/// fallback that always succeeds.
pub fn resolve_batch(http: &HttpClient, cache: &NameCache) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for player in &cache.pending {
        if cache.map.contains_key(&player.id.to_string()) {
            continue;
        }
        let name = resolve_player(http, player);
        info!(id = player.id, last = %player.last, resolved = %name, "resolved pending player");
        outcome.resolved.insert(player.id, name);
    }
    outcome
}

fn resolve_player(http: &HttpClient, player: &PendingPlayer) -> String {
    if let Some(name) = profile_lookup(http, player) {
        return name;
    }
    if let Some(name) = search_lookup(http, player) {
        return name;
    }
    fallback_name(&player.first, &player.last)
}

/// Try `/hockey/person/{slug}/` then `/hockey/player/{slug}/`. A page only
/// counts when the final redirect URL stayed within the profile prefixes,
/// otherwise the site bounced us to something unrelated.
fn profile_lookup(http: &HttpClient, player: &PendingPlayer) -> Option<String> {
    let slug = slugify(&format!("{} {}", player.first, player.last));
    if slug.is_empty() {
        return None;
    }
    for prefix in PROFILE_PREFIXES {
        let url = format!("{}{}{}/", SPORTS_RU, prefix, slug);
        match http.get_page(&url) {
            Ok(Some(page)) => {
                if !is_profile_url(&page.final_url) {
                    debug!(url, final_url = %page.final_url, "redirected off profile, ignoring");
                    continue;
                }
                if let Some(name) = extract_profile_name(&page.body) {
                    return Some(name);
                }
            }
            Ok(None) => {}
            Err(e) => warn!(url, error = %e, "profile fetch failed"),
        }
    }
    None
}

fn search_lookup(http: &HttpClient, player: &PendingPlayer) -> Option<String> {
    let query = format!("{} {}", player.first, player.last);
    let url = format!("{}/search/", SPORTS_RU);
    let page = http.get_page_query(&url, &[("q", query.as_str())]).ok()??;
    let profile_href = first_profile_href(&page.body)?;
    let profile_url = if profile_href.starts_with("http") {
        profile_href
    } else {
        format!("{}{}", SPORTS_RU, profile_href)
    };
    let profile = http.get_page(&profile_url).ok()??;
    if !is_profile_url(&profile.final_url) {
        return None;
    }
    extract_profile_name(&profile.body)
}

fn is_profile_url(url: &str) -> bool {
    PROFILE_PREFIXES.iter().any(|p| url.contains(p))
}

fn first_profile_href(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let anchors = Selector::parse("a").unwrap_or_else(|_| unreachable!());
    doc.select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| PROFILE_PREFIXES.iter().any(|p| href.contains(p)))
        .map(str::to_string)
}

/// First `h1`/`h2` on a profile page carries the Russian rendering of the
/// player's name; compose `"{FirstLetter}. {LastToken}"` from it.
pub fn extract_profile_name(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let headings = Selector::parse("h1, h2").unwrap_or_else(|_| unreachable!());
    let heading = doc.select(&headings).next()?;
    let text = heading.text().collect::<String>();
    let mut tokens = text.split_whitespace();
    let first = tokens.next()?;
    let last = tokens.last().unwrap_or(first);
    let initial = first.chars().next()?;
    Some(format!("{}. {}", initial, last))
}

/// Latin first-letter → Cyrillic initial, for the fallback composition.
static LATIN_INITIALS: &[(char, char)] = &[
    ('A', 'А'),
    ('B', 'Б'),
    ('C', 'К'),
    ('D', 'Д'),
    ('E', 'Э'),
    ('F', 'Ф'),
    ('G', 'Г'),
    ('H', 'Х'),
    ('I', 'И'),
    ('J', 'Д'),
    ('K', 'К'),
    ('L', 'Л'),
    ('M', 'М'),
    ('N', 'Н'),
    ('O', 'О'),
    ('P', 'П'),
    ('Q', 'К'),
    ('R', 'Р'),
    ('S', 'С'),
    ('T', 'Т'),
    ('U', 'У'),
    ('V', 'В'),
    ('W', 'У'),
    ('X', 'К'),
    ('Y', 'Й'),
    ('Z', 'З'),
];

/// Surnames whose Cyrillic form is established usage rather than anything a
/// transliterator would produce.
static SURNAME_EXCEPTIONS: &[(&str, &str)] = &[
    ("Ovechkin", "Овечкин"),
    ("Malkin", "Малкин"),
    ("Kucherov", "Кучеров"),
    ("Panarin", "Панарин"),
    ("Kaprizov", "Капризов"),
    ("Vasilevskiy", "Василевский"),
    ("Bobrovsky", "Бобровский"),
    ("Svechnikov", "Свечников"),
    ("Tarasenko", "Тарасенко"),
    ("Kuznetsov", "Кузнецов"),
    ("Sergachev", "Сергачёв"),
    ("Shesterkin", "Шестёркин"),
    ("Sorokin", "Сорокин"),
    ("Zadorov", "Задоров"),
    ("Orlov", "Орлов"),
    ("Provorov", "Проворов"),
    ("Demidov", "Демидов"),
    ("Michkov", "Мичков"),
];

/// Always-succeeding composition for players the site does not know:
/// Cyrillic initial from the fixed table (or the uppercased Latin letter),
/// surname from the exceptions dictionary or passed through as-is.
pub fn fallback_name(first: &str, last: &str) -> String {
    let initial = first
        .chars()
        .next()
        .map(|c| {
            let upper = c.to_ascii_uppercase();
            LATIN_INITIALS
                .iter()
                .find(|(latin, _)| *latin == upper)
                .map(|(_, cyr)| *cyr)
                .unwrap_or(upper)
        })
        .unwrap_or('?');
    let surname = title_case(last);
    let surname = SURNAME_EXCEPTIONS
        .iter()
        .find(|(en, _)| *en == surname)
        .map(|(_, ru)| (*ru).to_string())
        .unwrap_or(surname);
    format!("{}. {}", initial, surname)
}
