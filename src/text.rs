//! Small text helpers shared by the normalizer, the name resolver and the
//! renderer: diacritic folding, slug and key normalization, clock formats.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strip diacritics by NFKD-decomposing and dropping combining marks.
/// `"Pastrňák"` becomes `"Pastrnak"`.
pub fn ascii_fold(s: &str) -> String {
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// First letter uppercased, the rest lowercased.
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// The canonical surname key used everywhere names are matched: fold the
/// diacritics, take the last whitespace token, title-case it.
pub fn last_name_token(name: &str) -> Option<String> {
    let folded = ascii_fold(name);
    let token = folded.split_whitespace().last()?;
    let cleaned: String = token.chars().filter(|c| c.is_alphanumeric()).collect();
    if cleaned.is_empty() {
        return None;
    }
    Some(title_case(&cleaned))
}

/// Lowercase URL slug: folded, non-alphanumeric runs become single dashes.
pub fn slugify(s: &str) -> String {
    let folded = ascii_fold(s).to_lowercase();
    let mut out = String::with_capacity(folded.len());
    let mut pending_dash = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Lookup key for the slug override table: folded, lowercased, punctuation
/// collapsed to single spaces. `"St. Louis Blues"` → `"st louis blues"`.
pub fn normalize_key(s: &str) -> String {
    let folded = ascii_fold(s).to_lowercase();
    folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `MM:SS` as published in goal lines: colon swapped for a dot.
pub fn display_clock(clock: &str) -> String {
    clock.replace(':', ".")
}

/// Elapsed seconds for chronological sorting. Malformed clocks sort first.
pub fn clock_seconds(clock: &str) -> u32 {
    let Some((m, s)) = clock.split_once(':') else {
        return 0;
    };
    let minutes = m.trim().parse::<u32>().unwrap_or(0);
    let seconds = s.trim().parse::<u32>().unwrap_or(0);
    minutes * 60 + seconds
}
