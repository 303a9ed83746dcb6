//! Best-effort extraction of today's entry from the hours page.
//!
//! The page is an uncontrolled external document. The parser expects one
//! element per day carrying `data-date="YYYY-MM-DD"`; inside it, an element
//! whose class list contains `hours`, a text fragment naming the fireworks or
//! night show, and optionally an element classed `notice` or `note`.
//! Anything else is a [`FetchError`] and the caller falls back.

use chrono::NaiveDate;
use parkguide_core::error::FetchError;
use parkguide_core::park_info::{NO_NOTICES, ParkInfo};
use regex_lite::Regex;
use std::sync::LazyLock;

/// Show names that identify the fireworks line when the word "fireworks"
/// itself is absent.
const SHOW_KEYWORDS: &[&str] = &["illuminations", "ignite the dream", "night show"];

static CLASSED_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class\s*=\s*"([^"]*)"[^>]*>([^<]*)<"#).expect("classed-text pattern is valid")
});

static TEXT_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">([^<>]+)<").expect("text-fragment pattern is valid"));

/// Parse the entry for `today` out of `html`.
pub fn parse_park_info(html: &str, today: NaiveDate) -> Result<ParkInfo, FetchError> {
    let date = today.format("%Y-%m-%d").to_string();
    let entry = day_entry(html, &date).ok_or_else(|| FetchError::EntryNotFound(date.clone()))?;

    let hours = classed_text(entry, &["hours"]).ok_or(FetchError::MissingField("hours"))?;
    let fireworks = fireworks_line(entry).ok_or(FetchError::MissingField("fireworks"))?;
    let notes = classed_text(entry, &["notice", "note"]).unwrap_or_else(|| NO_NOTICES.to_string());

    Ok(ParkInfo::live(hours, fireworks, notes))
}

/// The slice of markup belonging to one day: from its date marker up to the
/// next date marker or the end of the document.
fn day_entry<'a>(html: &'a str, date: &str) -> Option<&'a str> {
    let marker = format!(r#"data-date="{date}""#);
    let start = html.find(&marker)?;
    let rest = &html[start + marker.len()..];
    let end = rest.find("data-date=").unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Text of the first element whose class list contains any of `classes`.
fn classed_text(entry: &str, classes: &[&str]) -> Option<String> {
    CLASSED_TEXT
        .captures_iter(entry)
        .filter(|caps| {
            caps[1]
                .split_whitespace()
                .any(|class| classes.contains(&class))
        })
        .map(|caps| clean_text(&caps[2]))
        .find(|text| !text.is_empty())
}

/// First text fragment mentioning fireworks or a known night show.
fn fireworks_line(entry: &str) -> Option<String> {
    TEXT_FRAGMENT
        .captures_iter(entry)
        .map(|caps| clean_text(&caps[1]))
        .find(|text| {
            let lower = text.to_lowercase();
            lower.contains("fireworks") || SHOW_KEYWORDS.iter().any(|k| lower.contains(k))
        })
}

/// Decode the handful of entities the page uses and collapse whitespace.
fn clean_text(raw: &str) -> String {
    let decoded = raw
        .replace("&nbsp;", " ")
        .replace("&ndash;", "–")
        .replace("&#8211;", "–")
        .replace("&mdash;", "—")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
