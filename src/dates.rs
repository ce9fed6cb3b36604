//! Report-date recovery from unstructured header cells and file names.
//!
//! Daily report files rarely agree on where (or how) they state their date:
//! some put it in A2 or A3, some bury it in a merged title cell, some only
//! carry a `DAY 14` marker, and some encode nothing beyond a day number in
//! the file name. Extraction walks a fixed degradation ladder and never
//! fails; "no date" is an expected outcome and the caller falls back to the
//! file name as a non-sortable label.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ExtractedDate;

/// Date-bearing substrings, in priority order. Day-first numeric forms come
/// before ISO and month-name forms.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
        r"(\d{4}-\d{2}-\d{2})",
        r"(\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})",
        r"([A-Za-z]{3,9}\s+\d{1,2},?\s+\d{4})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Concrete formats tried against each pattern hit, first success wins.
/// Day/month order outranks month/day.
const DATE_FORMATS: [&str; 8] = [
    "%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y", "%d-%m-%y", "%Y-%m-%d", "%d %b %Y", "%d %B %Y", "%B %d %Y",
];

static DAY_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)DAY\s*(\d+)").unwrap());
/// First 1–2 digit run not embedded in a longer number ("Gen_07" → 7, but
/// nothing inside "2024").
static STANDALONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\D)(\d{1,2})(?:\D|$)").unwrap());

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Resolve an English month name (full or 3+ letter prefix, any case) to its
/// 1-based number.
pub fn month_number(name: &str) -> Option<u32> {
    let lower = name.trim().to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|m| *m == lower || m.starts_with(&lower))
        .map(|i| i as u32 + 1)
}

/// Parse a date (or a bare `DAY n` marker) out of one candidate string.
pub fn parse_date_string(s: &str) -> Option<ExtractedDate> {
    let s = s.trim().trim_matches(|c| c == '(' || c == ')' || c == ' ');
    if s.is_empty() {
        return None;
    }
    let s = s.replace('.', "");
    for pattern in DATE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&s) {
            let candidate = &caps[1];
            for fmt in DATE_FORMATS {
                if let Ok(d) = NaiveDate::parse_from_str(candidate, fmt) {
                    // chrono's %Y accepts bare two-digit years; those belong
                    // to the %y formats and their century pivot instead
                    if d.year() >= 1000 {
                        return Some(ExtractedDate::Full(d));
                    }
                }
            }
        }
    }
    if let Some(caps) = DAY_TOKEN.captures(&s) {
        if let Ok(day) = caps[1].parse::<u32>() {
            return Some(ExtractedDate::DayOfMonth(day));
        }
    }
    None
}

/// Run the full degradation ladder over the candidate column-A cells of a
/// report file plus its display name (file stem).
///
/// Steps, each tried only when the previous found nothing:
/// 1. all candidate cells concatenated into one search string
/// 2. each candidate cell individually
/// 3. a `DAY n` token anywhere in the display name
/// 4. date patterns against the display name
/// 5. first standalone 1–2 digit number in the display name, combined with
///    the fallback month/year (dropped again if the combination is not a
///    real date)
pub fn extract_date(
    candidate_cells: &[String],
    display_name: &str,
    fallback_month: u32,
    fallback_year: i32,
) -> Option<ExtractedDate> {
    let combined = candidate_cells
        .iter()
        .filter(|c| !c.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(ExtractedDate::Full(d)) = parse_date_string(&combined) {
        return Some(ExtractedDate::Full(d));
    }

    for cell in candidate_cells {
        if let Some(found) = parse_date_string(cell) {
            return Some(found);
        }
    }

    if let Some(found) = parse_date_string(display_name) {
        return Some(found);
    }

    if let Some(caps) = DAY_TOKEN.captures(display_name) {
        if let Ok(day) = caps[1].parse::<u32>() {
            return Some(ExtractedDate::DayOfMonth(day));
        }
    }

    if let Some(caps) = STANDALONE_NUMBER.captures(display_name) {
        if let Ok(day) = caps[1].parse::<u32>() {
            if let Some(d) = NaiveDate::from_ymd_opt(fallback_year, fallback_month, day) {
                return Some(ExtractedDate::Full(d));
            }
        }
    }

    None
}

/// Render an extraction result as (label, sortable date).
///
/// A day-of-month placeholder resolves through the fallback month/year when
/// that forms a real date, else keeps a `DAY n` label with no sort order.
/// `None` input yields `(None, None)`; the caller substitutes the file stem.
pub fn format_date_label(
    raw: Option<ExtractedDate>,
    fallback_month: u32,
    fallback_year: i32,
) -> (Option<String>, Option<NaiveDate>) {
    match raw {
        Some(ExtractedDate::Full(d)) => (Some(d.format("%d/%m/%Y").to_string()), Some(d)),
        Some(ExtractedDate::DayOfMonth(day)) => {
            match NaiveDate::from_ymd_opt(fallback_year, fallback_month, day) {
                Some(d) => (Some(d.format("%d/%m/%Y").to_string()), Some(d)),
                None => (Some(format!("DAY {}", day)), None),
            }
        }
        None => (None, None),
    }
}
