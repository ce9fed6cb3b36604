//! Plant-name normalization used before any comparison.
//!
//! Source files abbreviate, punctuate, and capitalize plant names
//! inconsistently ("Mettur TPS - II", "METTUR TPS-2 (EXT)"). Every name on
//! either side of a comparison goes through [`normalize_name`] first so the
//! matcher only ever sees canonical comparison keys.

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)").unwrap());
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Fixed abbreviation rewrites applied after lowercasing. Running them on the
/// lowercased form keeps normalization idempotent.
const SUBSTITUTIONS: [(&str, &str); 3] = [
    ("stps", "tps"),
    ("station", "stn"),
    ("power limited", "power"),
];

/// Reduce a raw plant label to its canonical comparison key.
///
/// Empty or missing input maps to the empty string. The transform order is
/// load-bearing: `&` expansion and parenthesized-noise removal happen before
/// punctuation stripping, abbreviation rewrites before whitespace collapse.
pub fn normalize_name(raw: &str) -> String {
    let s = raw.replace('&', " and ");
    let s = PARENTHESIZED.replace_all(&s, " ");
    let mut s = s.to_lowercase();
    for (from, to) in SUBSTITUTIONS {
        s = s.replace(from, to);
    }
    let s = NON_ALNUM.replace_all(&s, " ");
    let s = WHITESPACE.replace_all(&s, " ");
    s.trim().to_string()
}
