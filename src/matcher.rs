//! Three-tier plant-name resolution against a column of free-text row labels.
//!
//! Tier order is a tie-break policy, not an optimization: an exact normalized
//! hit always beats a substring hit, which always beats the best fuzzy score.
//! Tiers 1–2 take the first qualifying row in label order; tier 3 scans every
//! row and keeps the single best score, accepted only at or above the
//! threshold.

use crate::normalize::normalize_name;

/// Default minimum similarity for a fuzzy match. Empirically tuned against
/// the plant-name corpus; change only with equivalent validation.
pub const MIN_RATIO: f64 = 0.55;

/// Find the row whose label resolves to `target`, or `None`.
///
/// Labels are scanned in order; malformed or empty cells participate as empty
/// strings and can never match.
pub fn find_best_match_index(labels: &[String], target: &str, min_ratio: f64) -> Option<usize> {
    if labels.is_empty() {
        return None;
    }
    let n_target = normalize_name(target);
    let candidates: Vec<String> = labels.iter().map(|l| normalize_name(l)).collect();

    // exact
    for (i, cand) in candidates.iter().enumerate() {
        if !cand.is_empty() && *cand == n_target {
            return Some(i);
        }
    }

    // substring, both directions
    for (i, cand) in candidates.iter().enumerate() {
        if cand.is_empty() {
            continue;
        }
        if !n_target.is_empty() && cand.contains(n_target.as_str()) {
            return Some(i);
        }
        if n_target.contains(cand.as_str()) {
            return Some(i);
        }
    }

    // fuzzy: best score across the whole scan, not first-above-threshold
    let mut best_ratio = 0.0;
    let mut best_idx = None;
    for (i, cand) in candidates.iter().enumerate() {
        if cand.is_empty() {
            continue;
        }
        let ratio = similarity_ratio(&n_target, cand);
        if ratio > best_ratio {
            best_ratio = ratio;
            best_idx = Some(i);
        }
    }
    if best_ratio >= min_ratio {
        best_idx
    } else {
        None
    }
}

/// Sequence similarity in [0, 1]: twice the total length of the matching
/// blocks over the combined length. Equivalent to Python's
/// `difflib.SequenceMatcher.ratio()` without the junk heuristic (which never
/// activates on strings this short).
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_len(&a, 0, a.len(), &b, 0, b.len());
    2.0 * matches as f64 / total as f64
}

/// Total matched length: find the longest matching block in the window, then
/// recurse on the pieces to its left and right.
fn matching_len(a: &[char], alo: usize, ahi: usize, b: &[char], blo: usize, bhi: usize) -> usize {
    let (i, j, k) = longest_match(a, alo, ahi, b, blo, bhi);
    if k == 0 {
        return 0;
    }
    let mut total = k;
    total += matching_len(a, alo, i, b, blo, j);
    total += matching_len(a, i + k, ahi, b, j + k, bhi);
    total
}

/// Longest contiguous matching block within `a[alo..ahi]` and `b[blo..bhi]`,
/// returned as (start in a, start in b, length). Ties resolve to the earliest
/// block in `a`, then in `b`, as difflib does.
fn longest_match(
    a: &[char],
    alo: usize,
    ahi: usize,
    b: &[char],
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0usize);
    // j2len[j] = length of the longest match ending at a[i], b[j]
    let mut j2len: Vec<usize> = vec![0; bhi.saturating_sub(blo)];
    for i in alo..ahi {
        let mut new_j2len = vec![0; bhi - blo];
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = if j > blo { j2len[j - blo - 1] } else { 0 } + 1;
                new_j2len[j - blo] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        j2len = new_j2len;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_identical() {
        assert_eq!(similarity_ratio("panipat tps", "panipat tps"), 1.0);
    }

    #[test]
    fn test_ratio_disjoint() {
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_ratio_empty_both() {
        assert_eq!(similarity_ratio("", ""), 1.0);
    }

    #[test]
    fn test_ratio_known_difflib_value() {
        // difflib.SequenceMatcher(None, "abcd", "bcde").ratio() == 0.75
        assert_eq!(similarity_ratio("abcd", "bcde"), 0.75);
    }

    #[test]
    fn test_longest_match_prefers_earliest() {
        // Two equal-length blocks; difflib reports the earliest in `a`.
        let a: Vec<char> = "abxab".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        let (i, j, k) = longest_match(&a, 0, a.len(), &b, 0, b.len());
        assert_eq!((i, j, k), (0, 0, 2));
    }
}
