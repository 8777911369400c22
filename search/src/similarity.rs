//! String similarity for fuzzy matching.
//!
//! Similarity is the Ratcliff/Obershelp ratio: find the longest common block,
//! recurse on the pieces to its left and right, and report
//! `2 * matched / (len(a) + len(b))`. Comparison is case-insensitive and
//! counts characters, not bytes.

/// Compute a normalized similarity in `[0, 1]` between two strings.
///
/// Returns `1.0` for strings equal up to case (including two empty strings)
/// and `0.0` for strings with no character in common.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    ratio(&a, &b)
}

/// Similarity of two already lower-cased strings.
pub(crate) fn similarity_lowered(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio(&a, &b)
}

fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(a, b) as f64 / total as f64
}

/// Total size of the matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, k)` with `a[i..i+k] == b[j..j+k]`. Among equally long
/// blocks the one starting earliest in `a`, then earliest in `b`, wins.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);
    // run[j + 1] is the length of the common run ending at a[i - 1], b[blo + j].
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];
    for i in alo..ahi {
        for j in 0..width {
            curr[j + 1] = if a[i] == b[blo + j] { prev[j] + 1 } else { 0 };
            let k = curr[j + 1];
            if k > best.2 {
                best = (i + 1 - k, blo + j + 1 - k, k);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_strings() {
        for s in ["a", "overture", "harvard-lil", "Ünïcødé"] {
            assert!(approx(similarity(s, s), 1.0), "{s}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert!(approx(similarity("Harvard", "hARVARD"), 1.0));
    }

    #[test]
    fn test_disjoint_strings() {
        assert!(approx(similarity("abc", "xyz"), 0.0));
    }

    #[test]
    fn test_typo_similarity() {
        // 7 matched chars out of 15 total.
        assert!(approx(similarity("ovrture", "overture"), 14.0 / 15.0));
    }

    #[test]
    fn test_prefix_similarity() {
        assert!(approx(similarity("harvard", "harvard-lil"), 14.0 / 18.0));
    }

    #[test]
    fn test_blocks_do_not_cross() {
        // "ab" matches first; the trailing "a" cannot pair with the leading "a".
        assert!(approx(similarity("abxa", "ab"), 4.0 / 6.0));
        assert!(approx(similarity("ba", "ab"), 2.0 / 4.0));
    }

    #[test]
    fn test_empty_strings() {
        assert!(approx(similarity("", ""), 1.0));
        assert!(approx(similarity("abc", ""), 0.0));
    }

    #[test]
    fn test_symmetric_on_simple_inputs() {
        let pairs = [("climte", "climate"), ("gov", "gov-data"), ("maxar", "harvard")];
        for (a, b) in pairs {
            assert!(approx(similarity(a, b), similarity(b, a)), "{a} vs {b}");
        }
    }
}
