//! String distance helpers used by the fuzzy chord search and the
//! dictionary suggestions.
use std::cmp::min;
use std::collections::HashMap;

/// Levenshtein distance between `a` and `b`.
///
/// The longer string always drives the rows, so the result does not depend
/// on argument order, and the rolling row is sized by the shorter one.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (rows, cols) = if a.len() < b.len() { (&b, &a) } else { (&a, &b) };

    if cols.is_empty() {
        return rows.len();
    }

    let mut prev: Vec<usize> = (0..=cols.len()).collect();
    let mut curr = vec![0; cols.len() + 1];

    for (i, rc) in rows.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cc) in cols.iter().enumerate() {
            let substitution = prev[j] + usize::from(rc != cc);
            let insertion = prev[j + 1] + 1;
            let deletion = curr[j] + 1;
            curr[j + 1] = min(min(insertion, deletion), substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[cols.len()]
}

/// Whether every char of `needle` appears in `haystack` in order.
///
/// Greedy left-to-right with a single forward cursor over `haystack`.
pub fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut rest = haystack.chars();
    needle.chars().all(|c| rest.any(|h| h == c))
}

/// Ratcliff/Obershelp similarity of `a` to `b`, in `0.0..=1.0`.
///
/// `2 * M / T`, where `M` counts the chars in matching blocks found by
/// repeatedly taking the longest common substring and recursing on both
/// sides, and `T` is the combined length. Two empty strings score `1.0`.
/// Ties between equally long blocks go to the earliest position in `a`, so
/// the score is not always symmetric.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = BlockMatcher::new(&a, &b).matched_chars();
    2.0 * matched as f64 / total as f64
}

/// Long `b` sequences drop chars that occur in more than 1% of positions
/// from the index.
const POPULAR_MIN_LEN: usize = 200;

struct BlockMatcher<'s> {
    a: &'s [char],
    b: &'s [char],
    b_index: HashMap<char, Vec<usize>>,
}

impl<'s> BlockMatcher<'s> {
    fn new(a: &'s [char], b: &'s [char]) -> Self {
        let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b_index.entry(c).or_default().push(j);
        }
        if b.len() >= POPULAR_MIN_LEN {
            let popular = b.len() / 100 + 1;
            b_index.retain(|_, positions| positions.len() <= popular);
        }
        Self { a, b, b_index }
    }

    fn matched_chars(&self) -> usize {
        let mut matched = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
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

    /// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as
    /// `(start in a, start in b, length)`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
        // length of the match ending at b[j] for the previous row of a
        let mut run: HashMap<usize, usize> = HashMap::new();

        for (i, c) in self.a.iter().enumerate().take(ahi).skip(alo) {
            let mut next_run = HashMap::new();
            for &j in self.b_index.get(c).map(Vec::as_slice).unwrap_or_default() {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j.checked_sub(1).and_then(|p| run.get(&p)).copied().unwrap_or(0) + 1;
                next_run.insert(j, k);
                if k > best_k {
                    (best_i, best_j, best_k) = (i + 1 - k, j + 1 - k, k);
                }
            }
            run = next_run;
        }

        // popular chars are missing from the index; grow the block across them
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_k += 1;
        }
        while best_i + best_k < ahi && best_j + best_k < bhi && self.a[best_i + best_k] == self.b[best_j + best_k] {
            best_k += 1;
        }
        (best_i, best_j, best_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basic() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("dk", ""), 2);
        assert_eq!(distance("", "kow"), 3);
        assert_eq!(distance("dp", "dk"), 1);
        assert_eq!(distance("dp", "dw"), 1);
        assert_eq!(distance("dp", "kow"), 3);
        assert_eq!(distance("kitten", "sitting"), 3);
    }

    #[test]
    fn distance_is_symmetric_on_uneven_lengths() {
        assert_eq!(distance("d", "dkopqw"), 5);
        assert_eq!(distance("dkopqw", "d"), 5);
        assert_eq!(distance("flaw", "lawn"), distance("lawn", "flaw"));
    }

    #[test]
    fn sequence_ratio_blocks() {
        assert_eq!(sequence_ratio("", ""), 1.0);
        assert_eq!(sequence_ratio("abc", ""), 0.0);
        assert_eq!(sequence_ratio("hello", "hello"), 1.0);
        // "rld" then "w": 2 * 4 / 9
        assert_eq!(sequence_ratio("world", "wrld"), 8.0 / 9.0);
        // "w", "r", "d"
        assert_eq!(sequence_ratio("word", "wrld"), 0.75);
        // "ello"
        assert_eq!(sequence_ratio("yellow", "hello"), 8.0 / 11.0);
        assert_eq!(sequence_ratio("ab", "a"), 2.0 / 3.0);
        assert_eq!(sequence_ratio("b", "a"), 0.0);
    }

    #[test]
    fn sequence_ratio_is_order_sensitive() {
        // the first longest block in `a` decides what is left to match
        assert_eq!(sequence_ratio("tide", "diet"), 0.25);
        assert_eq!(sequence_ratio("diet", "tide"), 0.5);
    }

    #[test]
    fn sequence_ratio_long_inputs_skip_popular_chars() {
        let run = "a".repeat(250);
        // identical inputs still match by growing the empty block forward
        assert_eq!(sequence_ratio(&run, &run), 1.0);
        // nothing indexed and no shared first char, so no block at all
        assert_eq!(sequence_ratio(&format!("b{run}"), &run), 0.0);
        // short inputs index every char
        assert_eq!(sequence_ratio("baaa", "aaa"), 6.0 / 7.0);
    }

    #[test]
    fn subsequence_cases() {
        assert!(is_subsequence("", ""));
        assert!(is_subsequence("", "dkw"));
        assert!(is_subsequence("dk", "dwk"));
        assert!(!is_subsequence("kd", "dwk"));
        assert!(is_subsequence("dkw", "dkw"));
        assert!(!is_subsequence("dd", "dk"));
        assert!(is_subsequence("dd", "dkd"));
        assert!(!is_subsequence("d", ""));
    }
}
