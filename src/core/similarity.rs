//! # Similarity
//!
//! Trait and implementations for scoring how alike two names are.
//!
//! Scores are normalized to `0..=100`, 100 meaning identical. Name lookups
//! compare the best score against a threshold before committing to a match.
//!
//! Similarity functions are pluggable - use whichever fits your use case.

use std::fmt;

/// Best score below this is treated as "no match"
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 70;

/// Trait for scoring string similarity
pub trait Similarity: Send + Sync + fmt::Debug {
    /// Score in `0..=100`
    fn score(&self, a: &str, b: &str) -> u8;

    /// Name of this similarity function (for debugging/config)
    fn name(&self) -> &'static str;
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

/// Indel ratio
///
/// `100 * (1 - d / (|a| + |b|))` where `d` is the insert/delete edit
/// distance, equivalently `200 * LCS / (|a| + |b|)`, rounded to the nearest
/// integer with halves going to the even neighbour (72.5 scores 72, 73.5
/// scores 74). Lengths are counted in chars. An empty operand scores 0.
///
/// Best for: short human-typed names with typos and transpositions.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndelRatio;

impl Similarity for IndelRatio {
    fn score(&self, a: &str, b: &str) -> u8 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        if a.is_empty() || b.is_empty() {
            return 0;
        }
        let total = (a.len() + b.len()) as f64;
        let ratio = 200.0 * longest_common_subsequence(&a, &b) as f64 / total;
        ratio.round_ties_even() as u8
    }

    fn name(&self) -> &'static str {
        "indel_ratio"
    }
}

/// Exact match
///
/// 100 when the names are equal, 0 otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct Exact;

impl Similarity for Exact {
    fn score(&self, a: &str, b: &str) -> u8 {
        if a == b {
            100
        } else {
            0
        }
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

/// Length of the longest common subsequence, two-row DP
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &x in a {
        for (j, &y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(IndelRatio.score("segment", "segment"), 100);
    }

    #[test]
    fn test_empty_scores_zero() {
        assert_eq!(IndelRatio.score("", "anything"), 0);
        assert_eq!(IndelRatio.score("anything", ""), 0);
        assert_eq!(IndelRatio.score("", ""), 0);
    }

    #[test]
    fn test_typos_stay_above_threshold() {
        let score = IndelRatio.score("this is a schmilblick", "tihs a si schmilblick");
        assert_eq!(score, 81);
        assert!(score >= DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(IndelRatio.score("itsaschmilblick", "isatschlimbickl"), 73);
    }

    #[test]
    fn test_halves_round_to_even() {
        let query = "abcdefghijklmnopqrstuvwxyzABC";
        let padded = format!("{}{}", query, "0".repeat(22));
        // 200 * 29 / 80 = 72.5
        assert_eq!(IndelRatio.score(&padded, query), 72);
        // 200 * 18 / 50 = 72.0
        assert_eq!(IndelRatio.score("abcdefghijklmnopqrXYZ", query), 72);
        // 200 * 1 / 16 = 12.5 and 200 * 3 / 16 = 37.5
        assert_eq!(IndelRatio.score("a", &format!("a{}", "_".repeat(14))), 12);
        assert_eq!(IndelRatio.score("abc", &format!("abc{}", "_".repeat(10))), 38);
    }

    #[test]
    fn test_unrelated_below_threshold() {
        assert!(IndelRatio.score("this is a schmilblick", "Nothin in common") < DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(IndelRatio.score("Object_2", "tihs a si schmilblick"), 14);
    }

    #[test]
    fn test_suffix_ties() {
        assert_eq!(IndelRatio.score("segment0", "segment"), 93);
        assert_eq!(IndelRatio.score("segment4", "segment"), 93);
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(
            IndelRatio.score("abcdef", "azced"),
            IndelRatio.score("azced", "abcdef")
        );
    }

    #[test]
    fn test_chars_not_bytes() {
        assert_eq!(IndelRatio.score("é", "é"), 100);
        assert_eq!(IndelRatio.score("éa", "ea"), 50);
    }

    #[test]
    fn test_exact() {
        assert_eq!(Exact.score("a", "a"), 100);
        assert_eq!(Exact.score("a", "A"), 0);
        assert_eq!(Exact.name(), "exact");
    }
}
