//! Food-candidate ranking and limiting for nutrition lookup.
//!
//! The labeler emits generic scene labels ("Tableware", "Plate") alongside the
//! actual dish, so trying labels in raw confidence order wastes lookups. Combines:
//! - **Keyword priority**: labels matching the food-keyword allowlist first.
//! - **Confidence order**: each partition sorted by descending confidence.
//! - **Cap**: at most [`MAX_CANDIDATES`] lookups per resolution.
//!
//! The allowlist re-ranks, it never filters: non-matching labels still follow,
//! so a mislabeled or unusual dish is eventually tried.

use std::collections::HashSet;

use crate::model::{KeywordConfig, LabelCandidate};

/// Upper bound on nutrition lookups per resolution.
pub const MAX_CANDIDATES: usize = 7;

/// Built-in food-keyword allowlist (case-insensitive substring match).
const FOOD_KEYWORDS: &[&str] = &[
    "food", "cuisine", "meal", "dish", "snack", "bread", "cake", "noodle", "ramen", "pasta",
    "rice", "sushi", "pizza", "burger", "sandwich", "chicken", "pork", "beef", "soup", "stew",
    "bibimbap", "korean", "asian", "dessert",
];

/// Whether a label text matches the allowlist (built-in set plus configured extras).
fn matches_food_keyword(text: &str, config: &KeywordConfig) -> bool {
    let lowered = text.to_lowercase();
    FOOD_KEYWORDS.iter().any(|k| lowered.contains(k))
        || config
            .extra
            .iter()
            .any(|k| lowered.contains(&k.to_lowercase()))
}

/// Rank labeler output into a bounded list of lookup candidates.
///
/// - Allowlist matches first, sorted by descending confidence; then every label,
///   sorted by descending confidence.
/// - Trims texts, drops blanks, deduplicates by exact text (first occurrence wins).
/// - Returns at most [`MAX_CANDIDATES`] names.
pub fn rank_candidates(labels: &[LabelCandidate], config: &KeywordConfig) -> Vec<String> {
    let mut matched: Vec<&LabelCandidate> = labels
        .iter()
        .filter(|l| matches_food_keyword(&l.text, config))
        .collect();
    matched.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut all: Vec<&LabelCandidate> = labels.iter().collect();
    all.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut seen = HashSet::new();
    matched
        .into_iter()
        .chain(all)
        .map(|l| l.text.trim())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_string()))
        .take(MAX_CANDIDATES)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str, confidence: f32) -> LabelCandidate {
        LabelCandidate {
            text: text.to_string(),
            confidence,
        }
    }

    #[test]
    fn test_keyword_labels_ranked_first() {
        let labels = vec![label("Plate", 0.9), label("Pizza", 0.6)];
        let out = rank_candidates(&labels, &KeywordConfig::default());
        assert_eq!(out, vec!["Pizza", "Plate"]);
    }

    #[test]
    fn test_partitions_sorted_by_confidence() {
        let labels = vec![
            label("rice", 0.5),
            label("soup", 0.8),
            label("table", 0.9),
            label("fork", 0.7),
        ];
        let out = rank_candidates(&labels, &KeywordConfig::default());
        assert_eq!(out, vec!["soup", "rice", "table", "fork"]);
    }

    #[test]
    fn test_no_duplicate_texts() {
        let labels = vec![label("Pizza", 0.9), label("Pizza", 0.4), label("Plate", 0.8)];
        let out = rank_candidates(&labels, &KeywordConfig::default());
        assert_eq!(out, vec!["Pizza", "Plate"]);
    }

    #[test]
    fn test_capped_at_max_candidates() {
        let labels: Vec<LabelCandidate> = (0..12)
            .map(|i| label(&format!("item{}", i), 1.0 - i as f32 * 0.05))
            .collect();
        let out = rank_candidates(&labels, &KeywordConfig::default());
        assert_eq!(out.len(), MAX_CANDIDATES);
    }

    #[test]
    fn test_blank_labels_dropped_and_texts_trimmed() {
        let labels = vec![label("  ", 0.9), label(" ramen ", 0.8), label("", 0.7)];
        let out = rank_candidates(&labels, &KeywordConfig::default());
        assert_eq!(out, vec!["ramen"]);
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        let out = rank_candidates(&[], &KeywordConfig::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_substring() {
        let labels = vec![label("Cup", 0.9), label("Korean BBQ", 0.3)];
        let out = rank_candidates(&labels, &KeywordConfig::default());
        assert_eq!(out, vec!["Korean BBQ", "Cup"]);
    }

    #[test]
    fn test_extra_keywords_extend_allowlist() {
        let labels = vec![label("Mug", 0.9), label("Kimchi jjigae", 0.4)];
        let config = KeywordConfig {
            extra: vec!["kimchi".to_string()],
        };
        let out = rank_candidates(&labels, &config);
        assert_eq!(out, vec!["Kimchi jjigae", "Mug"]);
    }

    #[test]
    fn test_equal_confidence_preserves_labeler_order() {
        let labels = vec![label("stew", 0.5), label("soup", 0.5), label("rice", 0.5)];
        let out = rank_candidates(&labels, &KeywordConfig::default());
        assert_eq!(out, vec!["stew", "soup", "rice"]);
    }
}
