//! Similarity Scorer — TF-IDF cosine similarity between a document and a role profile.
//!
//! The role side is a synthesized reference document: the required skills joined by
//! spaces and repeated `repetitions` times, which weights every listed skill equally
//! and above incidental wording. The corpus is exactly the two documents.
//!
//! Vectorization:
//! - lower-case, tokens are runs of two or more word characters
//! - English stop-words dropped
//! - raw counts × smoothed idf `ln((1 + n) / (1 + df)) + 1`, then L2-normalized

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::stop_words::is_stop_word;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Outcome of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Similarity {
    /// Cosine similarity × 100, truncated, in 0..=100.
    Scored(u32),
    /// No usable vocabulary, or one side vectorized to all zeros.
    Degenerate,
}

impl Similarity {
    /// Degenerate input scores zero.
    pub fn value(self) -> u32 {
        match self {
            Similarity::Scored(v) => v,
            Similarity::Degenerate => 0,
        }
    }

    pub fn is_degenerate(self) -> bool {
        matches!(self, Similarity::Degenerate)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer {
    repetitions: usize,
}

#[cfg(test)]
impl Default for SimilarityScorer {
    fn default() -> Self {
        Self { repetitions: 2 }
    }
}

impl SimilarityScorer {
    pub fn new(repetitions: usize) -> Self {
        Self {
            repetitions: repetitions.max(1),
        }
    }

    /// Compares `text` with the reference document synthesized from `required_skills`.
    pub fn score(&self, text: &str, required_skills: &[String]) -> Similarity {
        let reference = reference_document(required_skills, self.repetitions);
        tfidf_similarity(text, &reference)
    }
}

/// `[a, b]` repeated twice becomes `"a b a b"`.
pub fn reference_document(skills: &[String], repetitions: usize) -> String {
    std::iter::repeat(skills)
        .take(repetitions)
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

fn term_counts(text: &str) -> HashMap<String, usize> {
    let lower = text.to_lowercase();
    let mut counts = HashMap::new();
    for m in TOKEN_RE.find_iter(&lower) {
        let term = m.as_str();
        if is_stop_word(term) {
            continue;
        }
        *counts.entry(term.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Cosine similarity of the TF-IDF vectors of `document` and `reference`.
pub fn tfidf_similarity(document: &str, reference: &str) -> Similarity {
    let doc_counts = term_counts(document);
    let ref_counts = term_counts(reference);

    if doc_counts.is_empty() && ref_counts.is_empty() {
        return Similarity::Degenerate;
    }

    // Two documents: a term in both has df = 2, otherwise df = 1.
    const N_DOCS: f64 = 2.0;
    let idf = |term: &str| {
        let df = usize::from(doc_counts.contains_key(term))
            + usize::from(ref_counts.contains_key(term));
        ((1.0 + N_DOCS) / (1.0 + df as f64)).ln() + 1.0
    };

    let weight = |counts: &HashMap<String, usize>, term: &str| {
        counts.get(term).copied().unwrap_or(0) as f64 * idf(term)
    };

    let doc_norm = doc_counts
        .keys()
        .map(|t| weight(&doc_counts, t).powi(2))
        .sum::<f64>()
        .sqrt();
    let ref_norm = ref_counts
        .keys()
        .map(|t| weight(&ref_counts, t).powi(2))
        .sum::<f64>()
        .sqrt();

    if doc_norm == 0.0 || ref_norm == 0.0 {
        return Similarity::Degenerate;
    }

    let dot: f64 = doc_counts
        .keys()
        .filter(|t| ref_counts.contains_key(t.as_str()))
        .map(|t| weight(&doc_counts, t) * weight(&ref_counts, t))
        .sum();

    let cosine = (dot / (doc_norm * ref_norm)).clamp(0.0, 1.0);
    Similarity::Scored((cosine * 100.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reference_document_repeats_whole_list() {
        let doc = reference_document(&skills(&["React", "CSS"]), 2);
        assert_eq!(doc, "React CSS React CSS");
    }

    #[test]
    fn test_identical_profile_scores_near_full() {
        let scorer = SimilarityScorer::default();
        let required = skills(&["Python", "Pandas", "NumPy", "Statistics"]);
        let score = scorer.score("Python Pandas NumPy Statistics", &required);
        assert!(score.value() >= 99, "Expected ≥99, got {score:?}");
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero_not_degenerate() {
        let score = tfidf_similarity("kubernetes terraform", "python pandas");
        assert_eq!(score, Similarity::Scored(0));
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let scorer = SimilarityScorer::default();
        let required = skills(&["Docker", "Kubernetes", "Terraform", "Linux"]);
        let score = scorer
            .score("Deployed services with Docker on Linux hosts", &required)
            .value();
        assert!(score > 0 && score < 100, "Score was {score}");
    }

    #[test]
    fn test_stop_words_only_is_degenerate() {
        let score = tfidf_similarity("the and of it", "");
        assert!(score.is_degenerate());
        assert_eq!(score.value(), 0);
    }

    #[test]
    fn test_empty_document_is_degenerate() {
        let scorer = SimilarityScorer::default();
        let score = scorer.score("", &skills(&["Python"]));
        assert!(score.is_degenerate());
    }

    #[test]
    fn test_single_letter_skills_produce_no_terms() {
        let scorer = SimilarityScorer::default();
        let score = scorer.score("Rust engineer", &skills(&["C"]));
        assert!(score.is_degenerate());
    }

    #[test]
    fn test_case_does_not_matter() {
        let lower = tfidf_similarity("react redux", "React Redux");
        assert!(lower.value() >= 99);
    }

    #[test]
    fn test_more_repetitions_keep_profile_proportions() {
        let required = skills(&["Kotlin", "Swift"]);
        let two = SimilarityScorer::new(2).score("Kotlin Swift", &required);
        let five = SimilarityScorer::new(5).score("Kotlin Swift", &required);
        assert_eq!(two, five);
    }
}
