//! Skill Detector — literal substring scan of document text against the taxonomy.
//!
//! Matching is plain `contains` on lower-cased text, not token-bounded. PDF extraction
//! routinely glues neighbouring words together ("GANsPyTorch") or splits them, and a
//! substring scan still finds both. The cost is false positives for short skill names
//! that occur inside longer words (e.g. "C" inside "Docker"); that tradeoff is accepted.

use std::collections::BTreeMap;

use tracing::debug;

use crate::analysis::taxonomy::{fold, SkillTaxonomy};

/// Skills found in one document. Keyed case-insensitively, keeps taxonomy casing.
///
/// Only grows: there is no removal API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedSkillSet {
    skills: BTreeMap<String, String>,
}

impl DetectedSkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a skill. Returns `true` if it was not already present (in any casing).
    pub fn insert(&mut self, skill: &str) -> bool {
        let key = fold(skill);
        if self.skills.contains_key(&key) {
            return false;
        }
        self.skills.insert(key, skill.trim().to_string());
        true
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains_key(&fold(skill))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skill names in taxonomy casing, alphabetical by folded key.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skills.values().map(String::as_str)
    }

    pub fn display_names(&self) -> Vec<String> {
        self.names().map(SkillTaxonomy::display_name).collect()
    }

    #[cfg(test)]
    pub fn is_superset(&self, other: &DetectedSkillSet) -> bool {
        other.skills.keys().all(|k| self.skills.contains_key(k))
    }
}

impl<'a> FromIterator<&'a str> for DetectedSkillSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

/// Scans `text` for every skill any role requires.
pub fn detect_skills(text: &str, taxonomy: &SkillTaxonomy) -> DetectedSkillSet {
    let text_lower = text.to_lowercase();

    let detected: DetectedSkillSet = taxonomy
        .known_skills()
        .iter()
        .filter(|skill| text_lower.contains(&fold(skill)))
        .map(String::as_str)
        .collect();

    debug!(
        "Detected {} of {} known skills in {} chars",
        detected.len(),
        taxonomy.known_skills().len(),
        text.len()
    );
    detected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_case_insensitively_with_taxonomy_casing() {
        let taxonomy = SkillTaxonomy::builtin();
        let detected = detect_skills("Built dashboards in REACT and typescript", &taxonomy);
        assert!(detected.contains("React"));
        assert!(detected.contains("typescript"));
        let names: Vec<&str> = detected.names().collect();
        assert!(names.contains(&"TypeScript"));
    }

    #[test]
    fn test_multi_word_skill_needs_contiguous_phrase() {
        let taxonomy = SkillTaxonomy::builtin();
        let detected = detect_skills("Studied machine learning at university", &taxonomy);
        assert!(detected.contains("Machine Learning"));

        let detected = detect_skills("Learning to operate a machine", &taxonomy);
        assert!(!detected.contains("Machine Learning"));
    }

    #[test]
    fn test_glued_words_still_detected() {
        let taxonomy = SkillTaxonomy::builtin();
        let detected = detect_skills("Skills: GANsPyTorchOpenCV", &taxonomy);
        assert!(detected.contains("GANs"));
        assert!(detected.contains("PyTorch"));
        assert!(detected.contains("OpenCV"));
    }

    #[test]
    fn test_substring_false_positive_is_kept() {
        let taxonomy = SkillTaxonomy::builtin();
        let detected = detect_skills("Docker", &taxonomy);
        assert!(detected.contains("Docker"));
        // "c" occurs inside "docker"
        assert!(detected.contains("C"));
    }

    #[test]
    fn test_empty_text_detects_nothing() {
        let taxonomy = SkillTaxonomy::builtin();
        assert!(detect_skills("", &taxonomy).is_empty());
    }

    #[test]
    fn test_insert_reports_new_entries_only() {
        let mut set = DetectedSkillSet::new();
        assert!(set.insert("SQL"));
        assert!(!set.insert("sql"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.names().next(), Some("SQL"));
    }

    #[test]
    fn test_display_names_apply_casing_rules() {
        let set: DetectedSkillSet = ["aws", "pytorch"].into_iter().collect();
        assert_eq!(set.display_names(), vec!["AWS", "Pytorch"]);
    }

    #[test]
    fn test_is_superset() {
        let small: DetectedSkillSet = ["React"].into_iter().collect();
        let large: DetectedSkillSet = ["react", "HTML"].into_iter().collect();
        assert!(large.is_superset(&small));
        assert!(!small.is_superset(&large));
    }
}
