//! The analysis pipeline: bytes → text → detected skills → inferred skills → report.
//!
//! `SkillEngine` is immutable after construction and holds only shared, read-only
//! data, so one `Arc<SkillEngine>` serves every request without locking.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::detector::detect_skills;
use crate::analysis::extractor::extract_text;
use crate::analysis::inference::{expand, InferenceDepth};
use crate::analysis::report::{synthesize, AnalysisResult, ScoringConfig};
use crate::analysis::taxonomy::SkillTaxonomy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Could not read PDF content.")]
    UnreadableDocument,
}

pub struct SkillEngine {
    taxonomy: Arc<SkillTaxonomy>,
    scoring: ScoringConfig,
    depth: InferenceDepth,
}

impl SkillEngine {
    pub fn new(
        taxonomy: Arc<SkillTaxonomy>,
        scoring: ScoringConfig,
        depth: InferenceDepth,
    ) -> Self {
        Self {
            taxonomy,
            scoring,
            depth,
        }
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Analyzes an uploaded document for `target_role`.
    ///
    /// Fails only when no text can be extracted.
    pub fn analyze(
        &self,
        document: &[u8],
        target_role: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let text = extract_text(document);
        if text.trim().is_empty() {
            return Err(AnalysisError::UnreadableDocument);
        }
        Ok(self.analyze_text(&text, target_role))
    }

    /// Runs the pipeline on already-extracted text.
    pub fn analyze_text(&self, text: &str, target_role: &str) -> AnalysisResult {
        if self.taxonomy.role(target_role).is_none() {
            warn!(role = %target_role, "Unknown target role, scoring against no requirements");
        }

        let mut skills = detect_skills(text, &self.taxonomy);
        if skills.is_empty() {
            debug!("No known skills found in document text");
        }
        let detected = skills.len();
        expand(&mut skills, &self.taxonomy, self.depth);
        debug!(
            detected,
            inferred = skills.len() - detected,
            skills = ?skills.display_names(),
            "Skill set resolved"
        );

        synthesize(target_role, text, &skills, &self.taxonomy, &self.scoring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extractor::fixtures::single_page_pdf;

    fn engine() -> SkillEngine {
        SkillEngine::new(
            Arc::new(SkillTaxonomy::builtin()),
            ScoringConfig::default(),
            InferenceDepth::FixedPoint,
        )
    }

    #[test]
    fn test_empty_bytes_is_error() {
        assert_eq!(
            engine().analyze(b"", "Frontend Developer"),
            Err(AnalysisError::UnreadableDocument)
        );
    }

    #[test]
    fn test_whitespace_only_document_is_error() {
        assert_eq!(
            engine().analyze(b"   \n\t ", "Frontend Developer"),
            Err(AnalysisError::UnreadableDocument)
        );
    }

    #[test]
    fn test_corrupt_pdf_is_error() {
        assert!(engine()
            .analyze(b"%PDF-1.4 garbage", "Frontend Developer")
            .is_err());
    }

    #[test]
    fn test_react_implies_frontend_basics() {
        let result = engine()
            .analyze(b"Experienced with React and Python", "Frontend Developer")
            .unwrap();
        for skill in ["React", "JavaScript", "HTML", "CSS"] {
            assert!(
                result.found_skills.iter().any(|s| s == skill),
                "{skill} missing from {:?}",
                result.found_skills
            );
        }
        assert!(!result.missing_skills.iter().any(|m| m.name == "JavaScript"));
    }

    #[test]
    fn test_pdf_upload_runs_full_pipeline() {
        let pdf = single_page_pdf("Experienced with React and Python");
        let result = engine().analyze(&pdf, "Frontend Developer").unwrap();
        for skill in ["React", "JavaScript", "HTML", "CSS"] {
            assert!(
                result.found_skills.iter().any(|s| s == skill),
                "{skill} missing from {:?}",
                result.found_skills
            );
        }
        assert!(result.score > 0 && result.score <= 98);
    }

    #[test]
    fn test_unknown_role_yields_empty_signal() {
        let result = engine()
            .analyze(b"Python developer with SQL", "Astronaut")
            .unwrap();
        assert_eq!(result.role, "Astronaut");
        assert_eq!(result.score, 0);
        assert!(result.found_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_profile_text_scores_at_ceiling_and_lower_elsewhere() {
        let engine = engine();
        let profile = engine.taxonomy().required_skills("DevOps Engineer").join(" ");

        let own = engine.analyze_text(&profile, "DevOps Engineer");
        let other = engine.analyze_text(&profile, "Data Scientist");

        assert!(own.score >= 95, "Expected near ceiling, got {}", own.score);
        assert!(own.score <= 98);
        assert!(other.score < own.score);
    }

    #[test]
    fn test_score_never_exceeds_ceiling() {
        let engine = engine();
        let samples = [
            "",
            "React",
            "Python PyTorch TensorFlow Deep Learning NLP Transformers Computer Vision GANs OpenCV LangChain LLM Bert",
            "Java Kotlin Swift Flutter React Native Firebase Android Studio iOS",
            "the of and",
        ];
        for text in samples {
            for role in engine.taxonomy().roles() {
                let result = engine.analyze_text(text, &role.name);
                assert!(result.score <= 98, "{} for {}", result.score, role.name);
            }
        }
    }

    #[test]
    fn test_partition_holds_through_pipeline() {
        let engine = engine();
        let text = "Flask services on AWS with Docker, some Kotlin";
        for role in engine.taxonomy().roles() {
            let result = engine.analyze_text(text, &role.name);
            let mut names: Vec<&str> = result.found_skills.iter().map(String::as_str).collect();
            names.extend(result.missing_skills.iter().map(|m| m.name.as_str()));
            names.sort_unstable();
            let mut expected: Vec<&str> = role.skills.iter().map(String::as_str).collect();
            expected.sort_unstable();
            assert_eq!(names, expected);
        }
    }

    #[test]
    fn test_bounded_depth_is_honoured() {
        let engine = SkillEngine::new(
            Arc::new(SkillTaxonomy::builtin()),
            ScoringConfig::default(),
            InferenceDepth::Rounds(0),
        );
        let result = engine.analyze_text("React", "Frontend Developer");
        assert_eq!(result.found_skills, vec!["React"]);
    }
}
