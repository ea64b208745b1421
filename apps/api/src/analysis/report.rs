//! Gap/Report Synthesizer — turns detected skills and similarity into an `AnalysisResult`.
//!
//! Algorithm:
//! 1. Partition the role's required skills into matched / missing (declared order kept)
//! 2. keyword coverage = ⌊matched / required × 100⌋
//! 3. score = (similarity × w_sim + coverage × w_cov) / (w_sim + w_cov), clamped to [0, ceiling]
//! 4. Score every role; suggest a pivot when another role beats the threshold and the target

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::detector::DetectedSkillSet;
use crate::analysis::similarity::{Similarity, SimilarityScorer};
use crate::analysis::taxonomy::SkillTaxonomy;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// A required skill the document does not show, with somewhere to learn it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub name: String,
    pub link: String,
}

/// Final per-request result. Serialized as-is by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub role: String,
    pub score: u32,
    pub found_skills: Vec<String>,
    pub missing_skills: Vec<MissingSkill>,
    pub ai_insight: Option<String>,
}

/// Similarity of the document to one role's profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleFit {
    pub role: String,
    pub score: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Tunables
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub similarity_weight: f64,
    pub coverage_weight: f64,
    /// Highest score ever reported. Must stay below 100.
    pub ceiling: u32,
    /// A pivot is suggested only when the better role scores above this.
    pub pivot_threshold: u32,
    /// How many times the skill list is repeated in the reference document.
    pub reference_repetitions: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            similarity_weight: 1.0,
            coverage_weight: 1.5,
            ceiling: 98,
            pivot_threshold: 45,
            reference_repetitions: 2,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Synthesis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GapAnalysis {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Splits `required` by membership in `detected`. Every required skill lands in exactly one side.
pub fn partition_skills(required: &[String], detected: &DetectedSkillSet) -> GapAnalysis {
    let (matched, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|skill| detected.contains(skill));
    GapAnalysis { matched, missing }
}

pub fn keyword_coverage(matched: usize, required: usize) -> u32 {
    if required == 0 {
        return 0;
    }
    (matched.min(required) * 100 / required) as u32
}

pub fn blend_score(similarity: u32, coverage: u32, config: &ScoringConfig) -> u32 {
    let total_weight = config.similarity_weight + config.coverage_weight;
    if total_weight <= 0.0 {
        return 0;
    }
    let blended = (similarity as f64 * config.similarity_weight
        + coverage as f64 * config.coverage_weight)
        / total_weight;
    (blended.max(0.0) as u32).min(config.ceiling)
}

/// Scores the document against every role, in taxonomy order.
pub fn rank_roles(
    text: &str,
    taxonomy: &SkillTaxonomy,
    scorer: &SimilarityScorer,
) -> Vec<RoleFit> {
    taxonomy
        .roles()
        .iter()
        .map(|role| RoleFit {
            role: role.name.clone(),
            score: scorer.score(text, &role.skills).value(),
        })
        .collect()
}

/// Highest-scoring role; the earliest one wins a tie.
pub fn best_fit(fits: &[RoleFit]) -> Option<&RoleFit> {
    fits.iter()
        .fold(None, |best: Option<&RoleFit>, fit| match best {
            Some(b) if b.score >= fit.score => Some(b),
            _ => Some(fit),
        })
}

pub fn pivot_advice(
    target_role: &str,
    target_similarity: u32,
    best: Option<&RoleFit>,
    threshold: u32,
) -> Option<String> {
    let best = best?;
    if best.role == target_role || best.score <= threshold || best.score <= target_similarity {
        return None;
    }
    Some(format!(
        "Your resume is actually a stronger match ({}%) for {}. Consider pivoting!",
        best.score, best.role
    ))
}

/// Builds the result for one request. Never fails: an unknown role simply has no requirements.
pub fn synthesize(
    target_role: &str,
    text: &str,
    detected: &DetectedSkillSet,
    taxonomy: &SkillTaxonomy,
    config: &ScoringConfig,
) -> AnalysisResult {
    let scorer = SimilarityScorer::new(config.reference_repetitions);
    let canonical_role = taxonomy
        .role(target_role)
        .map(|r| r.name.as_str())
        .unwrap_or(target_role);
    let required = taxonomy.required_skills(target_role);

    let gaps = partition_skills(required, detected);

    let similarity = if required.is_empty() {
        Similarity::Degenerate
    } else {
        scorer.score(text, required)
    };
    if similarity.is_degenerate() && !required.is_empty() {
        debug!(role = %canonical_role, "No usable vocabulary against role profile, similarity is 0");
    }

    let score = if required.is_empty() {
        0
    } else {
        let coverage = keyword_coverage(gaps.matched.len(), required.len());
        blend_score(similarity.value(), coverage, config)
    };

    let fits = rank_roles(text, taxonomy, &scorer);
    debug!(?fits, ?similarity, score, "Role similarity computed");
    let ai_insight = pivot_advice(
        canonical_role,
        similarity.value(),
        best_fit(&fits),
        config.pivot_threshold,
    );

    let missing_skills = gaps
        .missing
        .into_iter()
        .map(|name| MissingSkill {
            link: taxonomy.resource_link(&name),
            name,
        })
        .collect();

    AnalysisResult {
        role: target_role.to_string(),
        score,
        found_skills: gaps.matched,
        missing_skills,
        ai_insight,
    }
}
