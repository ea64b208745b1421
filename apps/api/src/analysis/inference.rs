//! Inference Expander — closes a detected skill set over the implication graph.
//!
//! Each pass unions in every skill implied by a skill already in the set. Passes are
//! plain set unions, so order never matters and cycles (Transformers ↔ Bert) need no
//! special handling: the universe is finite and a pass that adds nothing ends the loop.

use tracing::debug;

use crate::analysis::detector::DetectedSkillSet;
use crate::analysis::taxonomy::SkillTaxonomy;

/// How far to propagate implications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InferenceDepth {
    /// Repeat passes until one adds nothing.
    #[default]
    FixedPoint,
    /// At most this many passes. Chains longer than `n` hops are truncated.
    Rounds(usize),
}

/// What an expansion did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Expansion {
    /// Passes that added at least one skill.
    pub rounds: usize,
    pub added: usize,
}

/// One propagation pass. Returns the number of skills added.
pub fn expand_once(skills: &mut DetectedSkillSet, taxonomy: &SkillTaxonomy) -> usize {
    let current: Vec<String> = skills.names().map(str::to_owned).collect();
    let mut added = 0;
    for skill in &current {
        for implied in taxonomy.implied_by(skill) {
            if skills.insert(implied) {
                added += 1;
            }
        }
    }
    added
}

/// Expands `skills` in place to the requested depth.
pub fn expand(
    skills: &mut DetectedSkillSet,
    taxonomy: &SkillTaxonomy,
    depth: InferenceDepth,
) -> Expansion {
    let max_rounds = match depth {
        InferenceDepth::FixedPoint => usize::MAX,
        InferenceDepth::Rounds(n) => n,
    };

    let mut expansion = Expansion::default();
    while expansion.rounds < max_rounds {
        let added = expand_once(skills, taxonomy);
        if added == 0 {
            break;
        }
        expansion.rounds += 1;
        expansion.added += added;
    }

    debug!(
        rounds = expansion.rounds,
        added = expansion.added,
        total = skills.len(),
        "Skill inference complete"
    );
    expansion
}
