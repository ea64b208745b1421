use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{ensure, Context, Result};

use crate::analysis::inference::InferenceDepth;
use crate::analysis::report::ScoringConfig;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Everything has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file replacing the built-in skill taxonomy.
    pub taxonomy_path: Option<PathBuf>,
    pub scoring: ScoringConfig,
    pub inference_depth: InferenceDepth,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            rust_log: "info".to_string(),
            taxonomy_path: None,
            scoring: ScoringConfig::default(),
            inference_depth: InferenceDepth::FixedPoint,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let scoring_defaults = defaults.scoring.clone();

        let scoring = ScoringConfig {
            similarity_weight: parse_or(
                &lookup,
                "SCORE_SIMILARITY_WEIGHT",
                scoring_defaults.similarity_weight,
            )?,
            coverage_weight: parse_or(
                &lookup,
                "SCORE_COVERAGE_WEIGHT",
                scoring_defaults.coverage_weight,
            )?,
            ceiling: parse_or(
                &lookup,
                "SCORE_CEILING",
                scoring_defaults.ceiling,
            )?,
            pivot_threshold: parse_or(
                &lookup,
                "PIVOT_THRESHOLD",
                scoring_defaults.pivot_threshold,
            )?,
            reference_repetitions: parse_or(
                &lookup,
                "REFERENCE_REPETITIONS",
                scoring_defaults.reference_repetitions,
            )?,
        };
        ensure!(scoring.ceiling < 100, "SCORE_CEILING must be below 100");
        ensure!(
            scoring.similarity_weight >= 0.0 && scoring.coverage_weight >= 0.0,
            "score weights must not be negative"
        );
        ensure!(
            scoring.similarity_weight + scoring.coverage_weight > 0.0,
            "at least one score weight must be positive"
        );
        ensure!(
            scoring.reference_repetitions > 0,
            "REFERENCE_REPETITIONS must be at least 1"
        );

        let inference_depth = match lookup("INFERENCE_MAX_ROUNDS") {
            Some(raw) => InferenceDepth::Rounds(
                raw.trim()
                    .parse()
                    .context("INFERENCE_MAX_ROUNDS must be a non-negative integer")?,
            ),
            None => InferenceDepth::FixedPoint,
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            taxonomy_path: lookup("SKILL_TAXONOMY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            scoring,
            inference_depth,
            max_upload_bytes: parse_or(
                &lookup,
                "MAX_UPLOAD_BYTES",
                defaults.max_upload_bytes,
            )?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
