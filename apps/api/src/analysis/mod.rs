// Skill-gap analysis engine.
// Pipeline: extractor → detector → inference → similarity + report.
// Everything below `handlers` is synchronous and free of I/O apart from logging.

pub mod detector;
pub mod engine;
pub mod extractor;
pub mod handlers;
pub mod inference;
pub mod report;
pub mod similarity;
pub mod stop_words;
pub mod taxonomy;
