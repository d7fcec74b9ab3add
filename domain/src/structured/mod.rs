//! Structured model output.
//!
//! Every agent that prompts a model asks for exactly one JSON object. This
//! module is the single boundary where that output is decoded:
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`parser::StructuredObject`] | Decoded object with defaulting field accessors |
//! | [`results::TriageExtraction`] | `{service_name, transaction_id, timestamp}` |
//! | [`results::LogQualityVerdict`] | `{search, score, reason}` |
//! | [`results::RootCauseFinding`] | `{score, rca, analysis}` |
//! | [`table`] | HTML and markdown key/value tables for display |

pub mod parser;
pub mod results;
pub mod table;
