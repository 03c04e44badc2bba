//! Distress Line: procedural generator for onomatopoeic distress lines.
//!
//! Builds short stuttering lines of gasps, coughs and trailing breaths from
//! weighted, tone-tagged vocabulary tables. Generation is a pure function of
//! the caller's parameters and a lexicon, driven by a seeded or entropy-backed
//! random source owned by the call.

pub mod core;
pub mod schema;

pub use crate::core::breaker::make_break_example;
pub use crate::core::pipeline::{generate_line, DistressEngine};
pub use crate::core::sanitize::sanitize;
pub use crate::schema::lexicon::LexiconBank;
pub use crate::schema::params::GenerationParameters;
