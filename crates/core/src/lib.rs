#![forbid(unsafe_code)]

pub mod import;
pub mod model;
pub mod stats;

pub use import::{DEFAULT_SECTION, ImportError, parse_questions};
pub use stats::{AccuracyTier, AggregateStats, QuestionStats, accuracy_percent};
