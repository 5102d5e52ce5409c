//! Quality-assessment engine: table summarization, flag evaluation, scoring,
//! and the service that chains them.

pub mod engine;
pub mod flags;
pub mod model;
pub mod reader;
pub mod score;
pub mod summarize;

pub use engine::QualityService;
pub use flags::FlagEvaluator;
pub use model::{EvaluationInput, TableOverview, TopCategoryOptions};
pub use reader::read_table;
pub use score::{ScoreAggregator, ScoreOutcome};
pub use summarize::{DerivedDescriptor, TableSummarizer, derive_descriptor};
