//! Core contracts and helpers for datafit.
//!
//! This crate defines the table model, the descriptor, flag and result types
//! exchanged with callers, the threshold profile, and the validation helpers
//! shared by the evaluation engine and the CLI.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod format;
pub mod result;
pub mod summary;
pub mod table;
pub mod validation;

pub use config::{QualityConfig, ScoreWeights, Thresholds};
pub use descriptor::QualityDescriptor;
pub use error::{Error, Result};
pub use format::{
    DecimalSeparator, Encoding, FormatHints, InvalidCellPolicy, DEFAULT_NULL_MARKERS,
};
pub use result::{FlagDetails, QualityFlags, QualityResult};
pub use summary::{
    CategoryCount, ColumnKind, ColumnSummary, CorrelationMatrix, MissingEntry, MissingTable,
    NumericStats, TableSummary, TopCategories,
};
pub use table::{Cell, Column, Table};
pub use validation::{validate_config, validate_descriptor};
