use datafit_core::{
    CorrelationMatrix, FormatHints, QualityDescriptor, TableSummary, TopCategories,
};
use serde::{Deserialize, Serialize};

/// Limits for the top-categories overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopCategoryOptions {
    /// Values kept per column.
    pub top_k: usize,
    /// Categorical columns reported, in table order.
    pub max_columns: usize,
}

impl Default for TopCategoryOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            max_columns: 5,
        }
    }
}

/// Descriptive overview of a raw table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOverview {
    pub summary: TableSummary,
    pub top_categories: Vec<TopCategories>,
    pub correlations: CorrelationMatrix,
    pub latency_ms: f64,
}

/// The two input shapes accepted by [`crate::QualityService::evaluate`].
#[derive(Debug, Clone, Copy)]
pub enum EvaluationInput<'a> {
    /// Pre-aggregated statistics; summarization is skipped.
    Descriptor(&'a QualityDescriptor),
    /// Raw delimited bytes with their format hints.
    Raw {
        bytes: &'a [u8],
        hints: &'a FormatHints,
    },
}

impl EvaluationInput<'_> {
    pub fn mode(&self) -> &'static str {
        match self {
            EvaluationInput::Descriptor(_) => "descriptor",
            EvaluationInput::Raw { .. } => "raw",
        }
    }
}
