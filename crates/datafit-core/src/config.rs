use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default minimum number of rows.
pub const DEFAULT_MIN_ROWS: u64 = 50;
/// Default maximum number of columns.
pub const DEFAULT_MAX_COLS: u64 = 1000;
/// Default maximum tolerated missing share for any column.
pub const DEFAULT_MISSING_THRESHOLD: f64 = 0.3;
/// Default distinct-to-rows ratio above which a categorical column is an identifier.
pub const DEFAULT_CARDINALITY_THRESHOLD: f64 = 0.9;
/// Default minimum score for a dataset to be accepted.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.5;

/// Threshold profile used by flag evaluation and descriptor derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Thresholds {
    /// `too_few_rows` is set when `n_rows < min_rows`.
    pub min_rows: u64,
    /// `too_many_columns` is set when `n_cols > max_cols`.
    pub max_cols: u64,
    /// `too_many_missing` is set when `max_missing_share > missing_threshold`.
    pub missing_threshold: f64,
    /// A categorical column is high-cardinality when
    /// `distinct > cardinality_threshold * n_rows`.
    pub cardinality_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_rows: DEFAULT_MIN_ROWS,
            max_cols: DEFAULT_MAX_COLS,
            missing_threshold: DEFAULT_MISSING_THRESHOLD,
            cardinality_threshold: DEFAULT_CARDINALITY_THRESHOLD,
        }
    }
}

/// Per-flag penalty weights for the quality score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoreWeights {
    pub too_few_rows: f64,
    pub too_many_columns: f64,
    pub too_many_missing: f64,
    pub has_constant_columns: f64,
    pub has_high_cardinality_categoricals: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            too_few_rows: 1.0,
            too_many_columns: 1.0,
            too_many_missing: 1.0,
            has_constant_columns: 1.0,
            has_high_cardinality_categoricals: 1.0,
        }
    }
}

impl ScoreWeights {
    /// Weights in flag order, paired with the flag name.
    pub fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("too_few_rows", self.too_few_rows),
            ("too_many_columns", self.too_many_columns),
            ("too_many_missing", self.too_many_missing),
            ("has_constant_columns", self.has_constant_columns),
            (
                "has_high_cardinality_categoricals",
                self.has_high_cardinality_categoricals,
            ),
        ]
    }

    pub fn total(&self) -> f64 {
        self.named().iter().map(|(_, weight)| weight).sum()
    }
}

/// Complete evaluation profile. Every field may be omitted and falls back to
/// its documented default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct QualityConfig {
    pub thresholds: Thresholds,
    pub weights: ScoreWeights,
    /// `ok_for_model` requires `quality_score >= acceptance_threshold`.
    pub acceptance_threshold: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            weights: ScoreWeights::default(),
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
        }
    }
}
