use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Minimal aggregate statistics sufficient to evaluate the quality flags.
///
/// Counts are signed so that a caller-supplied negative value can be
/// reported as an invalid descriptor instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QualityDescriptor {
    pub n_rows: i64,
    pub n_cols: i64,
    /// Largest per-column missing share, in `[0, 1]`.
    pub max_missing_share: f64,
    #[serde(default)]
    pub has_constant_columns: bool,
    #[serde(default)]
    pub has_high_cardinality_categoricals: bool,
}

impl QualityDescriptor {
    pub fn new(n_rows: i64, n_cols: i64, max_missing_share: f64) -> Self {
        Self {
            n_rows,
            n_cols,
            max_missing_share,
            has_constant_columns: false,
            has_high_cardinality_categoricals: false,
        }
    }

    pub fn with_constant_columns(mut self, value: bool) -> Self {
        self.has_constant_columns = value;
        self
    }

    pub fn with_high_cardinality_categoricals(mut self, value: bool) -> Self {
        self.has_high_cardinality_categoricals = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_booleans_default_to_false() {
        let descriptor: QualityDescriptor = serde_json::from_str(
            r#"{"n_rows": 1000, "n_cols": 10, "max_missing_share": 0.1}"#,
        )
        .expect("parse descriptor");
        assert_eq!(descriptor, QualityDescriptor::new(1000, 10, 0.1));
    }

    #[test]
    fn negative_counts_deserialize() {
        let descriptor: QualityDescriptor =
            serde_json::from_str(r#"{"n_rows": -1, "n_cols": 3, "max_missing_share": 0.0}"#)
                .expect("parse descriptor");
        assert_eq!(descriptor.n_rows, -1);
    }
}
