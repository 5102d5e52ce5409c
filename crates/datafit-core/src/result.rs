use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Independent boolean quality signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QualityFlags {
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub too_many_missing: bool,
    pub has_constant_columns: bool,
    pub has_high_cardinality_categoricals: bool,
}

impl QualityFlags {
    /// Flags in a fixed order, paired with their names.
    pub fn named(&self) -> [(&'static str, bool); 5] {
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

    pub fn raised(&self) -> Vec<&'static str> {
        self.named()
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.named().iter().filter(|(_, set)| *set).count()
    }
}

/// Column-level evidence behind the table-derived flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlagDetails {
    pub constant_columns: Vec<String>,
    pub high_cardinality_columns: Vec<String>,
    pub max_missing_share: f64,
    /// Distinct-value count above which a categorical column was flagged.
    pub cardinality_limit: f64,
}

/// Outcome of one quality evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QualityResult {
    pub ok_for_model: bool,
    pub quality_score: f64,
    pub flags: QualityFlags,
    pub n_rows: u64,
    pub n_cols: u64,
    /// Wall-clock duration of the evaluation in milliseconds.
    pub latency_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<FlagDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raised_lists_only_set_flags() {
        let flags = QualityFlags {
            too_few_rows: true,
            has_constant_columns: true,
            ..QualityFlags::default()
        };
        assert_eq!(flags.raised(), vec!["too_few_rows", "has_constant_columns"]);
        assert_eq!(flags.count(), 2);
    }

    #[test]
    fn details_are_omitted_when_absent() {
        let result = QualityResult {
            ok_for_model: true,
            quality_score: 1.0,
            flags: QualityFlags::default(),
            n_rows: 1000,
            n_cols: 10,
            latency_ms: 0.1,
            details: None,
        };
        let value = serde_json::to_value(&result).expect("serialize result");
        assert!(value.get("details").is_none());
        assert_eq!(value["flags"]["too_few_rows"], false);
    }
}
