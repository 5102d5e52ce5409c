use datafit_core::{QualityDescriptor, QualityFlags, Result, Thresholds, validate_descriptor};

/// Applies threshold rules to a descriptor.
///
/// Each flag is an independent comparison; none short-circuits another.
#[derive(Debug, Clone)]
pub struct FlagEvaluator {
    thresholds: Thresholds,
}

impl FlagEvaluator {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn evaluate(&self, descriptor: &QualityDescriptor) -> Result<QualityFlags> {
        validate_descriptor(descriptor)?;

        // Both counts are non-negative once validated.
        let n_rows = descriptor.n_rows as u64;
        let n_cols = descriptor.n_cols as u64;

        Ok(QualityFlags {
            too_few_rows: n_rows == 0 || n_rows < self.thresholds.min_rows,
            too_many_columns: n_cols > self.thresholds.max_cols,
            too_many_missing: descriptor.max_missing_share > self.thresholds.missing_threshold,
            has_constant_columns: descriptor.has_constant_columns,
            has_high_cardinality_categoricals: descriptor.has_high_cardinality_categoricals,
        })
    }
}

#[cfg(test)]
mod tests {
    use datafit_core::Error;

    use super::*;

    fn evaluator() -> FlagEvaluator {
        FlagEvaluator::new(Thresholds::default())
    }

    #[test]
    fn healthy_descriptor_raises_nothing() {
        let flags = evaluator()
            .evaluate(&QualityDescriptor::new(1000, 10, 0.1))
            .expect("evaluate");
        assert_eq!(flags, QualityFlags::default());
    }

    #[test]
    fn thresholds_are_strict_comparisons() {
        let evaluator = evaluator();

        let at_limits = evaluator
            .evaluate(&QualityDescriptor::new(50, 1000, 0.3))
            .expect("evaluate");
        assert_eq!(at_limits, QualityFlags::default());

        let past_limits = evaluator
            .evaluate(&QualityDescriptor::new(49, 1001, 0.31))
            .expect("evaluate");
        assert!(past_limits.too_few_rows);
        assert!(past_limits.too_many_columns);
        assert!(past_limits.too_many_missing);
    }

    #[test]
    fn zero_rows_forces_too_few_rows() {
        let evaluator = FlagEvaluator::new(Thresholds {
            min_rows: 0,
            ..Thresholds::default()
        });
        let flags = evaluator
            .evaluate(&QualityDescriptor::new(0, 3, 0.0))
            .expect("evaluate");
        assert!(flags.too_few_rows);
        assert!(!flags.has_constant_columns);
        assert!(!flags.has_high_cardinality_categoricals);
    }

    #[test]
    fn descriptor_booleans_pass_through() {
        let flags = evaluator()
            .evaluate(
                &QualityDescriptor::new(0, 0, 0.0)
                    .with_constant_columns(true)
                    .with_high_cardinality_categoricals(true),
            )
            .expect("evaluate");
        assert!(flags.has_constant_columns);
        assert!(flags.has_high_cardinality_categoricals);
    }

    #[test]
    fn overrides_apply_independently() {
        let evaluator = FlagEvaluator::new(Thresholds {
            min_rows: 5,
            missing_threshold: 0.05,
            ..Thresholds::default()
        });
        let flags = evaluator
            .evaluate(&QualityDescriptor::new(10, 10, 0.1))
            .expect("evaluate");
        assert!(!flags.too_few_rows);
        assert!(flags.too_many_missing);
        assert!(!flags.too_many_columns);
    }

    #[test]
    fn malformed_descriptor_is_rejected() {
        let err = evaluator()
            .evaluate(&QualityDescriptor::new(10, 2, 1.5))
            .expect_err("share above one must fail");
        assert!(matches!(err, Error::InvalidDescriptor(_)));
    }
}
