use crate::config::QualityConfig;
use crate::descriptor::QualityDescriptor;
use crate::error::{Error, Result};

/// Validate the domain bounds of a caller-supplied descriptor.
///
/// This checks:
/// - row and column counts are non-negative
/// - the max missing share is a number within `[0, 1]`
pub fn validate_descriptor(descriptor: &QualityDescriptor) -> Result<()> {
    if descriptor.n_rows < 0 {
        return Err(Error::InvalidDescriptor(format!(
            "n_rows must be non-negative, got {}",
            descriptor.n_rows
        )));
    }
    if descriptor.n_cols < 0 {
        return Err(Error::InvalidDescriptor(format!(
            "n_cols must be non-negative, got {}",
            descriptor.n_cols
        )));
    }
    if !(0.0..=1.0).contains(&descriptor.max_missing_share) {
        return Err(Error::InvalidDescriptor(format!(
            "max_missing_share must be within [0, 1], got {}",
            descriptor.max_missing_share
        )));
    }
    Ok(())
}

/// Validate a threshold and weight profile.
///
/// This checks:
/// - shares and ratios are finite and non-negative, shares at most 1
/// - every weight is finite and non-negative
/// - the acceptance threshold lies within `[0, 1]`
pub fn validate_config(config: &QualityConfig) -> Result<()> {
    let thresholds = &config.thresholds;
    if !(0.0..=1.0).contains(&thresholds.missing_threshold) {
        return Err(Error::InvalidConfig(format!(
            "missing_threshold must be within [0, 1], got {}",
            thresholds.missing_threshold
        )));
    }
    if !thresholds.cardinality_threshold.is_finite() || thresholds.cardinality_threshold < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "cardinality_threshold must be a non-negative number, got {}",
            thresholds.cardinality_threshold
        )));
    }

    for (name, weight) in config.weights.named() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "weight for {name} must be a non-negative number, got {weight}"
            )));
        }
    }

    if !(0.0..=1.0).contains(&config.acceptance_threshold) {
        return Err(Error::InvalidConfig(format!(
            "acceptance_threshold must be within [0, 1], got {}",
            config.acceptance_threshold
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_descriptor() {
        validate_descriptor(&QualityDescriptor::new(0, 0, 0.0)).expect("zero shape is valid");
        validate_descriptor(&QualityDescriptor::new(10, 2, 1.0)).expect("share of 1 is valid");
    }

    #[test]
    fn rejects_negative_counts() {
        let err = validate_descriptor(&QualityDescriptor::new(-5, 2, 0.0))
            .expect_err("negative rows must fail");
        assert!(matches!(err, Error::InvalidDescriptor(_)));

        let err = validate_descriptor(&QualityDescriptor::new(5, -2, 0.0))
            .expect_err("negative columns must fail");
        assert!(err.to_string().contains("n_cols"));
    }

    #[test]
    fn rejects_out_of_range_share() {
        for share in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = validate_descriptor(&QualityDescriptor::new(5, 2, share))
                .expect_err("share outside [0, 1] must fail");
            assert!(matches!(err, Error::InvalidDescriptor(_)));
        }
    }

    #[test]
    fn rejects_negative_weight() {
        let mut config = QualityConfig::default();
        config.weights.too_many_missing = -1.0;
        let err = validate_config(&config).expect_err("negative weight must fail");
        assert!(err.to_string().contains("too_many_missing"));
    }

    #[test]
    fn rejects_acceptance_threshold_above_one() {
        let config = QualityConfig {
            acceptance_threshold: 1.2,
            ..QualityConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn default_config_is_valid() {
        validate_config(&QualityConfig::default()).expect("defaults are valid");
    }
}
