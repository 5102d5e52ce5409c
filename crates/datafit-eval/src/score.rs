use datafit_core::{QualityFlags, ScoreWeights};

/// Score and acceptance decision derived from a set of flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOutcome {
    pub quality_score: f64,
    pub ok_for_model: bool,
}

/// Combines flags into a normalized score.
///
/// `quality_score = 1 - sum(weight of raised flags) / sum(all weights)`,
/// clamped to `[0, 1]`. With all weights at zero nothing is penalized and the
/// score is `1.0`. `too_few_rows` vetoes acceptance whatever the score.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    weights: ScoreWeights,
    acceptance_threshold: f64,
}

impl ScoreAggregator {
    pub fn new(weights: ScoreWeights, acceptance_threshold: f64) -> Self {
        Self {
            weights,
            acceptance_threshold,
        }
    }

    pub fn aggregate(&self, flags: &QualityFlags) -> ScoreOutcome {
        let quality_score = self.score(flags);
        ScoreOutcome {
            quality_score,
            ok_for_model: quality_score >= self.acceptance_threshold && !flags.too_few_rows,
        }
    }

    pub fn score(&self, flags: &QualityFlags) -> f64 {
        let total = self.weights.total();
        if total <= 0.0 {
            return 1.0;
        }
        let penalty = flags
            .named()
            .iter()
            .zip(self.weights.named())
            .filter(|((_, raised), _)| *raised)
            .map(|(_, (_, weight))| weight)
            .sum::<f64>();
        (1.0 - penalty / total).clamp(0.0, 1.0)
    }
}
