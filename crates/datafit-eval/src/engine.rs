use std::time::Instant;

use datafit_core::{
    Error, FlagDetails, FormatHints, QualityConfig, QualityDescriptor, QualityResult, Result,
    Table, validate_config,
};

use crate::flags::FlagEvaluator;
use crate::model::{EvaluationInput, TableOverview, TopCategoryOptions};
use crate::reader::{read_table, strip_bom};
use crate::score::ScoreAggregator;
use crate::summarize::{DerivedDescriptor, TableSummarizer, derive_descriptor};

/// Evaluate dataset quality from a descriptor or a raw delimited payload.
///
/// The service holds only its validated profile, so a single instance can be
/// shared across threads and instances with different profiles can coexist.
#[derive(Debug, Clone)]
pub struct QualityService {
    config: QualityConfig,
    evaluator: FlagEvaluator,
    aggregator: ScoreAggregator,
}

impl QualityService {
    pub fn new(config: QualityConfig) -> Result<Self> {
        validate_config(&config)?;
        let evaluator = FlagEvaluator::new(config.thresholds.clone());
        let aggregator = ScoreAggregator::new(config.weights.clone(), config.acceptance_threshold);
        Ok(Self {
            config,
            evaluator,
            aggregator,
        })
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    pub fn evaluate(&self, input: EvaluationInput<'_>) -> Result<QualityResult> {
        let mode = input.mode();
        tracing::debug!(event = "evaluation_started", mode);

        let outcome = match input {
            EvaluationInput::Descriptor(descriptor) => self.evaluate_descriptor(descriptor),
            EvaluationInput::Raw { bytes, hints } => self.evaluate_raw(bytes, hints),
        };

        match &outcome {
            Ok(result) => tracing::info!(
                event = "evaluation_finished",
                mode,
                n_rows = result.n_rows,
                n_cols = result.n_cols,
                quality_score = result.quality_score,
                ok_for_model = result.ok_for_model,
                latency_ms = result.latency_ms
            ),
            Err(err) => tracing::warn!(
                event = "evaluation_rejected",
                mode,
                code = err.code(),
                error = %err
            ),
        }
        outcome
    }

    /// Mode A: flags and score straight from caller-supplied statistics.
    pub fn evaluate_descriptor(&self, descriptor: &QualityDescriptor) -> Result<QualityResult> {
        let start = Instant::now();
        self.finish(descriptor, None, start)
    }

    /// Mode B: parse and summarize the payload, then evaluate its descriptor.
    pub fn evaluate_raw(&self, bytes: &[u8], hints: &FormatHints) -> Result<QualityResult> {
        let start = Instant::now();
        ensure_not_empty(bytes, hints)?;
        let table = read_table(bytes, hints)?;
        tracing::debug!(
            event = "table_parsed",
            n_rows = table.n_rows(),
            n_cols = table.n_cols()
        );
        let derived = self.describe(&table, hints);
        self.finish(&derived.descriptor, Some(derived.details), start)
    }

    /// Evaluate a table that is already in memory.
    pub fn evaluate_table(&self, table: &Table, hints: &FormatHints) -> Result<QualityResult> {
        let start = Instant::now();
        let derived = self.describe(table, hints);
        self.finish(&derived.descriptor, Some(derived.details), start)
    }

    /// Summary, missing table, top categories and correlations of a raw payload.
    pub fn summarize_raw(
        &self,
        bytes: &[u8],
        hints: &FormatHints,
        options: &TopCategoryOptions,
    ) -> Result<TableOverview> {
        let start = Instant::now();
        ensure_not_empty(bytes, hints)?;
        let table = read_table(bytes, hints)?;
        let summarizer = TableSummarizer::new(hints);
        let summary = summarizer.summarize(&table);
        let top_categories = summarizer.top_categories(&table, options);
        let correlations = summarizer.correlations(&table);
        Ok(TableOverview {
            summary,
            top_categories,
            correlations,
            latency_ms: elapsed_ms(start),
        })
    }

    fn describe(&self, table: &Table, hints: &FormatHints) -> DerivedDescriptor {
        let summary = TableSummarizer::new(hints).summarize(table);
        derive_descriptor(&summary, self.evaluator.thresholds())
    }

    fn finish(
        &self,
        descriptor: &QualityDescriptor,
        details: Option<FlagDetails>,
        start: Instant,
    ) -> Result<QualityResult> {
        let flags = self.evaluator.evaluate(descriptor)?;
        let score = self.aggregator.aggregate(&flags);
        Ok(QualityResult {
            ok_for_model: score.ok_for_model,
            quality_score: score.quality_score,
            flags,
            n_rows: descriptor.n_rows as u64,
            n_cols: descriptor.n_cols as u64,
            latency_ms: elapsed_ms(start),
            details,
        })
    }
}

fn ensure_not_empty(bytes: &[u8], hints: &FormatHints) -> Result<()> {
    if bytes.is_empty() {
        return Err(Error::EmptyInput("payload is zero bytes".to_string()));
    }
    let content = strip_bom(bytes, hints.encoding);
    if content.is_empty() {
        return Err(Error::EmptyInput(
            "payload contains only a byte-order mark".to_string(),
        ));
    }
    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::EmptyInput(
            "payload contains only whitespace".to_string(),
        ));
    }
    Ok(())
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> QualityService {
        QualityService::new(QualityConfig::default()).expect("default config")
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = QualityConfig::default();
        config.thresholds.missing_threshold = 2.0;
        let err = QualityService::new(config).expect_err("invalid config must fail");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn zero_bytes_are_empty_input() {
        let err = service()
            .evaluate_raw(b"", &FormatHints::default())
            .expect_err("empty payload must fail");
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[test]
    fn whitespace_only_is_empty_input() {
        let err = service()
            .evaluate_raw(b" \n\r\n", &FormatHints::default())
            .expect_err("blank payload must fail");
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[test]
    fn byte_order_mark_alone_is_empty_input() {
        for payload in [&b"\xEF\xBB\xBF"[..], &b"\xEF\xBB\xBF \r\n"[..]] {
            let err = service()
                .evaluate_raw(payload, &FormatHints::default())
                .expect_err("bom-only payload must fail");
            assert!(matches!(err, Error::EmptyInput(_)));
        }
        let err = service()
            .summarize_raw(
                b"\xEF\xBB\xBF",
                &FormatHints::default(),
                &TopCategoryOptions::default(),
            )
            .expect_err("bom-only payload must fail");
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[test]
    fn header_only_payload_is_flagged_not_rejected() {
        let result = service()
            .evaluate_raw(b"a,b\n", &FormatHints::default())
            .expect("zero-row table is accepted");
        assert_eq!(result.n_rows, 0);
        assert_eq!(result.n_cols, 2);
        assert!(result.flags.too_few_rows);
        assert!(!result.flags.has_constant_columns);
        assert!(!result.flags.has_high_cardinality_categoricals);
        assert!(!result.ok_for_model);
    }

    #[test]
    fn descriptor_mode_has_no_details() {
        let result = service()
            .evaluate(EvaluationInput::Descriptor(&QualityDescriptor::new(1000, 10, 0.1)))
            .expect("evaluate");
        assert!(result.details.is_none());
        assert!(result.ok_for_model);
        assert!(result.latency_ms >= 0.0);
    }

    #[test]
    fn service_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QualityService>();
    }
}
