//! One run: extract → normalize → filter → rank → assemble.
//!
//! Pure and synchronous. Fetching the page and publishing the result happen
//! outside, before and after [`Pipeline::run`].

use chrono::NaiveDate;
use tracing::info;

use crate::config::PipelineConfig;
use crate::errors::PipelineError;
use crate::extract::RecordExtractor;
use crate::filter::RecencyFilter;
use crate::normalize::DateNormalizer;
use crate::snapshot;
use crate::sorter;
use crate::types::{RatingSnapshot, RawRow, RunReport};

#[derive(Debug)]
pub struct PipelineOutput {
    pub snapshot: RatingSnapshot,
    pub report: RunReport,
}

pub struct Pipeline {
    config: PipelineConfig,
    extractor: RecordExtractor,
    normalizer: DateNormalizer,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let extractor = RecordExtractor::new(&config)?;
        let normalizer = DateNormalizer::new(&config.dates)?;
        Ok(Pipeline {
            config,
            extractor,
            normalizer,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// `today` anchors the recency window for the whole run
    pub fn run(&self, rows: &[RawRow], today: NaiveDate) -> PipelineOutput {
        let extraction = self.extractor.extract(rows);
        let mut report = RunReport {
            rows_seen: extraction.rows_seen,
            rows_processed: extraction.rows_processed,
            truncated: extraction.truncated(),
            rows_skipped: extraction.rows_skipped,
            records_extracted: extraction.records.len(),
            ..Default::default()
        };
        info!(
            rows_seen = report.rows_seen,
            rows_processed = report.rows_processed,
            rows_skipped = report.rows_skipped,
            truncated = report.truncated,
            records = report.records_extracted,
            "extracted records"
        );

        let mut records = extraction.records;
        for record in records.iter_mut() {
            self.normalizer.apply(record);
        }

        let filter = RecencyFilter::new(today, self.config.recency_window_days);
        let outcome = filter.apply(records);
        report.unknown_dates = outcome.unknown_dropped;
        report.stale_dropped = outcome.stale_dropped;
        report.records_kept = outcome.kept.len();
        info!(
            cutoff = %filter.cutoff(),
            kept = report.records_kept,
            unknown = report.unknown_dates,
            stale = report.stale_dropped,
            "applied recency window"
        );

        let ranked = sorter::rank_records(outcome.kept);
        let snapshot = snapshot::assemble(ranked, &self.config.alphabet);
        info!(
            records = snapshot.len(),
            latest_date = %snapshot.latest_date(),
            facet_letters = snapshot.facets().len(),
            "assembled snapshot"
        );

        PipelineOutput { snapshot, report }
    }
}
