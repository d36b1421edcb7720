//! Turns raw table rows into participant records.

use tracing::{debug, warn};

use crate::config::{ColumnLayout, PipelineConfig};
use crate::errors::PipelineError;
use crate::extraction_fallbacks::DateFallbackChain;
use crate::types::{LastParticipation, ParticipantRecord, RawRow};

/// Placeholder for a missing city
pub const NO_CITY: &str = "-";

#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<ParticipantRecord>,
    pub rows_seen: usize,
    pub rows_processed: usize,
    pub rows_skipped: usize,
}

impl Extraction {
    /// True when the row cap cut the input short
    pub fn truncated(&self) -> bool {
        self.rows_processed < self.rows_seen
    }
}

pub struct RecordExtractor {
    layout: ColumnLayout,
    max_rows: usize,
    dates: DateFallbackChain,
}

impl RecordExtractor {
    pub fn new(config: &PipelineConfig) -> Result<Self, PipelineError> {
        Ok(RecordExtractor {
            layout: config.layout.clone(),
            max_rows: config.max_rows,
            dates: DateFallbackChain::from_config(config)?,
        })
    }

    pub fn extract(&self, rows: &[RawRow]) -> Extraction {
        let rows_seen = rows.len();
        let capped = &rows[..rows_seen.min(self.max_rows)];
        if capped.len() < rows_seen {
            warn!(
                rows_seen,
                max_rows = self.max_rows,
                "row count exceeds safety cap, only the first rows are used"
            );
        }

        let mut records = Vec::with_capacity(capped.len());
        let mut rows_skipped = 0;
        for (index, row) in capped.iter().enumerate() {
            match self.extract_row(row) {
                Some(record) => records.push(record),
                None => {
                    debug!(index, cells = row.len(), "skipping malformed row");
                    rows_skipped += 1;
                }
            }
        }

        Extraction {
            records,
            rows_seen,
            rows_processed: capped.len(),
            rows_skipped,
        }
    }

    /// `None` for rows too short to be a rating row or without a name
    pub fn extract_row(&self, row: &RawRow) -> Option<ParticipantRecord> {
        if row.len() < self.layout.min_cells {
            return None;
        }

        let name = self.name(row)?;
        let rating = row.cell_text(self.layout.rating).unwrap_or_default().to_string();
        let rating_delta = row.cell_text(self.layout.delta).unwrap_or_default().to_string();
        let (date_token, date_source) = self.dates.find(row);
        let city = row
            .cell_text(self.layout.city)
            .map(str::to_string)
            .unwrap_or_else(|| NO_CITY.to_string());

        Some(ParticipantRecord {
            name,
            rating,
            rating_delta,
            date_token,
            date_source,
            last_participation: LastParticipation::Unknown,
            city,
            rank: 0,
        })
    }

    /// Nested name element first, whole cell text otherwise
    fn name(&self, row: &RawRow) -> Option<String> {
        let cell = row.cell(self.layout.name)?;
        let name = cell
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| cell.text.trim());
        (!name.is_empty()).then(|| name.to_string())
    }
}
