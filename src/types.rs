use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display format for dates in the rendered table and filter buttons
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// One cell of a rating table row, as handed over by the row parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCell {
    /// Full trimmed text of the cell
    pub text: String,
    /// Text of a nested "name" element, when the cell holds one
    pub name: Option<String>,
    /// Text of a nested tooltip/detail element, when the cell holds one
    pub detail: Option<String>,
}

impl RawCell {
    pub fn text(text: impl Into<String>) -> Self {
        RawCell {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<RawCell>,
}

impl RawRow {
    pub fn new(cells: Vec<RawCell>) -> Self {
        RawRow { cells }
    }

    /// Convenience for rows made of plain text cells
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawRow {
            cells: texts.into_iter().map(RawCell::text).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<&RawCell> {
        self.cells.get(index)
    }

    /// Trimmed text of a cell, if the row has it
    pub fn cell_text(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(|c| c.text.trim())
    }
}

/// Last tournament date of a participant.
///
/// `Unknown` orders before every known date, so a descending sort puts
/// unknown dates last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LastParticipation {
    Unknown,
    Known(NaiveDate),
}

impl LastParticipation {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            LastParticipation::Known(d) => Some(*d),
            LastParticipation::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, LastParticipation::Known(_))
    }
}

impl From<Option<NaiveDate>> for LastParticipation {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(LastParticipation::Unknown, LastParticipation::Known)
    }
}

impl fmt::Display for LastParticipation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastParticipation::Known(d) => write!(f, "{}", d.format(DISPLAY_DATE_FORMAT)),
            LastParticipation::Unknown => write!(f, "-"),
        }
    }
}

/// Which fallback produced the raw date token of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    Tooltip,
    Cell(usize),
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantRecord {
    pub name: String,
    pub rating: String,
    pub rating_delta: String,
    /// Raw date token as found in the page, before normalization
    #[serde(skip)]
    pub date_token: Option<String>,
    pub date_source: DateSource,
    pub last_participation: LastParticipation,
    pub city: String,
    /// 1-based; zero until the ranker has run
    pub rank: u32,
}

impl ParticipantRecord {
    pub fn trend(&self) -> DeltaTrend {
        DeltaTrend::classify(&self.rating_delta)
    }
}

/// Direction of the last rating change, used for styling only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaTrend {
    Up,
    Down,
    Flat,
}

impl DeltaTrend {
    pub fn classify(delta: &str) -> Self {
        let delta = delta.trim();
        let down = delta.contains('-') && !matches!(delta, "-0" | "+-0");
        let up = delta.contains('+') && !matches!(delta, "+0" | "+-0");
        if down {
            DeltaTrend::Down
        } else if up {
            DeltaTrend::Up
        } else {
            DeltaTrend::Flat
        }
    }
}

/// Facet letters split into two display rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetRows {
    first_row: Vec<char>,
    second_row: Vec<char>,
}

impl FacetRows {
    /// Splits sorted distinct letters at `len / 2`
    pub fn split(letters: Vec<char>) -> Self {
        let mut first_row = letters;
        let second_row = first_row.split_off(first_row.len() / 2);
        FacetRows {
            first_row,
            second_row,
        }
    }

    pub fn first_row(&self) -> &[char] {
        &self.first_row
    }

    pub fn second_row(&self) -> &[char] {
        &self.second_row
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.first_row.iter().chain(self.second_row.iter()).copied()
    }

    pub fn len(&self) -> usize {
        self.first_row.len() + self.second_row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ranked, filtered result of one pipeline run. Built only by
/// [`crate::snapshot::assemble`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingSnapshot {
    records: Vec<ParticipantRecord>,
    latest_date: LastParticipation,
    facets: FacetRows,
}

impl RatingSnapshot {
    pub(crate) fn new(
        records: Vec<ParticipantRecord>,
        latest_date: LastParticipation,
        facets: FacetRows,
    ) -> Self {
        RatingSnapshot {
            records,
            latest_date,
            facets,
        }
    }

    pub fn records(&self) -> &[ParticipantRecord] {
        &self.records
    }

    pub fn latest_date(&self) -> LastParticipation {
        self.latest_date
    }

    pub fn facets(&self) -> &FacetRows {
        &self.facets
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Counters describing one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub rows_seen: usize,
    pub rows_processed: usize,
    pub truncated: bool,
    pub rows_skipped: usize,
    pub records_extracted: usize,
    pub unknown_dates: usize,
    pub stale_dropped: usize,
    pub records_kept: usize,
}
