use chrono::{Days, NaiveDate};

use crate::types::{LastParticipation, ParticipantRecord};

/// Records split by the recency window
#[derive(Debug, Default)]
pub struct RecencyOutcome {
    pub kept: Vec<ParticipantRecord>,
    pub unknown_dropped: usize,
    pub stale_dropped: usize,
}

/// Keeps records whose last participation is known and falls after
/// `today - window_days`. `today` is taken once by the caller.
///
/// A participation date stands for midnight of that day, while the window
/// reaches back from the moment of the run, so the boundary day itself is
/// already outside.
#[derive(Debug, Clone, Copy)]
pub struct RecencyFilter {
    cutoff: NaiveDate,
}

impl RecencyFilter {
    pub fn new(today: NaiveDate, window_days: u32) -> Self {
        RecencyFilter {
            cutoff: today
                .checked_sub_days(Days::new(u64::from(window_days)))
                .unwrap_or(NaiveDate::MIN),
        }
    }

    /// Newest date already dropped
    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    pub fn is_recent(&self, date: LastParticipation) -> bool {
        match date {
            LastParticipation::Known(d) => d > self.cutoff,
            LastParticipation::Unknown => false,
        }
    }

    pub fn apply(&self, records: Vec<ParticipantRecord>) -> RecencyOutcome {
        let mut outcome = RecencyOutcome::default();
        for record in records {
            let date = record.last_participation;
            if !date.is_known() {
                outcome.unknown_dropped += 1;
            } else if self.is_recent(date) {
                outcome.kept.push(record);
            } else {
                outcome.stale_dropped += 1;
            }
        }
        outcome
    }
}
