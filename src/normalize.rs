//! Date Normalization Module
//!
//! Turns free-form date tokens from the rating page into calendar dates:
//! - `DD.MM.YYYY` and (optionally) `DD.MM.YY`
//! - a trailing ` HH:MM:SS` time of day is dropped first
//! - anything else, including impossible dates, becomes `Unknown`

use chrono::NaiveDate;
use regex::Regex;

use crate::config::DateFormatConfig;
use crate::errors::PipelineError;
use crate::types::{LastParticipation, ParticipantRecord};

const TIME_SUFFIX: &str = r"\s+\d{2}:\d{2}:\d{2}$";
const DATE_SHAPE: &str = r"^(\d{2})\.(\d{2})\.(\d{4}|\d{2})$";

#[derive(Debug, Clone)]
pub struct DateNormalizer {
    time_suffix: Regex,
    shape: Regex,
    accept_short_year: bool,
    short_year_century: i32,
}

impl DateNormalizer {
    pub fn new(config: &DateFormatConfig) -> Result<Self, PipelineError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| PipelineError::InvalidConfig(e.to_string()))
        };
        Ok(DateNormalizer {
            time_suffix: compile(TIME_SUFFIX)?,
            shape: compile(DATE_SHAPE)?,
            accept_short_year: config.accept_short_year,
            short_year_century: config.short_year_century,
        })
    }

    pub fn parse(&self, token: &str) -> LastParticipation {
        self.parse_date(token).into()
    }

    fn parse_date(&self, token: &str) -> Option<NaiveDate> {
        let token = token.trim();
        let token = self.time_suffix.replace(token, "");
        let caps = self.shape.captures(&token)?;

        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year_str = &caps[3];
        let year: i32 = match year_str.len() {
            4 => year_str.parse().ok()?,
            2 if self.accept_short_year => self.short_year_century + year_str.parse::<i32>().ok()?,
            _ => return None,
        };

        // from_ymd_opt rejects month 13, day 0, Feb 30 etc.
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Sets `last_participation` from the record's raw date token
    pub fn apply(&self, record: &mut ParticipantRecord) {
        record.last_participation = match record.date_token.as_deref() {
            Some(token) => self.parse(token),
            None => LastParticipation::Unknown,
        };
    }
}
