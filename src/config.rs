//! Configuration
//!
//! Everything a run needs is loaded from one YAML file into [`AppConfig`].
//! Every field has a default, so an empty file (or a missing section) is a
//! valid configuration for the club page the tool was written for.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::PipelineError;

pub const DEFAULT_URL: &str = "http://pingwinclub.ru/";
pub const DEFAULT_DATE_LABEL: &str = "Дата последнего участия";
/// About a hundred years
pub const MAX_RECENCY_WINDOW_DAYS: u32 = 36_500;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub selectors: RowSelectors,
    pub pipeline: PipelineConfig,
    pub render: RenderOptions,
    pub ftp: Option<FtpConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    /// Read markup from a local file instead of fetching `url`
    pub file: Option<PathBuf>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            url: DEFAULT_URL.to_string(),
            file: None,
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; ClubRatingBot/0.1)".to_string(),
        }
    }
}

/// CSS selectors used to cut the page into rows and cells
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RowSelectors {
    pub row: String,
    pub cell: String,
    pub name: String,
    pub detail: String,
}

impl Default for RowSelectors {
    fn default() -> Self {
        RowSelectors {
            row: "tr.stat".to_string(),
            cell: "td".to_string(),
            name: ".statname".to_string(),
            detail: "div.podrstat".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub recency_window_days: u32,
    pub max_rows: usize,
    /// Label preceding the date inside the tooltip text
    pub date_label: String,
    pub dates: DateFormatConfig,
    pub layout: ColumnLayout,
    pub alphabet: FacetAlphabet,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            recency_window_days: 90,
            max_rows: 1000,
            date_label: DEFAULT_DATE_LABEL.to_string(),
            dates: DateFormatConfig::default(),
            layout: ColumnLayout::default(),
            alphabet: FacetAlphabet::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.recency_window_days > MAX_RECENCY_WINDOW_DAYS {
            return Err(PipelineError::InvalidConfig(format!(
                "pipeline.recency_window_days must be at most {}, got {}",
                MAX_RECENCY_WINDOW_DAYS, self.recency_window_days
            )));
        }
        if self.max_rows == 0 {
            return Err(PipelineError::InvalidConfig(
                "pipeline.max_rows must be at least 1".to_string(),
            ));
        }
        if self.date_label.trim().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "pipeline.date_label must not be empty".to_string(),
            ));
        }
        if self.alphabet.first > self.alphabet.last {
            return Err(PipelineError::InvalidConfig(format!(
                "pipeline.alphabet range '{}'..'{}' is inverted",
                self.alphabet.first, self.alphabet.last
            )));
        }
        let century = self.dates.short_year_century;
        if !(0..=9900).contains(&century) || century % 100 != 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "pipeline.dates.short_year_century must be a multiple of 100, got {}",
                century
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DateFormatConfig {
    /// Accept `DD.MM.YY` in addition to `DD.MM.YYYY`
    pub accept_short_year: bool,
    /// Added to a two-digit year
    pub short_year_century: i32,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        DateFormatConfig {
            accept_short_year: true,
            short_year_century: 2000,
        }
    }
}

/// Zero-based cell positions inside a rating row
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub min_cells: usize,
    pub detail: usize,
    pub name: usize,
    pub rating: usize,
    pub delta: usize,
    /// Cells tried in order for a bare `DD.MM.YYYY` date
    pub date_cells: Vec<usize>,
    pub city: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout {
            min_cells: 5,
            detail: 1,
            name: 2,
            rating: 3,
            delta: 4,
            date_cells: vec![5, 6],
            city: 7,
        }
    }
}

/// Inclusive character range facet letters are taken from
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct FacetAlphabet {
    pub first: char,
    pub last: char,
}

impl Default for FacetAlphabet {
    fn default() -> Self {
        FacetAlphabet {
            first: 'А',
            last: 'Я',
        }
    }
}

impl FacetAlphabet {
    pub fn contains(&self, c: char) -> bool {
        c.is_alphabetic() && (self.first..=self.last).contains(&c)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderOptions {
    pub title: String,
    /// `<h1>` text, left out when empty
    pub banner: String,
    pub banner_href: String,
    pub heading: String,
    pub file_name: String,
    pub output_dir: PathBuf,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            title: "Клубный рейтинг".to_string(),
            banner: "Рейтинг PingWinClub".to_string(),
            banner_href: "https://пингвинклуб.рф/reitingi.html".to_string(),
            heading: "Клубный рейтинг за прошедшие 3 месяца".to_string(),
            file_name: "rating_full.html".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Upload target. Credentials are not part of the file; see
/// [`crate::publish::FtpPublisher::from_config`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FtpConfig {
    pub host: String,
    pub port: u16,
    pub remote_dir: String,
}

impl Default for FtpConfig {
    fn default() -> Self {
        FtpConfig {
            host: String::new(),
            port: 21,
            remote_dir: "/".to_string(),
        }
    }
}

impl FtpConfig {
    /// Applies `FTP_HOST` / `FTP_PATH` overrides when they are set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("FTP_HOST") {
            if !host.trim().is_empty() {
                self.host = host;
            }
        }
        if let Ok(path) = std::env::var("FTP_PATH") {
            if !path.trim().is_empty() {
                self.remote_dir = path;
            }
        }
        self
    }
}
