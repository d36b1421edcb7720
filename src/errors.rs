use thiserror::Error;

/// Failures that abort a whole run. Per-row anomalies never end up here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("no rating rows matched selector '{selector}'")]
    NoRows { selector: String },

    #[error("HTTP {status} while fetching {url}")]
    Http { status: u16, url: String },
}
