mod rating_table;

pub use rating_table::RowParser;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::config::SourceConfig;
use crate::errors::PipelineError;

/// Where the rating page markup comes from
#[derive(Debug, Clone)]
pub enum PageSource {
    Url {
        url: String,
        timeout_secs: u64,
        user_agent: String,
    },
    File(PathBuf),
}

impl PageSource {
    pub fn from_config(config: &SourceConfig) -> Self {
        match &config.file {
            Some(path) => PageSource::File(path.clone()),
            None => PageSource::Url {
                url: config.url.clone(),
                timeout_secs: config.timeout_secs,
                user_agent: config.user_agent.clone(),
            },
        }
    }
}

/// Fetches the raw page markup
pub fn fetch_page(source: &PageSource) -> Result<String> {
    match source {
        PageSource::File(path) => {
            info!(path = %path.display(), "reading rating page from file");
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read page from {:?}", path))
        }
        PageSource::Url {
            url,
            timeout_secs,
            user_agent,
        } => fetch_url(url, *timeout_secs, user_agent),
    }
}

fn fetch_url(url: &str, timeout_secs: u64, user_agent: &str) -> Result<String> {
    info!(url, "fetching rating page");

    let client = reqwest::blocking::Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .context("Failed to build HTTP client")?;

    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("Request to {} failed", url))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(PipelineError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        }
        .into());
    }

    let html = resp
        .text()
        .with_context(|| format!("Failed to read body from {}", url))?;
    info!(bytes = html.len(), "page loaded");
    Ok(html)
}
