//! Extraction Fallbacks Module
//!
//! The last-participation date of a row can sit in several places. Each place
//! is one [`DateStrategy`]; the extractor tries them in order and takes the
//! first token found:
//! 1. the labeled date inside the tooltip of the detail cell
//! 2. a later cell holding nothing but a `DD.MM.YYYY` date
//! 3. the next such cell

use regex::Regex;

use crate::config::PipelineConfig;
use crate::errors::PipelineError;
use crate::types::{DateSource, RawRow};

pub trait DateStrategy: Send + Sync {
    /// Where a token found by this strategy came from
    fn source(&self) -> DateSource;

    /// Raw date token, if this strategy finds one in the row
    fn find(&self, row: &RawRow) -> Option<String>;
}

/// `"<label> - 10.01.2025"` inside the detail text of one cell
#[derive(Debug)]
pub struct TooltipLabel {
    cell: usize,
    pattern: Regex,
}

impl TooltipLabel {
    pub fn new(cell: usize, label: &str) -> Result<Self, PipelineError> {
        let pattern = format!(r"{}\s*-\s*([\d.]+)", regex::escape(label.trim()));
        let pattern = Regex::new(&pattern)
            .map_err(|e| PipelineError::InvalidConfig(format!("date label: {}", e)))?;
        Ok(TooltipLabel { cell, pattern })
    }
}

impl DateStrategy for TooltipLabel {
    fn source(&self) -> DateSource {
        DateSource::Tooltip
    }

    fn find(&self, row: &RawRow) -> Option<String> {
        let detail = row.cell(self.cell)?.detail.as_deref()?;
        let caps = self.pattern.captures(detail)?;
        Some(caps[1].to_string())
    }
}

/// A cell whose whole trimmed text is `DD.MM.YYYY`
#[derive(Debug)]
pub struct StrictCell {
    cell: usize,
    shape: Regex,
}

impl StrictCell {
    pub fn new(cell: usize) -> Result<Self, PipelineError> {
        let shape = Regex::new(r"^\d{2}\.\d{2}\.\d{4}$")
            .map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;
        Ok(StrictCell { cell, shape })
    }
}

impl DateStrategy for StrictCell {
    fn source(&self) -> DateSource {
        DateSource::Cell(self.cell)
    }

    fn find(&self, row: &RawRow) -> Option<String> {
        let text = row.cell_text(self.cell)?;
        self.shape.is_match(text).then(|| text.to_string())
    }
}

/// Ordered list of strategies; first hit wins
pub struct DateFallbackChain {
    strategies: Vec<Box<dyn DateStrategy>>,
}

impl DateFallbackChain {
    pub fn new(strategies: Vec<Box<dyn DateStrategy>>) -> Self {
        DateFallbackChain { strategies }
    }

    /// Tooltip first, then every configured date cell in order
    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let mut strategies: Vec<Box<dyn DateStrategy>> = Vec::new();
        strategies.push(Box::new(TooltipLabel::new(
            config.layout.detail,
            &config.date_label,
        )?));
        for &cell in &config.layout.date_cells {
            strategies.push(Box::new(StrictCell::new(cell)?));
        }
        Ok(Self::new(strategies))
    }

    pub fn find(&self, row: &RawRow) -> (Option<String>, DateSource) {
        self.strategies
            .iter()
            .find_map(|s| s.find(row).map(|token| (Some(token), s.source())))
            .unwrap_or((None, DateSource::Missing))
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
