//! Club Rating Library
//!
//! Scrapes a club rating page, keeps players active within a recency window,
//! re-ranks them and renders a filterable HTML table.

pub mod config;
pub mod errors;
pub mod extract;
pub mod extraction_fallbacks;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod publish;
pub mod render;
pub mod scrapers;
pub mod snapshot;
pub mod sorter;
pub mod storage;
pub mod types;

pub use errors::PipelineError;
pub use pipeline::{Pipeline, PipelineOutput};
pub use types::*;
