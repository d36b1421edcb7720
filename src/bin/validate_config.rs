//! Config Validation Binary
//!
//! Checks config.yml before a scheduled run:
//! - pipeline settings and the date label compile
//! - row selectors are valid CSS
//! - the page source and FTP target look usable

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use club_rating::config::AppConfig;
use club_rating::scrapers::RowParser;
use club_rating::{storage, Pipeline};

#[derive(Debug, Parser)]
#[command(name = "validate_config", version)]
struct Args {
    /// Config file (defaults to $ROOT/config.yml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn check(config: &AppConfig) -> Findings {
    let mut findings = Findings::default();

    if let Err(e) = Pipeline::new(config.pipeline.clone()) {
        findings.errors.push(e.to_string());
    }
    if let Err(e) = RowParser::new(&config.selectors) {
        findings.errors.push(e.to_string());
    }

    let layout = &config.pipeline.layout;
    let fields = [
        ("name", layout.name),
        ("rating", layout.rating),
        ("delta", layout.delta),
    ];
    for (field, index) in fields {
        if index >= layout.min_cells {
            findings.warnings.push(format!(
                "layout.{} = {} is not covered by min_cells = {}; rows may get an empty {}",
                field, index, layout.min_cells, field
            ));
        }
    }
    if layout.date_cells.is_empty() {
        findings
            .warnings
            .push("layout.date_cells is empty; only the tooltip date will be used".to_string());
    }

    match &config.source.file {
        Some(path) if !path.exists() => {
            findings.errors.push(format!("source.file {:?} does not exist", path));
        }
        Some(_) => {}
        None => {
            let url = &config.source.url;
            if !url.starts_with("http://") && !url.starts_with("https://") {
                findings
                    .errors
                    .push(format!("source.url has no http/https scheme: {}", url));
            }
        }
    }

    if let Some(ftp) = &config.ftp {
        let ftp = ftp.clone().with_env_overrides();
        if ftp.host.trim().is_empty() {
            findings.errors.push("ftp.host is empty".to_string());
        }
        for var in ["FTP_USER", "FTP_PASS"] {
            if std::env::var(var).is_err() {
                findings
                    .warnings
                    .push(format!("{} is not set; uploads will fail", var));
            }
        }
    }

    if config.render.file_name.trim().is_empty() {
        findings.errors.push("render.file_name is empty".to_string());
    }

    findings
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("=== Config Validator ===");

    let path = args.config.unwrap_or_else(storage::default_config_path);
    let config = storage::load_config(&path).context("Failed to load config")?;
    let findings = check(&config);

    if findings.errors.is_empty() && findings.warnings.is_empty() {
        println!("✓ {:?} is valid", path);
        return Ok(());
    }

    if !findings.errors.is_empty() {
        println!("\n❌ ERRORS (must fix):");
        for error in &findings.errors {
            println!("  - {}", error);
        }
    }

    if !findings.warnings.is_empty() {
        println!("\n⚠️  WARNINGS:");
        for warning in &findings.warnings {
            println!("  - {}", warning);
        }
    }

    if !findings.errors.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
