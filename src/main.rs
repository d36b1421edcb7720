use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use club_rating::publish::{self, FtpPublisher, LocalPublisher, Publisher};
use club_rating::render::render_html;
use club_rating::scrapers::{self, PageSource, RowParser};
use club_rating::{storage, Pipeline};

/// Fetch the club rating page, keep recently active players and publish the table
#[derive(Debug, Parser)]
#[command(name = "club_rating", version)]
struct Args {
    /// Config file (defaults to $ROOT/config.yml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Anchor date for the recency window, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Write the local file only, skip the FTP upload
    #[arg(long)]
    no_upload: bool,

    /// Also write the snapshot as JSON to this path
    #[arg(long)]
    snapshot_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "club_rating=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = storage::load_config_or_default(args.config.as_deref())?;

    // Fail on bad configuration before touching the network
    let pipeline = Pipeline::new(config.pipeline.clone()).context("Invalid pipeline config")?;
    let parser = RowParser::new(&config.selectors).context("Invalid row selectors")?;
    let ftp = match (&config.ftp, args.no_upload) {
        (Some(ftp), false) => Some(FtpPublisher::from_config(ftp)?),
        (Some(_), true) => {
            info!("upload disabled by --no-upload");
            None
        }
        (None, _) => None,
    };

    info!("starting rating run");
    let html = scrapers::fetch_page(&PageSource::from_config(&config.source))?;
    let rows = parser.parse(&html)?;
    drop(html);

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let output = pipeline.run(&rows, today);
    if output.report.truncated {
        warn!(
            rows_seen = output.report.rows_seen,
            rows_processed = output.report.rows_processed,
            "page was truncated to the row cap, the published table is incomplete"
        );
    }
    if output.snapshot.is_empty() {
        warn!("no players within the recency window, publishing an empty table");
    }

    if let Some(path) = &args.snapshot_json {
        publish::write_json(path, &output.snapshot)?;
        info!(path = %path.display(), "snapshot written");
    }

    let document = render_html(&output.snapshot, &config.render);
    let local = LocalPublisher::new(&config.render.output_dir);
    let mut targets: Vec<&dyn Publisher> = vec![&local];
    if let Some(ftp) = &ftp {
        targets.push(ftp);
    }
    publish::publish_all(&targets, &config.render.file_name, document.as_bytes())?;

    info!(
        records = output.snapshot.len(),
        latest_date = %output.snapshot.latest_date(),
        "run finished"
    );
    Ok(())
}
