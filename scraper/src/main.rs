//! LinkedIn guest-API job scraper
//!
//! Reads its settings from the environment (see `ScrapeConfig`) and
//! saves the scraped listings to CSV.

use anyhow::{Context, Result};
use job_scraper::ScrapeConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,reqwest=warn,html5ever=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ScrapeConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        keywords = %config.query.keywords,
        location = %config.query.location,
        max_results = config.query.max_results,
        "🔍 Starting job scraper"
    );

    let jobs = job_scraper::run(&config).context("Scraping failed")?;

    tracing::info!(
        total = jobs.len(),
        output = %config.output_path.display(),
        "✨ Scraping complete!"
    );
    Ok(())
}
