//! Job listing scraper for the LinkedIn guest jobs API.
//!
//! Pages through search results, fetches each listing's detail page and
//! exports the collected records to CSV (optionally JSON and a console
//! preview).

pub mod config;
pub mod detail;
pub mod error;
pub mod export;
pub mod http;
pub mod listing;
pub mod pipeline;
pub mod preview;

use common::JobRecord;

pub use config::{RetryPolicy, ScrapeConfig};
pub use error::{Result, ScrapeError};
pub use export::Table;
pub use http::{Fetcher, HttpFetcher, Page};
pub use pipeline::JobScraper;

/// Runs a full scrape over HTTP and writes the configured outputs.
pub fn run(config: &ScrapeConfig) -> Result<Vec<JobRecord>> {
    let fetcher = HttpFetcher::new(&config.user_agent, config.timeout)?;
    run_with(fetcher, config)
}

/// Same as [`run`] with a caller-supplied fetcher.
pub fn run_with<F: Fetcher>(fetcher: F, config: &ScrapeConfig) -> Result<Vec<JobRecord>> {
    let jobs = JobScraper::from_config(fetcher, config).scrape_jobs()?;

    export::write_csv(&jobs, &config.output_path)?;
    if let Some(path) = &config.json_output {
        export::write_json(&jobs, path)?;
    }
    if config.preview {
        print!("{}", preview::render_table(&Table::from_records(&jobs)));
    }

    Ok(jobs)
}
