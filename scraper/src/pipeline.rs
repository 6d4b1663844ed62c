//! Pagination controller: walks the search offsets and collects records.

use common::{JobRecord, SearchQuery};
use tracing::info;

use crate::config::{RetryPolicy, ScrapeConfig};
use crate::detail::fetch_job_details;
use crate::error::Result;
use crate::http::Fetcher;
use crate::listing::fetch_job_ids;

/// Step between search offsets. Only the cursor stride; how many listings
/// a page actually holds is up to the site.
pub const PAGE_STRIDE: usize = 25;

/// Offsets `0, 25, 50, …` strictly below `max_results`.
pub fn offsets(max_results: usize) -> impl Iterator<Item = usize> {
    (0..max_results).step_by(PAGE_STRIDE)
}

/// Sequential scraper over one search query.
pub struct JobScraper<F> {
    fetcher: F,
    query: SearchQuery,
    retry: RetryPolicy,
    stop_on_empty_page: bool,
}

impl<F: Fetcher> JobScraper<F> {
    pub fn new(fetcher: F, query: SearchQuery) -> Self {
        Self {
            fetcher,
            query,
            retry: RetryPolicy::default(),
            stop_on_empty_page: false,
        }
    }

    pub fn from_config(fetcher: F, config: &ScrapeConfig) -> Self {
        Self {
            fetcher,
            query: config.query.clone(),
            retry: config.retry.clone(),
            stop_on_empty_page: config.stop_on_empty_page,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn stop_on_empty_page(mut self, stop: bool) -> Self {
        self.stop_on_empty_page = stop;
        self
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// IDs on the search page starting at `start`.
    pub fn get_job_ids(&self, start: usize) -> Result<Vec<String>> {
        fetch_job_ids(&self.fetcher, &self.query, start, &self.retry)
    }

    /// Record for one job ID.
    pub fn get_job_details(&self, job_id: &str) -> Result<JobRecord> {
        fetch_job_details(&self.fetcher, job_id, &self.retry)
    }

    /// Runs the whole scrape and returns the records in the order found.
    ///
    /// Fails only on transport errors; failed search pages and missing
    /// fields are absorbed along the way.
    pub fn scrape_jobs(&self) -> Result<Vec<JobRecord>> {
        let mut jobs = Vec::new();

        for start in offsets(self.query.max_results) {
            let job_ids = self.get_job_ids(start)?;
            info!(start, found = job_ids.len(), "search page");

            if job_ids.is_empty() && self.stop_on_empty_page {
                info!(start, "empty page, stopping");
                break;
            }

            for job_id in &job_ids {
                jobs.push(self.get_job_details(job_id)?);
            }
        }

        info!(total = jobs.len(), "scrape finished");
        Ok(jobs)
    }
}
