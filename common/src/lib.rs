//! Shared data model for the job scraper.
//!
//! `SearchQuery` describes one run, `JobRecord` is what the detail pages
//! turn into.

use serde::{Deserialize, Serialize};

/// Parameters of one scraping run. Never changes once the run starts.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: String,
    /// Passed to the search endpoint verbatim (no case or spacing fixes).
    pub location: String,
    /// Upper bound (exclusive) of the pagination offset.
    pub max_results: usize,
}

impl SearchQuery {
    pub fn new(
        keywords: impl Into<String>,
        location: impl Into<String>,
        max_results: usize,
    ) -> Self {
        Self {
            keywords: keywords.into(),
            location: location.into(),
            max_results,
        }
    }
}

/// One listing, as scraped from its detail page.
///
/// `job_id` is always set; every other field is `None` when the page
/// didn't carry it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub job_id: String,
    pub company_name: Option<String>,
    pub role: Option<String>,
    pub applicants: Option<String>,
    pub job_url: Option<String>,
}

impl JobRecord {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            company_name: None,
            role: None,
            applicants: None,
            job_url: None,
        }
    }

    /// Looks up a field by its column name.
    ///
    /// Returns `None` both for unknown columns and for empty fields.
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            columns::JOB_ID => Some(self.job_id.as_str()),
            columns::COMPANY_NAME => self.company_name.as_deref(),
            columns::ROLE => self.role.as_deref(),
            columns::APPLICANTS => self.applicants.as_deref(),
            columns::JOB_URL => self.job_url.as_deref(),
            _ => None,
        }
    }

    /// Columns this record contributes to a table, in field order.
    ///
    /// `applicants` is sparse: it only counts when it holds a value.
    pub fn present_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        columns::ALL
            .into_iter()
            .filter(|c| *c != columns::APPLICANTS || self.applicants.is_some())
    }
}

/// Column names used in exports.
pub mod columns {
    pub const JOB_ID: &str = "job_id";
    pub const COMPANY_NAME: &str = "company_name";
    pub const ROLE: &str = "role";
    pub const APPLICANTS: &str = "applicants";
    pub const JOB_URL: &str = "job_url";

    pub const ALL: [&str; 5] = [JOB_ID, COMPANY_NAME, ROLE, APPLICANTS, JOB_URL];
    /// Columns every export carries, whether or not any record has a value.
    pub const CORE: [&str; 4] = [JOB_ID, COMPANY_NAME, ROLE, JOB_URL];
}
