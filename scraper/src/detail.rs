//! Job detail pages: URL building and field extraction.
//!
//! Every field is looked up on its own and comes back as an `Option`, so a
//! page missing one element still yields the others.

use common::JobRecord;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::info;

use crate::config::RetryPolicy;
use crate::error::Result;
use crate::http::{get_with_retry, Fetcher};

const DETAIL_URL: &str = "https://www.linkedin.com/jobs-guest/jobs/api/jobPosting";

// Static selectors and pattern; a typo here panics on first use instead of
// quietly emptying a field.
lazy_static! {
    static ref COMPANY: Selector =
        Selector::parse("a.topcard__org-name-link.topcard__flavor--black-link").unwrap();
    static ref ROLE: Selector = Selector::parse("h2.top-card-layout__title").unwrap();
    static ref APPLICANTS: Selector =
        Selector::parse("figcaption.num-applicants__caption").unwrap();
    static ref JOB_URL: Selector = Selector::parse("a.topcard__link").unwrap();
    static ref DIGITS: Regex = Regex::new(r"\d+").unwrap();
}

/// URL of the detail page for one job.
pub fn detail_url(job_id: &str) -> String {
    format!("{}/{}", DETAIL_URL, job_id)
}

/// Text content with every text node trimmed and blank ones dropped.
fn stripped_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn first_match<'a>(document: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    document.select(selector).next()
}

/// First run of digits in a caption like "Over 200 applicants".
fn first_number(text: &str) -> Option<String> {
    DIGITS.find(text).map(|m| m.as_str().to_string())
}

/// Builds a record from a detail page. Never fails: missing markup just
/// leaves the matching field empty.
pub fn parse_job_details(job_id: &str, html: &str) -> JobRecord {
    let document = Html::parse_document(html);
    let mut job = JobRecord::new(job_id);

    job.company_name = first_match(&document, &COMPANY).map(stripped_text);
    job.role = first_match(&document, &ROLE).map(stripped_text);
    job.applicants = first_match(&document, &APPLICANTS)
        .map(stripped_text)
        .and_then(|caption| first_number(&caption));
    job.job_url = first_match(&document, &JOB_URL)
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string);

    job
}

/// Fetches and parses the detail page for `job_id`.
///
/// The response status is not checked; an error page simply parses into a
/// record with empty fields.
pub fn fetch_job_details<F: Fetcher + ?Sized>(
    fetcher: &F,
    job_id: &str,
    retry: &RetryPolicy,
) -> Result<JobRecord> {
    let page = get_with_retry(fetcher, &detail_url(job_id), retry)?;
    let job = parse_job_details(job_id, &page.body);

    info!("Scraped: {}", job.job_url.as_deref().unwrap_or("None"));
    Ok(job)
}
