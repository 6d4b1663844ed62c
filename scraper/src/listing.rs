//! Search-results pages: URL building and job ID extraction.

use common::SearchQuery;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::config::RetryPolicy;
use crate::error::Result;
use crate::http::{get_with_retry, Fetcher};

const SEARCH_URL: &str = "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";

// Static selectors, always valid
lazy_static! {
    static ref ITEM: Selector = Selector::parse("li").unwrap();
    static ref CARD: Selector = Selector::parse("div.base-card").unwrap();
}

/// The search endpoint expects spaces in keywords as a literal `%2B`.
pub fn format_keywords(keywords: &str) -> String {
    keywords.replace(' ', "%2B")
}

/// URL of the search-results page starting at `start`.
pub fn search_url(query: &SearchQuery, start: usize) -> String {
    format!(
        "{}?keywords={}&location={}&start={}",
        SEARCH_URL,
        format_keywords(&query.keywords),
        query.location,
        start
    )
}

/// Pulls the job ID out of a card's `data-entity-urn`
/// (`urn:li:jobPosting:<id>` and friends, ID is the fourth segment).
pub fn job_id_from_urn(urn: &str) -> Option<&str> {
    urn.split(':').nth(3)
}

/// Extracts job IDs from a search-results page, in document order.
///
/// Only `li` elements that wrap a `div.base-card` count; anything else on
/// the page is ignored.
pub fn extract_job_ids(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut job_ids = Vec::new();

    for item in document.select(&ITEM) {
        let Some(card) = item.select(&CARD).next() else {
            continue;
        };

        let urn = card.value().attr("data-entity-urn");
        match urn.and_then(job_id_from_urn) {
            Some(id) => job_ids.push(id.to_string()),
            None => debug!(?urn, "card without usable urn, skipped"),
        }
    }

    job_ids
}

/// Fetches one search-results page and returns the job IDs on it.
///
/// A non-success status is treated as a page without results.
/// Transport errors propagate.
pub fn fetch_job_ids<F: Fetcher + ?Sized>(
    fetcher: &F,
    query: &SearchQuery,
    start: usize,
    retry: &RetryPolicy,
) -> Result<Vec<String>> {
    let url = search_url(query, start);
    let page = get_with_retry(fetcher, &url, retry)?;

    if !page.is_success() {
        warn!(url = %url, status = page.status, "search page failed, treating as empty");
        return Ok(Vec::new());
    }

    Ok(extract_job_ids(&page.body))
}
