//! HTTP access: the `Fetcher` seam, its reqwest implementation, and retries.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::RetryPolicy;
use crate::error::{Result, ScrapeError};

/// A fetched page: status code plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub status: u16,
    pub body: String,
}

impl Page {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Statuses worth asking again for: throttling and server errors.
    fn is_retryable(&self) -> bool {
        self.status == 429 || (500..600).contains(&self.status)
    }
}

/// Anything that can GET a URL.
///
/// Only transport failures are errors; any HTTP status comes back as a
/// `Page` so callers decide what a 404 means to them.
pub trait Fetcher {
    fn get(&self, url: &str) -> Result<Page>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn get(&self, url: &str) -> Result<Page> {
        (**self).get(url)
    }
}

/// Blocking reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str) -> Result<Page> {
        let http_err = |source: reqwest::Error| ScrapeError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(http_err)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(http_err)?;

        debug!(url, status, bytes = body.len(), "fetched");
        Ok(Page { status, body })
    }
}

/// GET with the given retry policy.
///
/// Transport errors and 429/5xx responses are retried. Once attempts run
/// out, the last transport error is returned as `Err`; the last response
/// (whatever its status) as `Ok`.
pub fn get_with_retry<F: Fetcher + ?Sized>(
    fetcher: &F,
    url: &str,
    policy: &RetryPolicy,
) -> Result<Page> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let outcome = fetcher.get(url);
        let retryable = match &outcome {
            Ok(page) => page.is_retryable(),
            Err(ScrapeError::Http { .. }) => true,
            Err(_) => false,
        };

        if !retryable || attempt >= max_attempts {
            return outcome;
        }

        let delay = policy.delay_after(attempt);
        match &outcome {
            Ok(page) => warn!(url, status = page.status, attempt, ?delay, "retrying"),
            Err(e) => warn!(url, error = %e, attempt, ?delay, "retrying"),
        }
        thread::sleep(delay);
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Hands out canned statuses in order, counting calls.
    struct Scripted {
        statuses: RefCell<VecDeque<u16>>,
        calls: RefCell<u32>,
    }

    impl Scripted {
        fn new(statuses: &[u16]) -> Self {
            Self {
                statuses: RefCell::new(statuses.iter().copied().collect()),
                calls: RefCell::new(0),
            }
        }
    }

    impl Fetcher for Scripted {
        fn get(&self, _url: &str) -> Result<Page> {
            *self.calls.borrow_mut() += 1;
            let status = self.statuses.borrow_mut().pop_front().unwrap_or(200);
            Ok(Page::new(status, format!("status {status}")))
        }
    }

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            backoff: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_success_status_range() {
        assert!(Page::new(200, "").is_success());
        assert!(Page::new(204, "").is_success());
        assert!(!Page::new(301, "").is_success());
        assert!(!Page::new(404, "").is_success());
    }

    #[test]
    fn test_single_attempt_returns_failure_page() {
        let fetcher = Scripted::new(&[503]);
        let page = get_with_retry(&fetcher, "http://x", &policy(1)).unwrap();
        assert_eq!(page.status, 503);
        assert_eq!(*fetcher.calls.borrow(), 1);
    }

    #[test]
    fn test_retries_server_error_then_succeeds() {
        let fetcher = Scripted::new(&[503, 200]);
        let page = get_with_retry(&fetcher, "http://x", &policy(2)).unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(*fetcher.calls.borrow(), 2);
    }

    #[test]
    fn test_client_error_is_not_retried() {
        let fetcher = Scripted::new(&[404, 200]);
        let page = get_with_retry(&fetcher, "http://x", &policy(3)).unwrap();
        assert_eq!(page.status, 404);
        assert_eq!(*fetcher.calls.borrow(), 1);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let fetcher = Scripted::new(&[500, 502, 429, 200]);
        let page = get_with_retry(&fetcher, "http://x", &policy(3)).unwrap();
        assert_eq!(page.status, 429);
        assert_eq!(*fetcher.calls.borrow(), 3);
    }
}
