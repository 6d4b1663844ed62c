//! Run configuration, read from the environment (and `.env` when present).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use common::SearchQuery;
use dotenvy::dotenv;

use crate::error::{Result, ScrapeError};

const DEFAULT_KEYWORDS: &str = "Data Scientist";
const DEFAULT_LOCATION: &str = "germany";
const DEFAULT_MAX_RESULTS: usize = 201;
const DEFAULT_OUTPUT: &str = "output.csv";
const DEFAULT_BACKOFF_MS: u64 = 500;

/// How often a request is attempted and how long to wait in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per request, at least 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each further failure.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// One attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::from_millis(DEFAULT_BACKOFF_MS),
        }
    }

    /// Delay to sleep after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        self.backoff.saturating_mul(1u32 << exp)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Everything a run needs, passed to the pipeline entry point.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub query: SearchQuery,
    pub output_path: PathBuf,
    pub json_output: Option<PathBuf>,
    /// Print the records as a boxed table after exporting.
    pub preview: bool,
    /// Stop paginating at the first page without listings.
    pub stop_on_empty_page: bool,
    pub retry: RetryPolicy,
    /// `None` means requests never time out.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            query: SearchQuery::new(DEFAULT_KEYWORDS, DEFAULT_LOCATION, DEFAULT_MAX_RESULTS),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            json_output: None,
            preview: false,
            stop_on_empty_page: false,
            retry: RetryPolicy::default(),
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ScrapeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let keywords = get("JOBS_KEYWORDS").unwrap_or(defaults.query.keywords);
        let location = get("JOBS_LOCATION").unwrap_or(defaults.query.location);
        let max_results =
            parse_or(get("JOBS_MAX_RESULTS"), "JOBS_MAX_RESULTS", DEFAULT_MAX_RESULTS)?;

        let max_attempts: u32 = parse_or(get("JOBS_MAX_ATTEMPTS"), "JOBS_MAX_ATTEMPTS", 1)?;
        if max_attempts == 0 {
            return Err(ScrapeError::Config {
                key: "JOBS_MAX_ATTEMPTS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let backoff_ms = parse_or(get("JOBS_BACKOFF_MS"), "JOBS_BACKOFF_MS", DEFAULT_BACKOFF_MS)?;

        let timeout = match get("JOBS_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_value(&raw, "JOBS_TIMEOUT_SECS")?)),
            None => None,
        };

        Ok(Self {
            query: SearchQuery::new(keywords, location, max_results),
            output_path: get("JOBS_OUTPUT").map(PathBuf::from).unwrap_or(defaults.output_path),
            json_output: get("JOBS_JSON_OUTPUT").map(PathBuf::from),
            preview: parse_flag(get("JOBS_PREVIEW"), "JOBS_PREVIEW")?,
            stop_on_empty_page: parse_flag(
                get("JOBS_STOP_ON_EMPTY_PAGE"),
                "JOBS_STOP_ON_EMPTY_PAGE",
            )?,
            retry: RetryPolicy {
                max_attempts,
                backoff: Duration::from_millis(backoff_ms),
            },
            timeout,
            user_agent: get("JOBS_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn parse_value<T: FromStr>(raw: &str, key: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ScrapeError::Config {
        key: key.to_string(),
        reason: format!("{raw:?}: {e}"),
    })
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => parse_value(&raw, key),
        None => Ok(default),
    }
}

fn parse_flag(raw: Option<String>, key: &str) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ScrapeError::Config {
            key: key.to_string(),
            reason: format!("{raw:?} is not a boolean"),
        }),
    }
}
