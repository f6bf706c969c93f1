use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Error, Result};
use chrono::{Local, NaiveDate};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_DATABASE: &str = "stock_tracking.db";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const MIN_API_KEY_LEN: usize = 12;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub database_path: PathBuf,
    /// Per-request timeout handed to the HTTP client.
    pub timeout: Duration,
    /// Extra attempts after a transport failure.
    pub retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("ALPHA_VANTAGE_API_KEY")
            .with_context(|| "Missing ALPHA_VANTAGE_API_KEY in environment")?;
        let api_key = validate_api_key(&api_key)?;

        let base_url = lookup("ALPHA_VANTAGE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = match lookup("STOCK_TRACKING_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .with_context(|| format!("Failed to parse timeout '{}'", value))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let retries = match lookup("STOCK_TRACKING_RETRIES") {
            Some(value) => value
                .parse::<u32>()
                .with_context(|| format!("Failed to parse retries '{}'", value))?,
            None => 0,
        };

        Ok(Self {
            api_key,
            base_url,
            database_path: database_path_from_lookup(&lookup),
            timeout: Duration::from_secs(timeout_secs),
            retries,
        })
    }
}

pub fn database_path_from_lookup<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let database = lookup("STOCK_TRACKING_DB").unwrap_or_else(|| DEFAULT_DATABASE.to_string());
    expand_path(&database)
}

pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Keys are stored upper-cased with whitespace removed.
pub fn validate_api_key(raw: &str) -> Result<String> {
    let key: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if key.len() < MIN_API_KEY_LEN {
        return Err(Error::msg(format!(
            "Invalid API key: expected at least {} characters, found {}",
            MIN_API_KEY_LEN,
            key.len()
        )));
    }
    Ok(key.to_uppercase())
}

pub fn earliest_listing_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or_default()
}

pub fn parse_listing_date(field: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date '{}'", field))?;
    let today = Local::now().date_naive();

    if date < earliest_listing_date() || date > today {
        return Err(Error::msg(format!(
            "Date {} is outside of {} to {}",
            date,
            earliest_listing_date(),
            today
        )));
    }

    Ok(date)
}
