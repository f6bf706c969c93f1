use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use super::utils::{make_request, read_json, read_text};
use crate::{config::Config, error::TrackingError};

/// Alpha Vantage client. One attempt per call; retrying is up to the caller.
#[derive(Clone, Debug)]
pub struct AlphaVantageClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn new(config: &Config) -> Result<Self, TrackingError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Raw CSV body of the LISTING_STATUS endpoint for the given day.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_listing(&self, date: NaiveDate) -> Result<String, TrackingError> {
        let date = date.format("%Y-%m-%d").to_string();
        let params = [
            ("function", "LISTING_STATUS"),
            ("date", date.as_str()),
            ("apikey", self.api_key.as_str()),
        ];
        let res = make_request(&self.client, &self.base_url, "query", &params).await?;
        let body = read_text(res).await?;

        debug!(bytes = body.len(), "listing body received");
        Ok(body)
    }

    /// Raw JSON body of the GLOBAL_QUOTE endpoint.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_quote(&self, symbol: &str) -> Result<Value, TrackingError> {
        let params = [
            ("function", "GLOBAL_QUOTE"),
            ("symbol", symbol),
            ("apikey", self.api_key.as_str()),
        ];
        let res = make_request(&self.client, &self.base_url, "query", &params).await?;
        read_json(res).await
    }
}
