use chrono::NaiveDate;
use serde_json::Value;
use strum_macros::Display;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use super::{listing_csv::parse_listing, quote_fields::extract_quote};
use crate::{
    api::AlphaVantageClient,
    config::Config,
    db::Store,
    error::TrackingError,
    models::{ListingSnapshot, QuoteLedger, QuoteRecord},
};

/// Where a refresh left the happy path.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Stage {
    Fetching,
    Validating,
}

#[derive(Debug, Error)]
#[error("{stage} failed: {error} (fallback applied: {fallback_applied})")]
pub struct Failure {
    pub stage: Stage,
    pub error: TrackingError,
    /// False when the store could not be read and the previous data was kept.
    pub fallback_applied: bool,
}

pub type Outcome<T> = Result<T, Failure>;

/// Owns the listing snapshot and the quote ledger for one run.
///
/// Refreshes go to Alpha Vantage first and fall back to the store on any
/// failure. Nothing is written back until `persist` is called, and a
/// collection is only written once it holds data from the API or the store.
pub struct RetrievalPipeline {
    client: AlphaVantageClient,
    store: Store,
    retries: u32,
    listing: ListingSnapshot,
    quotes: QuoteLedger,
    listing_loaded: bool,
    quotes_loaded: bool,
}

impl RetrievalPipeline {
    pub fn new(client: AlphaVantageClient, store: Store, retries: u32) -> Self {
        Self {
            client,
            store,
            retries,
            listing: ListingSnapshot::default(),
            quotes: QuoteLedger::new(),
            listing_loaded: false,
            quotes_loaded: false,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, TrackingError> {
        let client = AlphaVantageClient::new(config)?;
        let store = Store::new(&config.database_path);
        Ok(Self::new(client, store, config.retries))
    }

    pub fn listing(&self) -> &ListingSnapshot {
        &self.listing
    }

    pub fn quotes(&self) -> &QuoteLedger {
        &self.quotes
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// True once the listing holds data from the API or the store.
    pub fn listing_loaded(&self) -> bool {
        self.listing_loaded
    }

    pub fn quotes_loaded(&self) -> bool {
        self.quotes_loaded
    }

    /// Replaces both collections with whatever the store holds.
    ///
    /// A collection that cannot be read keeps its contents and is marked as not
    /// loaded, so `persist` leaves the stored rows alone.
    pub async fn load_from_store(&mut self) {
        match self.store.try_read_listing().await {
            Ok(records) => {
                self.listing = ListingSnapshot::new(records);
                self.listing_loaded = true;
            }
            Err(e) => {
                warn!("listing not loaded from store: {}", e);
                self.listing_loaded = false;
            }
        }

        match self.store.try_read_quotes().await {
            Ok(records) => {
                self.quotes = QuoteLedger::from(records);
                self.quotes_loaded = true;
            }
            Err(e) => {
                warn!("quotes not loaded from store: {}", e);
                self.quotes_loaded = false;
            }
        }

        info!(
            listings = self.listing.len(),
            quotes = self.quotes.len(),
            "loaded from store"
        );
    }

    #[instrument(skip(self))]
    pub async fn refresh_listing(&mut self, date: NaiveDate) -> Outcome<&ListingSnapshot> {
        let body = match self.fetch_listing_body(date).await {
            Ok(body) => body,
            Err(e) => return Err(self.listing_fallback(Stage::Fetching, e).await),
        };

        match parse_listing(&body) {
            Ok(records) => {
                self.listing = ListingSnapshot::new(records);
                self.listing_loaded = true;
                info!(rows = self.listing.len(), "listing committed");
                Ok(&self.listing)
            }
            Err(e) => Err(self.listing_fallback(Stage::Validating, e).await),
        }
    }

    #[instrument(skip(self))]
    pub async fn refresh_quote(&mut self, symbol: &str) -> Outcome<QuoteRecord> {
        let symbol = normalize_symbol(symbol);

        if symbol.is_empty() || (!self.listing.is_empty() && !self.listing.contains(&symbol)) {
            return Err(self
                .quote_fallback(Stage::Validating, TrackingError::NotFound(symbol))
                .await);
        }

        let body = match self.fetch_quote_body(&symbol).await {
            Ok(body) => body,
            Err(e) => return Err(self.quote_fallback(Stage::Fetching, e).await),
        };

        match extract_quote(&symbol, &body) {
            Ok(quote) => {
                self.quotes_loaded = true;
                if self.quotes.upsert(quote.clone()).is_some() {
                    debug!(symbol = %symbol, "replaced existing quote");
                }
                info!(symbol = %symbol, current = %quote.current(), "quote committed");
                Ok(quote)
            }
            Err(e) => Err(self.quote_fallback(Stage::Validating, e).await),
        }
    }

    /// Writes both collections; one flag per table. A collection that was
    /// never loaded is skipped and reported as not saved.
    pub async fn persist(&self) -> (bool, bool) {
        let listing = if self.listing_loaded {
            self.store
                .write_replace_listing(self.listing.records())
                .await
        } else {
            warn!("listing was never loaded, keeping the stored table");
            false
        };

        let quotes = if self.quotes_loaded {
            self.store.write_replace_quotes(&self.quotes.records()).await
        } else {
            warn!("quotes were never loaded, keeping the stored table");
            false
        };

        (listing, quotes)
    }

    async fn fetch_listing_body(&self, date: NaiveDate) -> Result<String, TrackingError> {
        let mut attempt = 0;
        loop {
            match self.client.fetch_listing(date).await {
                Err(TrackingError::Transport(reason)) if attempt < self.retries => {
                    attempt += 1;
                    warn!(attempt, "listing request failed, retrying: {}", reason);
                }
                result => return result,
            }
        }
    }

    async fn fetch_quote_body(&self, symbol: &str) -> Result<Value, TrackingError> {
        let mut attempt = 0;
        loop {
            match self.client.fetch_quote(symbol).await {
                Err(TrackingError::Transport(reason)) if attempt < self.retries => {
                    attempt += 1;
                    warn!(attempt, symbol, "quote request failed, retrying: {}", reason);
                }
                result => return result,
            }
        }
    }

    async fn listing_fallback(&mut self, stage: Stage, error: TrackingError) -> Failure {
        warn!(%stage, "listing refresh failed: {}", error);

        let fallback_applied = match self.store.try_read_listing().await {
            Ok(records) => {
                self.listing = ListingSnapshot::new(records);
                self.listing_loaded = true;
                info!(rows = self.listing.len(), "listing loaded from store");
                true
            }
            Err(store_error) => {
                error!("keeping previous listing, store unavailable: {}", store_error);
                false
            }
        };

        Failure {
            stage,
            error,
            fallback_applied,
        }
    }

    async fn quote_fallback(&mut self, stage: Stage, error: TrackingError) -> Failure {
        warn!(%stage, "quote refresh failed: {}", error);

        let fallback_applied = match self.store.try_read_quotes().await {
            Ok(records) => {
                self.quotes = QuoteLedger::from(records);
                self.quotes_loaded = true;
                info!(rows = self.quotes.len(), "quotes loaded from store");
                true
            }
            Err(store_error) => {
                error!("keeping previous quotes, store unavailable: {}", store_error);
                false
            }
        };

        Failure {
            stage,
            error,
            fallback_applied,
        }
    }
}

pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
