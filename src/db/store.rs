use std::path::{Path, PathBuf};

use anyhow::Result as AnyResult;
use sqlx::{
    Connection, SqliteConnection,
    sqlite::{SqliteConnectOptions, SqliteRow},
};
use strum_macros::Display;
use tokio_stream::StreamExt;
use tracing::{debug, error, info, warn};

use super::{
    init::{create_global_quotes, create_listing_status, table_exists},
    utils::{parse_listing, parse_quote},
    write::{clear_table, insert_listing, insert_quote},
};
use crate::{
    error::TrackingError,
    models::{ListingRecord, QuoteRecord},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum Collection {
    #[strum(serialize = "listing_status")]
    ListingStatus,
    #[strum(serialize = "global_quotes")]
    GlobalQuotes,
}

/// SQLite file holding the `listing_status` and `global_quotes` tables.
///
/// Every call opens its own connection and closes it before returning. Writes
/// replace a whole table inside one transaction, so a failed write leaves the
/// previous rows in place.
#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Store {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);

        Self { path, options }
    }

    async fn connect(&self) -> Result<SqliteConnection, TrackingError> {
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(|e| {
                TrackingError::Store(format!(
                    "Failed to open database {}: {}",
                    self.path.display(),
                    e
                ))
            })
    }

    pub async fn init(&self) -> Result<(), TrackingError> {
        let mut connection = self.connect().await?;
        create_listing_status(&mut connection).await?;
        create_global_quotes(&mut connection).await?;
        connection.close().await?;

        debug!(path = %self.path.display(), "store initialised");
        Ok(())
    }

    async fn fetch_all<T>(
        &self,
        collection: Collection,
        columns: &str,
        parse: fn(&SqliteRow) -> AnyResult<T>,
    ) -> Result<Vec<T>, TrackingError> {
        let mut connection = self.connect().await?;

        // A table that was never created reads as empty.
        if !table_exists(&mut connection, &collection.to_string()).await? {
            connection.close().await?;
            return Ok(Vec::new());
        }

        let sql = format!("SELECT {} FROM {}", columns, collection);

        let records = {
            let mut rows = sqlx::query(&sql).fetch(&mut connection);
            let mut records = Vec::new();
            while let Some(row) = rows.next().await {
                let record = parse(&row?).map_err(|e| {
                    TrackingError::Store(format!("Corrupt row in {}: {:#}", collection, e))
                })?;
                records.push(record);
            }
            records
        };

        connection.close().await?;
        Ok(records)
    }

    pub async fn try_read_listing(&self) -> Result<Vec<ListingRecord>, TrackingError> {
        self.fetch_all(
            Collection::ListingStatus,
            "symbol, name, exchange, assetType, ipoDate, delistingDate, status",
            parse_listing,
        )
        .await
    }

    pub async fn try_read_quotes(&self) -> Result<Vec<QuoteRecord>, TrackingError> {
        self.fetch_all(
            Collection::GlobalQuotes,
            "symbol, current, minimum, maximum",
            parse_quote,
        )
        .await
    }

    /// Any read error yields an empty collection.
    pub async fn read_listing(&self) -> Vec<ListingRecord> {
        self.try_read_listing().await.unwrap_or_else(|e| {
            warn!(collection = %Collection::ListingStatus, "read failed: {}", e);
            Vec::new()
        })
    }

    /// Any read error yields an empty collection.
    pub async fn read_quotes(&self) -> Vec<QuoteRecord> {
        self.try_read_quotes().await.unwrap_or_else(|e| {
            warn!(collection = %Collection::GlobalQuotes, "read failed: {}", e);
            Vec::new()
        })
    }

    async fn replace_listing(&self, records: &[ListingRecord]) -> Result<(), TrackingError> {
        let mut connection = self.connect().await?;
        let mut tx = connection.begin().await?;

        create_listing_status(&mut tx).await?;
        clear_table(Collection::ListingStatus, &mut tx).await?;
        for record in records {
            insert_listing(record, &mut tx).await?;
        }

        tx.commit().await?;
        connection.close().await?;
        Ok(())
    }

    async fn replace_quotes(&self, records: &[QuoteRecord]) -> Result<(), TrackingError> {
        let mut connection = self.connect().await?;
        let mut tx = connection.begin().await?;

        create_global_quotes(&mut tx).await?;
        clear_table(Collection::GlobalQuotes, &mut tx).await?;
        for record in records {
            insert_quote(record, &mut tx).await?;
        }

        tx.commit().await?;
        connection.close().await?;
        Ok(())
    }

    pub async fn write_replace_listing(&self, records: &[ListingRecord]) -> bool {
        report_write(
            Collection::ListingStatus,
            records.len(),
            self.replace_listing(records).await,
        )
    }

    pub async fn write_replace_quotes(&self, records: &[QuoteRecord]) -> bool {
        report_write(
            Collection::GlobalQuotes,
            records.len(),
            self.replace_quotes(records).await,
        )
    }
}

fn report_write(collection: Collection, rows: usize, result: Result<(), TrackingError>) -> bool {
    match result {
        Ok(()) => {
            info!(collection = %collection, rows, "table replaced");
            true
        }
        Err(e) => {
            error!(collection = %collection, "write failed: {}", e);
            false
        }
    }
}
