use std::{path::PathBuf, time::Duration};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::{Config, database_path_from_lookup, expand_path, parse_listing_date};

#[derive(Debug, Parser)]
#[command(name = "stock-tracking")]
#[command(about = "Stock listings and quotes from Alpha Vantage, cached in SQLite", long_about = None)]
#[command(version)]
pub struct Cli {
    /// SQLite database file (defaults to STOCK_TRACKING_DB or stock_tracking.db)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Extra attempts after a transport failure
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Refresh the listing status for a date (falls back to the stored table)
    Listing {
        /// Listing date (YYYY-MM-DD), today when omitted
        #[arg(short, long, value_parser = parse_listing_date)]
        date: Option<NaiveDate>,

        /// Number of rows to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Write both tables back to the database afterwards
        #[arg(long)]
        save: bool,
    },

    /// Fetch the global quote of a symbol (falls back to the stored table)
    Quote {
        symbol: String,

        /// Write both tables back to the database afterwards
        #[arg(long)]
        save: bool,
    },

    /// Print what the database currently holds
    Show {
        /// Number of listing rows to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Export both tables as CSV files
    Export {
        /// Output path for the listing status
        #[arg(long, default_value = "listing_status.csv")]
        listing: String,

        /// Output path for the global quotes
        #[arg(long, default_value = "global_quotes.csv")]
        quotes: String,
    },
}

impl Cli {
    /// Command-line flags take precedence over the environment.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(db) = &self.db {
            config.database_path = expand_path(db);
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = self.retries {
            config.retries = retries;
        }
        config
    }

    /// Database location for commands that never touch the network.
    pub fn database_path(&self) -> PathBuf {
        match &self.db {
            Some(db) => expand_path(db),
            None => database_path_from_lookup(|key| std::env::var(key).ok()),
        }
    }
}
