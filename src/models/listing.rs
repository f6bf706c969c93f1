use std::collections::HashSet;

use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use strum_macros::{Display, EnumString};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ListingStatus {
    Active,
    Delisted,
}

impl ListingStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ListingStatus::Active => "Active",
            ListingStatus::Delisted => "Delisted",
        }
    }
}

#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct ListingRecord {
    symbol: String,
    name: String,
    exchange: String,
    asset_type: String,
    ipo_date: NaiveDate,
    delisting_date: Option<NaiveDate>,
    status: ListingStatus,
}

/// Point-in-time view of the tradable symbols, replaced as a whole.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListingSnapshot {
    records: Vec<ListingRecord>,
    symbols: HashSet<String>,
}

impl ListingSnapshot {
    pub fn new(records: Vec<ListingRecord>) -> Self {
        let symbols = records.iter().map(|r| r.symbol.clone()).collect();
        Self { records, symbols }
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn symbols(&self) -> &HashSet<String> {
        &self.symbols
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
