use std::collections::BTreeMap;

use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct QuoteRecord {
    symbol: String,
    current: String,
    minimum: String,
    maximum: String,
}

impl QuoteRecord {
    /// Day range, when both bounds are numeric.
    pub fn spread(&self) -> Option<Decimal> {
        let minimum = self.minimum.parse::<Decimal>().ok()?;
        let maximum = self.maximum.parse::<Decimal>().ok()?;
        Some(maximum - minimum)
    }
}

/// Most recent quote per symbol.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QuoteLedger {
    quotes: BTreeMap<String, QuoteRecord>,
}

impl QuoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the quote, replacing any entry for the same symbol.
    pub fn upsert(&mut self, quote: QuoteRecord) -> Option<QuoteRecord> {
        self.quotes.insert(quote.symbol.clone(), quote)
    }

    pub fn get(&self, symbol: &str) -> Option<&QuoteRecord> {
        self.quotes.get(symbol)
    }

    pub fn records(&self) -> Vec<QuoteRecord> {
        self.quotes.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuoteRecord> {
        self.quotes.values()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl From<Vec<QuoteRecord>> for QuoteLedger {
    fn from(records: Vec<QuoteRecord>) -> Self {
        let mut ledger = Self::new();
        for record in records {
            ledger.upsert(record);
        }
        ledger
    }
}
