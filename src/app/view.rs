use std::fmt::Write;

use rust_decimal::Decimal;

use crate::models::{ListingSnapshot, QuoteLedger, QuoteRecord};

fn format_price(value: &str) -> String {
    match value.parse::<Decimal>() {
        Ok(price) => format!("{:.2}", price),
        Err(_) => value.to_string(),
    }
}

pub fn render_listing(snapshot: &ListingSnapshot, limit: usize) -> String {
    if snapshot.is_empty() {
        return "No listing data to display. Refresh the listing first.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<40} {:<10} {:<8} {:<12} {:<8}",
        "Symbol", "Name", "Exchange", "Type", "Date", "Status"
    );

    for record in snapshot.records().iter().take(limit) {
        let _ = writeln!(
            out,
            "{:<10} {:<40.40} {:<10} {:<8} {:<12} {:<8}",
            record.symbol(),
            record.name(),
            record.exchange(),
            record.asset_type(),
            record.ipo_date().to_string(),
            record.status().to_str()
        );
    }

    if snapshot.len() > limit {
        let _ = writeln!(out, "... {} more rows", snapshot.len() - limit);
    }

    out
}

fn quote_row(out: &mut String, quote: &QuoteRecord) {
    let spread = quote
        .spread()
        .map(|s| format!("{:.2}", s))
        .unwrap_or_default();

    let _ = writeln!(
        out,
        "{:<10} {:>14} {:>14} {:>14} {:>10}",
        quote.symbol(),
        format_price(quote.current()),
        format_price(quote.minimum()),
        format_price(quote.maximum()),
        spread
    );
}

pub fn render_quotes(ledger: &QuoteLedger) -> String {
    if ledger.is_empty() {
        return "There are no existing successful requests.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>14} {:>14} {:>14} {:>10}",
        "Symbol", "Current Price", "Minimum Price", "Maximum Price", "Range"
    );

    for quote in ledger.iter() {
        quote_row(&mut out, quote);
    }

    out
}

pub fn render_quote(quote: &QuoteRecord) -> String {
    let mut out = format!("{} Global Quote\n", quote.symbol());
    quote_row(&mut out, quote);
    out
}

pub fn save_message(listing: bool, quotes: bool) -> &'static str {
    match (listing, quotes) {
        (true, true) => "Successfully saved!",
        (true, false) => "Listing status saved; an error occurred while updating the global quotes table.",
        (false, true) => "Global quotes saved; an error occurred while updating the listing status table.",
        (false, false) => "An error occurred while trying to update both tables.",
    }
}
