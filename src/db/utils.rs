use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::{Row, sqlite::SqliteRow};

use crate::models::{ListingRecord, ListingStatus, QuoteRecord};

pub fn parse_string_from_row(row: &SqliteRow, column: &str) -> Result<String> {
    row.try_get::<String, _>(column)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

pub fn parse_date_from_row(row: &SqliteRow, column: &str) -> Result<NaiveDate> {
    row.try_get::<NaiveDate, _>(column)
        .with_context(|| format!("Failed to parse date from column '{}'", column))
}

pub fn parse_optional_date_from_row(row: &SqliteRow, column: &str) -> Result<Option<NaiveDate>> {
    row.try_get::<Option<NaiveDate>, _>(column)
        .with_context(|| format!("Failed to parse optional date from column '{}'", column))
}

pub fn parse_status_from_row(row: &SqliteRow, column: &str) -> Result<ListingStatus> {
    let status = parse_string_from_row(row, column)?;
    status
        .parse::<ListingStatus>()
        .with_context(|| format!("Failed to parse status '{}' from column '{}'", status, column))
}

pub fn parse_listing(row: &SqliteRow) -> Result<ListingRecord> {
    Ok(ListingRecord::new(
        parse_string_from_row(row, "symbol")?,
        parse_string_from_row(row, "name")?,
        parse_string_from_row(row, "exchange")?,
        parse_string_from_row(row, "assetType")?,
        parse_date_from_row(row, "ipoDate")?,
        parse_optional_date_from_row(row, "delistingDate")?,
        parse_status_from_row(row, "status")?,
    ))
}

pub fn parse_quote(row: &SqliteRow) -> Result<QuoteRecord> {
    Ok(QuoteRecord::new(
        parse_string_from_row(row, "symbol")?,
        parse_string_from_row(row, "current")?,
        parse_string_from_row(row, "minimum")?,
        parse_string_from_row(row, "maximum")?,
    ))
}
