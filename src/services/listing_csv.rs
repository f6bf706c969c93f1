use std::{collections::HashSet, io::Write};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim, Writer};

use crate::{
    error::TrackingError,
    models::{ListingRecord, ListingStatus},
};

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "symbol",
    "exchange",
    "assetType",
    "ipoDate",
    "delistingDate",
    "status",
];

pub const CSV_HEADER: [&str; 7] = [
    "symbol",
    "name",
    "exchange",
    "assetType",
    "ipoDate",
    "delistingDate",
    "status",
];

const NULL_DATE: &str = "null";

struct Columns {
    symbol: usize,
    name: Option<usize>,
    exchange: usize,
    asset_type: usize,
    ipo_date: usize,
    delisting_date: usize,
    status: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, TrackingError> {
        let position = |column: &str| headers.iter().position(|h| h == column);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| position(column).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(TrackingError::SchemaValidation(format!(
                "Listing is missing required columns: {}",
                missing.join(", ")
            )));
        }

        let required = |column: &str| {
            position(column).ok_or_else(|| {
                TrackingError::SchemaValidation(format!("Missing column '{}'", column))
            })
        };

        Ok(Self {
            symbol: required("symbol")?,
            name: position("name"),
            exchange: required("exchange")?,
            asset_type: required("assetType")?,
            ipo_date: required("ipoDate")?,
            delisting_date: required("delistingDate")?,
            status: required("status")?,
        })
    }
}

fn field<'r>(rec: &'r StringRecord, index: usize, row: usize) -> Result<&'r str, TrackingError> {
    rec.get(index).ok_or_else(|| {
        TrackingError::SchemaValidation(format!("Row {} is missing field {}", row, index + 1))
    })
}

fn parse_date(value: &str, column: &str, row: usize) -> Result<NaiveDate, TrackingError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        TrackingError::SchemaValidation(format!(
            "Failed to parse {} '{}' at row {}: {}",
            column, value, row, e
        ))
    })
}

fn parse_row(rec: &StringRecord, columns: &Columns, row: usize) -> Result<ListingRecord, TrackingError> {
    let symbol = field(rec, columns.symbol, row)?;
    if symbol.is_empty() {
        return Err(TrackingError::SchemaValidation(format!(
            "Empty symbol at row {}",
            row
        )));
    }

    let name = match columns.name {
        Some(index) => field(rec, index, row)?,
        None => "",
    };

    let ipo_date = parse_date(field(rec, columns.ipo_date, row)?, "ipoDate", row)?;

    let delisting_date = match field(rec, columns.delisting_date, row)? {
        "" => None,
        value if value.eq_ignore_ascii_case(NULL_DATE) => None,
        value => Some(parse_date(value, "delistingDate", row)?),
    };

    let status_str = field(rec, columns.status, row)?;
    let status = status_str.parse::<ListingStatus>().map_err(|_| {
        TrackingError::SchemaValidation(format!(
            "Unknown status '{}' at row {}",
            status_str, row
        ))
    })?;

    Ok(ListingRecord::new(
        symbol.to_string(),
        name.to_string(),
        field(rec, columns.exchange, row)?.to_string(),
        field(rec, columns.asset_type, row)?.to_string(),
        ipo_date,
        delisting_date,
        status,
    ))
}

/// Parses a LISTING_STATUS body. Any bad row rejects the whole payload.
pub fn parse_listing(body: &str) -> Result<Vec<ListingRecord>, TrackingError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = Columns::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (row_idx, record) in reader.records().enumerate() {
        let row = row_idx + 1;
        let rec = record?;
        let listing = parse_row(&rec, &columns, row)?;

        if !seen.insert(listing.symbol().clone()) {
            return Err(TrackingError::SchemaValidation(format!(
                "Duplicate symbol '{}' at row {}",
                listing.symbol(),
                row
            )));
        }

        records.push(listing);
    }

    if records.is_empty() {
        return Err(TrackingError::SchemaValidation(
            "Listing contains no rows".to_string(),
        ));
    }

    Ok(records)
}

/// Writes records in the LISTING_STATUS column layout.
pub fn write_listing<W: Write>(records: &[ListingRecord], writer: W) -> Result<(), csv::Error> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;

    for record in records {
        let ipo_date = record.ipo_date().format("%Y-%m-%d").to_string();
        let delisting_date = record
            .delisting_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| NULL_DATE.to_string());

        writer.write_record([
            record.symbol().as_str(),
            record.name().as_str(),
            record.exchange().as_str(),
            record.asset_type().as_str(),
            ipo_date.as_str(),
            delisting_date.as_str(),
            record.status().to_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
