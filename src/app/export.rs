use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use csv::Writer;

use crate::{
    models::{ListingRecord, QuoteRecord},
    services::listing_csv::write_listing,
};

pub fn export_listing(records: &[ListingRecord], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file at path: {}", path.display()))?;
    write_listing(records, file)
        .with_context(|| format!("Failed to write listing to {}", path.display()))
}

pub fn export_quotes(records: &[QuoteRecord], path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file at path: {}", path.display()))?;

    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write quote for {}", record.symbol()))?;
    }

    writer.flush()?;
    Ok(())
}
