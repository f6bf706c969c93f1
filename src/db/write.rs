use sqlx::Sqlite;

use super::Collection;
use crate::models::{ListingRecord, QuoteRecord};

pub async fn insert_listing(
    listing: &ListingRecord,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO listing_status
        (symbol, name, exchange, assetType, ipoDate, delistingDate, status)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(listing.symbol())
    .bind(listing.name())
    .bind(listing.exchange())
    .bind(listing.asset_type())
    .bind(*listing.ipo_date())
    .bind(*listing.delisting_date())
    .bind(listing.status().to_str())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn insert_quote(
    quote: &QuoteRecord,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO global_quotes
        (symbol, current, minimum, maximum)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(quote.symbol())
    .bind(quote.current())
    .bind(quote.minimum())
    .bind(quote.maximum())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn clear_table(
    collection: Collection,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<(), sqlx::Error> {
    let sql = format!("DELETE FROM {}", collection);
    sqlx::query(&sql).execute(&mut **tx).await?;

    Ok(())
}
