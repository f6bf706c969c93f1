use sqlx::{SqliteConnection, sqlite::SqliteQueryResult};

pub async fn create_listing_status(
    connection: &mut SqliteConnection,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS listing_status (
            symbol TEXT NOT NULL,
            name TEXT NOT NULL,
            exchange TEXT NOT NULL,
            assetType TEXT NOT NULL,
            ipoDate TEXT NOT NULL,
            delistingDate TEXT,
            status TEXT NOT NULL
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_global_quotes(
    connection: &mut SqliteConnection,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS global_quotes (
            symbol TEXT NOT NULL,
            current TEXT NOT NULL,
            minimum TEXT NOT NULL,
            maximum TEXT NOT NULL
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn table_exists(
    connection: &mut SqliteConnection,
    table: &str,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?")
        .bind(table)
        .fetch_optional(connection)
        .await?;

    Ok(row.is_some())
}
