use std::{path::Path, time::Duration};

use chrono::NaiveDate;
use sqlx::{Connection, SqliteConnection, sqlite::SqliteConnectOptions};

use crate::{
    config::Config,
    models::{ListingRecord, ListingStatus, QuoteRecord},
    services::RetrievalPipeline,
};

pub const API_KEY: &str = "TESTKEY12345";

pub const LISTING_CSV: &str = "\
symbol,name,exchange,assetType,ipoDate,delistingDate,status
AAPL,Apple Inc,NASDAQ,Stock,1980-12-12,null,Active
GOOG,Alphabet Inc - Class C,NASDAQ,Stock,2014-03-27,null,Active
MSFT,Microsoft Corporation,NASDAQ,Stock,1986-03-13,null,Active
";

pub const GOOG_QUOTE: &str = r#"{
    "Global Quote": {
        "01. symbol": "GOOG",
        "02. price": "150.00",
        "03. high": "151.00",
        "04. low": "149.00"
    }
}"#;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn listing(symbol: &str, name: &str, ipo_date: NaiveDate) -> ListingRecord {
    ListingRecord::new(
        symbol.to_string(),
        name.to_string(),
        "NASDAQ".to_string(),
        "Stock".to_string(),
        ipo_date,
        None,
        ListingStatus::Active,
    )
}

pub fn expected_listing() -> Vec<ListingRecord> {
    vec![
        listing("AAPL", "Apple Inc", date(1980, 12, 12)),
        listing("GOOG", "Alphabet Inc - Class C", date(2014, 3, 27)),
        listing("MSFT", "Microsoft Corporation", date(1986, 3, 13)),
    ]
}

pub fn quote(symbol: &str, current: &str, minimum: &str, maximum: &str) -> QuoteRecord {
    QuoteRecord::new(
        symbol.to_string(),
        current.to_string(),
        minimum.to_string(),
        maximum.to_string(),
    )
}

pub fn test_config(base_url: &str, database_path: &Path) -> Config {
    Config {
        api_key: API_KEY.to_string(),
        base_url: base_url.to_string(),
        database_path: database_path.to_path_buf(),
        timeout: Duration::from_secs(5),
        retries: 0,
    }
}

pub fn pipeline(config: &Config) -> RetrievalPipeline {
    RetrievalPipeline::from_config(config).unwrap()
}

async fn open(path: &Path) -> SqliteConnection {
    let options = SqliteConnectOptions::new().filename(path);
    SqliteConnection::connect_with(&options).await.unwrap()
}

pub async fn run_sql(path: &Path, sql: &str) {
    let mut connection = open(path).await;
    sqlx::query(sql).execute(&mut connection).await.unwrap();
    connection.close().await.unwrap();
}

pub async fn count_rows(path: &Path, table: &str) -> i64 {
    let mut connection = open(path).await;
    let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&mut connection)
        .await
        .unwrap();
    connection.close().await.unwrap();
    count
}

/// Makes every insert into `table` abort.
pub async fn block_inserts(path: &Path, table: &str) {
    run_sql(
        path,
        &format!(
            "CREATE TRIGGER block_{table} BEFORE INSERT ON {table} BEGIN SELECT RAISE(ABORT, 'blocked'); END"
        ),
    )
    .await;
}
