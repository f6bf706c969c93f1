#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::{
        db::Store,
        error::TrackingError,
        test::fixtures::{block_inserts, expected_listing, quote, run_sql},
    };

    #[tokio::test]
    async fn written_tables_read_back() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("stock_tracking.db"));
        let quotes = vec![
            quote("AAPL", "190.00", "188.00", "191.00"),
            quote("GOOG", "150.00", "149.00", "151.00"),
        ];

        assert!(store.write_replace_listing(&expected_listing()).await);
        assert!(store.write_replace_quotes(&quotes).await);

        assert_eq!(store.read_listing().await, expected_listing());
        assert_eq!(store.read_quotes().await, quotes);
    }

    #[tokio::test]
    async fn write_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("stock_tracking.db"));

        assert!(store.write_replace_listing(&expected_listing()).await);
        assert!(store.write_replace_listing(&expected_listing()[..1]).await);

        assert_eq!(store.read_listing().await, expected_listing()[..1].to_vec());
    }

    #[tokio::test]
    async fn missing_tables_read_as_empty() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("fresh.db"));

        assert!(store.read_listing().await.is_empty());
        assert!(store.read_quotes().await.is_empty());
        assert!(store.try_read_listing().await.unwrap().is_empty());
        assert!(store.try_read_quotes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn init_creates_empty_tables() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("stock_tracking.db"));

        store.init().await.unwrap();

        assert!(store.try_read_listing().await.unwrap().is_empty());
        assert!(store.try_read_quotes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_database_fails_soft() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("missing").join("stock_tracking.db"));

        assert!(store.read_listing().await.is_empty());
        assert!(matches!(
            store.try_read_listing().await,
            Err(TrackingError::Store(_))
        ));
        assert!(!store.write_replace_quotes(&[quote("GOOG", "1", "1", "1")]).await);
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stock_tracking.db");
        let store = Store::new(&path);
        let original = vec![quote("GOOG", "150.00", "149.00", "151.00")];

        assert!(store.write_replace_quotes(&original).await);
        block_inserts(&path, "global_quotes").await;

        assert!(!store.write_replace_quotes(&[quote("AAPL", "1", "1", "1")]).await);
        assert_eq!(store.read_quotes().await, original);
    }

    #[tokio::test]
    async fn corrupt_row_fails_the_strict_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stock_tracking.db");
        let store = Store::new(&path);

        assert!(store.write_replace_listing(&expected_listing()).await);
        run_sql(&path, "UPDATE listing_status SET status = 'Suspended' WHERE symbol = 'MSFT'").await;

        assert!(matches!(
            store.try_read_listing().await,
            Err(TrackingError::Store(_))
        ));
        assert!(store.read_listing().await.is_empty());
    }
}
