#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::PathBuf, time::Duration};

    use chrono::{Days, Local};

    use crate::config::{
        Config, DEFAULT_BASE_URL, DEFAULT_DATABASE, parse_listing_date, validate_api_key,
    };

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_lookup(lookup(&[("ALPHA_VANTAGE_API_KEY", "demo1234abcd")])).unwrap();

        assert_eq!(config.api_key, "DEMO1234ABCD");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retries, 0);
    }

    #[test]
    fn overrides_are_read_from_environment() {
        let config = Config::from_lookup(lookup(&[
            ("ALPHA_VANTAGE_API_KEY", "TESTKEY12345"),
            ("ALPHA_VANTAGE_BASE_URL", "http://127.0.0.1:8080/"),
            ("STOCK_TRACKING_TIMEOUT_SECS", "3"),
            ("STOCK_TRACKING_RETRIES", "2"),
            ("STOCK_TRACKING_DB", "/tmp/stocks.db"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.retries, 2);
        assert_eq!(config.database_path, PathBuf::from("/tmp/stocks.db"));
    }

    #[test]
    fn missing_or_malformed_values_are_errors() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
        assert!(
            Config::from_lookup(lookup(&[
                ("ALPHA_VANTAGE_API_KEY", "TESTKEY12345"),
                ("STOCK_TRACKING_RETRIES", "many"),
            ]))
            .is_err()
        );
    }

    #[test]
    fn api_key_is_validated_and_upper_cased() {
        assert_eq!(validate_api_key(" abcd efgh ijkl ").unwrap(), "ABCDEFGHIJKL");
        assert!(validate_api_key("short").is_err());
        assert!(validate_api_key("abc def ghi").is_err());
    }

    #[test]
    fn listing_date_must_be_in_range() {
        let today = Local::now().date_naive();
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap();

        assert_eq!(
            parse_listing_date("2010-01-01").unwrap().to_string(),
            "2010-01-01"
        );
        assert_eq!(parse_listing_date(&today.to_string()).unwrap(), today);
        assert!(parse_listing_date("2009-12-31").is_err());
        assert!(parse_listing_date(&tomorrow.to_string()).is_err());
        assert!(parse_listing_date("01/02/2020").is_err());
    }
}
