#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        models::{ListingSnapshot, QuoteLedger},
        test::fixtures::{expected_listing, quote},
    };

    #[test]
    fn upsert_is_idempotent() {
        let mut ledger = QuoteLedger::new();
        let goog = quote("GOOG", "150.00", "149.00", "151.00");

        assert!(ledger.upsert(goog.clone()).is_none());
        assert_eq!(ledger.upsert(goog.clone()), Some(goog.clone()));

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("GOOG"), Some(&goog));
    }

    #[test]
    fn upsert_replaces_values_in_place() {
        let mut ledger = QuoteLedger::new();
        ledger.upsert(quote("GOOG", "150.00", "149.00", "151.00"));
        ledger.upsert(quote("AAPL", "190.00", "188.00", "191.00"));
        ledger.upsert(quote("GOOG", "152.00", "150.00", "153.00"));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get("GOOG").unwrap().current(), "152.00");
        assert_eq!(ledger.records()[0].symbol(), "AAPL");
    }

    #[test]
    fn spread_uses_decimal_bounds() {
        assert_eq!(quote("GOOG", "150.00", "149.00", "151.25").spread(), Some(dec!(2.25)));
        assert_eq!(quote("GOOG", "150.00", "n/a", "151.25").spread(), None);
    }

    #[test]
    fn snapshot_derives_symbol_set() {
        let snapshot = ListingSnapshot::new(expected_listing());

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.symbols().len(), 3);
        assert!(snapshot.contains("GOOG"));
        assert!(!snapshot.contains("goog"));
        assert!(ListingSnapshot::default().is_empty());
    }
}
