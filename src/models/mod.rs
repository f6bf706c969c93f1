pub mod listing;
pub mod quote;

pub use listing::{ListingRecord, ListingSnapshot, ListingStatus};
pub use quote::{QuoteLedger, QuoteRecord};
