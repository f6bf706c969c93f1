pub mod listing_csv;
pub mod pipeline;
pub mod quote_fields;

pub use pipeline::{Failure, Outcome, RetrievalPipeline, Stage};
