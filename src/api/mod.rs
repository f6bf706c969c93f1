pub mod av;
pub mod utils;

pub use av::AlphaVantageClient;
