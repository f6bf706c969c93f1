pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;

#[cfg(test)]
mod test;

pub use error::TrackingError;
