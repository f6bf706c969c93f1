mod config;
mod fixtures;
mod models;
mod store;
