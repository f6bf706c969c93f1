pub mod cli;
pub mod export;
pub mod view;

pub use cli::{Cli, Command};
