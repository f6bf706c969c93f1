pub mod init;
pub mod store;
pub mod utils;
pub mod write;

pub use store::{Collection, Store};
