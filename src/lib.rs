pub mod aggregate;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod form;
pub mod model;
pub mod query;
pub mod store;
#[cfg(test)]
mod test;
mod utils;

pub use config::{BackendKind, Config};
pub use error::Error;
pub use error::Result;
