//! Configuration loader and schema types.
//!
//! Settings cover list behavior (scroll mode, sorting, columns), library
//! scanning, the header text and the log sink.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
