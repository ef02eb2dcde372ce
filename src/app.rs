//! Application module: the views shown by the TUI and the commands run on them.
//!
//! The `App` model lives in `app::model`; key-bound list commands live in
//! `app::actions`.

mod actions;
mod model;

pub use model::*;

#[cfg(test)]
mod tests;
