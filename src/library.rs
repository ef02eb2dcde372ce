//! Track records and the local library scanner.
//!
//! `Record` is the unit every list in the application holds. The scanner
//! walks a music directory and turns tagged audio files into records; it is
//! the data source that feeds the library view.

mod display;
mod model;
mod scan;

pub use display::{format_time, format_total, row_from_fields};
pub use model::{Field, FieldMask, Record, UnknownField};
pub use scan::scan;
