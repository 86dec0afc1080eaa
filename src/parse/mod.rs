// src/parse/mod.rs

pub mod columns;
pub mod csv;
pub mod dates;

pub use columns::{ColumnIndex, MissingColumns, Role};
pub use csv::parse_delimited;
pub use dates::parse_stamp;
