//! Joining CSV files that share a schema.
//!
//! This crate lists and validates the input files, then streams their rows
//! into one output CSV. Only the first file's header is kept, and decimal
//! points can optionally be rewritten to decimal commas.
//!
//! # Features
//!
//! - **Input Resolution**: List `*.csv` files in a directory or validate an explicit list
//! - **Output Validation**: Refuse to overwrite an existing file
//! - **Header-Aware Merge**: Keep one header, append every data row in order
//! - **Decimal Commas**: Rewrite `3.55` as `3,55` on the literal text
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use csvjoin_core::{MergeOptions, resolve_and_merge};
//!
//! let options = MergeOptions::new().with_delimiter(b';').with_comma_decimal(true);
//! let report = resolve_and_merge(Path::new("parts"), Path::new("joined.csv"), &options)?;
//! println!("{} rows written", report.rows_written);
//! ```

mod error;
mod merge;
mod resolve;
mod transform;

// === Error Types ===
pub use error::{ErrorKind, JoinError, Result};

// === Input Resolution ===
pub use resolve::{resolve_from_folder, validate_inputs, validate_output};

// === Merging ===
pub use merge::{FileStats, MergeOptions, MergeReport, merge_files, merge_into, resolve_and_merge};

// === Numeric Rewriting ===
pub use transform::{parses_as_float, to_comma_decimal, transform_row};
