#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV ingestion for lane-count and supply/demand telemetry.
//!
//! The parsers in [`lane`] and [`supply_demand`] are pure functions over
//! text. [`retrieve`] wraps them with file/HTTP reads and applies the
//! failure policy: retrieval errors become empty results, validation errors
//! are returned.

pub mod lane;
pub mod parsing;
pub mod retrieve;
pub mod supply_demand;

pub use lane::parse_lane_csv;
pub use retrieve::{DataSource, fetch_text, load_lane_data, load_supply_demand_data};
pub use supply_demand::parse_supply_demand_csv;

/// Reasons a retrieved supply/demand file is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The file has no non-whitespace content.
    #[error("File {file} is empty")]
    Empty {
        /// Label of the rejected file.
        file: String,
    },

    /// The file looks like script source rather than CSV.
    #[error("File {file} contains script code and is not a valid CSV file")]
    NotCsv {
        /// Label of the rejected file.
        file: String,
    },

    /// Parsing finished without a single valid row.
    #[error("File {file} has no valid data rows")]
    NoValidRows {
        /// Label of the rejected file.
        file: String,
    },
}

/// Errors that can occur while loading a data file.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The retrieved text failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A local file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
