#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate reference-frame conversion between WGS84, GCJ02, and BD09.
//!
//! [`transform`] holds the six directional correction functions and
//! [`dispatch`] selects one for a `(from, to)` pair. Everything here is pure
//! and allocation-free apart from the diagnostic emitted for unsupported
//! string-keyed conversions.

pub mod dispatch;
pub mod transform;

pub use dispatch::{Conversion, UnsupportedConversion, convert, convert_named};
pub use traffic_map_coordinate_models::{Coordinate, CoordinateSystem, CoordinateSystemInfo};
