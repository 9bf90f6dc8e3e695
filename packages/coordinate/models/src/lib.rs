#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic coordinate and coordinate reference system types.
//!
//! A [`Coordinate`] never records which system it is expressed in; the
//! [`CoordinateSystem`] tag only travels alongside it when a conversion is
//! requested.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A `(longitude, latitude)` pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from a longitude and latitude in degrees.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self::new(longitude, latitude)
    }
}

/// Geodetic reference frames used by Chinese map providers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CoordinateSystem {
    /// Raw satellite positioning frame.
    Wgs84,
    /// Obfuscated national frame used by Amap and Tencent maps.
    Gcj02,
    /// Baidu's frame, offset again from GCJ02.
    Bd09,
}

impl CoordinateSystem {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Wgs84, Self::Gcj02, Self::Bd09]
    }

    /// Returns display metadata for this system.
    #[must_use]
    pub const fn info(self) -> CoordinateSystemInfo {
        match self {
            Self::Wgs84 => CoordinateSystemInfo {
                code: "wgs84",
                name: "GPS coordinate system",
                description: "WGS84 - international standard GPS coordinate system",
            },
            Self::Gcj02 => CoordinateSystemInfo {
                code: "gcj02",
                name: "Mars coordinate system",
                description: "GCJ-02 - Chinese national standard (Amap, Tencent Maps)",
            },
            Self::Bd09 => CoordinateSystemInfo {
                code: "bd09",
                name: "Baidu coordinate system",
                description: "BD-09 - Baidu Maps coordinate system",
            },
        }
    }
}

/// Human-readable description of a [`CoordinateSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateSystemInfo {
    /// Short code, identical to the system's string form.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}
