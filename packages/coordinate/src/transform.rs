//! Empirical WGS84 / GCJ02 / BD09 correction formulas.
//!
//! The GCJ02 model is calibrated for mainland China only, so the
//! WGS84 <-> GCJ02 pair returns points outside [`is_in_china`] unchanged.
//! The BD09 pair has no such guard. `gcj02_to_wgs84` subtracts the offset
//! evaluated at the GCJ02 point instead of inverting the forward model, so
//! a round trip drifts by a few meters.

#![allow(clippy::suboptimal_flops, clippy::imprecise_flops)]

use std::f64::consts::PI;

use traffic_map_coordinate_models::Coordinate;

/// Semi-major axis of the Krasovsky 1940 ellipsoid, in meters.
pub const A: f64 = 6_378_245.0;

/// First eccentricity squared of the Krasovsky 1940 ellipsoid.
pub const EE: f64 = 0.006_693_421_622_965_943_23;

/// Western edge of the GCJ02 calibration box.
pub const CHINA_MIN_LNG: f64 = 72.004;
/// Eastern edge of the GCJ02 calibration box.
pub const CHINA_MAX_LNG: f64 = 137.8347;
/// Southern edge of the GCJ02 calibration box.
pub const CHINA_MIN_LAT: f64 = 0.8293;
/// Northern edge of the GCJ02 calibration box.
pub const CHINA_MAX_LAT: f64 = 55.8271;

const CENTER_LNG: f64 = 105.0;
const CENTER_LAT: f64 = 35.0;

const BD_LNG_OFFSET: f64 = 0.0065;
const BD_LAT_OFFSET: f64 = 0.006;
const BD_X_PI: f64 = PI * 3000.0 / 180.0;

/// Whether a point falls inside the box the GCJ02 model is calibrated for.
/// Bounds are inclusive.
#[must_use]
pub fn is_in_china(lng: f64, lat: f64) -> bool {
    (CHINA_MIN_LNG..=CHINA_MAX_LNG).contains(&lng) && (CHINA_MIN_LAT..=CHINA_MAX_LAT).contains(&lat)
}

fn transform_lat(x: f64, y: f64) -> f64 {
    let mut ret = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

fn transform_lng(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}

/// GCJ02 offset in degrees at the given point, as `(d_lng, d_lat)`.
fn gcj02_offset(lng: f64, lat: f64) -> (f64, f64) {
    let d_lat = transform_lat(lng - CENTER_LNG, lat - CENTER_LAT);
    let d_lng = transform_lng(lng - CENTER_LNG, lat - CENTER_LAT);

    let rad_lat = lat / 180.0 * PI;
    let sin_lat = rad_lat.sin();
    let magic = 1.0 - EE * sin_lat * sin_lat;
    let sqrt_magic = magic.sqrt();

    let d_lat = (d_lat * 180.0) / ((A * (1.0 - EE)) / (magic * sqrt_magic) * PI);
    let d_lng = (d_lng * 180.0) / (A / sqrt_magic * rad_lat.cos() * PI);
    (d_lng, d_lat)
}

/// WGS84 to GCJ02. Identity outside China.
#[must_use]
pub fn wgs84_to_gcj02(lng: f64, lat: f64) -> Coordinate {
    if !is_in_china(lng, lat) {
        return Coordinate::new(lng, lat);
    }
    let (d_lng, d_lat) = gcj02_offset(lng, lat);
    Coordinate::new(lng + d_lng, lat + d_lat)
}

/// GCJ02 to WGS84 by single-step offset subtraction. Identity outside China.
#[must_use]
pub fn gcj02_to_wgs84(lng: f64, lat: f64) -> Coordinate {
    if !is_in_china(lng, lat) {
        return Coordinate::new(lng, lat);
    }
    let (d_lng, d_lat) = gcj02_offset(lng, lat);
    Coordinate::new(lng - d_lng, lat - d_lat)
}

/// GCJ02 to BD09.
#[must_use]
pub fn gcj02_to_bd09(lng: f64, lat: f64) -> Coordinate {
    let z = (lng * lng + lat * lat).sqrt() + 0.000_02 * (lat * BD_X_PI).sin();
    let theta = lat.atan2(lng) + 0.000_003 * (lng * BD_X_PI).cos();
    Coordinate::new(
        z * theta.cos() + BD_LNG_OFFSET,
        z * theta.sin() + BD_LAT_OFFSET,
    )
}

/// BD09 to GCJ02.
#[must_use]
pub fn bd09_to_gcj02(lng: f64, lat: f64) -> Coordinate {
    let x = lng - BD_LNG_OFFSET;
    let y = lat - BD_LAT_OFFSET;
    let z = (x * x + y * y).sqrt() - 0.000_02 * (y * BD_X_PI).sin();
    let theta = y.atan2(x) - 0.000_003 * (x * BD_X_PI).cos();
    Coordinate::new(z * theta.cos(), z * theta.sin())
}

/// WGS84 to BD09 via GCJ02.
#[must_use]
pub fn wgs84_to_bd09(lng: f64, lat: f64) -> Coordinate {
    let gcj = wgs84_to_gcj02(lng, lat);
    gcj02_to_bd09(gcj.longitude, gcj.latitude)
}

/// BD09 to WGS84 via GCJ02.
#[must_use]
pub fn bd09_to_wgs84(lng: f64, lat: f64) -> Coordinate {
    let gcj = bd09_to_gcj02(lng, lat);
    gcj02_to_wgs84(gcj.longitude, gcj.latitude)
}
