//! Routes a `(from, to)` system pair to the matching transform.
//!
//! [`convert`] is total over [`CoordinateSystem`]: every ordered pair of
//! distinct systems has a registered function. [`convert_named`] accepts
//! free-form system codes (as map widgets hand them over) and degrades to
//! the identity with a warning when a code is not recognised.

use std::str::FromStr as _;

use traffic_map_coordinate_models::{Coordinate, CoordinateSystem};

use crate::transform;

/// Signature shared by every directional transform.
pub type Converter = fn(f64, f64) -> Coordinate;

/// A conversion was requested between systems with no registered function.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported coordinate conversion: {from} -> {to}")]
pub struct UnsupportedConversion {
    /// Source system code as supplied by the caller.
    pub from: String,
    /// Target system code as supplied by the caller.
    pub to: String,
}

/// Result of a string-keyed conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// The converted coordinate, or the input when unsupported.
    pub coordinate: Coordinate,
    /// Set when the pair had no registered function.
    pub unsupported: Option<UnsupportedConversion>,
}

/// Looks up the directional transform for `from -> to`.
///
/// Returns `None` when `from == to`; that case needs no function.
#[must_use]
pub fn converter(from: CoordinateSystem, to: CoordinateSystem) -> Option<Converter> {
    use CoordinateSystem::{Bd09, Gcj02, Wgs84};

    match (from, to) {
        (Wgs84, Gcj02) => Some(transform::wgs84_to_gcj02 as Converter),
        (Wgs84, Bd09) => Some(transform::wgs84_to_bd09 as Converter),
        (Gcj02, Wgs84) => Some(transform::gcj02_to_wgs84 as Converter),
        (Gcj02, Bd09) => Some(transform::gcj02_to_bd09 as Converter),
        (Bd09, Wgs84) => Some(transform::bd09_to_wgs84 as Converter),
        (Bd09, Gcj02) => Some(transform::bd09_to_gcj02 as Converter),
        (Wgs84, Wgs84) | (Gcj02, Gcj02) | (Bd09, Bd09) => None,
    }
}

/// Converts a point between two coordinate systems.
///
/// Identical systems return the input untouched.
#[must_use]
pub fn convert(lng: f64, lat: f64, from: CoordinateSystem, to: CoordinateSystem) -> Coordinate {
    if from == to {
        return Coordinate::new(lng, lat);
    }
    converter(from, to).map_or_else(|| Coordinate::new(lng, lat), |f| f(lng, lat))
}

/// Converts a point between two systems named by their string codes
/// (`"wgs84"`, `"gcj02"`, `"bd09"`).
///
/// Never fails: identical codes short-circuit to the identity, and an
/// unrecognised code yields the input coordinate with
/// [`Conversion::unsupported`] set and a warning logged.
#[must_use]
pub fn convert_named(lng: f64, lat: f64, from: &str, to: &str) -> Conversion {
    if from == to {
        return Conversion {
            coordinate: Coordinate::new(lng, lat),
            unsupported: None,
        };
    }

    let pair = CoordinateSystem::from_str(from)
        .ok()
        .zip(CoordinateSystem::from_str(to).ok());

    if let Some((from_system, to_system)) = pair {
        return Conversion {
            coordinate: convert(lng, lat, from_system, to_system),
            unsupported: None,
        };
    }

    let err = UnsupportedConversion {
        from: from.to_owned(),
        to: to.to_owned(),
    };
    log::warn!("{err}");

    Conversion {
        coordinate: Coordinate::new(lng, lat),
        unsupported: Some(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_system_is_identity() {
        for system in CoordinateSystem::all() {
            assert_eq!(
                convert(116.397, 39.908, *system, *system),
                Coordinate::new(116.397, 39.908)
            );
        }
    }

    #[test]
    fn every_distinct_pair_has_a_converter() {
        for from in CoordinateSystem::all() {
            for to in CoordinateSystem::all() {
                assert_eq!(converter(*from, *to).is_some(), from != to, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn dispatches_to_matching_transform() {
        assert_eq!(
            convert(116.404, 39.915, CoordinateSystem::Wgs84, CoordinateSystem::Bd09),
            transform::wgs84_to_bd09(116.404, 39.915)
        );
        assert_eq!(
            convert(116.404, 39.915, CoordinateSystem::Bd09, CoordinateSystem::Gcj02),
            transform::bd09_to_gcj02(116.404, 39.915)
        );
    }

    #[test]
    fn named_conversion_parses_codes() {
        let result = convert_named(116.404, 39.915, "gcj02", "bd09");
        assert!(result.unsupported.is_none());
        assert_eq!(result.coordinate, transform::gcj02_to_bd09(116.404, 39.915));
    }

    #[test]
    fn unknown_system_returns_input() {
        let result = convert_named(116.397, 39.908, "gcj02", "unknownSystem");
        assert_eq!(result.coordinate, Coordinate::new(116.397, 39.908));

        let err = result.unsupported.unwrap();
        assert_eq!(err.from, "gcj02");
        assert_eq!(err.to, "unknownSystem");
    }

    #[test]
    fn identical_unknown_codes_are_identity() {
        let result = convert_named(1.0, 2.0, "mercator", "mercator");
        assert_eq!(result.coordinate, Coordinate::new(1.0, 2.0));
        assert!(result.unsupported.is_none());
    }
}
