#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Lane count, intersection supply/demand, and time-series types.
//!
//! All timestamps are naive wall-clock times in UTC+8 (Beijing time). Lane
//! records are shifted into that zone on load; supply/demand files are
//! already expressed in it.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike as _, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Offset of the UTC+8 display zone, in hours.
pub const UTC8_OFFSET_HOURS: i64 = 8;

/// Intersection approach quadrant used by the lane-count feeds.
///
/// Declaration order is the canonical display order.
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
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Direction {
    /// Northwest approach
    Nw,
    /// Northeast approach
    Ne,
    /// Southwest approach
    Sw,
    /// Southeast approach
    Se,
}

impl Direction {
    /// Returns all variants of this enum in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Nw, Self::Ne, Self::Sw, Self::Se]
    }
}

/// One row of a lane-count file.
///
/// Rows are not validated on load, so fields the source could not supply
/// are empty strings or `None` rather than causing the row to be dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneRecord {
    /// Raw direction code (normally one of [`Direction`]).
    pub direction: String,
    /// Lane identifier.
    pub lane: String,
    /// Minute bucket, shifted to UTC+8.
    pub time: Option<NaiveDateTime>,
    /// Vehicles counted in the minute.
    pub count: Option<u64>,
}

impl LaneRecord {
    /// Returns `true` if this record belongs to the given direction.
    #[must_use]
    pub fn is_direction(&self, direction: Direction) -> bool {
        self.direction == direction.as_ref()
    }
}

/// One validated row of a supply/demand file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyDemandRecord {
    /// Time bin (UTC+8 wall clock).
    pub time: NaiveDateTime,
    /// Approach direction (free-form, e.g. `"N"`, `"SE"`).
    pub direction: String,
    /// Turning movement (e.g. `"Left Turn"`, `"Through"`).
    pub movement: String,
    /// Smoothed demand for the bin.
    pub smoothed_demand: f64,
    /// Supply actually used in the bin.
    pub utilized_supply: f64,
}

impl SupplyDemandRecord {
    /// Grouping key combining direction and movement, e.g. `"N-Through"`.
    #[must_use]
    pub fn group_key(&self) -> String {
        format!("{}-{}", self.direction, self.movement)
    }

    /// Local hour of day, `0..=23`.
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Value of the requested metric.
    #[must_use]
    pub const fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Demand => self.smoothed_demand,
            Metric::Supply => self.utilized_supply,
        }
    }
}

/// Which supply/demand column a series is built from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    /// Smoothed demand.
    Demand,
    /// Utilized supply.
    Supply,
}

/// A single `(time, value)` point on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint<V> {
    /// Point timestamp.
    pub time: NaiveDateTime,
    /// Point value.
    pub value: V,
}

/// A chart series ordered ascending by time.
///
/// Points with equal timestamps are all kept, in their input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries<V> {
    points: Vec<SeriesPoint<V>>,
}

impl<V> TimeSeries<V> {
    /// Builds a series, stably sorting the points by time.
    #[must_use]
    pub fn new(mut points: Vec<SeriesPoint<V>>) -> Self {
        points.sort_by_key(|p| p.time);
        Self { points }
    }

    /// The ordered points.
    #[must_use]
    pub fn points(&self) -> &[SeriesPoint<V>] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consumes the series, returning its ordered points.
    #[must_use]
    pub fn into_points(self) -> Vec<SeriesPoint<V>> {
        self.points
    }
}

impl<V> FromIterator<SeriesPoint<V>> for TimeSeries<V> {
    fn from_iter<I: IntoIterator<Item = SeriesPoint<V>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Summary of one record, used in [`DataFingerprint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintRecord {
    /// Record time as a UTC instant (serialised with a `Z` suffix).
    pub time: DateTime<Utc>,
    /// Record direction.
    pub direction: String,
    /// Record movement.
    pub movement: String,
    /// Smoothed demand.
    pub demand: f64,
    /// Utilized supply.
    pub supply: f64,
}

impl From<&SupplyDemandRecord> for FingerprintRecord {
    fn from(record: &SupplyDemandRecord) -> Self {
        Self {
            time: record
                .time
                .checked_sub_signed(TimeDelta::hours(UTC8_OFFSET_HOURS))
                .unwrap_or(record.time)
                .and_utc(),
            direction: record.direction.clone(),
            movement: record.movement.clone(),
            demand: record.smoothed_demand,
            supply: record.utilized_supply,
        }
    }
}

/// Small summary of a parsed supply/demand file for sanity checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFingerprint {
    /// Label of the file the records came from.
    pub source: String,
    /// Number of valid records.
    pub record_count: usize,
    /// First record in file order.
    pub first_record: Option<FingerprintRecord>,
    /// Last record in file order.
    pub last_record: Option<FingerprintRecord>,
}

impl DataFingerprint {
    /// Computes the fingerprint of `records`.
    #[must_use]
    pub fn of(source: &str, records: &[SupplyDemandRecord]) -> Self {
        Self {
            source: source.to_owned(),
            record_count: records.len(),
            first_record: records.first().map(FingerprintRecord::from),
            last_record: records.last().map(FingerprintRecord::from),
        }
    }
}

/// Records parsed from a supply/demand file, with their fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyDemandData {
    /// Valid records in file order.
    pub records: Vec<SupplyDemandRecord>,
    /// Summary of `records`.
    pub fingerprint: DataFingerprint,
}

impl SupplyDemandData {
    /// An empty data set, used when the file could not be retrieved.
    #[must_use]
    pub fn empty(source: &str) -> Self {
        Self {
            records: Vec::new(),
            fingerprint: DataFingerprint::of(source, &[]),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn direction_codes_are_uppercase() {
        let codes: Vec<&str> = Direction::all().iter().map(AsRef::as_ref).collect();
        assert_eq!(codes, ["NW", "NE", "SW", "SE"]);
        assert_eq!(Direction::from_str("SE").unwrap(), Direction::Se);
        assert!(Direction::from_str("N").is_err());
    }

    #[test]
    fn direction_ord_matches_canonical_order() {
        let mut sorted = vec![Direction::Se, Direction::Nw, Direction::Sw, Direction::Ne];
        sorted.sort();
        assert_eq!(sorted, Direction::all());
    }

    #[test]
    fn time_series_sorts_and_keeps_duplicates() {
        let series = TimeSeries::new(vec![
            SeriesPoint { time: at(9, 0), value: 3 },
            SeriesPoint { time: at(8, 0), value: 1 },
            SeriesPoint { time: at(9, 0), value: 4 },
        ]);
        let values: Vec<i32> = series.points().iter().map(|p| p.value).collect();
        assert_eq!(values, [1, 3, 4]);
    }

    #[test]
    fn metric_selects_column() {
        let record = SupplyDemandRecord {
            time: at(7, 0),
            direction: "N".to_string(),
            movement: "Through".to_string(),
            smoothed_demand: 12.5,
            utilized_supply: 10.0,
        };
        assert!((record.metric(Metric::Demand) - 12.5).abs() < f64::EPSILON);
        assert!((record.metric(Metric::Supply) - 10.0).abs() < f64::EPSILON);
        assert_eq!(record.group_key(), "N-Through");
        assert_eq!(record.hour(), 7);
        assert_eq!(Metric::from_str("supply").unwrap(), Metric::Supply);
    }

    #[test]
    fn fingerprint_time_is_utc() {
        let record = SupplyDemandRecord {
            time: at(7, 0),
            direction: "N".to_string(),
            movement: "Through".to_string(),
            smoothed_demand: 1.0,
            utilized_supply: 1.0,
        };
        let fingerprint = DataFingerprint::of("sd.csv", &[record]);
        let first = fingerprint.first_record.unwrap();
        assert_eq!(first.time.to_rfc3339(), "2023-12-31T23:00:00+00:00");

        let json = serde_json::to_value(&first).unwrap();
        assert_eq!(json["time"], "2023-12-31T23:00:00Z");
    }

    #[test]
    fn fingerprint_of_empty_has_no_records() {
        let fingerprint = DataFingerprint::of("empty.csv", &[]);
        assert_eq!(fingerprint.record_count, 0);
        assert!(fingerprint.first_record.is_none());
        assert!(fingerprint.last_record.is_none());
    }
}
