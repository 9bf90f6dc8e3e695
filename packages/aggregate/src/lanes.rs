//! Grouping and series building for lane-count records.

use std::collections::{BTreeMap, BTreeSet};

use traffic_map_traffic_models::{Direction, LaneRecord, SeriesPoint, TimeSeries};

/// Splits records by direction.
///
/// The result always holds all four [`Direction`] keys; a direction with no
/// records maps to an empty list. Records with an unrecognised direction
/// code appear under no key.
#[must_use]
pub fn group_lanes_by_direction(records: &[LaneRecord]) -> BTreeMap<Direction, Vec<LaneRecord>> {
    Direction::all()
        .iter()
        .map(|&direction| {
            let matching: Vec<LaneRecord> = records
                .iter()
                .filter(|r| r.is_direction(direction))
                .cloned()
                .collect();
            (direction, matching)
        })
        .collect()
}

/// Unique lane identifiers, sorted lexicographically.
#[must_use]
pub fn distinct_sorted_lanes(records: &[LaneRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.lane.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Vehicle counts over time for one lane.
///
/// Records without a timestamp cannot be placed on the axis and are left
/// out; a missing count is kept as a `None` point.
#[must_use]
pub fn lane_time_series(records: &[LaneRecord], lane: &str) -> TimeSeries<Option<u64>> {
    records
        .iter()
        .filter(|r| r.lane == lane)
        .filter_map(|r| {
            r.time.map(|time| SeriesPoint {
                time,
                value: r.count,
            })
        })
        .collect()
}
