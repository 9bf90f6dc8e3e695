//! Grouping and series building for supply/demand records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use traffic_map_traffic_models::{Metric, SeriesPoint, SupplyDemandRecord, TimeSeries};

/// Inclusive hour-of-day range kept when grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakWindow {
    /// First hour kept.
    pub start_hour: u32,
    /// Last hour kept.
    pub end_hour: u32,
}

impl PeakWindow {
    /// 05:00 through 15:59, covering the morning peak.
    pub const MORNING: Self = Self {
        start_hour: 5,
        end_hour: 15,
    };

    /// Returns `true` if `hour` lies in the window.
    #[must_use]
    pub const fn contains(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour <= self.end_hour
    }
}

impl Default for PeakWindow {
    fn default() -> Self {
        Self::MORNING
    }
}

/// Groups records inside [`PeakWindow::MORNING`] by `direction-movement`.
#[must_use]
pub fn group_supply_demand(
    records: &[SupplyDemandRecord],
) -> BTreeMap<String, Vec<SupplyDemandRecord>> {
    group_supply_demand_in_window(records, PeakWindow::MORNING)
}

/// Groups records whose hour lies in `window` by `direction-movement`.
///
/// Each group is sorted ascending by time; equal times keep file order.
#[must_use]
pub fn group_supply_demand_in_window(
    records: &[SupplyDemandRecord],
    window: PeakWindow,
) -> BTreeMap<String, Vec<SupplyDemandRecord>> {
    let mut groups: BTreeMap<String, Vec<SupplyDemandRecord>> = BTreeMap::new();

    for record in records.iter().filter(|r| window.contains(r.hour())) {
        groups
            .entry(record.group_key())
            .or_default()
            .push(record.clone());
    }

    for group in groups.values_mut() {
        group.sort_by_key(|r| r.time);
    }

    log::debug!(
        "Grouped {} supply/demand records into {} series",
        records.len(),
        groups.len()
    );

    groups
}

/// Projects records onto one metric.
#[must_use]
pub fn supply_demand_time_series(records: &[SupplyDemandRecord], metric: Metric) -> TimeSeries<f64> {
    records
        .iter()
        .map(|r| SeriesPoint {
            time: r.time,
            value: r.metric(metric),
        })
        .collect()
}
