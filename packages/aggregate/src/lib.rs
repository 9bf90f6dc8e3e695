#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Turns ingested traffic records into chart-ready series.
//!
//! Lane-count records are grouped by [`Direction`] and lane; supply/demand
//! records by `direction-movement` within a peak window. Every function is
//! pure and returns freshly owned data.
//!
//! [`Direction`]: traffic_map_traffic_models::Direction

pub mod lanes;
pub mod resilience;
pub mod supply_demand;

pub use lanes::{distinct_sorted_lanes, group_lanes_by_direction, lane_time_series};
pub use resilience::{ResilienceMetrics, compute_resilience_metrics};
pub use supply_demand::{
    PeakWindow, group_supply_demand, group_supply_demand_in_window, supply_demand_time_series,
};
