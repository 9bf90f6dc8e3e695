//! Resilience indicators for a supply/demand series.
//!
//! The gap between demand and utilized supply is compared against the gap
//! at the 05:00 baseline. An indicator of 1 means no worse than baseline;
//! lower values mean the gap grew.

use serde::{Deserialize, Serialize};
use traffic_map_traffic_models::SupplyDemandRecord;

/// Hour whose mean gap is the baseline.
pub const BASELINE_HOUR: u32 = 5;

/// Resilience indicators. All `None` when the baseline is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResilienceMetrics {
    /// `1 - mean(gap) / baseline`.
    pub operational: Option<f64>,
    /// `1 - max(gap) / baseline`.
    pub design: Option<f64>,
    /// Currently equal to `operational`.
    pub recovery: Option<f64>,
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Computes resilience indicators for one `direction-movement` series.
///
/// The baseline is the mean gap over records at [`BASELINE_HOUR`], or over
/// all records if none fall in that hour.
#[must_use]
pub fn compute_resilience_metrics(records: &[SupplyDemandRecord]) -> ResilienceMetrics {
    let gaps: Vec<f64> = records
        .iter()
        .map(|r| r.smoothed_demand - r.utilized_supply)
        .collect();

    let baseline_gaps: Vec<f64> = records
        .iter()
        .zip(&gaps)
        .filter(|(r, _)| r.hour() == BASELINE_HOUR)
        .map(|(_, gap)| *gap)
        .collect();

    let baseline = if baseline_gaps.is_empty() {
        mean(&gaps)
    } else {
        mean(&baseline_gaps)
    };

    let (Some(baseline), Some(mean_gap)) = (baseline, mean(&gaps)) else {
        return ResilienceMetrics::default();
    };
    if baseline == 0.0 || !baseline.is_finite() {
        return ResilienceMetrics::default();
    }

    let max_gap = gaps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let finite = |v: f64| Some(v).filter(|v| v.is_finite());
    let operational = finite(1.0 - mean_gap / baseline);

    ResilienceMetrics {
        operational,
        design: finite(1.0 - max_gap / baseline),
        recovery: operational,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(hour: u32, demand: f64, supply: f64) -> SupplyDemandRecord {
        SupplyDemandRecord {
            time: NaiveDate::from_ymd_opt(2025, 3, 7)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            direction: "N".to_string(),
            movement: "Through".to_string(),
            smoothed_demand: demand,
            utilized_supply: supply,
        }
    }

    fn close(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|v| (v - expected).abs() < 1e-9)
    }

    #[test]
    fn empty_series_has_no_metrics() {
        assert_eq!(compute_resilience_metrics(&[]), ResilienceMetrics::default());
    }

    #[test]
    fn uses_five_am_baseline() {
        // gaps: 2 (05:00), 4, 6 -> baseline 2, mean 4, max 6
        let records = vec![record(5, 10.0, 8.0), record(7, 10.0, 6.0), record(8, 10.0, 4.0)];
        let metrics = compute_resilience_metrics(&records);

        assert!(close(metrics.operational, -1.0));
        assert!(close(metrics.design, -2.0));
        assert_eq!(metrics.recovery, metrics.operational);
    }

    #[test]
    fn falls_back_to_overall_mean() {
        // gaps: 2, 4 -> baseline 3, mean 3, max 4
        let records = vec![record(7, 5.0, 3.0), record(8, 5.0, 1.0)];
        let metrics = compute_resilience_metrics(&records);

        assert!(close(metrics.operational, 0.0));
        assert!(close(metrics.design, 1.0 - 4.0 / 3.0));
    }

    #[test]
    fn zero_baseline_has_no_metrics() {
        let records = vec![record(5, 3.0, 3.0), record(9, 5.0, 1.0)];
        assert_eq!(compute_resilience_metrics(&records), ResilienceMetrics::default());
    }
}
