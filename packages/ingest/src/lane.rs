//! Lane-count file parser.
//!
//! Format: a header line, then `direction,lane,minute,vehicle_count` rows.
//! Rows are kept even when fields fail to parse; missing or unparseable
//! values surface as empty strings or `None` on the record.

use traffic_map_traffic_models::LaneRecord;

use crate::parsing::{line_reader, parse_count, parse_timestamp, skip_header_line};

/// Parses lane-count CSV text.
///
/// The first line is treated as a header and skipped whatever it holds;
/// blank lines are skipped too. Each line is split on commas without
/// quote handling. `minute` is shifted forward 8 hours into UTC+8.
#[must_use]
pub fn parse_lane_csv(text: &str) -> Vec<LaneRecord> {
    let mut reader = line_reader(skip_header_line(text));

    let mut records = Vec::new();

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::warn!("Unreadable lane-count row: {e}");
                continue;
            }
        };

        if row.iter().all(str::is_empty) {
            continue;
        }

        let field = |i: usize| row.get(i).unwrap_or("");

        records.push(LaneRecord {
            direction: field(0).to_owned(),
            lane: field(1).to_owned(),
            time: parse_timestamp(field(2)).and_then(|t| t.shifted_to_utc8()),
            count: parse_count(field(3)),
        });
    }

    log::info!(
        "Loaded {} lane-count records (times shifted to UTC+8)",
        records.len()
    );

    records
}
