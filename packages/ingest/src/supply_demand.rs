//! Supply/demand file parser.
//!
//! Rows need at least [`MIN_COLUMNS`] fields. Only the time, direction,
//! movement, smoothed-demand, and utilized-supply columns are read.

use traffic_map_traffic_models::{DataFingerprint, SupplyDemandData, SupplyDemandRecord};

use crate::ValidationError;
use crate::parsing::{line_reader, parse_number, parse_timestamp, skip_header_line};

/// Rows with fewer fields than this are dropped without a diagnostic.
pub const MIN_COLUMNS: usize = 13;

const TIME_COLUMN: usize = 2;
const DIRECTION_COLUMN: usize = 3;
const MOVEMENT_COLUMN: usize = 4;
const SMOOTHED_DEMAND_COLUMN: usize = 6;
const UTILIZED_SUPPLY_COLUMN: usize = 11;

/// Substrings that mark a body as script source rather than data.
const NON_CSV_MARKERS: &[&str] = &["const ", "function", "//"];

/// Parses supply/demand CSV text read from `file`.
///
/// `file` only labels diagnostics and the returned fingerprint.
///
/// # Errors
///
/// * [`ValidationError::Empty`] if `text` is blank
/// * [`ValidationError::NotCsv`] if `text` looks like script source
/// * [`ValidationError::NoValidRows`] if no row survives validation
pub fn parse_supply_demand_csv(
    file: &str,
    text: &str,
) -> Result<SupplyDemandData, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Empty {
            file: file.to_owned(),
        });
    }

    if NON_CSV_MARKERS.iter().any(|marker| text.contains(marker)) {
        return Err(ValidationError::NotCsv {
            file: file.to_owned(),
        });
    }

    log::info!("{file}: {} lines", text.lines().count());

    let mut reader = line_reader(skip_header_line(text));

    let mut records = Vec::new();

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::warn!("{file}: unreadable row: {e}");
                continue;
            }
        };

        if row.len() < MIN_COLUMNS {
            continue;
        }

        // The header line was cut off before reading.
        let line = row.position().map_or(0, |p| p.line() + 1);
        let field = |i: usize| row.get(i).unwrap_or("");

        let (Some(smoothed_demand), Some(utilized_supply)) = (
            parse_number(field(SMOOTHED_DEMAND_COLUMN)),
            parse_number(field(UTILIZED_SUPPLY_COLUMN)),
        ) else {
            log::warn!("{file} line {line}: invalid numeric data");
            continue;
        };

        let time_str = field(TIME_COLUMN);
        let Some(time) = parse_timestamp(time_str).and_then(|t| t.as_utc8()) else {
            log::warn!("{file} line {line}: invalid time format: {time_str}");
            continue;
        };

        records.push(SupplyDemandRecord {
            time,
            direction: field(DIRECTION_COLUMN).to_owned(),
            movement: field(MOVEMENT_COLUMN).to_owned(),
            smoothed_demand,
            utilized_supply,
        });
    }

    log::info!("{file}: {} valid records", records.len());

    if records.is_empty() {
        return Err(ValidationError::NoValidRows {
            file: file.to_owned(),
        });
    }

    let fingerprint = DataFingerprint::of(file, &records);
    log::info!("{file}: fingerprint {fingerprint:?}");

    Ok(SupplyDemandData {
        records,
        fingerprint,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,intersection,time_bin,direction,movement,raw_demand,smoothed_demand,c7,c8,c9,c10,utilized_supply,c12";

    fn row(time: &str, direction: &str, movement: &str, demand: &str, supply: &str) -> String {
        format!("1,323,{time},{direction},{movement},0,{demand},0,0,0,0,{supply},0")
    }

    #[test]
    fn parses_valid_rows() {
        let text = format!(
            "{HEADER}\n{}\n{}\n",
            row("2025-03-07 07:00:00", "N", "Through", "12.5", "10"),
            row("2025-03-07 07:05:00", "S", "Left Turn", "8", "7.5"),
        );
        let data = parse_supply_demand_csv("sd.csv", &text).unwrap();

        assert_eq!(data.records.len(), 2);
        let first = &data.records[0];
        assert_eq!(first.time.to_string(), "2025-03-07 07:00:00");
        assert_eq!(first.direction, "N");
        assert_eq!(first.movement, "Through");
        assert!((first.smoothed_demand - 12.5).abs() < f64::EPSILON);
        assert!((first.utilized_supply - 10.0).abs() < f64::EPSILON);

        assert_eq!(data.fingerprint.source, "sd.csv");
        assert_eq!(data.fingerprint.record_count, 2);
        assert_eq!(data.fingerprint.first_record.as_ref().unwrap().direction, "N");
        assert_eq!(data.fingerprint.last_record.as_ref().unwrap().direction, "S");
    }

    #[test]
    fn drops_short_rows_silently() {
        let text = format!(
            "{HEADER}\n1,2,3,4,5,6,7,8,9,10\n{}\n",
            row("2025-03-07 07:00:00", "N", "Through", "1", "1"),
        );
        let data = parse_supply_demand_csv("sd.csv", &text).unwrap();
        assert_eq!(data.records.len(), 1);
    }

    #[test]
    fn only_short_rows_is_no_valid_rows() {
        let text = format!("{HEADER}\n1,2,3,4,5,6,7,8,9,10\n");
        assert_eq!(
            parse_supply_demand_csv("sd.csv", &text).unwrap_err(),
            ValidationError::NoValidRows {
                file: "sd.csv".to_string()
            }
        );
    }

    #[test]
    fn skips_rows_with_bad_numbers_or_times() {
        let text = format!(
            "{HEADER}\n{}\n{}\n{}\n",
            row("2025-03-07 07:00:00", "N", "Through", "abc", "1"),
            row("yesterday", "N", "Through", "1", "1"),
            row("2025-03-07 08:00:00", "E", "Right Turn", "3", "2"),
        );
        let data = parse_supply_demand_csv("sd.csv", &text).unwrap();
        assert_eq!(data.records.len(), 1);
        assert_eq!(data.records[0].direction, "E");
    }

    #[test]
    fn stray_quote_only_skips_its_own_row() {
        let text = format!(
            "{HEADER}\n1,\"x,2025-03-07 07:00:00,N,Through,0,1,0,0,0,0,1,0\n{}\n{}\n",
            row("2025-03-07 07:05:00", "S", "Through", "2", "2"),
            row("2025-03-07 07:10:00", "E", "Through", "3", "3"),
        );
        let data = parse_supply_demand_csv("sd.csv", &text).unwrap();
        assert_eq!(data.records.len(), 3);
        assert_eq!(data.records[0].direction, "N");
        assert_eq!(data.records[2].direction, "E");
    }

    #[test]
    fn blank_first_line_is_the_header() {
        let text = format!(
            "\n{}\n{}\n",
            row("2025-03-07 07:00:00", "N", "Through", "1", "1"),
            row("2025-03-07 07:05:00", "S", "Through", "2", "2"),
        );
        let data = parse_supply_demand_csv("sd.csv", &text).unwrap();
        assert_eq!(data.records.len(), 2);
        assert_eq!(data.records[0].direction, "N");
    }

    #[test]
    fn numbers_with_trailing_units_are_kept() {
        let text = format!(
            "{HEADER}\n{}\n",
            row("2025-03-07 07:00:00", "N", "Through", "12.5veh", "2"),
        );
        let data = parse_supply_demand_csv("sd.csv", &text).unwrap();
        assert_eq!(data.records.len(), 1);
        assert!((data.records[0].smoothed_demand - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn header_only_is_no_valid_rows() {
        assert!(matches!(
            parse_supply_demand_csv("sd.csv", &format!("{HEADER}\n")),
            Err(ValidationError::NoValidRows { .. })
        ));
    }

    #[test]
    fn blank_text_is_empty() {
        assert!(matches!(
            parse_supply_demand_csv("sd.csv", "  \n\t\n"),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn script_text_is_not_csv() {
        for body in [
            "const data = [];",
            "function load() {}",
            "// generated\na,b,c",
        ] {
            assert!(matches!(
                parse_supply_demand_csv("sd.csv", body),
                Err(ValidationError::NotCsv { .. })
            ));
        }
    }
}
