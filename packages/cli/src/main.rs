#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the traffic map data pipeline.
//!
//! Loads lane-count and supply/demand files, prints the chart series the
//! map dashboard consumes as JSON, and converts single coordinates between
//! WGS84, GCJ02, and BD09.

mod config;

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;
use traffic_map_aggregate::{
    compute_resilience_metrics, distinct_sorted_lanes, group_lanes_by_direction,
    group_supply_demand_in_window, lane_time_series, supply_demand_time_series,
};
use traffic_map_coordinate::convert_named;
use traffic_map_ingest::{load_lane_data, load_supply_demand_data};
use traffic_map_traffic_models::Metric;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "traffic_map", about = "Traffic map data pipeline")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a coordinate between `wgs84`, `gcj02`, and `bd09`
    #[command(allow_negative_numbers = true)]
    Convert {
        /// Longitude in degrees
        lng: f64,
        /// Latitude in degrees
        lat: f64,
        /// Source coordinate system
        #[arg(long)]
        from: String,
        /// Target coordinate system
        #[arg(long)]
        to: String,
    },
    /// Print per-direction, per-lane vehicle count series
    Lanes {
        /// Lane-count file (relative to the data root, absolute, or a URL)
        file: String,
    },
    /// Print grouped supply/demand series with resilience metrics
    SupplyDemand {
        /// Supply/demand file (relative to the data root, absolute, or a URL)
        file: String,
        /// Only print this metric (`demand` or `supply`)
        #[arg(long)]
        metric: Option<Metric>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Convert { lng, lat, from, to } => {
            let conversion = convert_named(lng, lat, &from, &to);
            json!({
                "coordinate": conversion.coordinate,
                "unsupported": conversion.unsupported.map(|e| e.to_string()),
            })
        }
        Commands::Lanes { file } => {
            let source = config.lane_source(&file);
            let records = load_lane_data(&source).await;

            let mut directions = BTreeMap::new();
            for (direction, group) in group_lanes_by_direction(&records) {
                let lanes: BTreeMap<String, _> = distinct_sorted_lanes(&group)
                    .into_iter()
                    .map(|lane| {
                        let series = lane_time_series(&group, &lane);
                        (lane, series)
                    })
                    .collect();
                directions.insert(direction.to_string(), lanes);
            }
            json!(directions)
        }
        Commands::SupplyDemand { file, metric } => {
            let source = config.supply_demand_source(&file);
            let data = load_supply_demand_data(&source).await?;
            let window = config.peak_window()?;

            let metrics = metric.map_or_else(|| vec![Metric::Demand, Metric::Supply], |m| vec![m]);

            let mut groups = BTreeMap::new();
            for (key, records) in group_supply_demand_in_window(&data.records, window) {
                let mut entry = serde_json::Map::new();
                for metric in &metrics {
                    entry.insert(
                        metric.to_string(),
                        json!(supply_demand_time_series(&records, *metric)),
                    );
                }
                entry.insert(
                    "resilience".to_string(),
                    json!(compute_resilience_metrics(&records)),
                );
                groups.insert(key, entry);
            }

            json!({
                "fingerprint": data.fingerprint,
                "groups": groups,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
