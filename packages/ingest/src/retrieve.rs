//! Raw-text retrieval for data files.
//!
//! Retrieval failures are logged and collapse to empty results so a missing
//! file renders as "no data". Validation failures on text that *was*
//! retrieved are returned to the caller.

use std::fmt;
use std::path::PathBuf;

use traffic_map_traffic_models::{LaneRecord, SupplyDemandData};

use crate::IngestError;
use crate::lane::parse_lane_csv;
use crate::supply_demand::parse_supply_demand_csv;

/// Where a data file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// An `http://` or `https://` URL.
    Url(String),
}

impl DataSource {
    /// Interprets `location` as a URL if it has an HTTP(S) scheme, otherwise
    /// as a filesystem path.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_owned())
        } else {
            Self::Path(PathBuf::from(location))
        }
    }

    /// Resolves `relative` beneath this source.
    #[must_use]
    pub fn join(&self, relative: &str) -> Self {
        match self {
            Self::Path(base) => Self::Path(base.join(relative)),
            Self::Url(base) => Self::Url(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                relative.trim_start_matches('/')
            )),
        }
    }

    /// Short label used in diagnostics: the final path or URL segment.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Path(path) => path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned()),
            Self::Url(url) => url
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or(url.as_str())
                .to_owned(),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Reads the full text of `source`.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if a local file cannot be read, or
/// [`IngestError::Http`] if the request fails or returns a non-success status.
pub async fn fetch_text(source: &DataSource) -> Result<String, IngestError> {
    let text = match source {
        DataSource::Path(path) => tokio::fs::read_to_string(path).await?,
        DataSource::Url(url) => {
            reqwest::Client::new()
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?
        }
    };

    log::debug!("Retrieved {} bytes from {source}", text.len());

    Ok(text)
}

/// Retrieves and parses a lane-count file.
///
/// Returns an empty list if the file cannot be retrieved.
pub async fn load_lane_data(source: &DataSource) -> Vec<LaneRecord> {
    match fetch_text(source).await {
        Ok(text) => parse_lane_csv(&text),
        Err(e) => {
            log::error!("Failed to load lane-count data from {source}: {e}");
            Vec::new()
        }
    }
}

/// Retrieves and parses a supply/demand file.
///
/// A retrieval failure yields an empty data set rather than an error.
///
/// # Errors
///
/// Returns [`IngestError::Validation`] if the retrieved text is empty, is
/// not CSV, or contains no valid rows.
pub async fn load_supply_demand_data(
    source: &DataSource,
) -> Result<SupplyDemandData, IngestError> {
    let label = source.label();

    let text = match fetch_text(source).await {
        Ok(text) => text,
        Err(e) => {
            log::error!("Failed to load supply/demand data from {source}: {e}");
            return Ok(SupplyDemandData::empty(&label));
        }
    };

    parse_supply_demand_csv(&label, &text).map_err(|e| {
        log::error!("Rejected supply/demand data from {source}: {e}");
        IngestError::from(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parse_distinguishes_urls_from_paths() {
        assert_eq!(
            DataSource::parse("https://example.com/data/a.csv"),
            DataSource::Url("https://example.com/data/a.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("data/a.csv"),
            DataSource::Path(PathBuf::from("data/a.csv"))
        );
    }

    #[test]
    fn join_and_label() {
        let url = DataSource::parse("https://example.com/data/").join("/supplydemand/sd.csv");
        assert_eq!(
            url,
            DataSource::Url("https://example.com/data/supplydemand/sd.csv".to_string())
        );
        assert_eq!(url.label(), "sd.csv");

        let path = DataSource::parse("data").join("lanes.csv");
        assert_eq!(path, DataSource::Path(PathBuf::from("data").join("lanes.csv")));
        assert_eq!(path.label(), "lanes.csv");
    }

    #[tokio::test]
    async fn loads_lane_file() {
        let dir = temp_dir("traffic_map_ingest_lane_file");
        let file = dir.join("lanes.csv");
        std::fs::write(
            &file,
            "direction,lane,minute,vehicle_count\nNE,1,2024-01-01T08:00:00,5\n",
        )
        .unwrap();

        let records = load_lane_data(&DataSource::Path(file)).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].count, Some(5));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn missing_lane_file_is_empty() {
        let source = DataSource::Path(std::env::temp_dir().join("traffic_map_no_such_lanes.csv"));
        assert!(load_lane_data(&source).await.is_empty());
    }

    #[tokio::test]
    async fn missing_supply_demand_file_is_empty_not_error() {
        let source = DataSource::Path(std::env::temp_dir().join("traffic_map_no_such_sd.csv"));
        let data = load_supply_demand_data(&source).await.unwrap();
        assert!(data.records.is_empty());
        assert_eq!(data.fingerprint.record_count, 0);
    }

    #[tokio::test]
    async fn invalid_supply_demand_file_is_error() {
        let dir = temp_dir("traffic_map_ingest_sd_invalid");
        let file = dir.join("sd.csv");
        std::fs::write(&file, "function main() {}\n").unwrap();

        let err = load_supply_demand_data(&DataSource::Path(file))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::Validation(ValidationError::NotCsv { .. })
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
