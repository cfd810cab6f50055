// src/data_input/sensor_readings.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::config::SensorSourceConfig;
use crate::errors::TableError;

/// Placeholder string the egg firmware emits for a missing numeric reading.
pub const SENTINEL_MISSING: &str = "---";

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const PM2P5_COLUMN: &str = "pm2p5[ug/m^3]";
pub const PM10P0_COLUMN: &str = "pm10p0[ug/m^3]";
pub const PM1P0_COLUMN: &str = "pm1p0[ug/m^3]";

/// One row of one sensor's log, stamped with its source label at load time.
/// Pollutant fields use `Option<f64>` to handle missing or unparseable
/// values; a column absent from the file is missing on every row.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub pm2p5: Option<f64>,
    pub pm10p0: Option<f64>,
    pub pm1p0: Option<f64>,
    pub source: String,
}

/// Successfully loaded rows of one source file.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub path: PathBuf,
    pub label: String,
    pub readings: Vec<SensorReading>,
}

/// One source file that could not be read at all.
#[derive(Debug)]
pub struct SourceFailure {
    pub path: PathBuf,
    pub error: TableError,
}

/// Outcome of loading a batch of source files: per-file success with data or
/// failure with reason. A failure never removes other sources from the
/// report.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub tables: Vec<SourceTable>,
    pub failures: Vec<SourceFailure>,
}

impl LoadReport {
    /// All readings pooled into one collection, stably sorted ascending by
    /// timestamp.
    pub fn pooled(&self) -> Vec<SensorReading> {
        let mut readings: Vec<SensorReading> = self
            .tables
            .iter()
            .flat_map(|t| t.readings.iter().cloned())
            .collect();
        readings.sort_by_key(|r| r.timestamp);
        readings
    }
}

fn get_optional_f64(record: &StringRecord, index: Option<usize>) -> Option<f64> {
    let value = index.and_then(|i| record.get(i))?.trim();
    if value.is_empty() || value == SENTINEL_MISSING {
        return None;
    }
    value.parse::<f64>().ok()
}

/// Parse an egg timestamp as a timezone-aware instant normalized to UTC.
/// Naive timestamps (no offset) are taken as already UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(ndt.and_utc());
    }
    None
}

/// Load every configured source. Errors reading an individual file are
/// captured in the report and aggregation continues with the rest.
pub fn load_sources(config: &SensorSourceConfig) -> LoadReport {
    let mut report = LoadReport::default();
    for (path, label) in config.sources() {
        match load_source_file(&path, &label) {
            Ok(readings) => {
                log::info!(
                    "Successfully loaded: {} ({} rows)",
                    path.display(),
                    readings.len()
                );
                report.tables.push(SourceTable {
                    path,
                    label,
                    readings,
                });
            }
            Err(error) => {
                log::warn!("Error processing {}: {}", path.display(), error);
                report.failures.push(SourceFailure { path, error });
            }
        }
    }
    report
}

pub fn load_source_file(path: &Path, label: &str) -> Result<Vec<SensorReading>, TableError> {
    let file = File::open(path).map_err(|e| TableError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_source(BufReader::new(file), label, path)
}

/// Read one sensor CSV from any reader. The `timestamp` column is required;
/// pollutant columns are optional and coerce to missing per row. Rows with
/// no parseable timestamp are dropped.
pub fn read_source<R: Read>(
    reader: R,
    label: &str,
    path: &Path,
) -> Result<Vec<SensorReading>, TableError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| TableError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();

    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let timestamp_idx = column(TIMESTAMP_COLUMN).ok_or_else(|| TableError::MissingColumn {
        path: path.to_path_buf(),
        column: TIMESTAMP_COLUMN.to_string(),
    })?;
    let pm2p5_idx = column(PM2P5_COLUMN);
    let pm10p0_idx = column(PM10P0_COLUMN);
    let pm1p0_idx = column(PM1P0_COLUMN);

    let mut readings = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::debug!("Skipping row {} of {}: {}", row_index + 1, path.display(), e);
                continue;
            }
        };

        let timestamp = match record.get(timestamp_idx).and_then(parse_timestamp) {
            Some(ts) => ts,
            None => {
                log::debug!(
                    "Skipping row {} of {}: no parseable timestamp",
                    row_index + 1,
                    path.display()
                );
                continue;
            }
        };

        readings.push(SensorReading {
            timestamp,
            pm2p5: get_optional_f64(&record, pm2p5_idx),
            pm10p0: get_optional_f64(&record, pm10p0_idx),
            pm1p0: get_optional_f64(&record, pm1p0_idx),
            source: label.to_string(),
        });
    }

    Ok(readings)
}

/// Readings whose timestamp falls on a calendar day in `[start, end]`.
pub fn restrict_to_days(
    readings: Vec<SensorReading>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<SensorReading> {
    readings
        .into_iter()
        .filter(|r| {
            let day = r.timestamp.date_naive();
            day >= start && day <= end
        })
        .collect()
}

/// Split pooled readings back out by source label, preserving the order in
/// which labels first appear.
pub fn split_by_source(readings: &[SensorReading]) -> Vec<(&str, Vec<&SensorReading>)> {
    let mut groups: Vec<(&str, Vec<&SensorReading>)> = Vec::new();
    for reading in readings {
        match groups.iter_mut().find(|(label, _)| *label == reading.source) {
            Some((_, rows)) => rows.push(reading),
            None => groups.push((reading.source.as_str(), vec![reading])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::io::Cursor;

    const EGG_CSV: &str = "\
timestamp,temperature[degC],pm1p0[ug/m^3],pm2p5[ug/m^3],pm10p0[ug/m^3]
2023-06-07 00:00:00+00:00,21.5,40.1,88.2,95.0
2023-06-06 12:00:00+00:00,20.0,---,---,---
2023-06-07 06:00:00+00:00,19.0,12.0,not-a-number,30.5
2023-07-01 00:00:00+00:00,18.0,1.0,2.0,3.0
";

    fn read(label: &str) -> Vec<SensorReading> {
        read_source(Cursor::new(EGG_CSV), label, Path::new("egg_test.csv")).unwrap()
    }

    #[test]
    fn sentinel_token_becomes_missing_not_an_error() {
        let readings = read("egg-a");
        assert_eq!(readings.len(), 4);
        assert_eq!(readings[1].pm2p5, None);
        assert_eq!(readings[1].pm10p0, None);
        assert_eq!(readings[0].pm2p5, Some(88.2));
    }

    #[test]
    fn unparseable_numeric_coerces_to_missing() {
        let readings = read("egg-a");
        assert_eq!(readings[2].pm2p5, None);
        assert_eq!(readings[2].pm10p0, Some(30.5));
    }

    #[test]
    fn rows_are_stamped_with_source_label() {
        let readings = read("Background");
        assert!(readings.iter().all(|r| r.source == "Background"));
    }

    #[test]
    fn missing_pollutant_column_is_missing_on_every_row() {
        let csv = "timestamp,pm2p5[ug/m^3]\n2023-06-07 00:00:00,10.0\n";
        let readings = read_source(Cursor::new(csv), "egg-b", Path::new("narrow.csv")).unwrap();
        assert_eq!(readings[0].pm2p5, Some(10.0));
        assert_eq!(readings[0].pm10p0, None);
        assert_eq!(readings[0].pm1p0, None);
    }

    #[test]
    fn offset_timestamps_normalize_to_utc() {
        let csv = "timestamp,pm2p5[ug/m^3]\n2023-06-07T02:00:00-04:00,10.0\n";
        let readings = read_source(Cursor::new(csv), "egg-b", Path::new("tz.csv")).unwrap();
        assert_eq!(
            readings[0].timestamp,
            NaiveDate::from_ymd_opt(2023, 6, 7)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap()
                .and_utc()
        );
    }

    #[test]
    fn pooled_output_is_sorted_by_timestamp() {
        let report = LoadReport {
            tables: vec![SourceTable {
                path: PathBuf::from("egg_test.csv"),
                label: "egg-a".into(),
                readings: read("egg-a"),
            }],
            failures: Vec::new(),
        };
        let pooled = report.pooled();
        assert!(pooled.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn day_window_is_inclusive_on_both_ends() {
        let june = restrict_to_days(
            read("egg-a"),
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 14).unwrap(),
        );
        assert_eq!(june.len(), 3);
        assert!(june.iter().all(|r| r.timestamp.date_naive().day() <= 14));

        let single_day = restrict_to_days(
            read("egg-a"),
            NaiveDate::from_ymd_opt(2023, 6, 7).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 7).unwrap(),
        );
        assert_eq!(single_day.len(), 2);
    }

    #[test]
    fn one_unreadable_file_does_not_abort_the_batch() {
        let dir = std::env::temp_dir().join(format!("egg-agg-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let good = dir.join("egg-good.csv");
        std::fs::write(&good, EGG_CSV).unwrap();

        let config = SensorSourceConfig {
            data_dir: dir.clone(),
            files: vec!["egg-good.csv".into(), "egg-absent.csv".into()],
            label_overrides: Default::default(),
        };
        let report = load_sources(&config);

        assert_eq!(report.tables.len(), 1);
        assert_eq!(report.tables[0].readings.len(), 4);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("egg-absent.csv"));
        assert!(matches!(report.failures[0].error, TableError::Io { .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn split_by_source_preserves_first_appearance_order() {
        let mut readings = read("egg-a");
        readings.extend(read("Background"));
        readings.extend(read("egg-a"));
        let groups = split_by_source(&readings);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "egg-a");
        assert_eq!(groups[0].1.len(), 8);
        assert_eq!(groups[1].0, "Background");
    }
}

// src/data_input/sensor_readings.rs
