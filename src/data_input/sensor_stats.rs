// src/data_input/sensor_stats.rs

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::errors::TableError;

pub const DATE_COLUMN: &str = "Date";
pub const PM25_COLUMN: &str = "PM2.5";
pub const SENSOR_NAME_COLUMN: &str = "Sensor_Name";
pub const DAYS_REPORTED_COLUMN: &str = "Days_Reported";

/// One daily PurpleAir reading. The reported date is shifted forward one
/// whole day at load to adjust for the mismatch between GMT file dates and
/// the local day in Central New York.
#[derive(Debug, Clone, PartialEq)]
pub struct PurpleAirReading {
    pub date: DateTime<Utc>,
    pub pm2p5: Option<f64>,
    pub sensor: String,
}

fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

pub fn load_purpleair_timeseries(path: impl AsRef<Path>) -> Result<Vec<PurpleAirReading>, TableError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| TableError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_purpleair_timeseries(BufReader::new(file), path)
}

pub fn read_purpleair_timeseries<R: Read>(
    reader: R,
    path: &Path,
) -> Result<Vec<PurpleAirReading>, TableError> {
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
    let missing_column = |column: &str| TableError::MissingColumn {
        path: path.to_path_buf(),
        column: column.to_string(),
    };
    let date_idx = column(DATE_COLUMN).ok_or_else(|| missing_column(DATE_COLUMN))?;
    let pm_idx = column(PM25_COLUMN).ok_or_else(|| missing_column(PM25_COLUMN))?;
    let sensor_idx = column(SENSOR_NAME_COLUMN).ok_or_else(|| missing_column(SENSOR_NAME_COLUMN))?;

    let mut readings = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::debug!("Skipping row {} of {}: {}", row_index + 1, path.display(), e);
                continue;
            }
        };
        let date = match record.get(date_idx).and_then(parse_date) {
            Some(d) => d.and_utc() + Duration::days(1),
            None => {
                log::debug!(
                    "Skipping row {} of {}: no parseable date",
                    row_index + 1,
                    path.display()
                );
                continue;
            }
        };
        let sensor = match record.get(sensor_idx) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let pm2p5 = record.get(pm_idx).and_then(|v| v.trim().parse::<f64>().ok());
        readings.push(PurpleAirReading {
            date,
            pm2p5,
            sensor,
        });
    }
    Ok(readings)
}

/// Split readings by sensor, preserving first-appearance order.
pub fn split_by_sensor(readings: &[PurpleAirReading]) -> Vec<(&str, Vec<&PurpleAirReading>)> {
    let mut groups: Vec<(&str, Vec<&PurpleAirReading>)> = Vec::new();
    for reading in readings {
        match groups.iter_mut().find(|(name, _)| *name == reading.sensor) {
            Some((_, rows)) => rows.push(reading),
            None => groups.push((reading.sensor.as_str(), vec![reading])),
        }
    }
    groups
}

/// Side table mapping each sensor to how many days it reported, used to
/// annotate legend entries.
#[derive(Debug, Clone, Default)]
pub struct SensorStats {
    days_reported: HashMap<String, u32>,
}

impl SensorStats {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::read_from(BufReader::new(file), path)
    }

    pub fn read_from<R: Read>(reader: R, path: &Path) -> Result<Self, TableError> {
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
        let missing_column = |column: &str| TableError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        };
        let name_idx = column(SENSOR_NAME_COLUMN).ok_or_else(|| missing_column(SENSOR_NAME_COLUMN))?;
        let days_idx =
            column(DAYS_REPORTED_COLUMN).ok_or_else(|| missing_column(DAYS_REPORTED_COLUMN))?;

        let mut days_reported = HashMap::new();
        for result in rdr.records() {
            let record = match result {
                Ok(record) => record,
                Err(_) => continue,
            };
            let name = record.get(name_idx).unwrap_or("").to_string();
            let days = record.get(days_idx).and_then(|v| v.trim().parse::<u32>().ok());
            if let (false, Some(days)) = (name.is_empty(), days) {
                days_reported.insert(name, days);
            }
        }
        Ok(SensorStats { days_reported })
    }

    pub fn days_reported(&self, sensor: &str) -> Option<u32> {
        self.days_reported.get(sensor).copied()
    }

    /// Legend text for a sensor: annotated with its reporting-duration count
    /// when known, the bare name otherwise.
    pub fn legend_label(&self, sensor: &str) -> String {
        match self.days_reported(sensor) {
            Some(days) => format!("{} (n={} days)", sensor, days),
            None => {
                log::warn!("No Days_Reported entry for sensor '{}'", sensor);
                sensor.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TS_CSV: &str = "\
Date,Sensor_Name,PM2.5
2023-06-06,Syracuse North,88.0
2023-06-06,Ithaca Downtown,72.5
2023-06-07,Syracuse North,110.3
2023-06-07,Ithaca Downtown,
";

    const STATS_CSV: &str = "\
Sensor_Name,Days_Reported
Syracuse North,14
Ithaca Downtown,12
";

    fn timeseries() -> Vec<PurpleAirReading> {
        read_purpleair_timeseries(Cursor::new(TS_CSV), Path::new("pa_test.csv")).unwrap()
    }

    #[test]
    fn dates_are_shifted_forward_one_day() {
        let readings = timeseries();
        assert_eq!(
            readings[0].date.date_naive(),
            NaiveDate::from_ymd_opt(2023, 6, 7).unwrap()
        );
    }

    #[test]
    fn empty_pm_values_become_missing() {
        let readings = timeseries();
        assert_eq!(readings[3].pm2p5, None);
        assert_eq!(readings[2].pm2p5, Some(110.3));
    }

    #[test]
    fn split_preserves_first_appearance_order() {
        let readings = timeseries();
        let groups = split_by_sensor(&readings);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Syracuse North");
        assert_eq!(groups[1].0, "Ithaca Downtown");
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn legend_label_includes_days_reported() {
        let stats = SensorStats::read_from(Cursor::new(STATS_CSV), Path::new("stats.csv")).unwrap();
        assert_eq!(
            stats.legend_label("Syracuse North"),
            "Syracuse North (n=14 days)"
        );
    }

    #[test]
    fn unknown_sensor_degrades_to_bare_name() {
        let stats = SensorStats::read_from(Cursor::new(STATS_CSV), Path::new("stats.csv")).unwrap();
        assert_eq!(stats.legend_label("Cortland"), "Cortland");
    }
}

// src/data_input/sensor_stats.rs
