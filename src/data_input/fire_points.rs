// src/data_input/fire_points.rs

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ByteRecord, ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use crate::errors::TableError;

pub const REP_DATE_COLUMN: &str = "REP_DATE";
pub const LATITUDE_COLUMN: &str = "LATITUDE";
pub const LONGITUDE_COLUMN: &str = "LONGITUDE";

// NFDB exports carry the report date either bare or with a time-of-day,
// with both dash and slash separators.
const REP_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"];
const REP_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Inclusive latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }
}

/// Parsed filter columns of one fire-incident row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirePoint {
    pub rep_date: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
}

/// A fire-incident table: the parsed filter columns plus the raw byte
/// records they came from. Passthrough fields are never decoded, so the
/// file's single-byte text encoding survives a filter -> write round trip
/// unchanged.
#[derive(Debug, Clone)]
pub struct FireTable {
    headers: ByteRecord,
    points: Vec<FirePoint>,
    raw_rows: Vec<ByteRecord>,
}

fn find_column(headers: &ByteRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|field| field.trim_ascii() == name.as_bytes())
}

fn parse_rep_date(field: &[u8]) -> Option<NaiveDate> {
    // The date column is ASCII even in Latin-1 files.
    let text = std::str::from_utf8(field).ok()?.trim();
    for fmt in REP_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in REP_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d);
        }
    }
    None
}

fn parse_coordinate(field: &[u8]) -> Option<f64> {
    std::str::from_utf8(field).ok()?.trim().parse().ok()
}

impl FireTable {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::read_from(BufReader::new(file), path)
    }

    /// Read a fire-incident table from any reader. Rows whose date or
    /// coordinates fail to parse are dropped (they could never satisfy a
    /// filter predicate); a missing schema column is fatal.
    pub fn read_from<R: Read>(reader: R, path: &Path) -> Result<Self, TableError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = rdr
            .byte_headers()
            .map_err(|e| TableError::Csv {
                path: path.to_path_buf(),
                source: e,
            })?
            .clone();

        let missing_column = |column: &str| TableError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        };
        let date_idx =
            find_column(&headers, REP_DATE_COLUMN).ok_or_else(|| missing_column(REP_DATE_COLUMN))?;
        let lat_idx =
            find_column(&headers, LATITUDE_COLUMN).ok_or_else(|| missing_column(LATITUDE_COLUMN))?;
        let lon_idx = find_column(&headers, LONGITUDE_COLUMN)
            .ok_or_else(|| missing_column(LONGITUDE_COLUMN))?;

        let mut points = Vec::new();
        let mut raw_rows = Vec::new();
        let mut dropped: usize = 0;

        for (row_index, result) in rdr.byte_records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    log::debug!("Skipping row {}: {}", row_index + 1, e);
                    dropped += 1;
                    continue;
                }
            };

            let parsed = (
                record.get(date_idx).and_then(parse_rep_date),
                record.get(lat_idx).and_then(parse_coordinate),
                record.get(lon_idx).and_then(parse_coordinate),
            );
            match parsed {
                (Some(rep_date), Some(latitude), Some(longitude)) => {
                    points.push(FirePoint {
                        rep_date,
                        latitude,
                        longitude,
                    });
                    raw_rows.push(record);
                }
                _ => {
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            log::debug!(
                "Dropped {} rows with unparseable date or coordinates from {}",
                dropped,
                path.display()
            );
        }

        Ok(FireTable {
            headers,
            points,
            raw_rows,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[FirePoint] {
        &self.points
    }

    /// Rows whose report date and coordinates all fall inside the given
    /// ranges, in original row order.
    pub fn filter(&self, dates: &DateRange, bbox: &BoundingBox) -> FireTable {
        let mut points = Vec::new();
        let mut raw_rows = Vec::new();
        for (point, raw) in self.points.iter().zip(&self.raw_rows) {
            if dates.contains(point.rep_date) && bbox.contains(point.latitude, point.longitude) {
                points.push(*point);
                raw_rows.push(raw.clone());
            }
        }
        FireTable {
            headers: self.headers.clone(),
            points,
            raw_rows,
        }
    }

    /// The `n` points with greatest latitude among those inside the
    /// longitude band; ties keep original row order.
    pub fn northernmost(&self, n: usize, lon_min: f64, lon_max: f64) -> Vec<FirePoint> {
        let mut candidates: Vec<FirePoint> = self
            .points
            .iter()
            .filter(|p| p.longitude >= lon_min && p.longitude <= lon_max)
            .copied()
            .collect();
        candidates.sort_by(|a, b| {
            b.latitude
                .partial_cmp(&a.latitude)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(n);
        candidates
    }

    /// Write the table in the same format it was read from: original header
    /// record, surviving rows byte for byte.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.write_to(file).map_err(|e| TableError::Csv {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_byte_record(&self.headers)?;
        for record in &self.raw_rows {
            wtr.write_byte_record(record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FIRE_CSV: &str = "\
FID,SRC_AGENCY,REP_DATE,LATITUDE,LONGITUDE,FIRENAME
1,QC,2023-06-05,48.0,-75.0,Chibougamau
2,QC,2023-06-05,60.0,-75.0,FarNorth
3,ON,2023-05-20,48.0,-75.0,TooEarly
4,QC,2023-06-03,50.0,-72.0,Mistissini
5,QC,2023-06-06,48.0,-85.0,TooWest
6,QC,2023-06-07,51.5,-77.5,Nemaska
";

    fn table() -> FireTable {
        FireTable::read_from(Cursor::new(FIRE_CSV), Path::new("fire_test.csv")).unwrap()
    }

    fn june_range() -> DateRange {
        DateRange {
            start: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 6, 7).unwrap(),
        }
    }

    fn study_bbox() -> BoundingBox {
        BoundingBox {
            lat_min: 46.0,
            lat_max: 52.0,
            lon_min: -80.0,
            lon_max: -70.0,
        }
    }

    #[test]
    fn filter_keeps_only_rows_inside_all_three_ranges() {
        let filtered = table().filter(&june_range(), &study_bbox());
        assert_eq!(filtered.len(), 3);
        for p in filtered.points() {
            assert!(june_range().contains(p.rep_date));
            assert!(study_bbox().contains(p.latitude, p.longitude));
        }
        // Latitude 60 is excluded even though date and longitude match.
        assert!(!filtered.points().iter().any(|p| p.latitude == 60.0));
    }

    #[test]
    fn filter_preserves_row_order() {
        let filtered = table().filter(&june_range(), &study_bbox());
        let dates: Vec<NaiveDate> = filtered.points().iter().map(|p| p.rep_date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2023, 6, 5).unwrap(),
                NaiveDate::from_ymd_opt(2023, 6, 3).unwrap(),
                NaiveDate::from_ymd_opt(2023, 6, 7).unwrap(),
            ]
        );
    }

    #[test]
    fn filter_is_idempotent() {
        let once = table().filter(&june_range(), &study_bbox());
        let twice = once.filter(&june_range(), &study_bbox());
        assert_eq!(once.points(), twice.points());

        let mut first = Vec::new();
        once.write_to(&mut first).unwrap();
        let mut second = Vec::new();
        twice.write_to(&mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn northernmost_breaks_ties_by_row_order() {
        let t = table();
        let top = t.northernmost(2, -80.0, -70.0);
        assert_eq!(top[0].latitude, 60.0);
        assert_eq!(top[1].latitude, 51.5);

        // Rows 1 and 3 share latitude 48; original order decides.
        let top4 = t.northernmost(4, -80.0, -70.0);
        assert_eq!(top4[2].latitude, 50.0);
        assert_eq!(
            top4[3].rep_date,
            NaiveDate::from_ymd_opt(2023, 6, 5).unwrap()
        );
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "FID,LATITUDE,LONGITUDE\n1,48.0,-75.0\n";
        match FireTable::read_from(Cursor::new(csv), Path::new("bad.csv")) {
            Err(TableError::MissingColumn { column, .. }) => {
                assert_eq!(column, REP_DATE_COLUMN);
            }
            other => panic!("expected MissingColumn, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn unparseable_rows_are_dropped_not_fatal() {
        let csv = "\
REP_DATE,LATITUDE,LONGITUDE
2023-06-05,48.0,-75.0
not-a-date,48.0,-75.0
2023-06-05,north,-75.0
";
        let t = FireTable::read_from(Cursor::new(csv), Path::new("messy.csv")).unwrap();
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn passthrough_bytes_survive_filter_and_write() {
        // 0xE9 is "é" in Latin-1 and invalid UTF-8 on its own.
        let mut raw: Vec<u8> = Vec::new();
        raw.extend_from_slice(b"REP_DATE,LATITUDE,LONGITUDE,FIRENAME\n");
        raw.extend_from_slice(b"2023-06-05,48.0,-75.0,Rivi\xE8re-");
        raw.extend_from_slice(b"\xC9tang\n");
        raw.extend_from_slice(b"2023-08-01,48.0,-75.0,OutOfWindow\n");

        let t = FireTable::read_from(Cursor::new(raw.clone()), Path::new("latin1.csv")).unwrap();
        let filtered = t.filter(&june_range(), &study_bbox());
        assert_eq!(filtered.len(), 1);

        let mut out = Vec::new();
        filtered.write_to(&mut out).unwrap();
        let expected: Vec<u8> = raw[..raw.len() - b"2023-08-01,48.0,-75.0,OutOfWindow\n".len()].to_vec();
        assert_eq!(out, expected);
    }

    #[test]
    fn slash_separated_and_datetime_rep_dates_parse() {
        assert_eq!(
            parse_rep_date(b"2023/06/05"),
            NaiveDate::from_ymd_opt(2023, 6, 5)
        );
        assert_eq!(
            parse_rep_date(b"2023-06-05 14:30:00"),
            NaiveDate::from_ymd_opt(2023, 6, 5)
        );
        assert_eq!(parse_rep_date(b"June 5"), None);
    }
}

// src/data_input/fire_points.rs
