// src/data_input/trajectory.rs

use ndarray::Array1;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::TrajectoryError;
use crate::types::TrajectoryMap;

/// Line that terminates the tdump header block; everything after it is data.
const DATA_HEADER_MARKER: &str = "1 PRESSURE";

// Fixed field offsets of the tdump data-row schema. Any upstream format
// drift must be reflected here; rows are never re-inspected for it.
pub const TRAJ_ID_FIELD: usize = 0;
pub const LAT_FIELD: usize = 9;
pub const LON_FIELD: usize = 10;
/// A data row must reach through the longitude field to be usable.
pub const MIN_DATA_FIELDS: usize = LON_FIELD + 1;

/// One simulated air-parcel path: latitude/longitude arrays of equal length,
/// in file order. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub lats: Array1<f64>,
    pub lons: Array1<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.lats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lats.is_empty()
    }

    /// Map vertices as (longitude, latitude) pairs, in file order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.lons.iter().copied().zip(self.lats.iter().copied())
    }
}

#[derive(Default)]
struct TrajectoryBuilder {
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl TrajectoryBuilder {
    fn push(&mut self, lat: f64, lon: f64) {
        self.lats.push(lat);
        self.lons.push(lon);
    }

    fn build(self) -> Trajectory {
        Trajectory {
            lats: Array1::from(self.lats),
            lons: Array1::from(self.lons),
        }
    }
}

/// Parse a tdump trajectory file into a map of trajectory id -> coordinates.
pub fn load_trajectories(path: impl AsRef<Path>) -> Result<TrajectoryMap, TrajectoryError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| TrajectoryError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_trajectories(BufReader::new(file), path)
}

/// Parse trajectory data from any buffered reader.
///
/// Scans for the header marker, then reads every subsequent line as a data
/// row: whitespace-split, id from field 0, latitude from field 9, longitude
/// from field 10. Rows too short to carry both coordinates, or whose fields
/// fail to parse, are skipped. A file with no marker line is an error rather
/// than being treated as all data.
pub fn parse_trajectories<R: BufRead>(
    reader: R,
    path: &Path,
) -> Result<TrajectoryMap, TrajectoryError> {
    let mut builders: BTreeMap<u32, TrajectoryBuilder> = BTreeMap::new();
    let mut in_data = false;
    let mut skipped_rows: usize = 0;

    for line in reader.lines() {
        let line = line.map_err(|e| TrajectoryError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        if !in_data {
            if line.trim().starts_with(DATA_HEADER_MARKER) {
                in_data = true;
            }
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_DATA_FIELDS {
            if !fields.is_empty() {
                skipped_rows += 1;
            }
            continue;
        }

        let parsed = (
            fields[TRAJ_ID_FIELD].parse::<u32>(),
            fields[LAT_FIELD].parse::<f64>(),
            fields[LON_FIELD].parse::<f64>(),
        );
        match parsed {
            (Ok(id), Ok(lat), Ok(lon)) => {
                builders.entry(id).or_default().push(lat, lon);
            }
            _ => {
                log::debug!("Skipping malformed trajectory row in {}", path.display());
                skipped_rows += 1;
            }
        }
    }

    if !in_data {
        return Err(TrajectoryError::MissingHeaderMarker {
            path: path.to_path_buf(),
        });
    }

    if skipped_rows > 0 {
        log::debug!(
            "Skipped {} short or malformed rows in {}",
            skipped_rows,
            path.display()
        );
    }

    Ok(builders.into_iter().map(|(id, b)| (id, b.build())).collect())
}


// src/data_input/trajectory.rs
