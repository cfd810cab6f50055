// src/types.rs
// Type aliases shared across the data loaders and plot functions.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::data_input::trajectory::Trajectory;

/// Trajectory id -> coordinate arrays, keyed by id so iteration (and
/// therefore plotting) is deterministic.
pub type TrajectoryMap = BTreeMap<u32, Trajectory>;

/// One plottable sample on a calendar axis.
pub type DatePoint = (DateTime<Utc>, f64);

/// A (longitude, latitude) pair in degrees.
pub type LonLat = (f64, f64);

/// One trajectory flattened to map vertices, in file order.
pub type TrajectoryPath = Vec<LonLat>;

// src/types.rs
