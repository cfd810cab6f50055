// src/plot_functions/plot_fire_map.rs

use ndarray_stats::QuantileExt;
use plotters::style::Color;
use std::error::Error;

use crate::constants::{
    COLOR_FIRE_POINTS, COLOR_TRAJ_BACK, COLOR_TRAJ_FORECAST, COLOR_TRAJ_SYRACUSE,
    FIG_FIRE_MAP_HEIGHT, FIG_FIRE_MAP_OUTPUT, FIG_FIRE_MAP_WIDTH, FIG_FORECAST_MAP_HEIGHT,
    FIG_FORECAST_MAP_OUTPUT, FIG_FORECAST_MAP_WIDTH, FORECAST_MAP_LAT_MAX, LINE_WIDTH_TRAJ,
    MAP_LAT_MAX, MAP_LAT_MIN, MAP_LON_MAX, MAP_LON_MIN, POINT_SIZE_FIRE,
};
use crate::data_input::fire_points::FireTable;
use crate::plot_framework::{draw_map_figure, EventLayer, MapExtent, TrajectoryLayer};
use crate::types::{TrajectoryMap, TrajectoryPath};

const FIRE_LABEL: &str = "Fire locations";

/// Flatten trajectories to map vertex paths, dropping any trajectory that
/// lies entirely outside the viewport.
fn layer_paths(trajectories: &TrajectoryMap, extent: &MapExtent) -> Vec<TrajectoryPath> {
    let mut paths = Vec::new();
    for (id, traj) in trajectories {
        if traj.is_empty() {
            continue;
        }
        let (lon_min, lon_max) = match (traj.lons.min(), traj.lons.max()) {
            (Ok(min), Ok(max)) => (*min, *max),
            _ => continue,
        };
        let (lat_min, lat_max) = match (traj.lats.min(), traj.lats.max()) {
            (Ok(min), Ok(max)) => (*min, *max),
            _ => continue,
        };
        if !extent.intersects(lon_min, lon_max, lat_min, lat_max) {
            log::debug!("Trajectory {} lies entirely outside the map extent; skipping.", id);
            continue;
        }
        paths.push(traj.points().collect());
    }
    paths
}

fn fire_layer(fires: &FireTable) -> EventLayer {
    if fires.is_empty() {
        log::warn!("No points found matching the criteria");
    }
    EventLayer {
        label: FIRE_LABEL.to_string(),
        color: COLOR_FIRE_POINTS.to_rgba(),
        point_size: POINT_SIZE_FIRE,
        points: fires
            .points()
            .iter()
            .map(|p| (p.longitude, p.latitude))
            .collect(),
    }
}

/// Generates the fire-location map with the two sets of back trajectories.
pub fn plot_fire_trajectory_map(
    fires: &FireTable,
    ithaca: &TrajectoryMap,
    syracuse: &TrajectoryMap,
) -> Result<(), Box<dyn Error>> {
    let extent = MapExtent {
        lon_min: MAP_LON_MIN,
        lon_max: MAP_LON_MAX,
        lat_min: MAP_LAT_MIN,
        lat_max: MAP_LAT_MAX,
    };
    let layers = [
        TrajectoryLayer {
            label: "Ithaca Back Trajectories".to_string(),
            color: COLOR_TRAJ_BACK.to_rgba(),
            stroke_width: LINE_WIDTH_TRAJ,
            paths: layer_paths(ithaca, &extent),
        },
        TrajectoryLayer {
            label: "Syracuse Back Trajectories".to_string(),
            color: COLOR_TRAJ_SYRACUSE.to_rgba(),
            stroke_width: LINE_WIDTH_TRAJ,
            paths: layer_paths(syracuse, &extent),
        },
    ];

    draw_map_figure(
        FIG_FIRE_MAP_OUTPUT,
        (FIG_FIRE_MAP_WIDTH, FIG_FIRE_MAP_HEIGHT),
        "Fire Locations (June 1-7, 2023) with Back Trajectories",
        &extent,
        &layers,
        &fire_layer(fires),
    )
}

/// Generates the fire-location map with the forecast trajectories on the
/// taller northern extent.
pub fn plot_fire_forecast_map(
    fires: &FireTable,
    forecast: &TrajectoryMap,
) -> Result<(), Box<dyn Error>> {
    let extent = MapExtent {
        lon_min: MAP_LON_MIN,
        lon_max: MAP_LON_MAX,
        lat_min: MAP_LAT_MIN,
        lat_max: FORECAST_MAP_LAT_MAX,
    };
    let layers = [TrajectoryLayer {
        label: "Trajectory".to_string(),
        color: COLOR_TRAJ_FORECAST.to_rgba(),
        stroke_width: LINE_WIDTH_TRAJ,
        paths: layer_paths(forecast, &extent),
    }];

    draw_map_figure(
        FIG_FORECAST_MAP_OUTPUT,
        (FIG_FORECAST_MAP_WIDTH, FIG_FORECAST_MAP_HEIGHT),
        "Fire Locations (June 1-3, 2023) with Forecast Trajectories",
        &extent,
        &layers,
        &fire_layer(fires),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;
    use crate::data_input::trajectory::Trajectory;

    fn trajectory(points: &[(f64, f64)]) -> Trajectory {
        Trajectory {
            lons: Array1::from(points.iter().map(|p| p.0).collect::<Vec<_>>()),
            lats: Array1::from(points.iter().map(|p| p.1).collect::<Vec<_>>()),
        }
    }

    #[test]
    fn trajectories_outside_the_extent_are_skipped() {
        let extent = MapExtent {
            lon_min: -90.0,
            lon_max: -63.0,
            lat_min: 36.0,
            lat_max: 53.0,
        };
        let mut map = TrajectoryMap::new();
        map.insert(1, trajectory(&[(-76.5, 42.4), (-77.0, 43.0)]));
        map.insert(2, trajectory(&[(-40.0, 42.0), (-42.0, 44.0)]));

        let paths = layer_paths(&map, &extent);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0], vec![(-76.5, 42.4), (-77.0, 43.0)]);
    }

    #[test]
    fn partially_visible_trajectories_are_kept() {
        let extent = MapExtent {
            lon_min: -90.0,
            lon_max: -63.0,
            lat_min: 36.0,
            lat_max: 53.0,
        };
        let mut map = TrajectoryMap::new();
        map.insert(1, trajectory(&[(-76.5, 42.4), (-60.0, 55.0)]));
        assert_eq!(layer_paths(&map, &extent).len(), 1);
    }
}

// src/plot_functions/plot_fire_map.rs
