// src/bin/fire_trajectory_map.rs
//
// Renders the June 1-7 fire locations together with the Ithaca and Syracuse
// back-trajectory sets.

use env_logger::Env;
use log::info;
use std::error::Error;

use airquality_csv_render::constants::{
    event_day, FIRE_BBOX_LAT_MAX, FIRE_BBOX_LAT_MIN, FIRE_BBOX_LON_MAX, FIRE_BBOX_LON_MIN,
    FIRE_WINDOW_FIRST_DAY, FIRE_WINDOW_LAST_DAY, NFDB_FILTERED_PATH, TRAJ_ITHACA_PATH,
    TRAJ_SYRACUSE_PATH,
};
use airquality_csv_render::data_input::fire_points::{BoundingBox, DateRange, FireTable};
use airquality_csv_render::data_input::trajectory::load_trajectories;
use airquality_csv_render::plot_functions::plot_fire_map::plot_fire_trajectory_map;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let table = FireTable::load(NFDB_FILTERED_PATH)?;
    let filtered = table.filter(
        &DateRange {
            start: event_day(FIRE_WINDOW_FIRST_DAY),
            end: event_day(FIRE_WINDOW_LAST_DAY),
        },
        &BoundingBox {
            lat_min: FIRE_BBOX_LAT_MIN,
            lat_max: FIRE_BBOX_LAT_MAX,
            lon_min: FIRE_BBOX_LON_MIN,
            lon_max: FIRE_BBOX_LON_MAX,
        },
    );

    let ithaca = load_trajectories(TRAJ_ITHACA_PATH)?;
    let syracuse = load_trajectories(TRAJ_SYRACUSE_PATH)?;
    info!(
        "Loaded {} Ithaca and {} Syracuse back trajectories",
        ithaca.len(),
        syracuse.len()
    );

    if !filtered.is_empty() {
        info!("Filtered coordinates:");
        for p in filtered.points() {
            info!("  {:8.4} {:9.4}  {}", p.latitude, p.longitude, p.rep_date);
        }
    }

    plot_fire_trajectory_map(&filtered, &ithaca, &syracuse)?;
    Ok(())
}
