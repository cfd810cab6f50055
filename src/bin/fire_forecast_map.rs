// src/bin/fire_forecast_map.rs
//
// Renders the fire locations on the wider northern extent together with the
// forecast trajectories, reporting the northernmost points in the study
// longitude band.

use env_logger::Env;
use log::info;
use std::error::Error;

use airquality_csv_render::constants::{
    event_day, FIRE_BBOX_LAT_MIN, FIRE_BBOX_LON_MAX, FIRE_BBOX_LON_MIN, FIRE_WINDOW_FIRST_DAY,
    FIRE_WINDOW_LAST_DAY, FORECAST_BBOX_LAT_MAX, NFDB_FILTERED_PATH, NORTHERNMOST_COUNT,
    NORTHERNMOST_LON_MAX, NORTHERNMOST_LON_MIN, TRAJ_FORECAST_PATH,
};
use airquality_csv_render::data_input::fire_points::{BoundingBox, DateRange, FireTable};
use airquality_csv_render::data_input::trajectory::load_trajectories;
use airquality_csv_render::plot_functions::plot_fire_map::plot_fire_forecast_map;

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
            lat_max: FORECAST_BBOX_LAT_MAX,
            lon_min: FIRE_BBOX_LON_MIN,
            lon_max: FIRE_BBOX_LON_MAX,
        },
    );

    let northernmost = filtered.northernmost(
        NORTHERNMOST_COUNT,
        NORTHERNMOST_LON_MIN,
        NORTHERNMOST_LON_MAX,
    );
    info!(
        "{} northernmost fire points between {}W and {}W:",
        northernmost.len(),
        -NORTHERNMOST_LON_MIN as i32,
        -NORTHERNMOST_LON_MAX as i32
    );
    for p in &northernmost {
        info!("  {:8.4} {:9.4}", p.latitude, p.longitude);
    }

    let forecast = load_trajectories(TRAJ_FORECAST_PATH)?;
    info!("Loaded {} forecast trajectories", forecast.len());

    if !filtered.is_empty() {
        info!("Filtered coordinates:");
        for p in filtered.points() {
            info!("  {:8.4} {:9.4}  {}", p.latitude, p.longitude, p.rep_date);
        }
    }

    plot_fire_forecast_map(&filtered, &forecast)?;
    Ok(())
}
