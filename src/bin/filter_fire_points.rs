// src/bin/filter_fire_points.rs
//
// Filters the NFDB fire-incident file down to the June 2023 smoke-event
// study window and region, writing a same-format copy.

use env_logger::Env;
use log::info;
use std::error::Error;

use airquality_csv_render::constants::{
    event_day, FIRE_BBOX_LAT_MAX, FIRE_BBOX_LAT_MIN, FIRE_BBOX_LON_MAX, FIRE_BBOX_LON_MIN,
    FIRE_WINDOW_FIRST_DAY, FIRE_WINDOW_LAST_DAY, NFDB_FILTERED_PATH, NFDB_INPUT_PATH,
};
use airquality_csv_render::data_input::fire_points::{BoundingBox, DateRange, FireTable};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let table = FireTable::load(NFDB_INPUT_PATH)?;
    info!("Loaded {} fire records from {}", table.len(), NFDB_INPUT_PATH);

    let dates = DateRange {
        start: event_day(FIRE_WINDOW_FIRST_DAY),
        end: event_day(FIRE_WINDOW_LAST_DAY),
    };
    let bbox = BoundingBox {
        lat_min: FIRE_BBOX_LAT_MIN,
        lat_max: FIRE_BBOX_LAT_MAX,
        lon_min: FIRE_BBOX_LON_MIN,
        lon_max: FIRE_BBOX_LON_MAX,
    };
    let filtered = table.filter(&dates, &bbox);
    info!(
        "{} records within {} to {}, lat [{}, {}], lon [{}, {}]",
        filtered.len(),
        dates.start,
        dates.end,
        bbox.lat_min,
        bbox.lat_max,
        bbox.lon_min,
        bbox.lon_max
    );

    filtered.write(NFDB_FILTERED_PATH)?;
    info!("Filtered records written to {}", NFDB_FILTERED_PATH);
    Ok(())
}
