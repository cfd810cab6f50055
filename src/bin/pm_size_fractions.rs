// src/bin/pm_size_fractions.rs
//
// Renders the two-panel egg PM10/PM1 per-source scatter figure. Takes an
// optional sensor-source config path.

use env_logger::Env;
use log::{info, warn};
use std::env;
use std::error::Error;
use std::path::Path;

use airquality_csv_render::config::SensorSourceConfig;
use airquality_csv_render::constants::{event_day, EGG_WINDOW_FIRST_DAY, EGG_WINDOW_LAST_DAY};
use airquality_csv_render::data_input::sensor_readings::{load_sources, restrict_to_days};
use airquality_csv_render::plot_functions::plot_pm_size_fractions::plot_pm_size_fractions;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match env::args().nth(1) {
        Some(path) => SensorSourceConfig::load(Path::new(&path))?,
        None => SensorSourceConfig::default(),
    };
    let report = load_sources(&config);
    for failure in &report.failures {
        warn!("Skipped {}: {}", failure.path.display(), failure.error);
    }
    if report.tables.is_empty() {
        warn!("No data was successfully loaded.");
        return Ok(());
    }

    let june = restrict_to_days(
        report.pooled(),
        event_day(EGG_WINDOW_FIRST_DAY),
        event_day(EGG_WINDOW_LAST_DAY),
    );
    info!(
        "{} readings from {} sources within the June window",
        june.len(),
        report.tables.len()
    );
    plot_pm_size_fractions(&june)?;

    Ok(())
}
