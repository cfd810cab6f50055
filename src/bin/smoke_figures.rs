// src/bin/smoke_figures.rs
//
// Renders the three central-region smoke-event figures: the digitized CDC
// ED-visit/PM2.5 panels, the PurpleAir per-sensor time series, and the egg
// PM2.5 per-source scatter. Takes an optional sensor-source config path.

use env_logger::Env;
use log::{info, warn};
use std::env;
use std::error::Error;
use std::path::Path;

use airquality_csv_render::config::SensorSourceConfig;
use airquality_csv_render::constants::{
    event_day, EGG_WINDOW_FIRST_DAY, EGG_WINDOW_LAST_DAY, PURPLEAIR_STATS_PATH,
    PURPLEAIR_TIMESERIES_PATH,
};
use airquality_csv_render::data_input::sensor_readings::{load_sources, restrict_to_days};
use airquality_csv_render::data_input::sensor_stats::{load_purpleair_timeseries, SensorStats};
use airquality_csv_render::plot_functions::plot_egg_pm25::plot_egg_pm25;
use airquality_csv_render::plot_functions::plot_purpleair::plot_purpleair_timeseries;
use airquality_csv_render::plot_functions::plot_visits_pm25::plot_visits_pm25;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // --- Figure 1: digitized CDC MMWR data ---
    plot_visits_pm25()?;

    // --- Figure 2: PurpleAir per-sensor time series ---
    let purpleair = load_purpleair_timeseries(PURPLEAIR_TIMESERIES_PATH)?;
    let stats = SensorStats::load(PURPLEAIR_STATS_PATH)?;
    info!(
        "Loaded {} PurpleAir readings from {}",
        purpleair.len(),
        PURPLEAIR_TIMESERIES_PATH
    );
    plot_purpleair_timeseries(&purpleair, &stats)?;

    // --- Figure 3: egg PM2.5 per-source scatter ---
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
    plot_egg_pm25(&june)?;

    Ok(())
}
