// src/constants.rs

// Import specific colors needed
use chrono::NaiveDate;
use plotters::style::colors::full_palette::{BLUE, GREY, ORANGE, RED};
use plotters::style::RGBColor;

// --- Input paths ---
pub const NFDB_INPUT_PATH: &str = "NFDB_point_20240613.txt";
pub const NFDB_FILTERED_PATH: &str = "NFDB_filtered_point_20240613.txt";
pub const TRAJ_ITHACA_PATH: &str = "tdump.138766.txt";
pub const TRAJ_SYRACUSE_PATH: &str = "tdump.138880.txt";
pub const TRAJ_FORECAST_PATH: &str = "tdump.154659.txt";
pub const PURPLEAIR_TIMESERIES_PATH: &str = "syracuse_ithaca_outdoor_pm25_june_2023.csv";
pub const PURPLEAIR_STATS_PATH: &str = "syracuse_ithaca_outdoor_pm25_june_2023_stats.csv";

// --- Output figure names ---
pub const FIG_CDC_OUTPUT: &str = "asthma_and_pm2p5_from_meek_et_al.png";
pub const FIG_PURPLEAIR_OUTPUT: &str = "purple_air_data_from_central_region.png";
pub const FIG_EGG_PM25_OUTPUT: &str = "air_quality_eggs_from_central_region.png";
pub const FIG_PM_FRACTIONS_OUTPUT: &str = "air_quality_eggs_pm10_pm1_from_central_region.png";
pub const FIG_FIRE_MAP_OUTPUT: &str = "fire_locations_map.png";
pub const FIG_FORECAST_MAP_OUTPUT: &str = "fire_locations_plus_fcst_map.png";

// --- Event calendar window ---
// All figures cover the June 2023 smoke event; day-of-month bounds are
// inclusive on both ends.
pub const EVENT_YEAR: i32 = 2023;
pub const EVENT_MONTH: u32 = 6;
pub const EGG_WINDOW_FIRST_DAY: u32 = 1;
pub const EGG_WINDOW_LAST_DAY: u32 = 14;
pub const FIRE_WINDOW_FIRST_DAY: u32 = 1;
pub const FIRE_WINDOW_LAST_DAY: u32 = 7;
pub const PM10_PANEL_FIRST_DAY: u32 = 6;
pub const PM10_PANEL_LAST_DAY: u32 = 9;
pub const PM1_PANEL_FIRST_DAY: u32 = 6;
pub const PM1_PANEL_LAST_DAY: u32 = 11;

/// Calendar day within the event month.
pub fn event_day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(EVENT_YEAR, EVENT_MONTH, day).expect("valid event day")
}

// --- Fire-point geographic filters ---
pub const FIRE_BBOX_LAT_MIN: f64 = 46.0;
pub const FIRE_BBOX_LAT_MAX: f64 = 52.0;
pub const FORECAST_BBOX_LAT_MAX: f64 = 55.0;
pub const FIRE_BBOX_LON_MIN: f64 = -80.0;
pub const FIRE_BBOX_LON_MAX: f64 = -70.0;

// Northernmost-point selection band for the forecast map
pub const NORTHERNMOST_LON_MIN: f64 = -80.0;
pub const NORTHERNMOST_LON_MAX: f64 = -75.0;
pub const NORTHERNMOST_COUNT: usize = 7;

// --- Map extents ---
pub const MAP_LON_MIN: f64 = -90.0;
pub const MAP_LON_MAX: f64 = -63.0;
pub const MAP_LAT_MIN: f64 = 36.0;
pub const MAP_LAT_MAX: f64 = 53.0;
pub const FORECAST_MAP_LAT_MAX: f64 = 58.0;

// --- Axis limits ---
pub const ED_VISITS_Y_MAX: f64 = 30.0;
pub const CDC_PM25_Y_MAX: f64 = 120.0;
pub const PURPLEAIR_Y_MAX: f64 = 300.0;
pub const EGG_Y_MAX: f64 = 350.0;
pub const PM25_BASELINE_UG_M3: f64 = 5.0;

// --- Raster dimensions ---
// Figures target 300 DPI output; pixel sizes are the historical figure sizes
// (inches) times 300.
pub const FIG_CDC_WIDTH: u32 = 1800;
pub const FIG_CDC_HEIGHT: u32 = 1200;
pub const FIG_TIMESERIES_WIDTH: u32 = 4500;
pub const FIG_TIMESERIES_HEIGHT: u32 = 1800;
pub const FIG_PM_FRACTIONS_WIDTH: u32 = 4500;
pub const FIG_PM_FRACTIONS_HEIGHT: u32 = 3600;
pub const FIG_FIRE_MAP_WIDTH: u32 = 2400;
pub const FIG_FIRE_MAP_HEIGHT: u32 = 1800;
pub const FIG_FORECAST_MAP_WIDTH: u32 = 3600;
pub const FIG_FORECAST_MAP_HEIGHT: u32 = 2400;

// --- Font sizes (pixels, scaled for 300 DPI rasters) ---
pub const FONT_SIZE_MAIN_TITLE: i32 = 58;
pub const FONT_SIZE_CHART_TITLE: i32 = 54;
pub const FONT_SIZE_AXIS_LABEL: i32 = 46;
pub const FONT_SIZE_TICK_LABEL: i32 = 36;
pub const FONT_SIZE_LEGEND: i32 = 33;
pub const FONT_SIZE_MESSAGE: i32 = 48;

// --- Chart layout ---
pub const CHART_MARGIN: u32 = 25;
pub const X_LABEL_AREA_SIZE: u32 = 110;
pub const Y_LABEL_AREA_SIZE: u32 = 140;

// --- Plot color assignments ---
pub const COLOR_VISITS_BARS: &RGBColor = &GREY;
pub const VISITS_BAR_OPACITY: f64 = 0.3;
pub const COLOR_PM25_LINE: &RGBColor = &BLUE;
pub const COLOR_TRAJ_BACK: &RGBColor = &ORANGE;
pub const COLOR_TRAJ_FORECAST: &RGBColor = &ORANGE;
// Coral, for the second back-trajectory set (similar to but distinct from orange)
pub const COLOR_TRAJ_SYRACUSE: RGBColor = RGBColor(255, 127, 80);
pub const COLOR_FIRE_POINTS: &RGBColor = &RED;

// Stroke widths and marker radii
pub const LINE_WIDTH_PLOT: u32 = 3;
pub const LINE_WIDTH_BASELINE: u32 = 2;
pub const LINE_WIDTH_TRAJ: u32 = 3;
pub const LINE_WIDTH_LEGEND: u32 = 4;
pub const POINT_SIZE_PURPLEAIR: u32 = 8;
pub const POINT_SIZE_EGG: u32 = 5;
pub const POINT_SIZE_FIRE: u32 = 10;

// src/constants.rs
