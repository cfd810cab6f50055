// src/plot_functions/plot_purpleair.rs

use plotters::style::{Color, Palette, Palette99};
use std::error::Error;

use crate::constants::{
    event_day, EGG_WINDOW_FIRST_DAY, EGG_WINDOW_LAST_DAY, FIG_PURPLEAIR_OUTPUT,
    FIG_TIMESERIES_HEIGHT, FIG_TIMESERIES_WIDTH, LINE_WIDTH_PLOT, POINT_SIZE_PURPLEAIR,
    PURPLEAIR_Y_MAX,
};
use crate::data_input::sensor_stats::{split_by_sensor, PurpleAirReading, SensorStats};
use crate::plot_framework::{day_start, draw_date_figure, DatePanel, DateSeries, SeriesStyle};

/// Generates the per-sensor PurpleAir PM2.5 time-series figure, legend
/// entries annotated with each sensor's reporting-duration count.
pub fn plot_purpleair_timeseries(
    readings: &[PurpleAirReading],
    stats: &SensorStats,
) -> Result<(), Box<dyn Error>> {
    let mut series = Vec::new();
    for (index, (sensor, rows)) in split_by_sensor(readings).into_iter().enumerate() {
        let data: Vec<_> = rows
            .iter()
            .filter_map(|r| r.pm2p5.map(|v| (r.date, v)))
            .collect();
        if data.is_empty() {
            log::info!("Sensor '{}' has no valid PM2.5 readings; skipping series.", sensor);
            continue;
        }
        series.push(DateSeries {
            data,
            label: stats.legend_label(sensor),
            color: Palette99::pick(index).to_rgba(),
            style: SeriesStyle::LinePoints,
            stroke_width: LINE_WIDTH_PLOT,
            point_size: POINT_SIZE_PURPLEAIR,
        });
    }

    let panel = DatePanel {
        title: "PM2.5 Measurements in Syracuse-Ithaca Region - June 2023".to_string(),
        x_range: day_start(event_day(EGG_WINDOW_FIRST_DAY))
            ..day_start(event_day(EGG_WINDOW_LAST_DAY)),
        y_range: 0.0..PURPLEAIR_Y_MAX,
        x_label: "Date".to_string(),
        y_label: "PM2.5 (μg/m³)".to_string(),
        x_label_count: 14,
        series,
        bars: Vec::new(),
        reference_lines: Vec::new(),
        date_formatter: None,
    };

    draw_date_figure(
        FIG_PURPLEAIR_OUTPUT,
        (FIG_TIMESERIES_WIDTH, FIG_TIMESERIES_HEIGHT),
        "",
        &[panel],
    )
}

// src/plot_functions/plot_purpleair.rs
