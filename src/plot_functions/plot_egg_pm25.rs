// src/plot_functions/plot_egg_pm25.rs

use plotters::style::{Color, Palette, Palette99};
use std::error::Error;

use crate::constants::{
    event_day, EGG_WINDOW_FIRST_DAY, EGG_WINDOW_LAST_DAY, EGG_Y_MAX, FIG_EGG_PM25_OUTPUT,
    FIG_TIMESERIES_HEIGHT, FIG_TIMESERIES_WIDTH, POINT_SIZE_EGG,
};
use crate::data_input::sensor_readings::{split_by_source, SensorReading};
use crate::plot_framework::{day_start, draw_date_figure, DatePanel, DateSeries, SeriesStyle};

/// Generates the per-source egg PM2.5 scatter figure. A source whose PM2.5
/// values are entirely missing is skipped rather than drawn empty.
pub fn plot_egg_pm25(readings: &[SensorReading]) -> Result<(), Box<dyn Error>> {
    let mut series = Vec::new();
    for (index, (source, rows)) in split_by_source(readings).into_iter().enumerate() {
        let data: Vec<_> = rows
            .iter()
            .filter_map(|r| r.pm2p5.map(|v| (r.timestamp, v)))
            .collect();
        if data.is_empty() {
            log::info!("Source '{}' has no valid PM2.5 readings; skipping series.", source);
            continue;
        }
        series.push(DateSeries {
            data,
            label: source.to_string(),
            color: Palette99::pick(index).to_rgba(),
            style: SeriesStyle::Points,
            stroke_width: 0,
            point_size: POINT_SIZE_EGG,
        });
    }

    let panel = DatePanel {
        title: "PM2.5 Measurements by Sensor - June 1-14, 2023".to_string(),
        x_range: day_start(event_day(EGG_WINDOW_FIRST_DAY))
            ..day_start(event_day(EGG_WINDOW_LAST_DAY)),
        y_range: 0.0..EGG_Y_MAX,
        x_label: "Date".to_string(),
        y_label: "PM2.5 (μg/m³)".to_string(),
        x_label_count: 14,
        series,
        bars: Vec::new(),
        reference_lines: Vec::new(),
        date_formatter: None,
    };

    draw_date_figure(
        FIG_EGG_PM25_OUTPUT,
        (FIG_TIMESERIES_WIDTH, FIG_TIMESERIES_HEIGHT),
        "",
        &[panel],
    )
}

// src/plot_functions/plot_egg_pm25.rs
