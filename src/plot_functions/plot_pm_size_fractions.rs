// src/plot_functions/plot_pm_size_fractions.rs

use chrono::{DateTime, Utc};
use plotters::style::{Color, Palette, Palette99};
use std::error::Error;
use std::ops::Range;

use crate::constants::{
    event_day, EGG_Y_MAX, FIG_PM_FRACTIONS_HEIGHT, FIG_PM_FRACTIONS_OUTPUT,
    FIG_PM_FRACTIONS_WIDTH, PM10_PANEL_FIRST_DAY, PM10_PANEL_LAST_DAY, PM1_PANEL_FIRST_DAY,
    PM1_PANEL_LAST_DAY, POINT_SIZE_EGG,
};
use crate::data_input::sensor_readings::{split_by_source, SensorReading};
use crate::plot_framework::{day_start, draw_date_figure, DatePanel, DateSeries, SeriesStyle};

fn fraction_panel(
    readings: &[SensorReading],
    select: fn(&SensorReading) -> Option<f64>,
    x_range: Range<DateTime<Utc>>,
    x_label: &str,
    y_label: &str,
) -> DatePanel {
    let mut series = Vec::new();
    for (index, (source, rows)) in split_by_source(readings).into_iter().enumerate() {
        let data: Vec<_> = rows
            .iter()
            .filter_map(|r| select(r).map(|v| (r.timestamp, v)))
            .collect();
        if data.is_empty() {
            log::info!("Source '{}' has no valid {} readings; skipping series.", source, y_label);
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

    DatePanel {
        title: String::new(),
        x_range,
        y_range: 0.0..EGG_Y_MAX,
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        x_label_count: 8,
        series,
        bars: Vec::new(),
        reference_lines: Vec::new(),
        date_formatter: None,
    }
}

/// Generates the two-panel PM10 / PM1 per-source scatter figure. The panels
/// share sources and colors but cover different day windows.
pub fn plot_pm_size_fractions(readings: &[SensorReading]) -> Result<(), Box<dyn Error>> {
    let pm10_panel = fraction_panel(
        readings,
        |r| r.pm10p0,
        day_start(event_day(PM10_PANEL_FIRST_DAY))..day_start(event_day(PM10_PANEL_LAST_DAY)),
        "",
        "PM10 (μg/m³)",
    );
    let pm1_panel = fraction_panel(
        readings,
        |r| r.pm1p0,
        day_start(event_day(PM1_PANEL_FIRST_DAY))..day_start(event_day(PM1_PANEL_LAST_DAY)),
        "Date",
        "PM1 (μg/m³)",
    );

    draw_date_figure(
        FIG_PM_FRACTIONS_OUTPUT,
        (FIG_PM_FRACTIONS_WIDTH, FIG_PM_FRACTIONS_HEIGHT),
        "PM10 and PM1 Measurements by Sensor - June 6-11, 2023",
        &[pm10_panel, pm1_panel],
    )
}

// src/plot_functions/plot_pm_size_fractions.rs
