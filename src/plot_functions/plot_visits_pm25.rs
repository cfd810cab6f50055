// src/plot_functions/plot_visits_pm25.rs

use chrono::{DateTime, Datelike, Duration, Utc};
use plotters::style::Color;
use std::error::Error;

use crate::constants::{
    event_day, CDC_PM25_Y_MAX, COLOR_PM25_LINE, COLOR_VISITS_BARS, ED_VISITS_Y_MAX,
    EGG_WINDOW_FIRST_DAY, EGG_WINDOW_LAST_DAY, FIG_CDC_HEIGHT, FIG_CDC_OUTPUT, FIG_CDC_WIDTH,
    LINE_WIDTH_BASELINE, LINE_WIDTH_PLOT, PM25_BASELINE_UG_M3, VISITS_BAR_OPACITY,
};
use crate::plot_framework::{
    day_start, draw_date_figure, DateBars, DatePanel, DateSeries, ReferenceLine, SeriesStyle,
};

/// Asthma ED visits and daily-mean PM2.5 for the central region, June 1-14
/// 2023, digitized from the CDC MMWR report (Meek et al.): (day, visits,
/// PM2.5).
const DAILY_VISITS_AND_PM25: [(u32, f64, f64); 14] = [
    (1, 14.0, 10.0),
    (2, 15.0, 16.0),
    (3, 7.0, 10.0),
    (4, 7.0, 2.0),
    (5, 15.0, 22.0),
    (6, 23.0, 68.0),
    (7, 27.0, 110.0),
    (8, 15.0, 60.0),
    (9, 11.0, 20.0),
    (10, 10.0, 5.0),
    (11, 13.0, 10.0),
    (12, 15.0, 15.0),
    (13, 20.0, 15.0),
    (14, 15.0, 5.0),
];

/// Label only odd days so the tick row stays readable at 14 daily ticks.
fn odd_day_label(value: &DateTime<Utc>) -> String {
    if value.day() % 2 == 1 {
        value.format("%Y-%m-%d").to_string()
    } else {
        String::new()
    }
}

/// Generates the stacked ED-visit / PM2.5 figure from the digitized CDC
/// series.
pub fn plot_visits_pm25() -> Result<(), Box<dyn Error>> {
    let x_range = day_start(event_day(EGG_WINDOW_FIRST_DAY))
        ..day_start(event_day(EGG_WINDOW_LAST_DAY));

    let visits_data: Vec<(DateTime<Utc>, f64)> = DAILY_VISITS_AND_PM25
        .iter()
        .map(|&(day, visits, _)| (day_start(event_day(day)), visits))
        .collect();
    let pm25_data: Vec<(DateTime<Utc>, f64)> = DAILY_VISITS_AND_PM25
        .iter()
        .map(|&(day, _, pm25)| (day_start(event_day(day)), pm25))
        .collect();

    let visits_panel = DatePanel {
        title: String::new(),
        x_range: x_range.clone(),
        y_range: 0.0..ED_VISITS_Y_MAX,
        x_label: String::new(),
        y_label: "No. of asthma ED visits".to_string(),
        x_label_count: 14,
        series: Vec::new(),
        bars: vec![DateBars {
            data: visits_data,
            label: "Asthma ED Visits".to_string(),
            color: COLOR_VISITS_BARS.mix(VISITS_BAR_OPACITY),
            half_width: Duration::hours(9),
        }],
        reference_lines: Vec::new(),
        date_formatter: Some(odd_day_label),
    };

    let pm25_panel = DatePanel {
        title: String::new(),
        x_range,
        y_range: 0.0..CDC_PM25_Y_MAX,
        x_label: "Date".to_string(),
        y_label: "Daily mean PM2.5 (μg/m³)".to_string(),
        x_label_count: 14,
        series: vec![DateSeries {
            data: pm25_data,
            label: "PM2.5".to_string(),
            color: COLOR_PM25_LINE.to_rgba(),
            style: SeriesStyle::Line,
            stroke_width: LINE_WIDTH_PLOT,
            point_size: 0,
        }],
        bars: Vec::new(),
        reference_lines: vec![ReferenceLine {
            value: PM25_BASELINE_UG_M3,
            label: "PM2.5 Baseline".to_string(),
            color: COLOR_PM25_LINE.to_rgba(),
            stroke_width: LINE_WIDTH_BASELINE,
        }],
        date_formatter: Some(odd_day_label),
    };

    draw_date_figure(
        FIG_CDC_OUTPUT,
        (FIG_CDC_WIDTH, FIG_CDC_HEIGHT),
        "Central region",
        &[visits_panel, pm25_panel],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digitized_series_covers_the_event_window() {
        assert_eq!(DAILY_VISITS_AND_PM25.len(), 14);
        assert_eq!(DAILY_VISITS_AND_PM25[0].0, 1);
        assert_eq!(DAILY_VISITS_AND_PM25[13].0, 14);
        // Peak smoke day.
        assert_eq!(DAILY_VISITS_AND_PM25[6], (7, 27.0, 110.0));
    }

    #[test]
    fn even_days_get_blank_tick_labels() {
        let odd = day_start(event_day(7));
        let even = day_start(event_day(8));
        assert_eq!(odd_day_label(&odd), "2023-06-07");
        assert_eq!(odd_day_label(&even), "");
    }
}

// src/plot_functions/plot_visits_pm25.rs
