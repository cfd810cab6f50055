// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBAColor};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::error::Error;
use std::ops::Range;

use crate::constants::{
    CHART_MARGIN, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND,
    FONT_SIZE_MAIN_TITLE, FONT_SIZE_MESSAGE, FONT_SIZE_TICK_LABEL, LINE_WIDTH_LEGEND,
    X_LABEL_AREA_SIZE, Y_LABEL_AREA_SIZE,
};

/// Number of dash/gap pairs used for dashed reference lines.
const REFERENCE_LINE_DASHES: i32 = 40;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Midnight UTC of a calendar day, for date-axis endpoints and bar centers.
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Default date tick label.
pub fn default_date_label(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// How one series is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    Points,
    LinePoints,
}

#[derive(Clone)]
pub struct DateSeries {
    pub data: Vec<(DateTime<Utc>, f64)>,
    pub label: String,
    pub color: RGBAColor,
    pub style: SeriesStyle,
    pub stroke_width: u32,
    pub point_size: u32,
}

/// A bar per sample, centered on its timestamp.
#[derive(Clone)]
pub struct DateBars {
    pub data: Vec<(DateTime<Utc>, f64)>,
    pub label: String,
    pub color: RGBAColor,
    pub half_width: Duration,
}

/// Dashed horizontal reference line spanning the panel.
#[derive(Clone)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
    pub color: RGBAColor,
    pub stroke_width: u32,
}

#[derive(Clone)]
pub struct DatePanel {
    pub title: String,
    pub x_range: Range<DateTime<Utc>>,
    pub y_range: Range<f64>,
    pub x_label: String,
    pub y_label: String,
    pub x_label_count: usize,
    pub series: Vec<DateSeries>,
    pub bars: Vec<DateBars>,
    pub reference_lines: Vec<ReferenceLine>,
    /// Tick formatter override; function pointer so panels stay `Clone`.
    pub date_formatter: Option<fn(&DateTime<Utc>) -> String>,
}

impl DatePanel {
    fn has_drawable_content(&self) -> bool {
        self.series.iter().any(|s| !s.data.is_empty())
            || self.bars.iter().any(|b| !b.data.is_empty())
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6;

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{plot_type} Data Unavailable: {reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_text_width = message.len().saturating_mul(estimated_char_width as usize) as i32;
    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - FONT_SIZE_MESSAGE / 2;

    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

/// Draw one or more vertically stacked date-axis panels to a PNG.
///
/// Panels are drawn top to bottom; a panel with nothing drawable renders a
/// placeholder message instead of an empty chart. An empty `main_title`
/// skips the figure-level title row.
pub fn draw_date_figure(
    output_path: &str,
    dimensions: (u32, u32),
    main_title: &str,
    panels: &[DatePanel],
) -> Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(output_path, dimensions).into_drawing_area();
    root_area.fill(&WHITE)?;

    let plot_area = if main_title.is_empty() {
        root_area.clone()
    } else {
        root_area.titled(main_title, ("sans-serif", FONT_SIZE_MAIN_TITLE))?
    };

    let sub_areas = plot_area.split_evenly((panels.len(), 1));
    for (panel, area) in panels.iter().zip(sub_areas.iter()) {
        if panel.has_drawable_content() {
            draw_date_panel(area, panel)?;
        } else {
            log::info!("No data available for panel '{}'; drawing placeholder.", panel.title);
            draw_unavailable_message(area, &panel.title, "No Valid Data Rows")?;
        }
    }

    root_area.present()?;
    log::info!("Figure saved as '{}'.", output_path);
    Ok(())
}

fn draw_date_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    panel: &DatePanel,
) -> Result<(), Box<dyn Error>> {
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(CHART_MARGIN)
        .x_label_area_size(X_LABEL_AREA_SIZE)
        .y_label_area_size(Y_LABEL_AREA_SIZE);
    if !panel.title.is_empty() {
        builder.caption(&panel.title, ("sans-serif", FONT_SIZE_CHART_TITLE));
    }
    let mut chart =
        builder.build_cartesian_2d(panel.x_range.clone(), panel.y_range.clone())?;

    let format_date = panel.date_formatter.unwrap_or(default_date_label);
    chart
        .configure_mesh()
        .x_desc(&panel.x_label)
        .y_desc(&panel.y_label)
        .x_labels(panel.x_label_count)
        .y_labels(6)
        .x_label_formatter(&|x| format_date(x))
        .light_line_style(BLACK.mix(0.12))
        .label_style(("sans-serif", FONT_SIZE_TICK_LABEL))
        .axis_desc_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let mut legend_series_count = 0;

    // Bars first so series draw on top of them.
    for bars in &panel.bars {
        if bars.data.is_empty() {
            continue;
        }
        let color = bars.color;
        let half_width = bars.half_width;
        let anno = chart.draw_series(bars.data.iter().map(|&(t, v)| {
            Rectangle::new([(t - half_width, 0.0), (t + half_width, v)], color.filled())
        }))?;
        if !bars.label.is_empty() {
            anno.label(&bars.label).legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 20, y + 6)], color.filled())
            });
            legend_series_count += 1;
        }
    }

    for s in &panel.series {
        if s.data.is_empty() {
            continue;
        }
        let color = s.color;
        let point_size = s.point_size;
        match s.style {
            SeriesStyle::Line => {
                let anno = chart.draw_series(LineSeries::new(
                    s.data.iter().cloned(),
                    color.stroke_width(s.stroke_width),
                ))?;
                if !s.label.is_empty() {
                    anno.label(&s.label).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 20, y)],
                            color.stroke_width(LINE_WIDTH_LEGEND),
                        )
                    });
                    legend_series_count += 1;
                }
            }
            SeriesStyle::Points => {
                let anno = chart.draw_series(
                    s.data
                        .iter()
                        .map(|&(t, v)| Circle::new((t, v), point_size, color.filled())),
                )?;
                if !s.label.is_empty() {
                    anno.label(&s.label).legend(move |(x, y)| {
                        Circle::new((x + 10, y), point_size, color.filled())
                    });
                    legend_series_count += 1;
                }
            }
            SeriesStyle::LinePoints => {
                chart.draw_series(
                    s.data
                        .iter()
                        .map(|&(t, v)| Circle::new((t, v), point_size, color.filled())),
                )?;
                let anno = chart.draw_series(LineSeries::new(
                    s.data.iter().cloned(),
                    color.stroke_width(s.stroke_width),
                ))?;
                if !s.label.is_empty() {
                    anno.label(&s.label).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 20, y)],
                            color.stroke_width(LINE_WIDTH_LEGEND),
                        )
                    });
                    legend_series_count += 1;
                }
            }
        }
    }

    // Dashed horizontal reference lines, drawn as short segments.
    for line in &panel.reference_lines {
        let color = line.color;
        let total = panel.x_range.end - panel.x_range.start;
        let segment = total / (REFERENCE_LINE_DASHES * 2);
        for i in 0..REFERENCE_LINE_DASHES {
            let x0 = panel.x_range.start + segment * (2 * i);
            let x1 = x0 + segment;
            chart.draw_series(LineSeries::new(
                vec![(x0, line.value), (x1, line.value)],
                color.stroke_width(line.stroke_width),
            ))?;
        }
        if !line.label.is_empty() {
            // Invisible anchor series carrying the legend entry.
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(panel.x_range.start, line.value)],
                    color.stroke_width(0),
                )))?
                .label(&line.label)
                .legend(move |(x, y)| {
                    PathElement::new(
                        vec![(x, y), (x + 20, y)],
                        color.stroke_width(LINE_WIDTH_LEGEND),
                    )
                });
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }

    Ok(())
}

/// Fixed map viewport in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapExtent {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl MapExtent {
    /// True when the rectangle [lon_min..lon_max] x [lat_min..lat_max]
    /// overlaps this extent.
    pub fn intersects(&self, lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> bool {
        lon_min <= self.lon_max
            && lon_max >= self.lon_min
            && lat_min <= self.lat_max
            && lat_max >= self.lat_min
    }
}

/// One set of trajectories drawn in a single color with one legend entry.
#[derive(Clone)]
pub struct TrajectoryLayer {
    pub label: String,
    pub color: RGBAColor,
    pub stroke_width: u32,
    pub paths: Vec<Vec<(f64, f64)>>,
}

/// Discrete event markers drawn above the trajectory layers.
#[derive(Clone)]
pub struct EventLayer {
    pub label: String,
    pub color: RGBAColor,
    pub point_size: u32,
    pub points: Vec<(f64, f64)>,
}

fn format_longitude(value: &f64) -> String {
    if *value < 0.0 {
        format!("{:.0}°W", -value)
    } else {
        format!("{:.0}°E", value)
    }
}

fn format_latitude(value: &f64) -> String {
    if *value < 0.0 {
        format!("{:.0}°S", -value)
    } else {
        format!("{:.0}°N", value)
    }
}

/// Draw a lon/lat map figure: labeled graticule, trajectory polylines, then
/// discrete event markers on top.
pub fn draw_map_figure(
    output_path: &str,
    dimensions: (u32, u32),
    title: &str,
    extent: &MapExtent,
    layers: &[TrajectoryLayer],
    events: &EventLayer,
) -> Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(output_path, dimensions).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption(title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(CHART_MARGIN)
        .x_label_area_size(X_LABEL_AREA_SIZE)
        .y_label_area_size(Y_LABEL_AREA_SIZE)
        .build_cartesian_2d(
            extent.lon_min..extent.lon_max,
            extent.lat_min..extent.lat_max,
        )?;

    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .x_label_formatter(&format_longitude)
        .y_label_formatter(&format_latitude)
        .light_line_style(BLACK.mix(0.12))
        .label_style(("sans-serif", FONT_SIZE_TICK_LABEL))
        .axis_desc_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let mut legend_series_count = 0;

    for layer in layers {
        let color = layer.color;
        for (index, path) in layer.paths.iter().enumerate() {
            if path.is_empty() {
                continue;
            }
            let anno = chart.draw_series(LineSeries::new(
                path.iter().cloned(),
                color.stroke_width(layer.stroke_width),
            ))?;
            // Label only the first trajectory of the layer so the legend
            // carries one entry per set.
            if index == 0 && !layer.label.is_empty() {
                anno.label(&layer.label).legend(move |(x, y)| {
                    PathElement::new(
                        vec![(x, y), (x + 20, y)],
                        color.stroke_width(LINE_WIDTH_LEGEND),
                    )
                });
                legend_series_count += 1;
            }
        }
    }

    if !events.points.is_empty() {
        let color = events.color;
        let point_size = events.point_size;
        let anno = chart.draw_series(
            events
                .points
                .iter()
                .map(|&(lon, lat)| Circle::new((lon, lat), point_size, color.filled())),
        )?;
        if !events.label.is_empty() {
            anno.label(&events.label).legend(move |(x, y)| {
                Circle::new((x + 10, y), point_size, color.filled())
            });
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }

    root_area.present()?;
    log::info!("Figure saved as '{}'.", output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_range_pads_by_fifteen_percent() {
        let (min, max) = calculate_range(0.0, 100.0);
        assert_eq!(min, -15.0);
        assert_eq!(max, 115.0);
    }

    #[test]
    fn calculate_range_handles_inverted_and_degenerate_input() {
        let (min, max) = calculate_range(100.0, 0.0);
        assert_eq!(min, -15.0);
        assert_eq!(max, 115.0);

        let (min, max) = calculate_range(5.0, 5.0);
        assert_eq!(min, 4.5);
        assert_eq!(max, 5.5);
    }

    #[test]
    fn day_start_is_midnight_utc() {
        let d = day_start(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(d.to_rfc3339(), "2023-06-01T00:00:00+00:00");
    }

    #[test]
    fn date_labels_render_iso_dates() {
        let d = day_start(NaiveDate::from_ymd_opt(2023, 6, 7).unwrap());
        assert_eq!(default_date_label(&d), "2023-06-07");
    }

    #[test]
    fn extent_intersection() {
        let extent = MapExtent {
            lon_min: -90.0,
            lon_max: -63.0,
            lat_min: 36.0,
            lat_max: 53.0,
        };
        assert!(extent.intersects(-80.0, -70.0, 40.0, 50.0));
        assert!(!extent.intersects(-60.0, -50.0, 40.0, 50.0));
        assert!(!extent.intersects(-80.0, -70.0, 54.0, 60.0));
    }

    #[test]
    fn degree_labels_use_hemisphere_suffixes() {
        assert_eq!(format_longitude(&-76.0), "76°W");
        assert_eq!(format_latitude(&42.0), "42°N");
    }
}

// src/plot_framework.rs
