// tests/date_axis_formatting_test.rs

use chrono::NaiveDate;

use airquality_csv_render::plot_framework::{day_start, default_date_label};

#[test]
fn tick_labels_match_the_figure_date_format() {
    let expectations = [
        ((2023, 6, 1), "2023-06-01"),
        ((2023, 6, 7), "2023-06-07"),
        ((2023, 6, 14), "2023-06-14"),
    ];
    for ((y, m, d), expected) in expectations {
        let tick = day_start(NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert_eq!(default_date_label(&tick), expected);
    }
}

#[test]
fn day_start_ticks_are_midnight_aligned() {
    let tick = day_start(NaiveDate::from_ymd_opt(2023, 6, 6).unwrap());
    assert_eq!(tick.format("%H:%M:%S").to_string(), "00:00:00");
}
