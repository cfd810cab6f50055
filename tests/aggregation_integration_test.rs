// tests/aggregation_integration_test.rs
//
// Exercises the multi-source aggregation path end to end: per-file load,
// sentinel coercion, pooling, window restriction, and per-source split.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use airquality_csv_render::data_input::sensor_readings::{
    read_source, restrict_to_days, split_by_source, LoadReport, SourceTable,
};

const SENSOR_A: &str = "\
timestamp,pm1p0[ug/m^3],pm2p5[ug/m^3],pm10p0[ug/m^3]
2023-06-07 12:00:00+00:00,40.0,90.0,100.0
2023-06-06 06:00:00+00:00,10.0,20.0,25.0
2023-06-08 00:00:00+00:00,---,---,---
";

const SENSOR_B: &str = "\
timestamp,pm2p5[ug/m^3]
2023-06-06 18:00:00+00:00,55.0
2023-05-30 00:00:00+00:00,5.0
";

fn report() -> LoadReport {
    let table_a = SourceTable {
        path: PathBuf::from("egg-a.csv"),
        label: "egg-a".to_string(),
        readings: read_source(Cursor::new(SENSOR_A), "egg-a", Path::new("egg-a.csv")).unwrap(),
    };
    let table_b = SourceTable {
        path: PathBuf::from("egg-b.csv"),
        label: "Background".to_string(),
        readings: read_source(Cursor::new(SENSOR_B), "Background", Path::new("egg-b.csv"))
            .unwrap(),
    };
    LoadReport {
        tables: vec![table_a, table_b],
        failures: Vec::new(),
    }
}

#[test]
fn pooled_readings_interleave_sources_in_timestamp_order() {
    let pooled = report().pooled();
    assert_eq!(pooled.len(), 5);
    assert!(pooled.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    // The Background row from June 6 18:00 lands between egg-a's two June
    // 6/7 rows.
    assert_eq!(pooled[0].source, "Background"); // May 30
    assert_eq!(pooled[1].source, "egg-a"); // June 6 06:00
    assert_eq!(pooled[2].source, "Background"); // June 6 18:00
}

#[test]
fn window_restriction_drops_rows_outside_june() {
    let june = restrict_to_days(
        report().pooled(),
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2023, 6, 14).unwrap(),
    );
    assert_eq!(june.len(), 4);
    assert!(june.iter().all(|r| r.timestamp.date_naive()
        >= NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()));
}

#[test]
fn sentinel_rows_survive_as_missing_values() {
    let pooled = report().pooled();
    let sentinel_row = pooled
        .iter()
        .find(|r| r.timestamp.date_naive() == NaiveDate::from_ymd_opt(2023, 6, 8).unwrap())
        .unwrap();
    assert_eq!(sentinel_row.pm2p5, None);
    assert_eq!(sentinel_row.pm10p0, None);
    assert_eq!(sentinel_row.pm1p0, None);
}

#[test]
fn split_recovers_per_source_groups_after_pooling() {
    let june = restrict_to_days(
        report().pooled(),
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2023, 6, 14).unwrap(),
    );
    let groups = split_by_source(&june);
    assert_eq!(groups.len(), 2);

    let egg_a = groups.iter().find(|(label, _)| *label == "egg-a").unwrap();
    assert_eq!(egg_a.1.len(), 3);
    let background = groups
        .iter()
        .find(|(label, _)| *label == "Background")
        .unwrap();
    assert_eq!(background.1.len(), 1);
}
