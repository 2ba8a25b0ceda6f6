//! Tests for the config doctor report.

use specview_config::{ConfigStore, DoctorReport};

const FIXTURE: &str = include_str!("fixtures/spec_view_configs.json");

#[test]
fn doctor_flags_duplicates_and_unusable_categories() {
    let store = ConfigStore::from_json_str(FIXTURE).unwrap();
    let report = DoctorReport::from_store(&store);

    assert!(!report.is_clean());
    assert_eq!(report.counts.categories, 3);
    assert_eq!(report.counts.with_default, 1);
    assert_eq!(report.counts.series_configs, 4);
    assert_eq!(report.counts.unusable, 1);
    assert_eq!(report.counts.duplicate_series, 2);

    let photo = &report.categories[0];
    assert_eq!(photo.category, "Photoelectric Sensors");
    assert_eq!(photo.duplicate_series[0].series, "E3Z");
    assert_eq!(photo.duplicate_series[0].entries, vec![0, 1]);

    insta::assert_snapshot!(report.to_text().trim_end(), @r#"
    categories: 3 (with default: 1, unusable: 1)
    series configs: 4 (duplicate series: 2)
    [Photoelectric Sensors]
      series "E3Z" declared by entries 0, 1
      series "E3ZM" declared by entries 0, 1
    [Safety Relays]
      unusable: no default_config and no series_configs
    "#);
}

#[test]
fn doctor_flags_pivot_on_group_column_and_empty_series() {
    let json = r#"{
        "Counters": {
            "series_configs": [
                {
                    "series": [],
                    "group_by_cols": ["Digits ;number"],
                    "display_col": null,
                    "pivot_required": true,
                    "pivot_col": "Digits ;number",
                    "pivot_value_col": "Name"
                }
            ]
        }
    }"#;
    let store = ConfigStore::from_json_str(json).unwrap();
    let report = DoctorReport::from_store(&store);
    let findings = &report.categories[0];
    assert_eq!(findings.empty_series_entries, vec![0]);
    assert_eq!(findings.pivot_on_group_column, vec!["series_configs[0]".to_string()]);
}

#[test]
fn clean_config_has_no_findings() {
    let json = r#"{
        "Timers": {
            "default_config": {
                "group_by_cols": ["Operating mode ;LOV"],
                "display_col": "Name",
                "pivot_required": false,
                "pivot_col": null,
                "pivot_value_col": null
            },
            "series_configs": []
        }
    }"#;
    let store = ConfigStore::from_json_str(json).unwrap();
    let report = DoctorReport::from_store(&store);
    assert!(report.is_clean());
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["schema"], "specview.config-doctor");
    assert_eq!(value["counts"]["categories"], 1);
}
