//! Tests for copy-on-write document edits.

use specview_config::{ConfigDocument, ConfigError, ConfigStore, EditError, SeriesDoc, ViewDoc};

fn series_entry(series: &[&str], group_by: &[&str]) -> SeriesDoc {
    SeriesDoc {
        series: series.iter().map(ToString::to_string).collect(),
        view: ViewDoc {
            group_by_cols: group_by.iter().map(ToString::to_string).collect(),
            ..ViewDoc::default()
        },
    }
}

#[test]
fn push_creates_category_and_leaves_source_untouched() {
    let original = ConfigDocument::default();
    let edited = original
        .with_series_config("Timers", series_entry(&["H3CR"], &["Operating mode ;LOV"]))
        .unwrap();
    assert!(original.categories.is_empty());
    assert_eq!(edited.categories["Timers"].series_configs.len(), 1);

    let store = ConfigStore::from_document(&edited).unwrap();
    let resolution = store.resolve("Timers", Some("H3CR")).unwrap();
    assert_eq!(resolution.config.group_by_cols[0].name(), "Operating mode");
}

#[test]
fn replace_and_remove_by_index() {
    let doc = ConfigDocument::default()
        .with_series_config("Timers", series_entry(&["H3CR"], &["Operating mode ;LOV"]))
        .unwrap()
        .with_series_config("Timers", series_entry(&["H5CX"], &["Digits ;number"]))
        .unwrap();

    let replaced = doc
        .with_replaced_series_config("Timers", 1, series_entry(&["H5CX"], &["Display ;LOV"]))
        .unwrap();
    assert_eq!(
        replaced.categories["Timers"].series_configs[1].view.group_by_cols,
        vec!["Display ;LOV".to_string()]
    );

    let removed = replaced.without_series_config("Timers", 0).unwrap();
    assert_eq!(removed.categories["Timers"].series_configs.len(), 1);
    assert_eq!(removed.categories["Timers"].series_configs[0].series, vec!["H5CX"]);

    let err = removed.without_series_config("Timers", 3).unwrap_err();
    assert!(matches!(
        err,
        EditError::IndexOutOfRange {
            index: 3,
            len: 1,
            ..
        }
    ));
}

#[test]
fn empty_series_is_rejected() {
    let err = ConfigDocument::default()
        .with_series_config("Timers", series_entry(&[], &[]))
        .unwrap_err();
    assert!(matches!(err, EditError::EmptySeries { .. }));
}

#[test]
fn default_config_requires_existing_category() {
    let err = ConfigDocument::default()
        .with_default_config("Timers", Some(ViewDoc::default()))
        .unwrap_err();
    assert!(matches!(err, EditError::UnknownCategory { .. }));

    let doc = ConfigDocument::default()
        .with_category("Timers")
        .with_default_config("Timers", Some(ViewDoc::default()))
        .unwrap();
    let store = ConfigStore::from_document(&doc).unwrap();
    assert!(store.resolve("Timers", None).is_ok());
}

#[test]
fn malformed_column_descriptors_are_rejected() {
    let doc = ConfigDocument::default()
        .with_series_config("Timers", series_entry(&["H3CR"], &["Operating mode ;LOV"]))
        .unwrap();

    let err = doc
        .with_series_config("Timers", series_entry(&["H5CX"], &["Housing"]))
        .unwrap_err();
    assert!(matches!(
        &err,
        EditError::Invalid(ConfigError::ColumnSpec {
            field: "group_by_cols",
            ..
        })
    ));
    assert!(err.to_string().contains("series_configs[1]"), "{err}");

    let err = doc
        .with_replaced_series_config("Timers", 0, series_entry(&["H3CR"], &["Mode ;lov"]))
        .unwrap_err();
    assert!(matches!(err, EditError::Invalid(ConfigError::ColumnSpec { .. })));

    let half_pivot = ViewDoc {
        pivot_required: true,
        pivot_col: Some("Output ;LOV".to_string()),
        ..ViewDoc::default()
    };
    let err = doc
        .with_default_config("Timers", Some(half_pivot))
        .unwrap_err();
    assert!(matches!(err, EditError::Invalid(_)));

    // The rejected edits left the source document loadable.
    assert!(ConfigStore::from_document(&doc).is_ok());
}
