//! Integration tests for series numbering across a cruise
//!
//! Drives the public API the way a shipboard session does: configure a data
//! directory, scan it, derive the next cast name, record the cast, rescan.

use chrono::NaiveDate;
use ctd_presystem::app::services::cast_name::{CastNameBuilder, next_cast_name};
use ctd_presystem::app::services::series_registry::SeriesOptions;
use ctd_presystem::{Error, PresystemConfig, SeriesCriteria, SeriesRegistry};
use std::fs;
use tempfile::TempDir;

fn builder_at(day: u32, hour: u32) -> CastNameBuilder {
    let time = NaiveDate::from_ymd_opt(2021, 4, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap();
    CastNameBuilder::new()
        .instrument("SBE09")
        .instrument_serial("1387")
        .ship("77SE")
        .cruise("3")
        .timestamp(time)
}

/// Purpose: a cruise starts from an empty data directory and numbers casts consecutively
#[test]
fn test_consecutive_casts_over_a_cruise() {
    let temp_dir = TempDir::new().unwrap();
    let config = PresystemConfig::default()
        .with_data_root(temp_dir.path())
        .with_series_options(SeriesOptions::default().with_stem_keys().with_required_suffix("hex"));

    let root = config.ensure_data_root().unwrap().to_path_buf();
    assert!(root.ends_with("data"));

    let registry = config.series_registry(false).unwrap();
    assert_eq!(registry.count(), 0);

    let mut stems = Vec::new();
    for (day, hour) in [(13, 8), (13, 14), (14, 6)] {
        let name = next_cast_name(&registry, builder_at(day, hour)).unwrap();
        let raw_path = name.raw_file_path(&root);
        fs::create_dir_all(raw_path.parent().unwrap()).unwrap();
        fs::write(&raw_path, "* Sea-Bird SBE 9 Raw Data File:\n").unwrap();
        fs::write(raw_path.with_extension("XMLCON"), "<xml/>").unwrap();
        stems.push(name.stem());

        registry.scan().unwrap();
    }

    assert_eq!(
        stems,
        vec![
            "SBE09_1387_20210413_0800_77SE_03_0001",
            "SBE09_1387_20210413_1400_77SE_03_0002",
            "SBE09_1387_20210414_0600_77SE_03_0003",
        ]
    );
    assert_eq!(registry.count(), 3);

    let criteria = SeriesCriteria::new().instrument("SBE09").ship("77SE").cruise("03");
    assert_eq!(registry.latest_serno(&criteria).as_deref(), Some("0003"));
    assert!(registry.series_exists(&criteria.clone().serno("0002")));
}

/// Purpose: older legacy-format files on the same data root do not disturb current numbering
#[test]
fn test_legacy_files_alongside_current_ones() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("data");
    let legacy = root.join("2015");
    fs::create_dir_all(&legacy).unwrap();
    fs::write(legacy.join("SBE09_0745_20150218_1040_34_01_0122.hex"), "").unwrap();
    fs::write(legacy.join("SBE09_0745_20150219_1040_34_01_0123.hex"), "").unwrap();

    let registry = SeriesRegistry::open(&root, SeriesOptions::default()).unwrap();
    assert_eq!(registry.count(), 2);

    let name = next_cast_name(&registry, builder_at(20, 9)).unwrap();
    assert_eq!(name.serno, "0001");

    let legacy_ship = SeriesCriteria::new().instrument("SBE09").ship("3401");
    assert_eq!(registry.next_serno(&legacy_ship).unwrap(), "0124");
}

/// Purpose: incomplete input is reported all at once, before the directory is touched
#[test]
fn test_missing_fields_are_reported_together() {
    let temp_dir = TempDir::new().unwrap();
    let registry = SeriesRegistry::open(temp_dir.path(), SeriesOptions::default()).unwrap();

    let err = next_cast_name(&registry, CastNameBuilder::new().cruise("1")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing information: instrument, instrument_serial, ship"
    );
}

/// Purpose: pointing the registry at a file instead of a directory fails fast
#[test]
fn test_root_must_be_a_directory() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("data");
    fs::write(&file, "not a directory").unwrap();

    let result = SeriesRegistry::open(&file, SeriesOptions::default());
    assert!(matches!(result, Err(Error::NotADirectory { .. })));
}
