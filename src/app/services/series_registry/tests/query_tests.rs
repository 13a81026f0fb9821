//! Tests for series queries: matching, latest and next series numbers

use super::*;
use crate::Error;
use crate::app::models::SeriesCriteria;
use crate::app::services::series_registry::{SeriesOptions, SeriesRegistry};
use tempfile::TempDir;

fn open_test_registry(temp_dir: &TempDir) -> SeriesRegistry {
    let root = create_test_data_tree(temp_dir).unwrap();
    let options = SeriesOptions::default()
        .with_stem_keys()
        .with_required_suffix("hex");
    SeriesRegistry::open(root, options).unwrap()
}

#[test]
fn test_latest_serno_for_instrument_and_ship() {
    let temp_dir = TempDir::new().unwrap();
    let registry = open_test_registry(&temp_dir);

    let criteria = SeriesCriteria::new().instrument("SBE09").ship("77SE");
    assert_eq!(registry.latest_serno(&criteria).as_deref(), Some("0278"));
}

#[test]
fn test_latest_serno_ignores_serno_criterion() {
    let temp_dir = TempDir::new().unwrap();
    let registry = open_test_registry(&temp_dir);

    let criteria = SeriesCriteria::new()
        .instrument("SBE09")
        .ship("77SE")
        .serno("0001");
    assert_eq!(registry.latest_serno(&criteria).as_deref(), Some("0278"));
}

#[test]
fn test_latest_serno_by_year() {
    let temp_dir = TempDir::new().unwrap();
    let registry = open_test_registry(&temp_dir);

    let criteria = SeriesCriteria::new().instrument("SBE09").year("2015");
    assert_eq!(registry.latest_serno(&criteria).as_deref(), Some("0122"));

    let criteria = SeriesCriteria::new().instrument("SBE09").year("2021");
    assert_eq!(registry.latest_serno(&criteria).as_deref(), Some("0278"));

    let criteria = SeriesCriteria::new().instrument("SBE09").year("2030");
    assert_eq!(registry.latest_serno(&criteria), None);
}

#[test]
fn test_next_serno() {
    let temp_dir = TempDir::new().unwrap();
    let registry = open_test_registry(&temp_dir);

    let criteria = SeriesCriteria::new().instrument("SBE09").ship("77SE").cruise("01");
    assert_eq!(registry.next_serno(&criteria).unwrap(), "0279");

    let criteria = SeriesCriteria::new().instrument("SBE19").ship("77SE").cruise("02");
    assert_eq!(registry.next_serno(&criteria).unwrap(), "0013");
}

#[test]
fn test_next_serno_without_matches_is_first() {
    let temp_dir = TempDir::new().unwrap();
    let registry = open_test_registry(&temp_dir);

    let criteria = SeriesCriteria::new().instrument("SBE911");
    assert_eq!(registry.latest_serno(&criteria), None);
    assert_eq!(registry.next_serno(&criteria).unwrap(), "0001");
}

#[test]
fn test_next_serno_on_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let registry = SeriesRegistry::open(temp_dir.path(), SeriesOptions::default()).unwrap();

    assert_eq!(registry.count(), 0);
    assert_eq!(registry.next_serno(&SeriesCriteria::new()).unwrap(), "0001");
}

#[test]
fn test_next_serno_capacity_error() {
    let temp_dir = TempDir::new().unwrap();
    create_cast_file(temp_dir.path(), "SBE09_1387_20210413_1113_77SE_01_9999.hex").unwrap();
    create_cast_file(temp_dir.path(), "SBE19_6164_20210413_1113_77SE_01_0004.hex").unwrap();
    let registry = SeriesRegistry::open(temp_dir.path(), SeriesOptions::default()).unwrap();

    let criteria = SeriesCriteria::new().instrument("SBE09").ship("77SE");
    assert_eq!(registry.latest_serno(&criteria).as_deref(), Some("9999"));
    assert!(matches!(
        registry.next_serno(&criteria).unwrap_err(),
        Error::SernoCapacity { .. }
    ));

    // Other instruments are unaffected
    let criteria = SeriesCriteria::new().instrument("SBE19");
    assert_eq!(registry.next_serno(&criteria).unwrap(), "0005");
}

#[test]
fn test_cruise_criterion_is_skipped_for_legacy_files() {
    let temp_dir = TempDir::new().unwrap();
    let registry = open_test_registry(&temp_dir);

    // Legacy files carry no cruise, so a cruise criterion never excludes them
    let criteria = SeriesCriteria::new().ship("3401").cruise("05");
    let matching = registry.files_matching(&criteria);
    assert_eq!(matching.len(), 2);
    assert_eq!(registry.latest_serno(&criteria).as_deref(), Some("0122"));

    // Current files do carry a cruise and are filtered on it
    let criteria = SeriesCriteria::new().ship("77SE").cruise("05");
    assert!(registry.files_matching(&criteria).is_empty());
}

#[test]
fn test_files_matching() {
    let temp_dir = TempDir::new().unwrap();
    let registry = open_test_registry(&temp_dir);

    let matching = registry.files_matching(&SeriesCriteria::new().instrument("SBE09"));
    assert_eq!(matching.len(), 4);

    let keys: Vec<&String> = matching.keys().collect();
    assert_eq!(
        keys,
        vec![
            "SBE09_0745_20150218_1040_34_01_0121",
            "SBE09_0745_20150218_1245_34_01_0122",
            "SBE09_1387_20210413_1113_77SE_01_0277",
            "SBE09_1387_20210413_1402_77SE_01_0278",
        ]
    );

    assert_eq!(registry.files_matching(&SeriesCriteria::new()).len(), 5);
}

#[test]
fn test_series_exists() {
    let temp_dir = TempDir::new().unwrap();
    let registry = open_test_registry(&temp_dir);

    let criteria = SeriesCriteria::new().instrument("SBE09").ship("77SE").serno("0278");
    assert!(registry.series_exists(&criteria));

    let criteria = SeriesCriteria::new().instrument("SBE09").ship("77SE").serno("0500");
    assert!(!registry.series_exists(&criteria));
    assert_eq!(registry.series_exists_file_name(&criteria), None);
}

#[test]
fn test_series_exists_file_name_returns_a_match() {
    let temp_dir = TempDir::new().unwrap();
    let registry = open_test_registry(&temp_dir);

    let criteria = SeriesCriteria::new().instrument("SBE09").serno("0277");
    assert_eq!(
        registry.series_exists_file_name(&criteria).as_deref(),
        Some("SBE09_1387_20210413_1113_77SE_01_0277")
    );

    let criteria = SeriesCriteria::new().instrument("SBE19");
    let name = registry.series_exists_file_name(&criteria).unwrap();
    assert!(registry.files_matching(&criteria).contains_key(&name));
}
