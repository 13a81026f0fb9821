//! Shared test utilities and fixtures for series registry tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub mod query_tests;

/// Create an empty file (and its parent directories) under `dir`
pub fn create_cast_file(dir: &Path, relative: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, "* Sea-Bird SBE 9 Raw Data File:\n")?;
    Ok(path)
}

/// Create a data directory with a mix of current, legacy and unrelated files
///
/// Layout:
/// - `raw/`: two current-format SBE09 casts on 77SE cruise 01 (0277, 0278)
/// - `raw/`: one current-format SBE19 cast on 77SE cruise 02 (0012)
/// - `raw/`: XMLCON companion for 0278 (same stem, different suffix)
/// - `2015/`: two legacy-format SBE09 casts on ship 34/01 (0121, 0122)
/// - `notes/readme.txt` and a near-miss stem that must never be indexed
pub fn create_test_data_tree(temp_dir: &TempDir) -> std::io::Result<PathBuf> {
    let root = temp_dir.path().join("data");
    fs::create_dir_all(&root)?;

    for name in [
        "raw/SBE09_1387_20210413_1113_77SE_01_0277.hex",
        "raw/SBE09_1387_20210413_1402_77SE_01_0278.hex",
        "raw/SBE09_1387_20210413_1402_77SE_01_0278.XMLCON",
        "raw/SBE19_6164_20210520_0800_77SE_02_0012.hex",
        "2015/SBE09_0745_20150218_1040_34_01_0121.hex",
        "2015/SBE09_0745_20150218_1245_34_01_0122.hex",
        "notes/readme.txt",
        "raw/SBE09_1387_20210413_1113_77SE_01_0279_copy.hex",
    ] {
        create_cast_file(&root, name)?;
    }

    Ok(root)
}
