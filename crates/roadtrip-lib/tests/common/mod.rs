//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use roadtrip_lib::{DatasetPaths, RoadAtlas};

/// Path to the fixtures directory shared by the workspace tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/minimal")
}

#[allow(dead_code)]
pub fn fixture_paths() -> DatasetPaths {
    DatasetPaths::in_dir(&fixtures_dir())
}

/// Load the minimal fixture dataset with the curated corrections applied.
#[allow(dead_code)]
pub fn fixture_atlas() -> RoadAtlas {
    RoadAtlas::load(&fixture_paths()).expect("fixture dataset loads")
}
