#![allow(dead_code)]

use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(32);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 256;
    config
}

/// Lowercase names only, so case-insensitive filesystems cannot merge two
/// generated subjects into one directory.
pub fn arb_name() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,8}"
}

/// Subject name -> file names. Maps keep names unique.
pub fn arb_subject_tree(
    max_subjects: usize,
    max_files: usize,
) -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    prop::collection::btree_map(
        arb_name(),
        prop::collection::btree_set(arb_name(), 0..=max_files)
            .prop_map(|files| files.into_iter().map(|f| format!("{f}.jpg")).collect()),
        0..=max_subjects,
    )
}
