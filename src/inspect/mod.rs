//! Manifest inspection.
//!
//! Reads back a manifest and summarizes what a training run would see: how
//! many records there are, how they spread over labels, and whether the
//! labels form the gap-free `0..N` range a fresh build produces.

mod report;

pub use report::{InspectReport, LabelCount};

use std::collections::BTreeMap;

use crate::manifest::ParsedManifest;

/// Options for manifest inspection.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
    /// How many missing labels to list individually.
    pub missing_sample: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            bar_width: 20,
            missing_sample: 10,
        }
    }
}

/// Inspect a parsed manifest and produce a report.
pub fn inspect_manifest(manifest: &ParsedManifest, opts: &InspectOptions) -> InspectReport {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for entry in &manifest.entries {
        *counts.entry(entry.label).or_insert(0) += 1;
    }

    let max_label = counts.keys().next_back().copied();
    // Work is bounded by the number of distinct labels, not by their values.
    let missing_count = match max_label {
        Some(max) => u64::from(max) + 1 - counts.len() as u64,
        None => 0,
    };
    let missing_labels = missing_sample(counts.keys().copied(), opts.missing_sample);

    let labels = counts
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect::<Vec<_>>();

    InspectReport {
        records: manifest.entries.len(),
        skipped_lines: manifest.skipped_lines,
        distinct_labels: labels.len(),
        max_label,
        contiguous: missing_count == 0,
        missing_count,
        missing_labels,
        labels,
        bar_width: opts.bar_width,
    }
}

/// The first `limit` labels absent from the ascending sequence `labels`,
/// found by walking the gaps between consecutive present labels.
fn missing_sample(labels: impl Iterator<Item = u32>, limit: usize) -> Vec<u32> {
    let mut sample = Vec::new();
    let mut next: u64 = 0;

    for label in labels {
        if sample.len() >= limit {
            break;
        }
        let label = u64::from(label);
        let room = limit - sample.len();
        sample.extend((next..label).take(room).map(|l| l as u32));
        next = label + 1;
    }

    sample
}
