//! Inspect report types and terminal formatting.

use std::fmt;

use serde::Serialize;

/// The result of inspecting a manifest.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Number of records read.
    pub records: usize,
    /// Lines dropped for an empty path or label.
    pub skipped_lines: usize,
    /// Number of distinct labels seen.
    pub distinct_labels: usize,
    /// Highest label seen, if any records exist.
    pub max_label: Option<u32>,
    /// Whether every label in `0..=max_label` has at least one record.
    pub contiguous: bool,
    /// How many labels in `0..=max_label` have no records.
    pub missing_count: u64,
    /// The lowest missing labels, capped at the inspection's sample size.
    pub missing_labels: Vec<u32>,
    /// Per-label record counts, sorted by label.
    pub labels: Vec<LabelCount>,
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

/// A single label with its record count.
#[derive(Clone, Debug, Serialize)]
pub struct LabelCount {
    pub label: u32,
    pub count: usize,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Manifest Inspection")?;
        writeln!(f)?;
        writeln!(f, "  Records:        {:>8}", format_number(self.records))?;
        writeln!(f, "  Labels:         {:>8}", format_number(self.distinct_labels))?;
        if self.skipped_lines > 0 {
            writeln!(f, "  Skipped lines:  {:>8}", format_number(self.skipped_lines))?;
        }
        writeln!(f)?;

        match self.max_label {
            None => writeln!(f, "  (no labelled records)")?,
            Some(max) if self.contiguous => writeln!(f, "  Labels contiguous: 0..={}", max)?,
            Some(max) => writeln!(
                f,
                "  Labels NOT contiguous: {} missing in 0..={} ({})",
                self.missing_count,
                max,
                summarize_labels(&self.missing_labels, self.missing_count)
            )?,
        }

        if self.labels.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        let max_count = self.labels.iter().map(|l| l.count).max().unwrap_or(0);
        let label_width = self
            .labels
            .iter()
            .map(|l| l.label.to_string().len())
            .max()
            .unwrap_or(1);
        for entry in &self.labels {
            writeln!(
                f,
                "  {:>lw$}  {}  {:>8}",
                entry.label,
                render_bar(entry.count, max_count, self.bar_width),
                format_number(entry.count),
                lw = label_width
            )?;
        }

        Ok(())
    }
}

/// Format a number with thousands separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Render a horizontal bar using Unicode block characters.
fn render_bar(count: usize, max_count: usize, width: usize) -> String {
    if max_count == 0 || width == 0 {
        return String::new();
    }

    let filled = ((count * width) / max_count).min(width);
    "█".repeat(filled) + &"░".repeat(width - filled)
}

/// Comma-join the sampled labels, noting how many of `total` were left out.
fn summarize_labels(sample: &[u32], total: u64) -> String {
    let shown: Vec<String> = sample.iter().map(u32::to_string).collect();
    let mut out = shown.join(", ");
    let rest = total.saturating_sub(sample.len() as u64);
    if rest > 0 {
        out.push_str(&format!(", … +{} more", rest));
    }
    out
}
