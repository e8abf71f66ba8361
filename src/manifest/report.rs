//! Build summary types.

use std::fmt;
use std::path::PathBuf;

/// Outcome of a successful manifest build.
#[derive(Clone, Debug)]
pub struct BuildSummary {
    /// Where the manifest was written.
    pub output: PathBuf,
    /// One entry per subject directory, in label order.
    pub subjects: Vec<SubjectSummary>,
}

/// A labelled subject directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectSummary {
    pub label: u32,
    /// Directory name, lossily converted for display.
    pub name: String,
    /// Number of manifest lines written for this subject.
    pub entries: usize,
}

impl BuildSummary {
    /// Total number of manifest lines written.
    pub fn entries(&self) -> usize {
        self.subjects.iter().map(|s| s.entries).sum()
    }
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CSV file created: {}", self.output.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_output_path() {
        let summary = BuildSummary {
            output: PathBuf::from("./friend_faces.csv"),
            subjects: vec![],
        };
        assert_eq!(summary.to_string(), "CSV file created: ./friend_faces.csv");
    }

    #[test]
    fn entries_sums_subjects() {
        let summary = BuildSummary {
            output: PathBuf::from("out.csv"),
            subjects: vec![
                SubjectSummary {
                    label: 0,
                    name: "alice".into(),
                    entries: 2,
                },
                SubjectSummary {
                    label: 1,
                    name: "bob".into(),
                    entries: 0,
                },
            ],
        };
        assert_eq!(summary.entries(), 2);
    }
}
