//! Manifest building from a per-subject directory tree.
//!
//! The expected layout is one directory per subject (identity/class) directly
//! under a root:
//!
//! ```text
//! friend_faces/
//!   alice/1.jpg
//!   bob/1.jpg
//!   bob/2.jpg
//! ```
//!
//! Subject directories are visited in name order and receive labels
//! `0, 1, 2, ...`. Every entry inside a subject directory becomes one
//! manifest line `<root>/<subject>/<entry>;<label>`.
//!
//! # Ordering
//!
//! Names are compared byte-wise on their raw platform representation
//! (`OsStr` ordering). This is case-sensitive: `B` sorts before `a`.
//!
//! # Known limitation
//!
//! Entries inside a subject directory are not filtered by type. A nested
//! directory is written as a row like any image file and is not descended
//! into.

pub mod format;
mod report;

pub use format::{ManifestEntry, ManifestWriter, ParsedManifest};
pub use report::{BuildSummary, SubjectSummary};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::LabelIndexError;

/// Default directory scanned for subject folders.
pub const DEFAULT_ROOT: &str = "./friend_faces";
/// Default manifest destination.
pub const DEFAULT_OUTPUT: &str = "./friend_faces.csv";

/// Options for building a manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Directory containing one subdirectory per subject.
    pub root: PathBuf,
    /// Manifest file to create or truncate.
    pub output: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Verify that `root` exists and is a directory.
///
/// The error carries the current working directory, since a relative root is
/// the usual reason for a miss.
pub fn check_root(root: &Path) -> Result<(), LabelIndexError> {
    if root.is_dir() {
        return Ok(());
    }

    Err(LabelIndexError::MissingRootDirectory {
        root: root.to_path_buf(),
        cwd: std::env::current_dir().unwrap_or_default(),
    })
}

/// Build a manifest file from the subject tree at `options.root`.
///
/// The root is checked before the output file is touched. Once writing has
/// started, a failure leaves whatever was already written on disk.
///
/// # Example
/// ```no_run
/// use labelindex::manifest::{build_manifest, BuildOptions};
///
/// let summary = build_manifest(&BuildOptions::default())?;
/// println!("{}", summary);
/// # Ok::<(), labelindex::LabelIndexError>(())
/// ```
pub fn build_manifest(options: &BuildOptions) -> Result<BuildSummary, LabelIndexError> {
    check_root(&options.root)?;

    let file = File::create(&options.output).map_err(LabelIndexError::Io)?;
    let mut writer = ManifestWriter::new(BufWriter::new(file), &options.output);
    let written = write_subjects(&options.root, &mut writer);
    // Rows written before a failure are flushed and stay on disk.
    let flushed = writer.finish();
    let subjects = written?;
    flushed?;

    let summary = BuildSummary {
        output: options.output.clone(),
        subjects,
    };
    info!(
        output = %summary.output.display(),
        subjects = summary.subjects.len(),
        entries = summary.entries(),
        "manifest written"
    );

    Ok(summary)
}

/// Write manifest lines for the subject tree at `root` into `writer`.
///
/// Returns one summary per subject directory, in label order.
pub fn write_manifest<W: Write>(
    root: &Path,
    writer: W,
) -> Result<Vec<SubjectSummary>, LabelIndexError> {
    check_root(root)?;

    let mut writer = ManifestWriter::new(writer, Path::new("<writer>"));
    let subjects = write_subjects(root, &mut writer)?;
    writer.finish()?;

    Ok(subjects)
}

/// Render the manifest for `root` as a string.
///
/// Useful for testing without file I/O.
pub fn to_manifest_string(root: &Path) -> Result<String, LabelIndexError> {
    let mut bytes = Vec::new();
    write_manifest(root, &mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_subjects<W: Write>(
    root: &Path,
    writer: &mut ManifestWriter<W>,
) -> Result<Vec<SubjectSummary>, LabelIndexError> {
    let mut subjects = Vec::new();
    let mut label: u32 = 0;

    for entry in sorted_children(root)? {
        // Follows symlinks, so a link to a directory is a subject too.
        if !entry.path().is_dir() {
            debug!(path = %entry.path().display(), "skipping non-directory at root");
            continue;
        }

        let mut count = 0;
        for image in sorted_children(entry.path())? {
            writer.write_entry(image.path(), label)?;
            count += 1;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        debug!(subject = %name, label, entries = count, "subject indexed");
        subjects.push(SubjectSummary {
            label,
            name,
            entries: count,
        });
        label += 1;
    }

    Ok(subjects)
}

/// Immediate children of `dir`, sorted by file name.
fn sorted_children(dir: &Path) -> Result<Vec<DirEntry>, LabelIndexError> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map_err(|source| LabelIndexError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| dir.to_path_buf()),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, b"").expect("write file");
    }

    fn lines(root: &Path) -> Vec<String> {
        to_manifest_string(root)
            .expect("render manifest")
            .lines()
            .map(str::to_owned)
            .collect()
    }

    fn row(root: &Path, rel: &[&str], label: u32) -> String {
        let mut path = root.to_path_buf();
        for part in rel {
            path = path.join(part);
        }
        format!("{};{}", path.display(), label)
    }

    #[test]
    fn labels_follow_sorted_subject_order() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        touch(&root.join("bob/2.jpg"));
        touch(&root.join("bob/1.jpg"));
        touch(&root.join("alice/1.jpg"));

        assert_eq!(
            lines(root),
            vec![
                row(root, &["alice", "1.jpg"], 0),
                row(root, &["bob", "1.jpg"], 1),
                row(root, &["bob", "2.jpg"], 1),
            ]
        );
    }

    #[test]
    fn stray_root_files_do_not_consume_labels() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        touch(&root.join("README.txt"));
        touch(&root.join("alice/1.jpg"));
        touch(&root.join("b.txt"));
        touch(&root.join("carol/1.jpg"));

        assert_eq!(
            lines(root),
            vec![
                row(root, &["alice", "1.jpg"], 0),
                row(root, &["carol", "1.jpg"], 1),
            ]
        );
    }

    #[test]
    fn empty_subject_still_consumes_a_label() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        touch(&root.join("alice/1.jpg"));
        fs::create_dir_all(root.join("bob")).expect("create empty subject");
        touch(&root.join("carol/1.jpg"));

        let mut bytes = Vec::new();
        let subjects = write_manifest(root, &mut bytes).expect("write manifest");
        assert_eq!(subjects.len(), 3);
        assert_eq!(subjects[1].name, "bob");
        assert_eq!(subjects[1].entries, 0);
        assert_eq!(
            lines(root),
            vec![
                row(root, &["alice", "1.jpg"], 0),
                row(root, &["carol", "1.jpg"], 2),
            ]
        );
    }

    #[test]
    fn nested_directories_are_listed_but_not_descended() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        touch(&root.join("alice/1.jpg"));
        touch(&root.join("alice/extra/deep.jpg"));

        assert_eq!(
            lines(root),
            vec![
                row(root, &["alice", "1.jpg"], 0),
                row(root, &["alice", "extra"], 0),
            ]
        );
    }

    #[test]
    fn ordering_is_case_sensitive_bytewise() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        touch(&root.join("a/x.jpg"));
        touch(&root.join("B/x.jpg"));

        assert_eq!(
            lines(root),
            vec![row(root, &["B", "x.jpg"], 0), row(root, &["a", "x.jpg"], 1)]
        );
    }

    #[test]
    fn empty_root_produces_empty_manifest() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert_eq!(to_manifest_string(temp.path()).expect("render"), "");
    }

    #[test]
    fn missing_root_is_reported_with_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("nope");

        let err = to_manifest_string(&missing).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::MissingRootDirectory);
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn root_that_is_a_file_is_missing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("file.txt");
        touch(&file);

        let err = check_root(&file).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::MissingRootDirectory);
    }

    #[test]
    fn build_manifest_leaves_no_output_for_missing_root() {
        let temp = tempfile::tempdir().expect("tempdir");
        let options = BuildOptions {
            root: temp.path().join("missing"),
            output: temp.path().join("out.csv"),
        };

        assert!(build_manifest(&options).is_err());
        assert!(!options.output.exists());
    }

    #[test]
    fn build_manifest_writes_file_and_summary() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("faces");
        touch(&root.join("alice/1.jpg"));
        touch(&root.join("bob/1.jpg"));
        touch(&root.join("bob/2.jpg"));
        let options = BuildOptions {
            root: root.clone(),
            output: temp.path().join("faces.csv"),
        };

        let summary = build_manifest(&options).expect("build");
        assert_eq!(summary.entries(), 3);
        assert_eq!(summary.subjects.len(), 2);

        let written = fs::read_to_string(&options.output).expect("read output");
        assert_eq!(written, to_manifest_string(&root).expect("render"));
    }

    #[test]
    fn build_manifest_truncates_existing_output() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("faces");
        fs::create_dir_all(&root).expect("create root");
        let output = temp.path().join("faces.csv");
        fs::write(&output, "stale;9\n").expect("seed output");

        build_manifest(&BuildOptions {
            root,
            output: output.clone(),
        })
        .expect("build");

        assert_eq!(fs::read_to_string(&output).expect("read output"), "");
    }
}
