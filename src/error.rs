use std::path::PathBuf;
use thiserror::Error;

/// The two failure classes a run can end in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The root directory was absent (or not a directory) when the run started.
    MissingRootDirectory,
    /// Anything that went wrong while listing directories or writing/reading files.
    UnexpectedFailure,
}

/// The main error type for labelindex operations.
#[derive(Debug, Error)]
pub enum LabelIndexError {
    #[error("Directory '{}' does not exist", root.display())]
    MissingRootDirectory { root: PathBuf, cwd: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to write manifest {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid manifest {path} at line {line}: {message}")]
    ManifestParse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("Labels are not contiguous: {missing_count} label(s) missing below {max_label}")]
    NonContiguousLabels { missing_count: u64, max_label: u32 },

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

impl LabelIndexError {
    /// Classify this error as one of the two run-level failure kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LabelIndexError::MissingRootDirectory { .. } => ErrorKind::MissingRootDirectory,
            _ => ErrorKind::UnexpectedFailure,
        }
    }
}
