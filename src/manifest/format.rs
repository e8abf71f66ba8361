//! The `path;label` record codec.
//!
//! Each manifest line holds two fields separated by `;`:
//! - `path`: the entry path exactly as it was discovered, in platform-native
//!   form. It is never quoted or escaped.
//! - `label`: a non-negative base-10 integer.
//!
//! There is no header row, and lines end with the platform newline (`\r\n` on
//! Windows, `\n` elsewhere).
//!
//! # Reading
//!
//! The reader follows what training pipelines consuming this file do: blank
//! lines are ignored, and lines with an empty path or an empty label are
//! skipped and counted. Because paths are written unescaped, the label is
//! taken from the text after the *last* `;`, so a path that itself contains
//! `;` still reads back intact. Only `\n` ends a line; a `\r` directly before
//! it is dropped, while a `\r` inside a path is kept. Labels must be plain
//! ASCII digits: no sign, no surrounding whitespace.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::LabelIndexError;

/// Field separator between path and label.
pub const SEPARATOR: u8 = b';';

/// A single manifest record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub path: PathBuf,
    pub label: u32,
}

/// The result of reading a manifest back from disk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedManifest {
    /// Records in file order.
    pub entries: Vec<ManifestEntry>,
    /// Lines dropped because their path or label was empty.
    pub skipped_lines: usize,
}

/// Streams manifest records into any writer.
pub struct ManifestWriter<W: Write> {
    inner: csv::Writer<W>,
    path: PathBuf,
}

impl<W: Write> ManifestWriter<W> {
    /// Wrap `writer`. `path` only names the destination in error messages.
    pub fn new(writer: W, path: &Path) -> Self {
        let inner = csv::WriterBuilder::new()
            .delimiter(SEPARATOR)
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(platform_terminator())
            .from_writer(writer);

        Self {
            inner,
            path: path.to_path_buf(),
        }
    }

    /// Append one `path;label` line.
    pub fn write_entry(&mut self, path: &Path, label: u32) -> Result<(), LabelIndexError> {
        let label = label.to_string();
        self.inner
            .write_record([path.as_os_str().as_encoded_bytes(), label.as_bytes()])
            .map_err(|source| LabelIndexError::ManifestWrite {
                path: self.path.clone(),
                source,
            })
    }

    /// Flush buffered records and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W, LabelIndexError> {
        self.inner.flush().map_err(LabelIndexError::Io)?;
        self.inner
            .into_inner()
            .map_err(|e| LabelIndexError::Io(e.into_error()))
    }
}

fn platform_terminator() -> csv::Terminator {
    if cfg!(windows) {
        csv::Terminator::CRLF
    } else {
        csv::Terminator::Any(b'\n')
    }
}

/// Reads a manifest file.
///
/// # Errors
/// Fails if the file cannot be opened or read, or if a line carries a label
/// that is not a non-negative integer.
pub fn read_manifest(path: &Path) -> Result<ParsedManifest, LabelIndexError> {
    let file = File::open(path).map_err(LabelIndexError::Io)?;
    parse_records(BufReader::new(file), path)
}

/// Reads a manifest from a string.
///
/// Useful for testing without file I/O.
pub fn from_manifest_str(input: &str) -> Result<ParsedManifest, LabelIndexError> {
    from_manifest_slice(input.as_bytes())
}

/// Reads a manifest from raw bytes.
///
/// Useful for fuzzing and for paths that are not valid UTF-8.
pub fn from_manifest_slice(bytes: &[u8]) -> Result<ParsedManifest, LabelIndexError> {
    parse_records(bytes, Path::new("<bytes>"))
}

fn parse_records<R: std::io::Read>(
    reader: R,
    path: &Path,
) -> Result<ParsedManifest, LabelIndexError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(SEPARATOR)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(reader);

    let mut parsed = ParsedManifest::default();

    for result in csv_reader.byte_records() {
        let record = result.map_err(|source| LabelIndexError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);

        let mut fields: Vec<&[u8]> = record.iter().collect();
        if let Some(last) = fields.last_mut() {
            let tail: &[u8] = *last;
            if let Some(stripped) = tail.strip_suffix(b"\r") {
                *last = stripped;
            }
        }

        // A blank line shows up as a single empty field.
        if fields.len() == 1 && fields[0].is_empty() {
            continue;
        }
        if fields.len() < 2 {
            parsed.skipped_lines += 1;
            continue;
        }

        let label_field = fields[fields.len() - 1];
        let path_field = fields[..fields.len() - 1].join(&SEPARATOR);

        if path_field.is_empty() || label_field.is_empty() {
            parsed.skipped_lines += 1;
            continue;
        }

        let label = parse_label(label_field).ok_or_else(|| LabelIndexError::ManifestParse {
            path: path.to_path_buf(),
            line,
            message: format!(
                "label '{}' is not a non-negative integer",
                String::from_utf8_lossy(label_field)
            ),
        })?;

        parsed.entries.push(ManifestEntry {
            path: path_from_bytes(path_field),
            label,
        });
    }

    Ok(parsed)
}

fn parse_label(field: &[u8]) -> Option<u32> {
    if !field.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(field).ok()?.parse::<u32>().ok()
}

#[cfg(unix)]
fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    PathBuf::from(OsString::from_vec(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&bytes).into_owned())
}

/// Fuzzing entrypoint for the manifest reader.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_manifest(bytes: &[u8]) -> Result<(), LabelIndexError> {
    from_manifest_slice(bytes).map(|_| ())
}
