#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Create an empty file, making parent directories as needed.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, b"").expect("write file");
}

/// Lay out `subjects` under `root`, each with the given file names.
pub fn create_subject_tree(root: &Path, subjects: &[(&str, &[&str])]) {
    fs::create_dir_all(root).expect("create root");
    for (subject, files) in subjects {
        let dir = root.join(subject);
        fs::create_dir_all(&dir).expect("create subject dir");
        for file in *files {
            touch(&dir.join(file));
        }
    }
}

/// Expected manifest line for `root/subject/file` with `label`.
pub fn expected_line(root: &Path, subject: &str, file: &str, label: u32) -> String {
    let path: PathBuf = root.join(subject).join(file);
    format!("{};{}", path.display(), label)
}

pub fn newline() -> &'static str {
    if cfg!(windows) {
        "\r\n"
    } else {
        "\n"
    }
}
