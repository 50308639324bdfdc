use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file selected for concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// The path used to read the file.
    pub path: PathBuf,
    /// `<root name>/<relative path>` with forward slashes on every platform.
    pub display_path: String,
}

/// The result of walking the root once: the rendered tree and the files to dump,
/// both in the same sorted depth-first order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Last component of the root directory.
    pub root_name: String,
    /// One formatted row per visible entry, without the header.
    pub tree: Vec<String>,
    pub files: Vec<FileEntry>,
}

impl Snapshot {
    /// The `<root name>:.` line written above the tree.
    pub fn header(&self) -> String {
        format!("{}:.", self.root_name)
    }

    /// Header plus tree lines, newline terminated.
    pub fn render_tree(&self) -> String {
        let mut out = self.header();
        out.push('\n');
        for line in &self.tree {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// A file left out of the document, with the reason it could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub display_path: String,
    pub reason: String,
}

/// Summary of one written document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotReport {
    pub root_name: String,
    pub tree_lines: usize,
    /// Display paths whose content made it into the document.
    pub written: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}
