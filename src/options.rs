use crate::error::SnapshotError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "output.txt";
pub const DEFAULT_EXCLUDED_DIR: &str = "node_modules";
pub const DEFAULT_EXCLUDED_FILES: [&str; 2] = [".gitignore", "package-lock.json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinaryDetection {
    Simple,
    Accurate,
    None,
}

/// What to do when a directory cannot be listed during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalErrorPolicy {
    Abort,
    Skip,
}

/// Names hidden from the tree and from the concatenated content.
///
/// Directory names prune whole subtrees; file names only match
/// non-directory entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exclusions {
    pub directories: BTreeSet<String>,
    pub files: BTreeSet<String>,
}
impl Default for Exclusions {
    fn default() -> Self {
        Self {
            directories: BTreeSet::from([DEFAULT_EXCLUDED_DIR.to_string()]),
            files: DEFAULT_EXCLUDED_FILES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}
impl Exclusions {
    pub fn none() -> Self {
        Self {
            directories: BTreeSet::new(),
            files: BTreeSet::new(),
        }
    }
    pub fn is_excluded_dir(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|name| self.directories.contains(name))
    }
    pub fn is_excluded_file(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|name| self.files.contains(name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotOptions {
    pub root: PathBuf,
    pub output: PathBuf,
    pub exclusions: Exclusions,
    pub follow_links: bool,
    pub binary_detection: BinaryDetection,
    pub on_traversal_error: TraversalErrorPolicy,
    pub skipped_placeholder: bool,
}
impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            exclusions: Exclusions::default(),
            follow_links: false,
            binary_detection: BinaryDetection::None,
            on_traversal_error: TraversalErrorPolicy::Abort,
            skipped_placeholder: false,
        }
    }
}
impl SnapshotOptions {
    /// Loads options from a JSON file. Fields absent from the file keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| SnapshotError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|source| SnapshotError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    options: SnapshotOptions,
}
impl SnapshotBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: SnapshotOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn from_options(options: SnapshotOptions) -> Self {
        Self { options }
    }
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.root = root.into();
        self
    }
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output = path.into();
        self
    }
    pub fn exclusions(mut self, exclusions: Exclusions) -> Self {
        self.options.exclusions = exclusions;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn on_traversal_error(mut self, policy: TraversalErrorPolicy) -> Self {
        self.options.on_traversal_error = policy;
        self
    }
    pub fn skipped_placeholder(mut self, yes: bool) -> Self {
        self.options.skipped_placeholder = yes;
        self
    }
    pub fn build(self) -> SnapshotOptions {
        self.options
    }
}
