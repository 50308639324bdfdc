use crate::error::SnapshotError;
use crate::options::{BinaryDetection, Exclusions, SnapshotOptions, TraversalErrorPolicy};
use crate::output::write_document;
use crate::tree::{TreeEntry, build_tree_lines};
use crate::types::{FileEntry, Snapshot, SnapshotReport};
use ignore::{DirEntry, WalkBuilder};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SNIFF_LEN: usize = 4096;

struct Walker {
    inner: ignore::Walk,
    policy: TraversalErrorPolicy,
}
impl Walker {
    fn new(options: &SnapshotOptions, output: Option<PathBuf>) -> Self {
        let mut builder = WalkBuilder::new(&options.root);
        builder
            .standard_filters(false)
            .require_git(false)
            .follow_links(options.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b));
        let exclusions = options.exclusions.clone();
        builder.filter_entry(move |entry| keep_entry(entry, &exclusions, output.as_deref()));
        Self {
            inner: builder.build(),
            policy: options.on_traversal_error,
        }
    }
    /// Yields every kept entry below the root, applying the traversal error policy.
    fn entries(self) -> impl Iterator<Item = Result<DirEntry, SnapshotError>> {
        let policy = self.policy;
        self.inner.filter_map(move |result| match result {
            Ok(entry) if entry.depth() == 0 => None,
            Ok(entry) => Some(Ok(entry)),
            Err(e) => match policy {
                TraversalErrorPolicy::Abort => Some(Err(SnapshotError::Walk(e.to_string()))),
                TraversalErrorPolicy::Skip => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            },
        })
    }
}

fn keep_entry(entry: &DirEntry, exclusions: &Exclusions, output: Option<&Path>) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let name = entry.file_name();
    if is_dir(entry) {
        if exclusions.is_excluded_dir(name) {
            debug!("Pruning excluded directory {}", entry.path().display());
            return false;
        }
        return true;
    }
    if exclusions.is_excluded_file(name) {
        return false;
    }
    if let Some(output) = output {
        if output.file_name() == Some(name)
            && fs::canonicalize(entry.path()).is_ok_and(|p| p == output)
        {
            debug!("Leaving the output document out of the snapshot");
            return false;
        }
    }
    true
}

// Symlinks to directories are shown as directories but only descended into
// when links are followed.
fn is_dir(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_dir() => true,
        Some(ft) if ft.is_symlink() => entry.path().is_dir(),
        _ => false,
    }
}

/// Last component of `root`, resolving `.`-style paths through the filesystem.
fn root_name(root: &Path) -> Result<String, SnapshotError> {
    if let Some(name) = root.file_name() {
        return Ok(name.to_string_lossy().into_owned());
    }
    let canonical = fs::canonicalize(root).map_err(|e| SnapshotError::io(root, e))?;
    Ok(canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| canonical.display().to_string()))
}

fn display_path(root_name: &str, root: &Path, path: &Path) -> Result<String, SnapshotError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| SnapshotError::InvalidPath(path.display().to_string()))?;
    let mut out = String::from(root_name);
    for component in relative.components() {
        out.push('/');
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    Ok(out)
}

/// Walks the root once and returns the tree rows and the files to concatenate.
///
/// Siblings are visited in byte-wise name order. Excluded directories are pruned,
/// excluded files are dropped from both the tree and the file list.
///
/// # Errors
///
/// Fails if the root is missing or not a directory, or, under
/// [`TraversalErrorPolicy::Abort`], on the first directory that cannot be listed.
pub fn scan(options: &SnapshotOptions) -> Result<Snapshot, SnapshotError> {
    let root_name = check_root(&options.root)?;
    scan_checked(options, root_name)
}

/// Ensures the root is an existing directory and returns its display name.
fn check_root(root: &Path) -> Result<String, SnapshotError> {
    let metadata = fs::metadata(root).map_err(|e| SnapshotError::io(root, e))?;
    if !metadata.is_dir() {
        return Err(SnapshotError::InvalidPath(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    root_name(root)
}

fn scan_checked(options: &SnapshotOptions, root_name: String) -> Result<Snapshot, SnapshotError> {
    let root = &options.root;
    debug!("Scanning {} as {}", root.display(), root_name);

    let output = fs::canonicalize(&options.output).ok();
    let mut tree_entries = Vec::new();
    let mut files = Vec::new();
    for entry in Walker::new(options, output).entries() {
        let entry = entry?;
        let dir = is_dir(&entry);
        tree_entries.push(TreeEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            depth: entry.depth(),
            is_dir: dir,
        });
        if !dir {
            let display_path = display_path(&root_name, root, entry.path())?;
            files.push(FileEntry {
                path: entry.into_path(),
                display_path,
            });
        }
    }

    Ok(Snapshot {
        root_name,
        tree: build_tree_lines(&tree_entries),
        files,
    })
}

/// Reads a whole file as text, rejecting binary content per `binary_detection`.
pub(crate) fn read_file_content(
    path: &Path,
    binary_detection: BinaryDetection,
) -> Result<String, SnapshotError> {
    let bytes = fs::read(path).map_err(|e| SnapshotError::io(path, e))?;
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let is_binary = match binary_detection {
        BinaryDetection::Simple => head.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(head).is_binary(),
        BinaryDetection::None => false,
    };
    if is_binary {
        return Err(SnapshotError::Binary {
            path: path.to_path_buf(),
        });
    }
    String::from_utf8(bytes).map_err(|_| SnapshotError::Decode {
        path: path.to_path_buf(),
    })
}

/// Writes the snapshot document to `options.output`.
///
/// The root is checked before the destination is touched, so a bad root leaves
/// an existing document in place. The destination is then created before the
/// walk starts so that an unwritable destination fails the run immediately.
/// If anything fails afterwards the partially written document is removed.
pub fn snapshot(options: SnapshotOptions) -> Result<SnapshotReport, SnapshotError> {
    debug!("Starting snapshot with root: {}", options.root.display());
    let root_name = check_root(&options.root)?;
    let file =
        File::create(&options.output).map_err(|e| SnapshotError::output(&options.output, e))?;
    let mut writer = BufWriter::new(file);

    let result = scan_checked(&options, root_name).and_then(|snapshot| {
        let report = write_document(&snapshot, &options, &mut writer)?;
        writer.flush().map_err(SnapshotError::Write)?;
        Ok(report)
    });
    drop(writer);

    match result {
        Ok(report) => {
            info!(
                "Wrote {} ({} files, {} skipped)",
                options.output.display(),
                report.written.len(),
                report.skipped.len()
            );
            Ok(report)
        }
        Err(e) => {
            if let Err(remove_err) = fs::remove_file(&options.output) {
                warn!(
                    "Could not remove partial output {}: {}",
                    options.output.display(),
                    remove_err
                );
            }
            Err(e)
        }
    }
}
