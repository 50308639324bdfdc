//! Output document layout.
//!
//! The document is the header line and tree rows, two blank lines, then one
//! block per readable file: its display path, its content (newline terminated)
//! and three further line breaks.

use crate::engine::read_file_content;
use crate::error::SnapshotError;
use crate::options::SnapshotOptions;
use crate::types::{FileEntry, SkippedFile, Snapshot, SnapshotReport};
use std::io::Write;
use tracing::{debug, warn};

pub const TREE_SPACER: &str = "\n\n";
pub const FILE_SEPARATOR: &str = "\n\n\n";

const BINARY_PLACEHOLDER: &str = "[Binary file, content omitted]";
const UNREADABLE_PLACEHOLDER: &str = "[Unreadable file, content omitted]";

/// Writes the whole document for `snapshot` into `out`.
///
/// Files are read one at a time, right before their block is written. A file
/// that cannot be read is reported through `tracing` and left out of the
/// document, or replaced by a marker line when `skipped_placeholder` is set.
pub fn write_document<W: Write>(
    snapshot: &Snapshot,
    options: &SnapshotOptions,
    out: &mut W,
) -> Result<SnapshotReport, SnapshotError> {
    out.write_all(snapshot.render_tree().as_bytes())
        .and_then(|_| out.write_all(TREE_SPACER.as_bytes()))
        .map_err(SnapshotError::Write)?;

    let mut report = SnapshotReport {
        root_name: snapshot.root_name.clone(),
        tree_lines: snapshot.tree.len(),
        ..Default::default()
    };
    for file in &snapshot.files {
        match read_file_content(&file.path, options.binary_detection) {
            Ok(content) => {
                write_file_block(out, &file.display_path, &content)
                    .map_err(SnapshotError::Write)?;
                debug!("Wrote {}", file.display_path);
                report.written.push(file.display_path.clone());
            }
            Err(e) => {
                warn!("Skipping {}: {}", file.display_path, e);
                if options.skipped_placeholder {
                    write_file_block(out, &file.display_path, placeholder(&e))
                        .map_err(SnapshotError::Write)?;
                }
                report.skipped.push(skipped(file, &e));
            }
        }
    }
    Ok(report)
}

/// Writes one `path / content / separator` block.
pub fn write_file_block<W: Write>(
    out: &mut W,
    display_path: &str,
    content: &str,
) -> std::io::Result<()> {
    writeln!(out, "{}", display_path)?;
    out.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.write_all(FILE_SEPARATOR.as_bytes())
}

fn placeholder(error: &SnapshotError) -> &'static str {
    match error {
        SnapshotError::Binary { .. } => BINARY_PLACEHOLDER,
        _ => UNREADABLE_PLACEHOLDER,
    }
}

fn skipped(file: &FileEntry, error: &SnapshotError) -> SkippedFile {
    SkippedFile {
        display_path: file.display_path.clone(),
        reason: error.to_string(),
    }
}
