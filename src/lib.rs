//! # Treecat
//!
//! `treecat` takes a flat text snapshot of a directory: an ASCII tree of its
//! structure followed by the contents of every file, each prefixed with its
//! path relative to the root's parent.
//!
//! The directory is walked once ([`scan`]); the tree and the file list come
//! from that single pass and share the same sorted order. [`write_document`]
//! renders a [`Snapshot`] into any writer, and [`snapshot`] does both and
//! writes the result to [`SnapshotOptions::output`].
//!
//! Files that cannot be read as UTF-8 text are skipped with a `tracing`
//! warning and listed in the returned [`SnapshotReport`].
//!
//! # Example
//!
//! ```no_run
//! use treecat::{SnapshotBuilder, TraversalErrorPolicy, snapshot};
//!
//! let options = SnapshotBuilder::new("my-project")
//!     .output("my-project.txt")
//!     .on_traversal_error(TraversalErrorPolicy::Skip)
//!     .build();
//!
//! let report = snapshot(options).expect("Failed to snapshot directory");
//! for skipped in &report.skipped {
//!     eprintln!("left out {}: {}", skipped.display_path, skipped.reason);
//! }
//! ```

mod engine;
mod error;
mod options;
pub mod output;
mod tree;
mod types;

pub use engine::{scan, snapshot};
pub use error::SnapshotError;
pub use options::{
    BinaryDetection, DEFAULT_EXCLUDED_DIR, DEFAULT_EXCLUDED_FILES, DEFAULT_OUTPUT, Exclusions,
    SnapshotBuilder, SnapshotOptions, TraversalErrorPolicy,
};
pub use output::write_document;
pub use types::{FileEntry, SkippedFile, Snapshot, SnapshotReport};
