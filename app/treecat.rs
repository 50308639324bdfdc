//! Command-line interface for treecat.
//!
//! Walks a directory and writes its tree plus every file's content into a
//! single text document.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::EnvFilter;
use treecat::{
    BinaryDetection, SnapshotBuilder, SnapshotError, SnapshotOptions, SnapshotReport,
    TraversalErrorPolicy, scan, snapshot,
};

/// treecat — dump a directory tree and its files into one document
#[derive(Parser)]
#[command(name = "treecat", version, about, long_about = None)]
struct Cli {
    /// Root directory (default current dir, or the config file's root)
    root: Option<PathBuf>,

    /// Output document path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with snapshot options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Binary detection strategy
    #[arg(long, value_parser = parse_binary_detection)]
    binary_detection: Option<BinaryDetection>,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Warn and continue when a directory cannot be listed
    #[arg(long)]
    skip_unreadable_dirs: bool,

    /// Write a marker line for files that could not be read
    #[arg(long)]
    placeholders: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json_report: bool,

    /// Operation mode
    #[arg(long, value_enum, default_value_t = Mode::Normal)]
    mode: Mode,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    Normal,
    TreeOnly,
    PathsOnly,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn into_options(self) -> Result<(SnapshotOptions, Mode, bool), SnapshotError> {
        let base = match &self.config {
            Some(path) => SnapshotOptions::from_json_file(path)?,
            None => SnapshotOptions::default(),
        };
        let mut builder = SnapshotBuilder::from_options(base);
        if let Some(root) = self.root {
            builder = builder.root(root);
        }
        if let Some(output) = self.output {
            builder = builder.output(output);
        }
        if let Some(method) = self.binary_detection {
            builder = builder.binary_detection(method);
        }
        if self.follow_links {
            builder = builder.follow_links(true);
        }
        if self.skip_unreadable_dirs {
            builder = builder.on_traversal_error(TraversalErrorPolicy::Skip);
        }
        if self.placeholders {
            builder = builder.skipped_placeholder(true);
        }
        Ok((builder.build(), self.mode, self.json_report))
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let (options, mode, json_report) = cli.into_options().unwrap_or_else(|e| fail(e));
    match mode {
        Mode::Normal => run_normal(options, json_report),
        Mode::TreeOnly => {
            let snapshot = scan(&options).unwrap_or_else(|e| fail(e));
            print!("{}", snapshot.render_tree());
        }
        Mode::PathsOnly => {
            let snapshot = scan(&options).unwrap_or_else(|e| fail(e));
            for file in &snapshot.files {
                println!("{}", file.display_path);
            }
        }
    }
}

fn run_normal(options: SnapshotOptions, json_report: bool) {
    match snapshot(options) {
        Ok(report) if json_report => print_report(&report),
        Ok(_) => {}
        Err(e) => fail(e),
    }
}

fn print_report(report: &SnapshotReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("JSON serialization error: {}", e);
            exit(1);
        }
    }
}

fn fail(e: SnapshotError) -> ! {
    eprintln!("Error: {}", e);
    exit(1);
}
