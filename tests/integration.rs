use std::fs;
use tempfile::tempdir;
use treecat::{SnapshotBuilder, scan, snapshot};

#[test]
fn integration_full_flow() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("proj");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("main.rs"), "fn main() {}").unwrap();
    fs::write(root.join("src/lib.rs"), "pub fn test() {}\n").unwrap();
    let output = dir.path().join("output.txt");
    let options = SnapshotBuilder::new(&root).output(&output).build();
    let report = snapshot(options).unwrap();
    assert_eq!(report.root_name, "proj");
    assert_eq!(report.tree_lines, 3);
    assert_eq!(report.written, vec!["proj/main.rs", "proj/src/lib.rs"]);
    assert!(report.skipped.is_empty());
    let doc = fs::read_to_string(&output).unwrap();
    assert!(doc.starts_with("proj:.\n├───main.rs\n└───src\n    └───lib.rs\n\n\n"));
}

#[test]
fn integration_round_trip_contents() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("proj");
    let files = [
        ("a.md", "# title\n\nbody\n"),
        ("b/c.txt", "no newline"),
        ("b/d.txt", "ünïcödé\r\nline\n\n"),
    ];
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    let output = dir.path().join("out.txt");
    snapshot(SnapshotBuilder::new(&root).output(&output).build()).unwrap();
    let doc = fs::read_to_string(&output).unwrap();

    for (i, (rel, content)) in files.iter().enumerate() {
        let header = format!("proj/{}\n", rel);
        let start = doc.find(&header).unwrap() + header.len();
        let end = match files.get(i + 1) {
            Some((next, _)) => doc.find(&format!("proj/{}\n", next)).unwrap(),
            None => doc.len(),
        };
        let block = &doc[start..end];
        let body = block.strip_suffix("\n\n\n").unwrap();
        let expected = if content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };
        assert_eq!(body, expected);
    }
}

#[test]
fn integration_deterministic() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("proj");
    for rel in ["z/1.txt", "a/2.txt", "m.txt", "a/b/3.txt"] {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    snapshot(SnapshotBuilder::new(&root).output(&first).build()).unwrap();
    snapshot(SnapshotBuilder::new(&root).output(&second).build()).unwrap();
    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn integration_output_inside_root_is_left_out() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("proj");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "a\n").unwrap();
    let output = root.join("output.txt");
    let report = snapshot(SnapshotBuilder::new(&root).output(&output).build()).unwrap();
    assert_eq!(report.written, vec!["proj/a.txt"]);
    let doc = fs::read_to_string(&output).unwrap();
    assert_eq!(doc, "proj:.\n└───a.txt\n\n\nproj/a.txt\na\n\n\n\n");

    let tree = scan(&SnapshotBuilder::new(&root).output(&output).build()).unwrap();
    assert_eq!(tree.tree, vec!["└───a.txt"]);
}

#[test]
fn integration_missing_root_leaves_no_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("output.txt");
    let options = SnapshotBuilder::new(dir.path().join("missing"))
        .output(&output)
        .build();
    assert!(snapshot(options).is_err());
    assert!(!output.exists());
}

#[test]
fn integration_unwritable_destination_is_fatal() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("proj");
    fs::create_dir(&root).unwrap();
    let output = dir.path().join("no/such/dir/output.txt");
    let err = snapshot(SnapshotBuilder::new(&root).output(&output).build()).unwrap_err();
    assert!(err.to_string().contains("Cannot open output document"));
}

#[test]
fn integration_dot_root_uses_directory_name() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("proj");
    fs::create_dir_all(root.join("sub")).unwrap();
    let snap = scan(&SnapshotBuilder::new(root.join("sub/..")).build()).unwrap();
    assert_eq!(snap.root_name, "proj");
    assert_eq!(snap.header(), "proj:.");
}

#[test]
fn integration_bad_root_keeps_previous_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("output.txt");
    fs::write(&output, "previous good snapshot").unwrap();

    let missing = SnapshotBuilder::new(dir.path().join("typo"))
        .output(&output)
        .build();
    assert!(snapshot(missing).is_err());
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous good snapshot");

    fs::write(dir.path().join("plain.txt"), "x").unwrap();
    let not_a_dir = SnapshotBuilder::new(dir.path().join("plain.txt"))
        .output(&output)
        .build();
    assert!(snapshot(not_a_dir).is_err());
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous good snapshot");
}
