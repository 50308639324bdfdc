//! Internal module for turning the walk's entry list into tree rows.

pub(crate) const BRANCH: &str = "├───";
pub(crate) const LAST_BRANCH: &str = "└───";
pub(crate) const CONTINUE: &str = "│   ";
pub(crate) const BLANK: &str = "    ";

/// One visible entry below the root, as yielded by the sorted depth-first walk.
#[derive(Debug, Clone)]
pub(crate) struct TreeEntry {
    pub name: String,
    /// 1 for children of the root.
    pub depth: usize,
    pub is_dir: bool,
}

/// Builds the tree rows for `entries`.
///
/// Entries must be in pre-order with siblings already sorted. Whether an entry
/// is the last of its siblings is derived from the list itself, so entries
/// filtered out by the walk never affect the connectors.
pub(crate) fn build_tree_lines(entries: &[TreeEntry]) -> Vec<String> {
    let last = last_sibling_flags(entries);

    let mut lines = Vec::with_capacity(entries.len());
    let mut prefixes: Vec<&'static str> = Vec::new();
    for (entry, &is_last) in entries.iter().zip(&last) {
        prefixes.truncate(entry.depth.saturating_sub(1));
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{}{}{}", prefixes.concat(), connector, entry.name));
        if entry.is_dir {
            prefixes.push(if is_last { BLANK } else { CONTINUE });
        }
    }
    lines
}

// Walking backwards, `seen[d]` records whether a later sibling exists at depth d
// under the current parent. Reaching an entry invalidates every deeper slot.
fn last_sibling_flags(entries: &[TreeEntry]) -> Vec<bool> {
    let mut flags = vec![false; entries.len()];
    let mut seen: Vec<bool> = Vec::new();
    for (i, entry) in entries.iter().enumerate().rev() {
        let depth = entry.depth;
        if seen.len() > depth {
            seen.truncate(depth + 1);
        } else {
            seen.resize(depth + 1, false);
        }
        flags[i] = !seen[depth];
        seen[depth] = true;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, depth: usize, is_dir: bool) -> TreeEntry {
        TreeEntry {
            name: name.to_string(),
            depth,
            is_dir,
        }
    }

    #[test]
    fn nested_prefixes() {
        let entries = vec![
            entry("a", 1, true),
            entry("x.txt", 2, false),
            entry("y", 2, true),
            entry("z.txt", 3, false),
            entry("b.txt", 1, false),
        ];
        assert_eq!(
            build_tree_lines(&entries),
            vec![
                "├───a",
                "│   ├───x.txt",
                "│   └───y",
                "│       └───z.txt",
                "└───b.txt",
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert!(build_tree_lines(&[]).is_empty());
    }

    #[test]
    fn empty_directory_is_a_leaf() {
        let entries = vec![entry("empty", 1, true), entry("f", 1, false)];
        assert_eq!(build_tree_lines(&entries), vec!["├───empty", "└───f"]);
    }
}
