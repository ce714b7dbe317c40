//! Structural diff between two versions of a source locale document.
//!
//! The result is the list of leaf key paths whose value differs, in discovery
//! order: keys of the new document first (depth first, document order), then
//! keys that only exist in the old document.

use anyhow::{Context, Result};

use super::{KeyPath, Node, Tree};

/// Key paths that differ between two snapshots, in discovery order.
pub type ChangeSet = Vec<KeyPath>;

/// Diff two documents. Identical subtrees contribute nothing.
pub fn diff(old: &Tree, new: &Tree) -> ChangeSet {
    let mut changes = Vec::new();
    diff_at(Some(old), Some(new), &KeyPath::root(), &mut changes);
    changes
}

/// Diff two JSON texts. A missing `old` is treated as the empty document,
/// so every leaf of `new` is reported.
pub fn diff_text(old: Option<&str>, new: &str) -> Result<ChangeSet> {
    let old = match old {
        Some(content) => Tree::parse_document(content).context("Invalid previous snapshot")?,
        None => Tree::default(),
    };
    let new = Tree::parse_document(new).context("Invalid source document")?;
    Ok(diff(&old, &new))
}

fn diff_at(old: Option<&Tree>, new: Option<&Tree>, path: &KeyPath, out: &mut ChangeSet) {
    match (old, new) {
        (Some(Tree::Node(old)), Some(Tree::Node(new))) => diff_nodes(old, new, path, out),
        (Some(old), Some(new)) if old == new => {}
        // Added, removed or retyped: report the leaves of whichever side is a node,
        // preferring the new one.
        (_, Some(new @ Tree::Node(_))) => collect_added(new, path, out),
        (Some(old @ Tree::Node(_)), None) => old.collect_leaf_paths(path, out),
        (Some(_), _) | (_, Some(_)) => out.push(path.clone()),
        (None, None) => {}
    }
}

/// Leaf paths of an added subtree. Empty nodes are reported by their own path
/// so the structure reaches the targets.
fn collect_added(tree: &Tree, path: &KeyPath, out: &mut ChangeSet) {
    match tree {
        Tree::Node(map) if map.is_empty() => out.push(path.clone()),
        Tree::Node(map) => {
            for (key, child) in map {
                collect_added(child, &path.child(key.as_str()), out);
            }
        }
        Tree::Leaf(_) | Tree::Opaque(_) => out.push(path.clone()),
    }
}

fn diff_nodes(old: &Node, new: &Node, path: &KeyPath, out: &mut ChangeSet) {
    for (key, new_child) in new {
        diff_at(old.get(key), Some(new_child), &path.child(key.as_str()), out);
    }
    for (key, old_child) in old {
        if !new.contains_key(key) {
            diff_at(Some(old_child), None, &path.child(key.as_str()), out);
        }
    }
}
