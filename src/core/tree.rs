//! Typed locale document tree.
//!
//! A locale document is a nested mapping whose leaves are translatable strings.
//! Anything else (arrays, numbers, booleans, null) is carried verbatim as an
//! opaque value and never recursed into.

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::KeyPath;

pub type Node = IndexMap<String, Tree>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tree {
    Leaf(String),
    Node(Node),
    Opaque(Value),
}

/// Action taken when writing a value at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::Node(Node::new())
    }
}

impl Tree {
    /// Parse a locale document. The root must be a JSON object.
    pub fn parse_document(content: &str) -> Result<Self> {
        let tree: Tree = serde_json::from_str(content).context("Failed to parse JSON")?;
        match tree {
            Tree::Node(_) => Ok(tree),
            _ => bail!("Root of a locale document must be an object"),
        }
    }

    /// Pretty-print with 2-space indentation and a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize JSON")?;
        Ok(format!("{}\n", content))
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Tree::Node(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Tree::Node(_))
    }

    pub fn get(&self, path: &KeyPath) -> Option<&Tree> {
        let mut current = self;
        for segment in path.segments() {
            current = current.as_node()?.get(segment)?;
        }
        Some(current)
    }

    /// Write `value` at `path`, creating intermediate nodes as needed.
    ///
    /// An intermediate value that is not a node is replaced with one.
    /// Setting the root path replaces the whole tree.
    pub fn set(&mut self, path: &KeyPath, value: Tree) -> KeyAction {
        let Some((parent, last)) = path.split_last() else {
            *self = value;
            return KeyAction::Updated;
        };

        let mut current = self;
        for segment in parent.segments() {
            current = current.node_mut().entry(segment.clone()).or_default();
        }

        match current.node_mut().insert(last.to_string(), value) {
            Some(_) => KeyAction::Updated,
            None => KeyAction::Added,
        }
    }

    fn node_mut(&mut self) -> &mut Node {
        if !self.is_node() {
            *self = Tree::default();
        }
        match self {
            Tree::Node(map) => map,
            _ => unreachable!("value was just replaced with a node"),
        }
    }

    /// Collect the path of every leaf below `prefix`, depth first in key order.
    ///
    /// Opaque values count as leaves. Empty nodes contribute nothing.
    pub fn leaf_paths(&self, prefix: &KeyPath) -> Vec<KeyPath> {
        let mut paths = Vec::new();
        self.collect_leaf_paths(prefix, &mut paths);
        paths
    }

    pub(crate) fn collect_leaf_paths(&self, prefix: &KeyPath, out: &mut Vec<KeyPath>) {
        match self {
            Tree::Node(map) => {
                for (key, child) in map {
                    child.collect_leaf_paths(&prefix.child(key.as_str()), out);
                }
            }
            Tree::Leaf(_) | Tree::Opaque(_) => out.push(prefix.clone()),
        }
    }
}
