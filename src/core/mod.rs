//! Pure change-detection and merge logic.
//!
//! - `tree`: typed locale document (`Leaf` / `Node` / `Opaque`)
//! - `key_path`: segment-based addressing into a document
//! - `diff`: structural diff producing a change set
//! - `placeholder`: placeholder-preserving reconciliation of translations
//! - `merge`: incremental translation of changed keys into a target document

pub mod diff;
pub mod key_path;
pub mod merge;
pub mod placeholder;
pub mod tree;

pub use diff::{ChangeSet, diff, diff_text};
pub use key_path::KeyPath;
pub use merge::{LocalePair, MergeOutcome, MergeStats, merge};
pub use tree::{KeyAction, Node, Tree};
