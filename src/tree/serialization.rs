//! Tree serialization support
//!
//! A versioned JSON envelope around [`RootNode`]. Writing it anywhere is up to
//! the caller; this module only converts to and from text.

use serde::{Deserialize, Serialize};

use super::node::RootNode;
use crate::{Error, Result, ports::Position};

/// Current envelope version.
pub const SAVED_TREE_VERSION: u32 = 1;

/// Serializable representation of a move tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTree {
    /// Version of the save format
    pub version: u32,
    pub tree: RootNode,
}

impl SavedTree {
    pub fn new(tree: RootNode) -> Self {
        Self {
            version: SAVED_TREE_VERSION,
            tree,
        }
    }
}

/// Serialize a tree to pretty-printed JSON.
pub fn to_json(tree: &RootNode) -> Result<String> {
    #[derive(Serialize)]
    struct SavedTreeRef<'a> {
        version: u32,
        tree: &'a RootNode,
    }

    Ok(serde_json::to_string_pretty(&SavedTreeRef {
        version: SAVED_TREE_VERSION,
        tree,
    })?)
}

/// Deserialize a tree without checking it against any rules backend.
///
/// # Errors
///
/// Returns [`Error::Serialization`] for malformed JSON and
/// [`Error::UnsupportedVersion`] for envelopes newer than this crate.
pub fn from_json(text: &str) -> Result<RootNode> {
    let saved: SavedTree = serde_json::from_str(text)?;
    if saved.version > SAVED_TREE_VERSION {
        return Err(Error::UnsupportedVersion {
            found: saved.version,
            latest: SAVED_TREE_VERSION,
        });
    }
    Ok(saved.tree)
}

/// Deserialize a tree and validate it with the rules backend `P`.
pub fn from_json_validated<P: Position>(text: &str) -> Result<RootNode> {
    let tree = from_json(text)?;
    tree.validate::<P>()?;
    Ok(tree)
}
