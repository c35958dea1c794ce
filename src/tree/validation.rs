//! Tree validation for imported trees

use std::collections::HashSet;

use super::node::{ChildNode, Node, RootNode};
use crate::{Error, Move, Result, error::display_path, ports::Position};

impl RootNode {
    /// Check that this tree satisfies the editor's invariants.
    ///
    /// - the initial FEN is accepted by the rules backend `P`
    /// - no two siblings share a move
    /// - every move is playable from its parent's position
    ///
    /// Trees built through the editor always pass; this is meant for trees
    /// that arrive from a deserializer.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in depth-first order.
    pub fn validate<P: Position>(&self) -> Result<()> {
        let position = P::from_fen(&self.initial_fen)?;
        let mut path = Vec::new();
        validate_children(self, &position, &mut path)
    }

    /// Count every node below the root.
    pub fn node_count(&self) -> usize {
        fn count(node: &ChildNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.children.iter().map(count).sum()
    }
}

/// Check a detached subtree as if it hung below a node at `parent_path`
/// whose position is `parent_position`.
pub(crate) fn validate_subtree<P: Position>(
    node: &ChildNode,
    parent_position: &P,
    parent_path: &[Move],
) -> Result<()> {
    let mut path = parent_path.to_vec();
    let next = play_at(parent_position, &node.mv, &path)?;
    path.push(node.mv.clone());
    validate_children(node, &next, &mut path)
}

fn play_at<P: Position>(position: &P, mv: &Move, path: &[Move]) -> Result<P> {
    position.after(mv).map_err(|err| match err {
        Error::IllegalMove { reason, .. } => Error::IllegalMove {
            mv: display_path(path.iter().chain([mv])),
            reason,
        },
        other => other,
    })
}

fn validate_children<P: Position>(
    node: &dyn Node,
    position: &P,
    path: &mut Vec<Move>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for child in node.children() {
        if !seen.insert(&child.mv) {
            path.push(child.mv.clone());
            let err = Error::DuplicateMove {
                mv: display_path(path.iter()),
            };
            return Err(err);
        }

        let next = play_at(position, &child.mv, path)?;

        path.push(child.mv.clone());
        validate_children(child, &next, path)?;
        path.pop();
    }
    Ok(())
}
