//! Reversible edit commands.
//!
//! Every mutation of the tree goes through an [`EditorOp`]. Executing one
//! returns its inverse, which is what the history stores.

use std::mem;

use tracing::debug;

use super::cursor::Cursor;
use crate::{
    Error, Move, Result,
    annotations::{Nag, Priority, Shape},
    error::display_path,
    ports::Position,
    tree::{ChildNode, validation::validate_subtree},
    types::Color,
};

/// A single reversible change, applied at a target path.
///
/// The target is the parent for structural commands (`AddLine`,
/// `DeleteLine`, `ReorderMoves`), the annotated node for annotation commands,
/// and ignored by the root-level ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOp {
    /// Insert `node` under the target, at `index` or last.
    AddLine {
        node: ChildNode,
        index: Option<usize>,
    },
    /// Remove the target's child reached by `mv`, with its subtree.
    DeleteLine { mv: Move },
    SetComment { comment: Option<String> },
    SetNags { nags: Vec<Nag> },
    SetShapes { shapes: Vec<Shape> },
    SetPriority { priority: Priority },
    ReorderMoves { order: Vec<Move> },
    SetTrainingColor { color: Option<Color> },
    /// Set a header, or remove it when `value` is `None`.
    SetHeaderValue { key: String, value: Option<String> },
    /// Replace the starting FEN and every top-level line.
    SetInitialPosition {
        fen: String,
        children: Vec<ChildNode>,
    },
}

impl EditorOp {
    pub fn name(&self) -> &'static str {
        match self {
            EditorOp::AddLine { .. } => "add line",
            EditorOp::DeleteLine { .. } => "delete line",
            EditorOp::SetComment { .. } => "set comment",
            EditorOp::SetNags { .. } => "set nags",
            EditorOp::SetShapes { .. } => "set shapes",
            EditorOp::SetPriority { .. } => "set priority",
            EditorOp::ReorderMoves { .. } => "reorder moves",
            EditorOp::SetTrainingColor { .. } => "set training color",
            EditorOp::SetHeaderValue { .. } => "set header",
            EditorOp::SetInitialPosition { .. } => "set initial position",
        }
    }

    /// Apply to the tree owned by `cursor`, then resynchronise the cursor.
    ///
    /// Returns the command that undoes this one at the same target.
    ///
    /// # Errors
    ///
    /// Precondition failures (missing or draft target, duplicate move,
    /// non-permutation, unplayable subtree, bad FEN) are reported before the
    /// tree is touched.
    pub fn execute<P: Position>(self, cursor: &mut Cursor<P>, target: &[Move]) -> Result<EditorOp> {
        debug!(op = self.name(), target = %display_path(target), "executing editor op");
        if cursor.is_draft_path(target) {
            return Err(Error::DraftTarget {
                operation: self.name().to_string(),
                path: display_path(target),
            });
        }

        match self {
            EditorOp::AddLine { node, index } => {
                let position = cursor.position_at(target)?;
                validate_subtree(&node, &position, target)?;
                let mv = node.mv.clone();
                let parent = cursor.tree_mut().expect_node_mut(target)?;
                match index {
                    Some(index) => parent.insert_child_node(index, node)?,
                    None => parent.add_child_node(node)?,
                };
                cursor.show_added_line(target, &mv)?;
                Ok(EditorOp::DeleteLine { mv })
            }
            EditorOp::DeleteLine { mv } => {
                let parent = cursor.tree_mut().expect_node_mut(target)?;
                let (index, node) = parent.remove_child(&mv)?;
                cursor.after_delete(target, &mv)?;
                Ok(EditorOp::AddLine {
                    node,
                    index: Some(index),
                })
            }
            EditorOp::SetComment { comment } => {
                let comment = comment.filter(|text| !text.is_empty());
                let old = cursor.tree_mut().expect_node_mut(target)?.set_comment(comment);
                cursor.refresh_path(target)?;
                Ok(EditorOp::SetComment { comment: old })
            }
            EditorOp::SetNags { nags } => {
                let node = cursor.tree_mut().expect_child_mut(target, "annotate")?;
                let old = mem::replace(&mut node.nags, nags);
                cursor.refresh_path(target)?;
                Ok(EditorOp::SetNags { nags: old })
            }
            EditorOp::SetShapes { shapes } => {
                let node = cursor.tree_mut().expect_child_mut(target, "draw on")?;
                let old = mem::replace(&mut node.shapes, shapes);
                cursor.refresh_path(target)?;
                Ok(EditorOp::SetShapes { shapes: old })
            }
            EditorOp::SetPriority { priority } => {
                let node = cursor.tree_mut().expect_child_mut(target, "prioritise")?;
                let old = mem::replace(&mut node.priority, priority);
                cursor.refresh_path(target)?;
                Ok(EditorOp::SetPriority { priority: old })
            }
            EditorOp::ReorderMoves { order } => {
                let node = cursor.tree_mut().expect_node_mut(target)?;
                let old = node.child_moves();
                node.reorder_children(&order)?;
                cursor.refresh_children_of(target)?;
                Ok(EditorOp::ReorderMoves { order: old })
            }
            EditorOp::SetTrainingColor { color } => {
                let old = mem::replace(&mut cursor.tree_mut().color, color);
                Ok(EditorOp::SetTrainingColor { color: old })
            }
            EditorOp::SetHeaderValue { key, value } => {
                let headers = &mut cursor.tree_mut().headers;
                let old = match value {
                    Some(value) => headers.insert(key.clone(), value),
                    None => headers.remove(&key),
                };
                Ok(EditorOp::SetHeaderValue { key, value: old })
            }
            EditorOp::SetInitialPosition { fen, children } => {
                let (fen, children) = cursor.replace_initial_position(fen, children)?;
                Ok(EditorOp::SetInitialPosition { fen, children })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::{NotationPosition, STARTING_FEN},
        annotations::Brush,
        identifiers::moves,
        tree::{Node, RootNode},
        types::Square,
    };

    fn cursor() -> Cursor<NotationPosition> {
        let mut root = RootNode::new(STARTING_FEN);
        let e4 = root.add_child(Move::new("e4")).unwrap();
        e4.add_child(Move::new("e5")).unwrap();
        e4.add_child(Move::new("c5")).unwrap();
        Cursor::new(root, true).unwrap()
    }

    /// Execute `op` then its inverse; the tree must come back unchanged.
    fn assert_reverts(op: EditorOp, target: &[Move]) {
        let mut cursor = cursor();
        let before = cursor.root().clone();
        let inverse = op.clone().execute(&mut cursor, target).unwrap();
        assert_ne!(cursor.root(), &before, "{} changed nothing", op.name());
        inverse.execute(&mut cursor, target).unwrap();
        assert_eq!(cursor.root(), &before);
    }

    #[test]
    fn every_command_is_reverted_by_its_inverse() {
        let e4 = moves(&["e4"]);
        assert_reverts(
            EditorOp::AddLine {
                node: ChildNode::chain(&moves(&["d5", "exd5"])).unwrap(),
                index: None,
            },
            &e4,
        );
        assert_reverts(EditorOp::DeleteLine { mv: Move::new("e5") }, &e4);
        assert_reverts(
            EditorOp::SetComment {
                comment: Some("Open game".to_string()),
            },
            &moves(&["e4", "e5"]),
        );
        assert_reverts(EditorOp::SetNags { nags: vec![Nag::GOOD] }, &e4);
        assert_reverts(
            EditorOp::SetShapes {
                shapes: vec![Shape::circle(Square::new(28).unwrap(), Brush::Red)],
            },
            &e4,
        );
        assert_reverts(EditorOp::SetPriority { priority: Priority::TrainLast }, &e4);
        assert_reverts(EditorOp::ReorderMoves { order: moves(&["c5", "e5"]) }, &e4);
        assert_reverts(
            EditorOp::SetTrainingColor {
                color: Some(Color::White),
            },
            &[],
        );
        assert_reverts(
            EditorOp::SetHeaderValue {
                key: "White".to_string(),
                value: Some("Morphy".to_string()),
            },
            &[],
        );
        assert_reverts(
            EditorOp::SetInitialPosition {
                fen: "8/8/8/8/8/8/8/8 b - - 0 1".to_string(),
                children: Vec::new(),
            },
            &[],
        );
    }

    #[test]
    fn delete_then_add_restores_sibling_index() {
        let mut cursor = cursor();
        let e4 = moves(&["e4"]);
        let inverse = EditorOp::DeleteLine { mv: Move::new("e5") }
            .execute(&mut cursor, &e4)
            .unwrap();
        assert_eq!(
            inverse,
            EditorOp::AddLine {
                node: ChildNode::new(Move::new("e5")),
                index: Some(0),
            }
        );
        inverse.execute(&mut cursor, &e4).unwrap();
        assert_eq!(cursor.root().children[0].child_moves(), moves(&["e5", "c5"]));
    }

    #[test]
    fn failed_preconditions_leave_tree_untouched() {
        let mut cursor = cursor();
        let before = cursor.root().clone();
        let e4 = moves(&["e4"]);

        let attempts = [
            (EditorOp::ReorderMoves { order: moves(&["e5"]) }, e4.clone()),
            (EditorOp::DeleteLine { mv: Move::new("d5") }, e4.clone()),
            (
                EditorOp::AddLine {
                    node: ChildNode::new(Move::new("e5")),
                    index: None,
                },
                e4.clone(),
            ),
            (
                EditorOp::AddLine {
                    node: ChildNode::chain(&moves(&["d5", "??"])).unwrap(),
                    index: None,
                },
                e4.clone(),
            ),
            (EditorOp::SetNags { nags: vec![Nag::GOOD] }, Vec::new()),
            (
                EditorOp::SetComment { comment: None },
                moves(&["e4", "h5"]),
            ),
            (
                EditorOp::SetInitialPosition {
                    fen: "garbage".to_string(),
                    children: Vec::new(),
                },
                Vec::new(),
            ),
        ];
        for (op, target) in attempts {
            let name = op.name();
            assert!(op.execute(&mut cursor, &target).is_err(), "{name} should fail");
            assert_eq!(cursor.root(), &before, "{name} mutated the tree");
        }
    }

    #[test]
    fn draft_targets_are_rejected() {
        let mut cursor = cursor();
        cursor.set_moves(&moves(&["e4", "e5", "Nf3"])).unwrap();
        let err = EditorOp::SetNags { nags: vec![Nag::GOOD] }
            .execute(&mut cursor, &moves(&["e4", "e5", "Nf3"]))
            .unwrap_err();
        assert!(matches!(err, Error::DraftTarget { .. }));
    }

    #[test]
    fn add_line_commits_matching_drafts() {
        let mut cursor = cursor();
        cursor.set_moves(&moves(&["e4", "e5", "Nf3", "Nc6"])).unwrap();
        assert_eq!(cursor.first_draft_index(), Some(2));

        EditorOp::AddLine {
            node: ChildNode::chain(&moves(&["Nf3", "Nc6"])).unwrap(),
            index: None,
        }
        .execute(&mut cursor, &moves(&["e4", "e5"]))
        .unwrap();

        assert_eq!(cursor.first_draft_index(), None);
        assert_eq!(cursor.ply(), 4);
        assert_eq!(cursor.moves(), moves(&["e4", "e5", "Nf3", "Nc6"]));
    }
}
