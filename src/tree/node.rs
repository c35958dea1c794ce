//! Root and child nodes of the move tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Move, Result,
    annotations::{Nag, Priority, Shape},
    error::display_path,
    types::Color,
};

/// Behaviour shared by every node of the tree.
///
/// Children are ordered; the first child is the main line. No two siblings
/// carry an equal move.
pub trait Node {
    fn children(&self) -> &[ChildNode];

    fn children_mut(&mut self) -> &mut Vec<ChildNode>;

    fn comment(&self) -> Option<&str>;

    fn set_comment(&mut self, comment: Option<String>) -> Option<String>;

    /// The child reached by `mv`, if any.
    fn get_child(&self, mv: &Move) -> Option<&ChildNode> {
        self.children().iter().find(|child| &child.mv == mv)
    }

    fn get_child_mut(&mut self, mv: &Move) -> Option<&mut ChildNode> {
        self.children_mut().iter_mut().find(|child| &child.mv == mv)
    }

    /// Sibling index of the child reached by `mv`.
    fn child_index(&self, mv: &Move) -> Option<usize> {
        self.children().iter().position(|child| &child.mv == mv)
    }

    /// Append a fresh, unannotated child for `mv`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateMove`] if a child with that move exists.
    fn add_child(&mut self, mv: Move) -> Result<&mut ChildNode> {
        self.add_child_node(ChildNode::new(mv))
    }

    /// Append an existing subtree as the last child.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateMove`] if a child with that move exists.
    fn add_child_node(&mut self, node: ChildNode) -> Result<&mut ChildNode> {
        let index = self.children().len();
        self.insert_child_node(index, node)
    }

    /// Insert a subtree at `index` (clamped to the number of children).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateMove`] if a child with that move exists.
    fn insert_child_node(&mut self, index: usize, node: ChildNode) -> Result<&mut ChildNode> {
        if self.get_child(&node.mv).is_some() {
            return Err(Error::DuplicateMove {
                mv: node.mv.to_string(),
            });
        }
        let children = self.children_mut();
        let index = index.min(children.len());
        children.insert(index, node);
        Ok(&mut children[index])
    }

    /// Remove the child reached by `mv`, returning it with its former index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMove`] if there is no such child.
    fn remove_child(&mut self, mv: &Move) -> Result<(usize, ChildNode)> {
        let index = self.child_index(mv).ok_or_else(|| Error::MissingMove {
            mv: mv.to_string(),
        })?;
        Ok((index, self.children_mut().remove(index)))
    }

    /// Reorder children to follow `order`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReorder`] unless `order` is a permutation of the
    /// current children's moves; the children are left untouched in that case.
    fn reorder_children(&mut self, order: &[Move]) -> Result<()> {
        let current = self.children();
        let is_permutation = order.len() == current.len()
            && order
                .iter()
                .enumerate()
                .all(|(i, mv)| self.get_child(mv).is_some() && !order[..i].contains(mv));
        if !is_permutation {
            return Err(Error::InvalidReorder {
                expected: display_path(current.iter().map(|child| &child.mv)),
                got: display_path(order),
            });
        }

        let children = self.children_mut();
        children.sort_by_key(|child| order.iter().position(|mv| mv == &child.mv));
        Ok(())
    }

    /// Moves of the children, in order.
    fn child_moves(&self) -> Vec<Move> {
        self.children().iter().map(|child| child.mv.clone()).collect()
    }

    /// Follow `moves` from this node. The empty path names this node itself,
    /// which is not a [`ChildNode`], so it yields `None`.
    fn get_descendant(&self, moves: &[Move]) -> Option<&ChildNode> {
        let (first, rest) = moves.split_first()?;
        let mut node = self.get_child(first)?;
        for mv in rest {
            node = node.get_child(mv)?;
        }
        Some(node)
    }

    fn get_descendant_mut(&mut self, moves: &[Move]) -> Option<&mut ChildNode> {
        let (first, rest) = moves.split_first()?;
        let mut node = self.get_child_mut(first)?;
        for mv in rest {
            node = node.get_child_mut(mv)?;
        }
        Some(node)
    }

    /// Number of leaves reachable from this node; a leaf counts as one line.
    fn line_count(&self) -> usize {
        if self.children().is_empty() {
            1
        } else {
            self.children().iter().map(|child| child.line_count()).sum()
        }
    }
}

/// The starting node of a tree, carrying game-level data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootNode {
    /// Starting position, as FEN.
    pub initial_fen: String,
    /// Side the user edits or trains as; `None` means both.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub children: Vec<ChildNode>,
}

impl RootNode {
    pub fn new(initial_fen: impl Into<String>) -> Self {
        Self {
            initial_fen: initial_fen.into(),
            color: None,
            headers: BTreeMap::new(),
            comment: None,
            children: Vec::new(),
        }
    }

    /// Resolve a path to any node, the root included (empty path).
    pub fn node(&self, path: &[Move]) -> Option<&dyn Node> {
        if path.is_empty() {
            Some(self as &dyn Node)
        } else {
            self.get_descendant(path).map(|child| child as &dyn Node)
        }
    }

    pub fn node_mut(&mut self, path: &[Move]) -> Option<&mut dyn Node> {
        if path.is_empty() {
            Some(self as &mut dyn Node)
        } else {
            self.get_descendant_mut(path)
                .map(|child| child as &mut dyn Node)
        }
    }

    /// Like [`RootNode::node_mut`], but a miss is an error.
    pub(crate) fn expect_node_mut(&mut self, path: &[Move]) -> Result<&mut dyn Node> {
        self.node_mut(path).ok_or_else(|| Error::MissingNode {
            path: display_path(path),
        })
    }

    /// Like [`Node::get_descendant_mut`], but the root and misses are errors.
    pub(crate) fn expect_child_mut(
        &mut self,
        path: &[Move],
        operation: &str,
    ) -> Result<&mut ChildNode> {
        if path.is_empty() {
            return Err(Error::RootTarget {
                operation: operation.to_string(),
            });
        }
        self.get_descendant_mut(path)
            .ok_or_else(|| Error::MissingNode {
                path: display_path(path),
            })
    }
}

impl Node for RootNode {
    fn children(&self) -> &[ChildNode] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<ChildNode> {
        &mut self.children
    }

    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    fn set_comment(&mut self, comment: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.comment, comment)
    }
}

/// A position reached from its parent by `mv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildNode {
    #[serde(rename = "move")]
    pub mv: Move,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nags: Vec<Nag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub children: Vec<ChildNode>,
}

impl ChildNode {
    pub fn new(mv: Move) -> Self {
        Self {
            mv,
            comment: None,
            nags: Vec::new(),
            shapes: Vec::new(),
            priority: Priority::Default,
            children: Vec::new(),
        }
    }

    /// Build a single-variation chain, `moves[0]` at the top.
    ///
    /// Returns `None` for an empty slice.
    pub fn chain(moves: &[Move]) -> Option<ChildNode> {
        moves.iter().rev().fold(None, |below, mv| {
            let mut node = ChildNode::new(mv.clone());
            node.children.extend(below);
            Some(node)
        })
    }

    /// Whether the node carries a comment, glyphs or shapes.
    pub fn has_annotation(&self) -> bool {
        self.comment.is_some() || !self.nags.is_empty() || !self.shapes.is_empty()
    }
}

impl Node for ChildNode {
    fn children(&self) -> &[ChildNode] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<ChildNode> {
        &mut self.children
    }

    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    fn set_comment(&mut self, comment: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.comment, comment)
    }
}
