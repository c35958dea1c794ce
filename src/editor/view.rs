//! Render-ready snapshot types.

use std::collections::BTreeMap;

use crate::{
    Move,
    annotations::{Nag, Priority, Shape, glyph_text},
    ports::Position,
    tree::ChildNode,
    types::Color,
};

/// One selectable move among the siblings shown at a ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOption {
    pub mv: Move,
    pub san: String,
    pub glyphs: String,
    pub priority: Priority,
    pub has_annotation: bool,
}

impl MoveOption {
    pub(crate) fn new<P: Position>(parent_position: &P, node: &ChildNode) -> Self {
        Self {
            mv: node.mv.clone(),
            san: parent_position.render_move(&node.mv),
            glyphs: glyph_text(&node.nags),
            priority: node.priority,
            has_annotation: node.has_annotation(),
        }
    }
}

/// A ply of the visible line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorNode {
    /// Every sibling at this ply; a draft appears last.
    pub moves: Vec<MoveOption>,
    /// Index into `moves` of the move on the line.
    pub index: usize,
    pub is_draft: bool,
    /// Set on exactly one entry: the ply the cursor is at.
    pub selected: bool,
    pub comment: Option<String>,
    pub nags: Vec<Nag>,
    pub shapes: Vec<Shape>,
    pub priority: Priority,
    /// Moves from the root to this node, inclusive.
    pub path: Vec<Move>,
    /// Indent for nested variations: parent's padding plus parent's index.
    pub padding: usize,
}

impl EditorNode {
    /// The move on the line at this ply.
    pub fn mv(&self) -> &Move {
        &self.moves[self.index].mv
    }

    pub fn san(&self) -> &str {
        &self.moves[self.index].san
    }
}

/// Annotations of whatever node the cursor is at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CurrentNode {
    pub is_draft: bool,
    pub comment: Option<String>,
    pub nags: Vec<Nag>,
    pub shapes: Vec<Shape>,
    pub priority: Priority,
}

/// Immutable snapshot of the editor, rebuilt after every call.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorView<P: Position> {
    pub line: Vec<EditorNode>,
    pub ply: usize,
    pub color: Option<Color>,
    pub root_comment: Option<String>,
    pub current_node: CurrentNode,
    pub position: P,
    pub last_move: Option<Move>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub headers: BTreeMap<String, String>,
}

impl<P: Position> EditorView<P> {
    /// Moves of the visible line.
    pub fn line_moves(&self) -> Vec<Move> {
        self.line.iter().map(|node| node.mv().clone()).collect()
    }

    /// The selected entry, `None` at the root.
    pub fn selected(&self) -> Option<&EditorNode> {
        self.line.iter().find(|node| node.selected)
    }
}
