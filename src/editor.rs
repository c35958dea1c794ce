//! The move-tree editor: navigation, reversible edits and the view.
//!
//! [`Editor`] is the facade a rendering layer talks to. Navigation goes to the
//! [`Cursor`]; every change to the tree is an [`EditorOp`] whose inverse is
//! kept in the [`History`]. After each call the editor rebuilds an
//! [`EditorView`] snapshot, which callers pull with [`Editor::view`].
//!
//! # Examples
//!
//! ```
//! use movetree::{Editor, Move, adapters::{NotationPosition, STARTING_FEN}, tree::RootNode};
//!
//! let mut editor: Editor<NotationPosition> = Editor::new(RootNode::new(STARTING_FEN))?;
//! editor.play_san("e4")?;
//! editor.play_san("c5")?;
//! assert!(editor.view().current_node.is_draft);
//!
//! editor.add_line()?;
//! assert_eq!(editor.tree().children[0].children[0].mv, "c5");
//!
//! editor.undo()?;
//! assert!(editor.tree().children.is_empty());
//! # Ok::<(), movetree::Error>(())
//! ```

pub mod cursor;
pub mod history;
pub mod ops;
pub mod view;

use std::sync::Arc;

use tracing::debug;

pub use cursor::{Cursor, Step};
pub use history::{History, HistoryEntry, OpSource};
pub use ops::EditorOp;
pub use view::{CurrentNode, EditorNode, EditorView, MoveOption};

use crate::{
    EditorConfig, Error, Move, Result,
    annotations::{Nag, Priority, Shape, toggle_nag, toggle_shape},
    error::display_path,
    ports::Position,
    tree::{ChildNode, RootNode},
    types::Color,
};

#[derive(Debug)]
pub struct Editor<P: Position> {
    cursor: Cursor<P>,
    history: History,
    view: Arc<EditorView<P>>,
}

impl<P: Position> Editor<P> {
    /// Open `tree` with the default configuration.
    ///
    /// # Errors
    ///
    /// Fails if the tree's initial FEN or a main-line move is rejected by the
    /// rules backend.
    pub fn new(tree: RootNode) -> Result<Self> {
        Self::with_config(tree, EditorConfig::default())
    }

    pub fn with_config(tree: RootNode, config: EditorConfig) -> Result<Self> {
        let mut cursor = Cursor::new(tree, config.auto_advance)?;
        if !config.start_moves.is_empty() {
            cursor.set_moves(&config.start_moves)?;
        }
        let history = History::new();
        let view = Arc::new(build_view(&cursor, &history));
        Ok(Self {
            cursor,
            history,
            view,
        })
    }

    /// Latest snapshot. Cheap to clone and safe to hold across calls.
    pub fn view(&self) -> Arc<EditorView<P>> {
        Arc::clone(&self.view)
    }

    pub fn tree(&self) -> &RootNode {
        self.cursor.root()
    }

    pub fn into_tree(self) -> RootNode {
        self.cursor.into_root()
    }

    pub fn cursor(&self) -> &Cursor<P> {
        &self.cursor
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // Navigation

    pub fn move_to(&mut self, mv: Move) -> Result<()> {
        self.cursor.move_to(mv)?;
        self.update_view();
        Ok(())
    }

    /// Parse `text` at the cursor's position, then [`Editor::move_to`] it.
    pub fn play_san(&mut self, text: &str) -> Result<()> {
        let mv = self.cursor.position().parse_move(text)?;
        self.move_to(mv)
    }

    pub fn move_backwards(&mut self) -> Result<bool> {
        let moved = self.cursor.move_backwards()?;
        self.update_view();
        Ok(moved)
    }

    pub fn move_forwards(&mut self) -> Result<bool> {
        let moved = self.cursor.move_forwards()?;
        self.update_view();
        Ok(moved)
    }

    pub fn set_moves(&mut self, moves: &[Move]) -> Result<()> {
        self.cursor.set_moves(moves)?;
        self.update_view();
        Ok(())
    }

    // Structure

    /// Commit every draft move on the line as one new variation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDraft`] when the line has no draft steps.
    pub fn add_line(&mut self) -> Result<()> {
        let Some(first_draft) = self.cursor.first_draft_index() else {
            return Err(Error::NoDraft);
        };
        let moves = self.cursor.moves();
        let node = ChildNode::chain(&moves[first_draft..]).ok_or(Error::NoDraft)?;
        let target = moves[..first_draft].to_vec();
        self.perform_op(EditorOp::AddLine { node, index: None }, target, OpSource::Fresh)
    }

    /// Delete the node at the cursor and its subtree; the cursor moves to
    /// the parent.
    ///
    /// # Errors
    ///
    /// Fails at the root or on a draft.
    pub fn delete_line(&mut self) -> Result<()> {
        let path = self.cursor.current_path();
        let Some((mv, parent)) = path.split_last() else {
            return Err(Error::RootTarget {
                operation: "delete".to_string(),
            });
        };
        if self.cursor.is_draft() {
            return Err(Error::DraftTarget {
                operation: "delete".to_string(),
                path: display_path(&path),
            });
        }
        let op = EditorOp::DeleteLine { mv: mv.clone() };
        self.perform_op(op, parent.to_vec(), OpSource::Fresh)
    }

    /// Reorder the moves listed by line entry `ply`, i.e. the children of
    /// the node after `ply - 1` moves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReorder`] unless `order` is a permutation of
    /// those moves, and [`Error::MissingNode`] if `ply` is not on the line.
    pub fn reorder_moves(&mut self, ply: usize, order: Vec<Move>) -> Result<()> {
        let line_len = self.cursor.line().len();
        if ply == 0 || ply > line_len {
            return Err(Error::MissingNode {
                path: format!("ply {ply} of {line_len}"),
            });
        }
        let target = self.cursor.path(ply - 1);
        let current = self
            .cursor
            .root()
            .node(&target)
            .map(|node| node.child_moves());
        if current.as_ref() == Some(&order) {
            debug!(ply, "reorder matches current order; skipping");
            return Ok(());
        }
        self.perform_op(EditorOp::ReorderMoves { order }, target, OpSource::Fresh)
    }

    // Annotations

    /// Set the comment at the cursor; an empty string clears it.
    pub fn set_comment(&mut self, comment: &str) -> Result<()> {
        if self.cursor.is_draft() {
            debug!("comment on a draft node; skipping");
            return Ok(());
        }
        let comment = (!comment.is_empty()).then(|| comment.to_string());
        if comment.as_deref() == self.cursor.current_comment() {
            return Ok(());
        }
        let target = self.cursor.current_path();
        self.perform_op(EditorOp::SetComment { comment }, target, OpSource::Fresh)
    }

    /// Toggle a glyph on the node at the cursor, dropping any other glyph of
    /// the same class.
    pub fn toggle_nag(&mut self, nag: Nag) -> Result<()> {
        let Some(node) = self.cursor.current_child() else {
            debug!(?nag, "no committed node to annotate; skipping");
            return Ok(());
        };
        let nags = toggle_nag(&node.nags, nag);
        let target = self.cursor.current_path();
        self.perform_op(EditorOp::SetNags { nags }, target, OpSource::Fresh)
    }

    pub fn toggle_shape(&mut self, shape: Shape) -> Result<()> {
        let Some(node) = self.cursor.current_child() else {
            debug!("no committed node to draw on; skipping");
            return Ok(());
        };
        let shapes = toggle_shape(&node.shapes, shape);
        let target = self.cursor.current_path();
        self.perform_op(EditorOp::SetShapes { shapes }, target, OpSource::Fresh)
    }

    pub fn set_priority(&mut self, priority: Priority) -> Result<()> {
        let Some(node) = self.cursor.current_child() else {
            debug!(?priority, "no committed node to prioritise; skipping");
            return Ok(());
        };
        if node.priority == priority {
            return Ok(());
        }
        let target = self.cursor.current_path();
        self.perform_op(EditorOp::SetPriority { priority }, target, OpSource::Fresh)
    }

    // Game-level data

    pub fn set_training_color(&mut self, color: Option<Color>) -> Result<()> {
        if self.tree().color == color {
            return Ok(());
        }
        self.perform_op(EditorOp::SetTrainingColor { color }, Vec::new(), OpSource::Fresh)
    }

    /// Set a header, or remove it with `None`.
    pub fn set_header_value(&mut self, key: &str, value: Option<String>) -> Result<()> {
        if self.tree().headers.get(key) == value.as_ref() {
            return Ok(());
        }
        let op = EditorOp::SetHeaderValue {
            key: key.to_string(),
            value,
        };
        self.perform_op(op, Vec::new(), OpSource::Fresh)
    }

    /// Start the tree from `fen`, discarding every line. Undo brings the old
    /// position and lines back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFen`] if the rules backend rejects `fen`.
    pub fn set_initial_position(&mut self, fen: &str) -> Result<()> {
        if self.tree().initial_fen == fen {
            return Ok(());
        }
        let op = EditorOp::SetInitialPosition {
            fen: fen.to_string(),
            children: Vec::new(),
        };
        self.perform_op(op, Vec::new(), OpSource::Fresh)
    }

    // History

    /// Revert the most recent command. Does nothing when there is none.
    pub fn undo(&mut self) -> Result<()> {
        let Some(entry) = self.history.pop_undo() else {
            return Ok(());
        };
        self.replay(entry, OpSource::Undo)
    }

    /// Re-apply the most recently undone command. Does nothing when there is
    /// none.
    pub fn redo(&mut self) -> Result<()> {
        let Some(entry) = self.history.pop_redo() else {
            return Ok(());
        };
        self.replay(entry, OpSource::Redo)
    }

    pub fn clear_undo(&mut self) {
        self.history.clear();
        self.update_view();
    }

    fn replay(&mut self, entry: HistoryEntry, source: OpSource) -> Result<()> {
        debug!(
            ?source,
            op = entry.op.name(),
            path = %display_path(&entry.initial_moves),
            "replaying history entry"
        );
        self.cursor.set_moves(&entry.initial_moves)?;
        self.perform_op(entry.op, entry.initial_moves, source)
    }

    fn perform_op(&mut self, op: EditorOp, initial_moves: Vec<Move>, source: OpSource) -> Result<()> {
        let inverse = op.execute(&mut self.cursor, &initial_moves)?;
        self.history.record(
            HistoryEntry {
                initial_moves,
                op: inverse,
            },
            source,
        );
        self.update_view();
        Ok(())
    }

    fn update_view(&mut self) {
        let view = build_view(&self.cursor, &self.history);
        if *self.view != view {
            self.view = Arc::new(view);
        }
    }
}

fn build_view<P: Position>(cursor: &Cursor<P>, history: &History) -> EditorView<P> {
    let root = cursor.root();
    EditorView {
        line: cursor.line().to_vec(),
        ply: cursor.ply(),
        color: root.color,
        root_comment: root.comment.clone(),
        current_node: cursor.current_node(),
        position: cursor.position().clone(),
        last_move: cursor.last_move().cloned(),
        can_undo: history.can_undo(),
        can_redo: history.can_redo(),
        headers: root.headers.clone(),
    }
}
