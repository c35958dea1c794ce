//! Navigation cursor over the move tree.
//!
//! The cursor owns the tree and keeps three parallel arrays for the visible
//! line: the steps taken from the root, the position after each step, and a
//! render-ready [`EditorNode`] per step. `ply` says how far along the line the
//! user is; entries past it are the continuation being shown.
//!
//! Moves that are not in the tree become draft steps. Drafts only ever form a
//! suffix of the line, and they never touch the tree until an `AddLine`
//! command commits them.

use tracing::trace;

use super::view::{CurrentNode, EditorNode, MoveOption};
use crate::{
    Error, Move, Result,
    error::display_path,
    ports::Position,
    tree::{ChildNode, Node, RootNode, validation::validate_subtree},
};

/// How the line reaches a ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The move is a child in the tree.
    Committed(Move),
    /// The move was tried but not saved; the node lives only here.
    Draft(ChildNode),
}

impl Step {
    pub fn mv(&self) -> &Move {
        match self {
            Step::Committed(mv) => mv,
            Step::Draft(node) => &node.mv,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Step::Draft(_))
    }
}

#[derive(Debug, Clone)]
pub struct Cursor<P: Position> {
    root: RootNode,
    steps: Vec<Step>,
    /// `positions[i]` is the board after `i` steps; `positions[0]` is the root.
    positions: Vec<P>,
    line: Vec<EditorNode>,
    ply: usize,
    last_selected: Option<usize>,
    auto_advance: bool,
}

impl<P: Position> Cursor<P> {
    /// Place a cursor at the root of `root`.
    ///
    /// # Errors
    ///
    /// Fails if the initial FEN is rejected or a main-line move cannot be
    /// played while extending the line.
    pub fn new(root: RootNode, auto_advance: bool) -> Result<Self> {
        let position = P::from_fen(&root.initial_fen)?;
        let mut cursor = Self {
            root,
            steps: Vec::new(),
            positions: vec![position],
            line: Vec::new(),
            ply: 0,
            last_selected: None,
            auto_advance,
        };
        cursor.push_first_moves_if_at_line_end()?;
        cursor.update_selected();
        Ok(cursor)
    }

    pub fn root(&self) -> &RootNode {
        &self.root
    }

    pub fn into_root(self) -> RootNode {
        self.root
    }

    pub(crate) fn tree_mut(&mut self) -> &mut RootNode {
        &mut self.root
    }

    pub fn ply(&self) -> usize {
        self.ply
    }

    pub fn line(&self) -> &[EditorNode] {
        &self.line
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Board at the cursor.
    pub fn position(&self) -> &P {
        &self.positions[self.ply]
    }

    /// Every move of the visible line, including the continuation past `ply`.
    pub fn moves(&self) -> Vec<Move> {
        self.steps.iter().map(|step| step.mv().clone()).collect()
    }

    /// Moves from the root to the first `ply` steps.
    pub fn path(&self, ply: usize) -> Vec<Move> {
        self.steps[..ply.min(self.steps.len())]
            .iter()
            .map(|step| step.mv().clone())
            .collect()
    }

    /// Moves from the root to the cursor.
    pub fn current_path(&self) -> Vec<Move> {
        self.path(self.ply)
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.ply.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    pub fn is_draft(&self) -> bool {
        self.current_step().is_some_and(Step::is_draft)
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.current_step().map(Step::mv)
    }

    /// Index of the first draft step on the line.
    pub fn first_draft_index(&self) -> Option<usize> {
        self.steps.iter().position(Step::is_draft)
    }

    /// The committed tree node at the cursor; `None` at the root or on a draft.
    pub fn current_child(&self) -> Option<&ChildNode> {
        if self.ply == 0 || self.is_draft() {
            return None;
        }
        self.root.get_descendant(&self.current_path())
    }

    pub fn current_comment(&self) -> Option<&str> {
        match self.ply.checked_sub(1).and_then(|i| self.line.get(i)) {
            Some(entry) => entry.comment.as_deref(),
            None => self.root.comment(),
        }
    }

    pub fn current_node(&self) -> CurrentNode {
        match self.ply.checked_sub(1).and_then(|i| self.line.get(i)) {
            Some(entry) => CurrentNode {
                is_draft: entry.is_draft,
                comment: entry.comment.clone(),
                nags: entry.nags.clone(),
                shapes: entry.shapes.clone(),
                priority: entry.priority,
            },
            None => CurrentNode {
                comment: self.root.comment.clone(),
                ..CurrentNode::default()
            },
        }
    }

    /// Node reached after `ply` steps: the root, a tree node, or a draft.
    fn node(&self, ply: usize) -> Option<&dyn Node> {
        let mut node: &dyn Node = &self.root;
        for step in &self.steps[..ply] {
            node = match step {
                Step::Committed(mv) => node.get_child(mv)? as &dyn Node,
                Step::Draft(draft) => draft as &dyn Node,
            };
        }
        Some(node)
    }

    /// Whether the first `path.len()` steps are committed and spell `path`.
    fn follows(&self, path: &[Move]) -> bool {
        path.len() <= self.steps.len()
            && self
                .steps
                .iter()
                .zip(path)
                .all(|(step, mv)| !step.is_draft() && step.mv() == mv)
    }

    /// Whether `path` names a draft step on the line.
    pub(crate) fn is_draft_path(&self, path: &[Move]) -> bool {
        let Some(last) = path.len().checked_sub(1) else {
            return false;
        };
        path.len() <= self.steps.len()
            && self.steps[last].is_draft()
            && self.steps.iter().zip(path).all(|(step, mv)| step.mv() == mv)
    }

    /// Board after `path`, replayed from the root unless the line already
    /// covers it.
    pub(crate) fn position_at(&self, path: &[Move]) -> Result<P> {
        if path.len() <= self.steps.len()
            && self.steps.iter().zip(path).all(|(step, mv)| step.mv() == mv)
        {
            return Ok(self.positions[path.len()].clone());
        }
        let mut position = self.positions[0].clone();
        for mv in path {
            position.play(mv)?;
        }
        Ok(position)
    }

    /// Play `mv` from the cursor.
    ///
    /// If the line already continues with `mv` the cursor just advances;
    /// otherwise everything past the cursor is dropped and `mv` is pushed,
    /// as a committed step if the tree has it and as a draft if not.
    pub fn move_to(&mut self, mv: Move) -> Result<()> {
        if self.steps.get(self.ply).is_some_and(|step| step.mv() == &mv) {
            self.ply += 1;
            trace!(ply = self.ply, %mv, "advanced along line");
        } else {
            let position = self.positions[self.ply].after(&mv)?;
            self.trim_line(self.ply);
            self.push_move(mv, position)?;
            self.ply += 1;
            trace!(ply = self.ply, draft = self.is_draft(), "pushed move");
        }
        self.push_first_moves_if_at_line_end()?;
        self.update_selected();
        Ok(())
    }

    /// Step back one ply. Returns `false` at the root.
    pub fn move_backwards(&mut self) -> Result<bool> {
        if self.ply == 0 {
            return Ok(false);
        }
        self.ply -= 1;
        self.trim_end_draft_nodes()?;
        self.update_selected();
        trace!(ply = self.ply, "moved backwards");
        Ok(true)
    }

    /// Step forward one ply, descending into the main line at the line end.
    /// Returns `false` when there is nowhere to go.
    pub fn move_forwards(&mut self) -> Result<bool> {
        if self.ply < self.steps.len() {
            self.ply += 1;
            self.push_first_moves_if_at_line_end()?;
            self.update_selected();
            trace!(ply = self.ply, "moved forwards");
            return Ok(true);
        }

        let next = self
            .node(self.ply)
            .and_then(|node| node.children().first())
            .map(|child| child.mv.clone());
        match next {
            Some(mv) => self.move_to(mv).map(|()| true),
            None => Ok(false),
        }
    }

    /// Jump to an absolute move sequence, replaying it from the root.
    ///
    /// The whole path is checked against the rules backend before the line
    /// is touched.
    pub fn set_moves(&mut self, moves: &[Move]) -> Result<()> {
        let mut position = self.positions[0].clone();
        let mut positions = Vec::with_capacity(moves.len());
        for mv in moves {
            position.play(mv)?;
            positions.push(position.clone());
        }

        self.reset();
        for (mv, position) in moves.iter().zip(positions) {
            self.push_move(mv.clone(), position)?;
        }
        self.ply = moves.len();
        self.push_first_moves_if_at_line_end()?;
        self.update_selected();
        trace!(ply = self.ply, path = %display_path(moves), "set moves");
        Ok(())
    }

    /// Drop the whole line and stand at the root.
    pub(crate) fn reset(&mut self) {
        self.trim_line(0);
        self.ply = 0;
    }

    /// Truncate the line to `len` steps.
    fn trim_line(&mut self, len: usize) {
        self.steps.truncate(len);
        self.positions.truncate(len + 1);
        self.line.truncate(len);
        if self.last_selected.is_some_and(|selected| selected >= len) {
            self.last_selected = None;
        }
        self.ply = self.ply.min(len);
    }

    /// Append `mv` (already played into `position`) to the line end.
    fn push_move(&mut self, mv: Move, position: P) -> Result<()> {
        let committed = self
            .node(self.steps.len())
            .is_some_and(|parent| parent.get_child(&mv).is_some());
        let step = if committed {
            Step::Committed(mv)
        } else {
            Step::Draft(ChildNode::new(mv))
        };

        self.steps.push(step);
        self.positions.push(position);
        let ply = self.steps.len();
        let entry = match self.build_editor_node(ply) {
            Ok(entry) => entry,
            Err(err) => {
                self.steps.pop();
                self.positions.pop();
                return Err(err);
            }
        };
        self.line.push(entry);
        self.refresh_padding(ply - 1);
        Ok(())
    }

    /// At the line end, keep descending through first children so the view
    /// shows the whole main-line continuation.
    fn push_first_moves_if_at_line_end(&mut self) -> Result<()> {
        if !self.auto_advance || self.ply != self.steps.len() {
            return Ok(());
        }
        self.push_main_line()
    }

    fn push_main_line(&mut self) -> Result<()> {
        loop {
            let len = self.steps.len();
            let Some(mv) = self
                .node(len)
                .and_then(|node| node.children().first())
                .map(|child| child.mv.clone())
            else {
                return Ok(());
            };
            let position = self.positions[len].after(&mv)?;
            self.push_move(mv, position)?;
        }
    }

    /// Forget draft steps the cursor has backed out of.
    fn trim_end_draft_nodes(&mut self) -> Result<()> {
        let Some(first_draft) = self.first_draft_index() else {
            return Ok(());
        };
        let keep = first_draft.max(self.ply);
        if keep < self.steps.len() {
            self.trim_line(keep);
            self.push_first_moves_if_at_line_end()?;
        }
        Ok(())
    }

    fn build_editor_node(&self, ply: usize) -> Result<EditorNode> {
        let parent_position = &self.positions[ply - 1];
        let siblings = self
            .node(ply - 1)
            .map(|parent| parent.children())
            .unwrap_or_default();
        let mut moves: Vec<MoveOption> = siblings
            .iter()
            .map(|child| MoveOption::new(parent_position, child))
            .collect();

        let (index, node) = match &self.steps[ply - 1] {
            Step::Committed(mv) => {
                let index = siblings
                    .iter()
                    .position(|child| &child.mv == mv)
                    .ok_or_else(|| Error::MissingNode {
                        path: display_path(&self.path(ply)),
                    })?;
                (index, &siblings[index])
            }
            Step::Draft(draft) => {
                moves.push(MoveOption::new(parent_position, draft));
                (moves.len() - 1, draft)
            }
        };

        let padding = self.line.get(ply - 1).map_or(0, |entry| entry.padding);
        Ok(EditorNode {
            moves,
            index,
            is_draft: self.steps[ply - 1].is_draft(),
            selected: self.last_selected == Some(ply - 1),
            comment: node.comment.clone(),
            nags: node.nags.clone(),
            shapes: node.shapes.clone(),
            priority: node.priority,
            path: self.path(ply),
            padding,
        })
    }

    /// Rebuild the entry for `ply` from the tree, then fix paddings after it.
    fn refresh_editor_node(&mut self, ply: usize) -> Result<()> {
        if ply == 0 || ply > self.line.len() {
            return Ok(());
        }
        self.line[ply - 1] = self.build_editor_node(ply)?;
        self.refresh_padding(ply - 1);
        Ok(())
    }

    /// Recompute paddings for line entries from index `from` on.
    fn refresh_padding(&mut self, from: usize) {
        for i in from..self.line.len() {
            self.line[i].padding = match i.checked_sub(1) {
                Some(prev) => self.line[prev].padding + self.line[prev].index,
                None => 0,
            };
        }
    }

    /// Keep exactly one entry selected: the one at `ply`, none at the root.
    fn update_selected(&mut self) {
        let selected = self.ply.checked_sub(1);
        if self.last_selected == selected {
            return;
        }
        if let Some(entry) = self.last_selected.and_then(|i| self.line.get_mut(i)) {
            entry.selected = false;
        }
        if let Some(entry) = selected.and_then(|i| self.line.get_mut(i)) {
            entry.selected = true;
        }
        self.last_selected = selected;
    }

    /// After annotating the node at `path`, refresh its entry if it is shown.
    pub(crate) fn refresh_path(&mut self, path: &[Move]) -> Result<()> {
        if !path.is_empty() && self.follows(path) {
            self.refresh_editor_node(path.len())?;
        }
        Ok(())
    }

    /// After reordering the children of `path`, refresh the entry listing them.
    pub(crate) fn refresh_children_of(&mut self, path: &[Move]) -> Result<()> {
        if self.follows(path) {
            self.refresh_editor_node(path.len() + 1)?;
        }
        Ok(())
    }

    /// After inserting `mv` under `parent`, route the line through it along
    /// its main line, committing any drafts that spelled the same moves. The
    /// cursor keeps its ply where the new line allows.
    pub(crate) fn show_added_line(&mut self, parent: &[Move], mv: &Move) -> Result<()> {
        if !self.follows(parent) {
            self.set_moves(parent)?;
        }
        let ply = self.ply;
        self.trim_line(parent.len());
        let position = self.positions[parent.len()].after(mv)?;
        self.push_move(mv.clone(), position)?;
        self.push_main_line()?;
        self.ply = ply.min(self.steps.len());
        self.update_selected();
        Ok(())
    }

    /// After removing `mv` from under `parent`, drop it from the line and
    /// fall back to the parent if the cursor was inside the removed line.
    pub(crate) fn after_delete(&mut self, parent: &[Move], mv: &Move) -> Result<()> {
        if !self.follows(parent) {
            return Ok(());
        }
        if self.steps.get(parent.len()).is_some_and(|step| step.mv() == mv) {
            self.trim_line(parent.len());
            self.push_first_moves_if_at_line_end()?;
        } else {
            self.refresh_children_of(parent)?;
        }
        self.update_selected();
        Ok(())
    }

    /// Swap the starting position and top-level children, returning the old
    /// ones. `children` must be playable from `fen`; nothing changes if not.
    pub(crate) fn replace_initial_position(
        &mut self,
        fen: String,
        children: Vec<ChildNode>,
    ) -> Result<(String, Vec<ChildNode>)> {
        let position = P::from_fen(&fen)?;
        for child in &children {
            validate_subtree(child, &position, &[])?;
        }

        let old_fen = std::mem::replace(&mut self.root.initial_fen, fen);
        let old_children = std::mem::replace(&mut self.root.children, children);
        self.reset();
        self.positions[0] = position;
        self.push_first_moves_if_at_line_end()?;
        self.update_selected();
        Ok((old_fen, old_children))
    }
}
