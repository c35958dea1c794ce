//! Position port - the chess rules delegate.
//!
//! The editor never decides whether a move is legal or how it is written. It
//! hands both questions to an implementation of this trait, which owns the
//! board representation.

use std::fmt;

use crate::{Move, Result};

/// A board position that moves can be played on.
///
/// # Contract
///
/// - [`play`](Position::play) mutates in place and, on error, leaves the
///   position unchanged.
/// - [`fen`](Position::fen) round-trips through [`from_fen`](Position::from_fen).
/// - Moves returned by [`parse_move`](Position::parse_move) are canonical: two
///   texts naming the same move parse to equal [`Move`] values. Sibling
///   uniqueness in the tree relies on this.
///
/// # Examples
///
/// ```
/// use movetree::{adapters::NotationPosition, ports::Position};
///
/// let mut position = NotationPosition::starting();
/// let mv = position.parse_move("e4")?;
/// position.play(&mv)?;
/// assert_eq!(position.render_move(&position.parse_move("e5")?), "e5");
/// # Ok::<(), movetree::Error>(())
/// ```
pub trait Position: Clone + fmt::Debug + PartialEq {
    /// Build a position from FEN text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidFen`] if the text is not a usable FEN.
    fn from_fen(fen: &str) -> Result<Self>;

    /// FEN text of this position.
    fn fen(&self) -> String;

    /// Parse move text (SAN or any notation the backend accepts).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidMoveText`] or
    /// [`crate::Error::IllegalMove`] when the text does not name a legal move.
    fn parse_move(&self, text: &str) -> Result<Move>;

    /// Render a move for display, normally in SAN.
    fn render_move(&self, mv: &Move) -> String;

    /// Play a move, mutating this position.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalMove`] if the move is not playable here.
    fn play(&mut self, mv: &Move) -> Result<()>;

    /// Return the position after `mv` without touching `self`.
    fn after(&self, mv: &Move) -> Result<Self> {
        let mut next = self.clone();
        next.play(mv)?;
        Ok(next)
    }
}
