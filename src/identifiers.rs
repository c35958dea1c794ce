//! Move identifier used to key children in the move tree.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// A move, in whatever canonical text form the rules backend produces.
///
/// The editor never interprets the text: two moves are the same move exactly
/// when their text is equal, which is what makes them usable as sibling keys.
/// Rendering for display goes through [`crate::ports::Position::render_move`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Move(String);

impl Move {
    /// Create a new move.
    ///
    /// # Examples
    ///
    /// ```
    /// use movetree::Move;
    ///
    /// let mv = Move::new("Nf3");
    /// assert_eq!(mv.as_str(), "Nf3");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the move text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the move into its inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Build a move path from string slices, e.g. `moves(&["e4", "e5"])`.
pub fn moves(texts: &[&str]) -> Vec<Move> {
    texts.iter().copied().map(Move::from).collect()
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Move {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<Move> for &str {
    fn eq(&self, other: &Move) -> bool {
        *self == other.as_str()
    }
}

impl Borrow<str> for Move {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for Move {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Move {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Move {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
