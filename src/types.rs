//! Newtype wrappers for improved type safety and domain modeling.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A square on the chess board, `a1` = 0 through `h8` = 63.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square(u8);

impl Square {
    /// Create a square from its index, validating it's on the board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidSquare`] if the index is >= 64.
    pub fn new(index: u8) -> Result<Self, crate::Error> {
        if index < 64 {
            Ok(Square(index))
        } else {
            Err(crate::Error::InvalidSquare {
                square: index.to_string(),
            })
        }
    }

    /// Get the inner index.
    pub fn index(&self) -> u8 {
        self.0
    }

    /// File, 0 (`a`) to 7 (`h`).
    pub fn file(&self) -> u8 {
        self.0 % 8
    }

    /// Rank, 0 (`1`) to 7 (`8`).
    pub fn rank(&self) -> u8 {
        self.0 / 8
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidSquare {
            square: s.to_string(),
        };
        let bytes = s.trim().as_bytes();
        let [file, rank] = bytes else {
            return Err(invalid());
        };
        let file = file.to_ascii_lowercase();
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(rank) {
            return Err(invalid());
        }
        Ok(Square((rank - b'1') * 8 + (file - b'a')))
    }
}

impl TryFrom<String> for Square {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

/// A side of the board.
///
/// On the root node this records which side the user is editing or training
/// as; `None` there means both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Get the opposing side
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}
