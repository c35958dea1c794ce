//! Rules-agnostic position that treats SAN text as move identity.
//!
//! This adapter tracks only what can be known without a move generator: side
//! to move, the move counters, and the moves played since the FEN. The piece
//! placement is carried verbatim. Any text shaped like SAN is playable, which
//! makes it suitable for tests and for notation-only tools; hosts that need
//! legality plug a real rules backend into [`Position`] instead.

use crate::{Error, Move, Result, ports::Position, types::Color};

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotationPosition {
    placement: String,
    side: Color,
    castling: String,
    en_passant: String,
    halfmove: u32,
    fullmove: u32,
    played: Vec<Move>,
}

impl NotationPosition {
    /// The standard starting position.
    pub fn starting() -> Self {
        Self {
            placement: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".to_string(),
            side: Color::White,
            castling: "KQkq".to_string(),
            en_passant: "-".to_string(),
            halfmove: 0,
            fullmove: 1,
            played: Vec::new(),
        }
    }

    pub fn side_to_move(&self) -> Color {
        self.side
    }

    pub fn fullmove(&self) -> u32 {
        self.fullmove
    }

    /// Moves played since the position was built from FEN.
    pub fn played(&self) -> &[Move] {
        &self.played
    }
}

impl Default for NotationPosition {
    fn default() -> Self {
        Self::starting()
    }
}

impl Position for NotationPosition {
    fn from_fen(fen: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidFen {
            fen: fen.to_string(),
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(invalid("expected 4 or 6 space-separated fields"));
        }

        let placement = fields[0];
        if placement.split('/').count() != 8 {
            return Err(invalid("piece placement must have 8 ranks"));
        }
        if !placement
            .chars()
            .all(|c| c == '/' || ('1'..='8').contains(&c) || "pnbrqkPNBRQK".contains(c))
        {
            return Err(invalid("unexpected character in piece placement"));
        }

        let side = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(invalid("side to move must be 'w' or 'b'")),
        };

        let (halfmove, fullmove) = if fields.len() == 6 {
            let halfmove = fields[4]
                .parse::<u32>()
                .map_err(|_| invalid("halfmove clock is not a number"))?;
            let fullmove = fields[5]
                .parse::<u32>()
                .ok()
                .filter(|&n| n >= 1)
                .ok_or_else(|| invalid("fullmove number must be a positive number"))?;
            (halfmove, fullmove)
        } else {
            (0, 1)
        };

        Ok(Self {
            placement: placement.to_string(),
            side,
            castling: fields[2].to_string(),
            en_passant: fields[3].to_string(),
            halfmove,
            fullmove,
            played: Vec::new(),
        })
    }

    fn fen(&self) -> String {
        let side = match self.side {
            Color::White => "w",
            Color::Black => "b",
        };
        format!(
            "{} {side} {} {} {} {}",
            self.placement, self.castling, self.en_passant, self.halfmove, self.fullmove
        )
    }

    fn parse_move(&self, text: &str) -> Result<Move> {
        let san = canonical_san(text).ok_or_else(|| Error::InvalidMoveText {
            text: text.to_string(),
            reason: "not shaped like SAN".to_string(),
        })?;
        Ok(Move::new(san))
    }

    fn render_move(&self, mv: &Move) -> String {
        mv.as_str().to_string()
    }

    fn play(&mut self, mv: &Move) -> Result<()> {
        if canonical_san(mv.as_str()).as_deref() != Some(mv.as_str()) {
            return Err(Error::IllegalMove {
                mv: mv.to_string(),
                reason: "not canonical SAN".to_string(),
            });
        }

        let resets_clock = mv.as_str().contains('x')
            || mv.as_str().starts_with(|c: char| c.is_ascii_lowercase());
        self.halfmove = if resets_clock { 0 } else { self.halfmove + 1 };
        if self.side == Color::Black {
            self.fullmove += 1;
        }
        self.side = self.side.opponent();
        self.en_passant = "-".to_string();
        self.played.push(mv.clone());
        Ok(())
    }
}

/// Normalise SAN text: trims, drops trailing `!`/`?` glyphs and writes
/// castling with the letter O. Returns `None` if the text is not SAN-shaped.
fn canonical_san(text: &str) -> Option<String> {
    let san = text.trim().trim_end_matches(['!', '?']);
    let castling = san.replace('0', "O");
    let (body, suffix) = split_check_suffix(&castling);
    if body == "O-O" || body == "O-O-O" {
        return Some(format!("{body}{suffix}"));
    }

    let (body, suffix) = split_check_suffix(san);
    if !(2..=7).contains(&body.len()) {
        return None;
    }
    let allowed = |c: char| matches!(c, 'a'..='h' | '1'..='8' | 'K' | 'Q' | 'R' | 'B' | 'N' | 'x' | '=');
    if !body.chars().all(allowed) {
        return None;
    }
    let first = body.chars().next()?;
    if !matches!(first, 'a'..='h' | 'K' | 'Q' | 'R' | 'B' | 'N') {
        return None;
    }
    if !body.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(format!("{body}{suffix}"))
}

fn split_check_suffix(san: &str) -> (&str, &str) {
    match san.strip_suffix(['+', '#']) {
        Some(body) => (body, &san[body.len()..]),
        None => (san, ""),
    }
}
