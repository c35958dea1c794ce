//! Node annotations: glyphs, board shapes and training priority.

use serde::{Deserialize, Serialize};

use crate::types::Square;

/// A Numeric Annotation Glyph, identified by its standard numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nag(pub u8);

/// The two mutually exclusive glyph families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NagClass {
    /// How good the move itself was (`!`, `?`, `!!`, ...).
    MoveQuality,
    /// Who stands better afterwards (`=`, `±`, ...).
    Position,
}

impl Nag {
    pub const GOOD: Nag = Nag(1);
    pub const MISTAKE: Nag = Nag(2);
    pub const BRILLIANT: Nag = Nag(3);
    pub const BLUNDER: Nag = Nag(4);
    pub const INTERESTING: Nag = Nag(5);
    pub const DUBIOUS: Nag = Nag(6);
    pub const EQUAL: Nag = Nag(10);
    pub const UNCLEAR: Nag = Nag(13);
    pub const WHITE_SLIGHTLY_BETTER: Nag = Nag(14);
    pub const BLACK_SLIGHTLY_BETTER: Nag = Nag(15);
    pub const WHITE_BETTER: Nag = Nag(16);
    pub const BLACK_BETTER: Nag = Nag(17);
    pub const WHITE_WINNING: Nag = Nag(18);
    pub const BLACK_WINNING: Nag = Nag(19);

    /// Glyph family, or `None` for codes outside both families.
    pub fn class(self) -> Option<NagClass> {
        match self.0 {
            1..=6 => Some(NagClass::MoveQuality),
            10 | 13..=19 => Some(NagClass::Position),
            _ => None,
        }
    }

    /// Display text, e.g. `"?!"` or `"±"`; unknown codes render as `$n`.
    pub fn glyph(self) -> String {
        let text = match self.0 {
            1 => "!",
            2 => "?",
            3 => "!!",
            4 => "??",
            5 => "!?",
            6 => "?!",
            10 => "=",
            13 => "∞",
            14 => "⩲",
            15 => "⩱",
            16 => "±",
            17 => "∓",
            18 => "+−",
            19 => "−+",
            code => return format!("${code}"),
        };
        text.to_string()
    }
}

/// Toggle `nag` in a glyph set.
///
/// A present glyph is removed and nothing else changes. An absent glyph is
/// added and evicts any other glyph of its class. The result is sorted by code.
pub fn toggle_nag(nags: &[Nag], nag: Nag) -> Vec<Nag> {
    if nags.contains(&nag) {
        return nags.iter().copied().filter(|&n| n != nag).collect();
    }

    let mut result: Vec<Nag> = match nag.class() {
        Some(class) => nags
            .iter()
            .copied()
            .filter(|n| n.class() != Some(class))
            .collect(),
        None => nags.to_vec(),
    };
    result.push(nag);
    result.sort();
    result
}

/// Concatenated glyph text for a set, e.g. `"!?±"`.
pub fn glyph_text(nags: &[Nag]) -> String {
    nags.iter().map(|nag| nag.glyph()).collect()
}

/// Training bias for a move, consumed by the trainer when choosing lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    TrainFirst,
    #[default]
    Default,
    TrainLast,
}

/// Brush color of a board shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brush {
    #[default]
    Green,
    Red,
    Blue,
    Yellow,
}

/// A board overlay: a circled square (`dest == None`) or an arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub orig: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<Square>,
    #[serde(default)]
    pub brush: Brush,
}

impl Shape {
    pub fn circle(square: Square, brush: Brush) -> Self {
        Shape {
            orig: square,
            dest: None,
            brush,
        }
    }

    pub fn arrow(orig: Square, dest: Square, brush: Brush) -> Self {
        Shape {
            orig,
            dest: Some(dest),
            brush,
        }
    }

    fn same_squares(&self, other: &Shape) -> bool {
        self.orig == other.orig && self.dest == other.dest
    }
}

/// Toggle `shape` in a shape list.
///
/// An identical shape is removed; a shape on the same squares with another
/// brush is replaced in place; otherwise the shape is appended.
pub fn toggle_shape(shapes: &[Shape], shape: Shape) -> Vec<Shape> {
    if shapes.contains(&shape) {
        return shapes.iter().copied().filter(|s| *s != shape).collect();
    }

    let mut result = shapes.to_vec();
    match result.iter_mut().find(|s| s.same_squares(&shape)) {
        Some(existing) => existing.brush = shape.brush,
        None => result.push(shape),
    }
    result
}
