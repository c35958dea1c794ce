//! Chess move-tree editor
//!
//! This crate provides:
//! - A move tree of committed lines with comments, glyphs, shapes and
//!   training priorities
//! - A cursor that walks the tree and tries out draft moves without saving them
//! - Reversible edit commands with unbounded undo/redo
//! - Immutable view snapshots for a rendering layer to pull
//! - A versioned JSON envelope for trees
//!
//! Chess rules are not implemented here. The editor delegates legality and
//! notation to a [`ports::Position`] implementation supplied by the host.

pub mod adapters;
pub mod annotations;
pub mod config;
pub mod editor;
pub mod error;
pub mod identifiers;
pub mod ports;
pub mod tree;
pub mod types;

pub use annotations::{Brush, Nag, Priority, Shape};
pub use config::EditorConfig;
pub use editor::{Editor, EditorNode, EditorOp, EditorView};
pub use error::{Error, Result};
pub use identifiers::Move;
pub use ports::Position;
pub use tree::{ChildNode, Node, RootNode};
pub use types::{Color, Square};
