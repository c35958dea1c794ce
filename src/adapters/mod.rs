//! Adapters implementing domain ports.
//!
//! Adapters depend on the ports in [`crate::ports`], never the other way
//! around.

pub mod notation_position;

pub use notation_position::{NotationPosition, STARTING_FEN};
