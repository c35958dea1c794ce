//! Ports (trait boundaries) for external dependencies.
//!
//! The editing engine owns these interfaces; concrete rules backends implement
//! them outside the core (see [`crate::adapters`] for the bundled one).

pub mod position;

pub use position::Position;
