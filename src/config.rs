//! Configuration for editor creation.

use serde::{Deserialize, Serialize};

use crate::Move;

/// Configuration for opening an [`crate::Editor`].
///
/// # Examples
///
/// ```
/// use movetree::{EditorConfig, identifiers::moves};
///
/// let config = EditorConfig::new()
///     .with_auto_advance(false)
///     .with_start_moves(moves(&["e4", "e5"]));
/// assert!(!config.auto_advance);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Extend the visible line along main-line children whenever the cursor
    /// sits at its end.
    pub auto_advance: bool,
    /// Path the cursor starts at.
    pub start_moves: Vec<Move>,
}

impl EditorConfig {
    /// Create a configuration with defaults:
    /// - auto-advance: on
    /// - start at the root
    pub fn new() -> Self {
        Self {
            auto_advance: true,
            start_moves: Vec::new(),
        }
    }

    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    pub fn with_start_moves(mut self, moves: Vec<Move>) -> Self {
        self.start_moves = moves;
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"start_moves": ["d4"]}"#).unwrap();
        assert!(config.auto_advance);
        assert_eq!(config.start_moves, vec![Move::new("d4")]);
    }
}
