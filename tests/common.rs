//! Common fixtures for the movetree test suite.
//!
//! Trees are described as SAN lines from the starting position; lines sharing
//! a prefix share nodes, and the first line through a node is its main line.

#![allow(dead_code)]

use movetree::{
    ChildNode, Editor, EditorConfig, Move, Node, RootNode,
    adapters::{NotationPosition, STARTING_FEN},
};

pub type TestEditor = Editor<NotationPosition>;

/// Split space-separated SAN into moves.
pub fn line(text: &str) -> Vec<Move> {
    text.split_whitespace().map(Move::new).collect()
}

/// Build a tree from SAN lines, reusing nodes for shared prefixes.
pub fn tree_from_lines(lines: &[&str]) -> RootNode {
    let mut root = RootNode::new(STARTING_FEN);
    for text in lines {
        let mut node: &mut dyn Node = &mut root;
        for mv in line(text) {
            let next: &mut ChildNode = match node.child_index(&mv) {
                Some(index) => &mut node.children_mut()[index],
                None => node.add_child(mv).expect("fixture moves are unique"),
            };
            node = next;
        }
    }
    root
}

pub fn editor_with(lines: &[&str]) -> TestEditor {
    Editor::new(tree_from_lines(lines)).expect("fixture tree opens")
}

/// Editor whose line stops at the cursor, so views show exactly what was
/// played.
pub fn manual_editor_with(lines: &[&str]) -> TestEditor {
    let config = EditorConfig::new().with_auto_advance(false);
    Editor::with_config(tree_from_lines(lines), config).expect("fixture tree opens")
}

/// `1.e4 e5 (1...Nf6) 2.Nf3 Nc6 3.Bc4`
pub fn italian() -> RootNode {
    tree_from_lines(&["e4 e5 Nf3 Nc6 Bc4", "e4 Nf6"])
}
