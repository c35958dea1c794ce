//! Persistent move tree: nodes, validation and serialization

pub mod node;
pub mod serialization;
pub mod validation;

pub use node::{ChildNode, Node, RootNode};
pub use serialization::{SavedTree, from_json, from_json_validated, to_json};
