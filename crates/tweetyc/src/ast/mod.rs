//! TweetyLang AST definitions
//!
//! Trees are stored as a flat node table owned by [`SyntaxTree`]. Nodes
//! refer to their children by [`NodeId`] and keep an id back-link to their
//! parent for upward lookup. The parser builds trees through
//! [`TreeBuilder`]; once sealed a tree is read-only.

mod builder;
mod nodes;
mod tree;
mod types;

pub use builder::TreeBuilder;
pub use nodes::*;
pub use tree::{Ancestors, Descendants, Node, NodeId, SyntaxTree};
pub use types::{Modifiers, TypeReference};
