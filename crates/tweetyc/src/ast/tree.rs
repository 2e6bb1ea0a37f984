//! Syntax tree storage and structural navigation

use std::fmt;

use crate::common::Position;
use super::nodes::*;

/// Index of a node inside its [`SyntaxTree`].
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("syntax tree exceeds u32::MAX nodes"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node with its source position and parent link.
///
/// The parent is a plain id used for upward lookup only; ownership runs
/// through the tree's node table.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Position,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// An immutable, fully linked program tree.
///
/// Built once through [`TreeBuilder`](super::TreeBuilder); nothing in the
/// analysis layer mutates it afterwards.
#[derive(Debug)]
pub struct SyntaxTree {
    name: String,
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    pub(crate) fn from_parts(name: String, nodes: Vec<Node>, root: NodeId) -> Self {
        Self { name, nodes, root }
    }

    /// Display name, usually the source file path
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("node {} does not belong to tree '{}'", id, self.name),
        }
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn position(&self, id: NodeId) -> Position {
        self.node(id).position
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Structural children of a node, per its kind
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.kind(id).children()
    }

    /// Proper ancestors, nearest first.
    ///
    /// Unlike a walk that stops below the root, the chain includes the
    /// program root itself, so lookups such as "the program this node
    /// belongs to" resolve through it. The root has no ancestors.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Pre-order traversal of everything below `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack = self.children(id);
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Pre-order traversal starting with `id` itself.
    pub fn descendants_and_self(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    pub fn program(&self) -> &ProgramNode {
        match self.kind(self.root) {
            NodeKind::Program(program) => program,
            other => unreachable!("tree root is a {}", other.name()),
        }
    }

    pub fn import(&self, id: NodeId) -> Option<&ImportNode> {
        match self.kind(id) {
            NodeKind::Import(import) => Some(import),
            _ => None,
        }
    }

    pub fn module(&self, id: NodeId) -> Option<&ModuleNode> {
        match self.kind(id) {
            NodeKind::Module(module) => Some(module),
            _ => None,
        }
    }

    pub fn struct_node(&self, id: NodeId) -> Option<&StructNode> {
        match self.kind(id) {
            NodeKind::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn function(&self, id: NodeId) -> Option<&FunctionNode> {
        match self.kind(id) {
            NodeKind::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn parameter(&self, id: NodeId) -> Option<&ParameterNode> {
        match self.kind(id) {
            NodeKind::Parameter(param) => Some(param),
            _ => None,
        }
    }

    pub fn statement(&self, id: NodeId) -> Option<&Statement> {
        match self.kind(id) {
            NodeKind::Statement(stmt) => Some(stmt),
            _ => None,
        }
    }

    pub fn expression(&self, id: NodeId) -> Option<&Expression> {
        match self.kind(id) {
            NodeKind::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    /// Nearest module containing `id`
    pub fn enclosing_module(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|a| self.module(*a).is_some())
    }

    /// Nearest function containing `id`
    pub fn enclosing_function(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|a| self.function(*a).is_some())
    }
}

/// Upward walk produced by [`SyntaxTree::ancestors`]
pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order walk produced by [`SyntaxTree::descendants`]
pub struct Descendants<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        let children = self.tree.children(current);
        self.stack.extend(children.into_iter().rev());
        Some(current)
    }
}
