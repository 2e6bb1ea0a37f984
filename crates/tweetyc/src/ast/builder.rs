//! Tree construction
//!
//! The parser hands finished subtrees to [`TreeBuilder::push`] bottom-up:
//! children first, then the node that contains them. Pushing a node links
//! each of its children to it, which is the only structural mutation a
//! tree ever sees.

use crate::common::Position;
use super::nodes::*;
use super::{Modifiers, Node, NodeId, SyntaxTree, TypeReference};

/// Incremental builder for a [`SyntaxTree`]
#[derive(Debug)]
pub struct TreeBuilder {
    name: String,
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Add a node and attach its structural children to it.
    ///
    /// # Panics
    ///
    /// Panics if a child id is unknown or already has a parent.
    pub fn push(&mut self, kind: NodeKind, position: Position) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let children = kind.children();
        self.nodes.push(Node {
            kind,
            position,
            parent: None,
        });
        self.add_children(id, &children);
        id
    }

    fn add_children(&mut self, parent: NodeId, children: &[NodeId]) {
        for child in children {
            self.add_child(parent, *child);
        }
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        // Children always precede their parent, which keeps the tree acyclic.
        assert!(
            child < parent,
            "node {} must be pushed before its parent {}",
            child,
            parent
        );
        let node = &mut self.nodes[child.index()];
        if let Some(existing) = node.parent {
            panic!(
                "node {} is already attached to {}; cannot attach it to {}",
                child, existing, parent
            );
        }
        node.parent = Some(parent);
    }

    /// Seal the tree with `root` as its program node.
    ///
    /// # Panics
    ///
    /// Panics if `root` is not a program node or if any other node was left
    /// without a parent.
    pub fn finish(self, root: NodeId) -> SyntaxTree {
        let Some(root_node) = self.nodes.get(root.index()) else {
            panic!("root {} does not exist in tree '{}'", root, self.name);
        };
        assert!(
            matches!(root_node.kind, NodeKind::Program(_)) && root_node.parent.is_none(),
            "root {} of tree '{}' must be an unattached program node",
            root,
            self.name
        );
        if let Some(orphan) = self
            .nodes
            .iter()
            .enumerate()
            .position(|(i, n)| i != root.index() && n.parent.is_none())
        {
            panic!("node #{} of tree '{}' was never attached", orphan, self.name);
        }

        SyntaxTree::from_parts(self.name, self.nodes, root)
    }

    pub fn program(&mut self, imports: Vec<NodeId>, modules: Vec<NodeId>, position: Position) -> NodeId {
        self.push(NodeKind::Program(ProgramNode { imports, modules }), position)
    }

    pub fn import(&mut self, module_name: impl Into<String>, position: Position) -> NodeId {
        let module_name = module_name.into();
        self.push(NodeKind::Import(ImportNode { module_name }), position)
    }

    pub fn module(&mut self, name: impl Into<String>, functions: Vec<NodeId>, position: Position) -> NodeId {
        self.module_with_structs(name, functions, Vec::new(), position)
    }

    pub fn module_with_structs(
        &mut self,
        name: impl Into<String>,
        functions: Vec<NodeId>,
        structs: Vec<NodeId>,
        position: Position,
    ) -> NodeId {
        let module = ModuleNode {
            name: name.into(),
            functions,
            structs,
        };
        self.push(NodeKind::Module(module), position)
    }

    pub fn structure(
        &mut self,
        name: impl Into<String>,
        modifiers: Modifiers,
        fields: Vec<NodeId>,
        functions: Vec<NodeId>,
        position: Position,
    ) -> NodeId {
        let node = StructNode {
            name: name.into(),
            modifiers,
            fields,
            functions,
        };
        self.push(NodeKind::Struct(node), position)
    }

    pub fn field(
        &mut self,
        name: impl Into<String>,
        ty: TypeReference,
        initializer: Option<NodeId>,
        position: Position,
    ) -> NodeId {
        let node = FieldNode {
            name: name.into(),
            ty,
            initializer,
        };
        self.push(NodeKind::Field(node), position)
    }

    pub fn function(
        &mut self,
        name: impl Into<String>,
        return_type: TypeReference,
        modifiers: Modifiers,
        parameters: Vec<NodeId>,
        body: Option<Vec<NodeId>>,
        position: Position,
    ) -> NodeId {
        let function = FunctionNode {
            name: name.into(),
            return_type,
            modifiers,
            parameters,
            body,
        };
        self.push(NodeKind::Function(function), position)
    }

    pub fn parameter(&mut self, name: impl Into<String>, ty: TypeReference, position: Position) -> NodeId {
        let name = name.into();
        self.push(NodeKind::Parameter(ParameterNode { name, ty }), position)
    }

    pub fn local(
        &mut self,
        name: impl Into<String>,
        ty: TypeReference,
        initializer: NodeId,
        position: Position,
    ) -> NodeId {
        let stmt = Statement::LocalDeclaration {
            name: name.into(),
            ty,
            initializer,
        };
        self.push(NodeKind::Statement(stmt), position)
    }

    pub fn assign(&mut self, name: impl Into<String>, value: NodeId, position: Position) -> NodeId {
        let name = name.into();
        self.push(NodeKind::Statement(Statement::Assignment { name, value }), position)
    }

    pub fn ret(&mut self, value: Option<NodeId>, position: Position) -> NodeId {
        self.push(NodeKind::Statement(Statement::Return { value }), position)
    }

    pub fn if_stmt(
        &mut self,
        condition: NodeId,
        then_block: Vec<NodeId>,
        else_block: Option<Vec<NodeId>>,
        position: Position,
    ) -> NodeId {
        let stmt = Statement::If {
            condition,
            then_block,
            else_block,
        };
        self.push(NodeKind::Statement(stmt), position)
    }

    pub fn expr_stmt(&mut self, expr: NodeId, position: Position) -> NodeId {
        self.push(NodeKind::Statement(Statement::Expression { expr }), position)
    }

    pub fn identifier(&mut self, name: impl Into<String>, position: Position) -> NodeId {
        self.push(NodeKind::Expression(Expression::Identifier(name.into())), position)
    }

    pub fn bool_lit(&mut self, value: bool, position: Position) -> NodeId {
        self.push(NodeKind::Expression(Expression::BooleanLiteral(value)), position)
    }

    pub fn int_lit(&mut self, value: i64, position: Position) -> NodeId {
        self.push(NodeKind::Expression(Expression::IntegerLiteral(value)), position)
    }

    pub fn char_lit(&mut self, value: char, position: Position) -> NodeId {
        self.push(NodeKind::Expression(Expression::CharacterLiteral(value)), position)
    }

    pub fn string_lit(&mut self, value: impl Into<String>, position: Position) -> NodeId {
        self.push(NodeKind::Expression(Expression::StringLiteral(value.into())), position)
    }

    pub fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId, position: Position) -> NodeId {
        self.push(NodeKind::Expression(Expression::Binary { op, left, right }), position)
    }

    pub fn call(&mut self, name: impl Into<String>, arguments: Vec<NodeId>, position: Position) -> NodeId {
        let name = name.into();
        self.push(NodeKind::Expression(Expression::Call { name, arguments }), position)
    }
}
