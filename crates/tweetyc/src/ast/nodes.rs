//! AST node kinds
//!
//! Child nodes are referenced by [`NodeId`] into the owning
//! [`SyntaxTree`](super::SyntaxTree); no node owns another directly.

use super::{Modifiers, NodeId, TypeReference};

/// The closed set of node kinds
#[derive(Debug, Clone)]
pub enum NodeKind {
    Program(ProgramNode),
    Import(ImportNode),
    Module(ModuleNode),
    Struct(StructNode),
    Field(FieldNode),
    Function(FunctionNode),
    Parameter(ParameterNode),
    Statement(Statement),
    Expression(Expression),
}

impl NodeKind {
    /// Structural children in traversal order.
    ///
    /// Literals and identifiers have none.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Program(p) => p.imports.iter().chain(&p.modules).copied().collect(),
            NodeKind::Import(_) | NodeKind::Parameter(_) => Vec::new(),
            NodeKind::Module(m) => m.functions.iter().chain(&m.structs).copied().collect(),
            NodeKind::Struct(s) => s.fields.iter().chain(&s.functions).copied().collect(),
            NodeKind::Field(f) => f.initializer.into_iter().collect(),
            NodeKind::Function(f) => f
                .parameters
                .iter()
                .chain(f.body.iter().flatten())
                .copied()
                .collect(),
            NodeKind::Statement(stmt) => stmt.children(),
            NodeKind::Expression(expr) => expr.children(),
        }
    }

    /// Short kind name for messages and logs
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Program(_) => "program",
            NodeKind::Import(_) => "import",
            NodeKind::Module(_) => "module",
            NodeKind::Struct(_) => "struct",
            NodeKind::Field(_) => "field",
            NodeKind::Function(_) => "function",
            NodeKind::Parameter(_) => "parameter",
            NodeKind::Statement(_) => "statement",
            NodeKind::Expression(_) => "expression",
        }
    }
}

/// Root of a syntax tree
#[derive(Debug, Clone, Default)]
pub struct ProgramNode {
    pub imports: Vec<NodeId>,
    pub modules: Vec<NodeId>,
}

/// `import Name;`
#[derive(Debug, Clone)]
pub struct ImportNode {
    pub module_name: String,
}

/// `module Name { ... }`
#[derive(Debug, Clone)]
pub struct ModuleNode {
    pub name: String,
    pub functions: Vec<NodeId>,
    pub structs: Vec<NodeId>,
}

/// `export struct Name { fields; methods }`
#[derive(Debug, Clone)]
pub struct StructNode {
    pub name: String,
    pub modifiers: Modifiers,
    pub fields: Vec<NodeId>,
    pub functions: Vec<NodeId>,
}

/// Struct field, optionally with a default value
#[derive(Debug, Clone)]
pub struct FieldNode {
    pub name: String,
    pub ty: TypeReference,
    pub initializer: Option<NodeId>,
}

/// Function definition.
///
/// `body` is `None` for declarations without a block, which is only
/// well-formed for `extern` functions.
#[derive(Debug, Clone)]
pub struct FunctionNode {
    pub name: String,
    pub return_type: TypeReference,
    pub modifiers: Modifiers,
    pub parameters: Vec<NodeId>,
    pub body: Option<Vec<NodeId>>,
}

impl FunctionNode {
    pub fn is_export(&self) -> bool {
        self.modifiers.contains(Modifiers::EXPORT)
    }

    pub fn is_extern(&self) -> bool {
        self.modifiers.contains(Modifiers::EXTERN)
    }
}

#[derive(Debug, Clone)]
pub struct ParameterNode {
    pub name: String,
    pub ty: TypeReference,
}

/// Statement kinds
#[derive(Debug, Clone)]
pub enum Statement {
    /// Local variable declaration: i32 x = 5;
    LocalDeclaration {
        name: String,
        ty: TypeReference,
        initializer: NodeId,
    },
    /// Assignment to an existing variable: x = 5;
    Assignment { name: String, value: NodeId },
    /// return; or return x;
    Return { value: Option<NodeId> },
    /// if (cond) { ... } else { ... }
    If {
        condition: NodeId,
        then_block: Vec<NodeId>,
        else_block: Option<Vec<NodeId>>,
    },
    /// Expression evaluated for its effect: f(1);
    Expression { expr: NodeId },
}

impl Statement {
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Statement::LocalDeclaration { initializer, .. } => vec![*initializer],
            Statement::Assignment { value, .. } => vec![*value],
            Statement::Return { value } => value.iter().copied().collect(),
            Statement::If {
                condition,
                then_block,
                else_block,
            } => std::iter::once(*condition)
                .chain(then_block.iter().copied())
                .chain(else_block.iter().flatten().copied())
                .collect(),
            Statement::Expression { expr } => vec![*expr],
        }
    }
}

/// Expression kinds
#[derive(Debug, Clone)]
pub enum Expression {
    /// Identifier: x, foo
    Identifier(String),
    /// Boolean literal: true, false
    BooleanLiteral(bool),
    /// Integer literal: 42
    IntegerLiteral(i64),
    /// Character literal: 'a'
    CharacterLiteral(char),
    /// String literal: "hello"
    StringLiteral(String),
    /// Binary operation: a + b
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    /// Function call: foo(x, y)
    Call { name: String, arguments: Vec<NodeId> },
}

impl Expression {
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Expression::Binary { left, right, .. } => vec![*left, *right],
            Expression::Call { arguments, .. } => arguments.clone(),
            Expression::Identifier(_)
            | Expression::BooleanLiteral(_)
            | Expression::IntegerLiteral(_)
            | Expression::CharacterLiteral(_)
            | Expression::StringLiteral(_) => Vec::new(),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /

    // Comparison
    Eq, // ==
    Ne, // !=
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=

    // Logical
    And, // &&
    Or,  // ||
}
