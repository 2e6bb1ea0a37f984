//! Rule extension contract

use crate::Compilation;
use crate::ast::*;
use crate::common::Diagnostic;
use crate::symbols::SymbolDictionary;

/// Errors and warnings in the order they were reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.errors.push(diagnostic);
        } else {
            self.warnings.push(diagnostic);
        }
    }

    /// Move everything from `other` to the end of `self`, leaving `other` empty.
    pub fn append(&mut self, other: &mut Diagnostics) {
        self.errors.append(&mut other.errors);
        self.warnings.append(&mut other.warnings);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// What a rule can see and do during one hook call.
pub struct RuleContext<'a> {
    compilation: &'a Compilation,
    dictionary: &'a SymbolDictionary,
    sink: &'a mut Diagnostics,
}

impl<'a> RuleContext<'a> {
    pub(crate) fn new(
        compilation: &'a Compilation,
        dictionary: &'a SymbolDictionary,
        sink: &'a mut Diagnostics,
    ) -> Self {
        Self {
            compilation,
            dictionary,
            sink,
        }
    }

    /// The whole compilation, for cross-tree queries
    pub fn compilation(&self) -> &'a Compilation {
        self.compilation
    }

    /// Symbols of the tree being walked
    pub fn dictionary(&self) -> &'a SymbolDictionary {
        self.dictionary
    }

    /// The tree being walked
    pub fn tree(&self) -> &'a SyntaxTree {
        self.dictionary.tree()
    }

    /// Report an error at `node`'s position.
    pub fn error(&mut self, node: NodeId, message: impl Into<String>) {
        let position = self.tree().position(node);
        self.sink.push(Diagnostic::error(position, message));
    }

    /// Report a warning at `node`'s position.
    pub fn warning(&mut self, node: NodeId, message: impl Into<String>) {
        let position = self.tree().position(node);
        self.sink.push(Diagnostic::warning(position, message));
    }
}

/// A semantic check.
///
/// Each hook is called once per matching node during the walk; hooks a
/// rule does not override do nothing. One instance lives for a whole
/// compilation, so a rule may keep running state across trees.
#[allow(unused_variables)]
pub trait Rule {
    /// Stable identifier used by configuration and logs
    fn name(&self) -> &'static str;

    fn analyze_program(&mut self, cx: &mut RuleContext<'_>, id: NodeId, program: &ProgramNode) {}

    fn analyze_module(&mut self, cx: &mut RuleContext<'_>, id: NodeId, module: &ModuleNode) {}

    fn analyze_function(&mut self, cx: &mut RuleContext<'_>, id: NodeId, function: &FunctionNode) {}

    fn analyze_statement(&mut self, cx: &mut RuleContext<'_>, id: NodeId, stmt: &Statement) {}

    fn analyze_expression(&mut self, cx: &mut RuleContext<'_>, id: NodeId, expr: &Expression) {}
}
