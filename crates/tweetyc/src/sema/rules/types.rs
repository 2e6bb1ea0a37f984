//! Declaration and assignment type compatibility

use crate::ast::{Expression, NodeId, NodeKind, Statement, TypeReference};
use crate::sema::{Rule, RuleContext};
use crate::symbols::{Symbol, VariableSymbol};

/// The initializer or assigned value must have the variable's declared type.
///
/// Only literal types are inferred. An identifier is taken to have the
/// expected type without consulting its own declaration, and anything else
/// has no inferred type; neither case ever reports a mismatch.
#[derive(Debug, Default)]
pub struct TypeDeclAssignRule;

impl Rule for TypeDeclAssignRule {
    fn name(&self) -> &'static str {
        "type-declaration-assignment"
    }

    fn analyze_statement(&mut self, cx: &mut RuleContext<'_>, id: NodeId, stmt: &Statement) {
        match stmt {
            Statement::LocalDeclaration {
                name, initializer, ..
            } => check_declaration(cx, id, name, *initializer),
            Statement::Assignment { name, value } => check_assignment(cx, id, name, *value),
            _ => {}
        }
    }
}

fn check_declaration(cx: &mut RuleContext<'_>, id: NodeId, name: &str, initializer: NodeId) {
    let Some(variable) = cx.dictionary().declared_symbol_as::<VariableSymbol>(id) else {
        cx.error(id, format!("No symbol found for variable '{}'.", name));
        return;
    };

    match infer_type(cx, initializer, &variable.ty) {
        Some(actual) if actual != variable.ty => {
            cx.error(
                id,
                format!(
                    "Type mismatch: Expression type '{}' does not match declared type '{}'.",
                    actual, variable.ty
                ),
            );
        }
        _ => {}
    }
}

fn check_assignment(cx: &mut RuleContext<'_>, id: NodeId, name: &str, value: NodeId) {
    let Some((declared_name, declared_ty)) = previous_declaration(cx, id, name) else {
        cx.error(id, format!("Undeclared variable '{}' cannot be assigned.", name));
        return;
    };

    match infer_type(cx, value, declared_ty) {
        Some(actual) if actual != *declared_ty => {
            cx.error(
                id,
                format!(
                    "Type mismatch: Cannot assign expression of type '{}' to variable '{}' of type '{}'.",
                    actual, declared_name, declared_ty
                ),
            );
        }
        _ => {}
    }
}

/// The nearest variable or parameter named `name` visible at `node`.
///
/// Only statements that precede `node` in a block enclosing it are
/// candidates, innermost block first, then the enclosing function's
/// parameters. A declaration inside one branch of an `if` is not visible
/// from the other branch or after the `if`.
fn previous_declaration<'a>(
    cx: &RuleContext<'a>,
    node: NodeId,
    name: &str,
) -> Option<(&'a str, &'a TypeReference)> {
    let tree = cx.tree();
    let dictionary = cx.dictionary();
    let lookup = |candidate: NodeId| match dictionary.declared_symbol(candidate)?.as_ref() {
        Symbol::Variable(v) if v.name == name => Some((v.name.as_str(), &v.ty)),
        Symbol::Parameter(p) if p.name == name => Some((p.name.as_str(), &p.ty)),
        _ => None,
    };

    let mut child = node;
    for parent in tree.ancestors(node) {
        match tree.kind(parent) {
            NodeKind::Function(function) => {
                let body = function.body.as_deref().unwrap_or_default();
                return preceding(body, child)
                    .iter()
                    .rev()
                    .chain(function.parameters.iter().rev())
                    .find_map(|&candidate| lookup(candidate));
            }
            NodeKind::Statement(Statement::If {
                then_block,
                else_block,
                ..
            }) => {
                let block = if then_block.contains(&child) {
                    then_block.as_slice()
                } else {
                    else_block.as_deref().unwrap_or_default()
                };
                if let Some(found) = preceding(block, child).iter().rev().find_map(|&candidate| lookup(candidate)) {
                    return Some(found);
                }
            }
            _ => {}
        }
        child = parent;
    }
    None
}

/// Statements of `block` that come before `stmt`
fn preceding(block: &[NodeId], stmt: NodeId) -> &[NodeId] {
    match block.iter().position(|&s| s == stmt) {
        Some(index) => &block[..index],
        None => &[],
    }
}

fn infer_type(cx: &RuleContext<'_>, expr: NodeId, expected: &TypeReference) -> Option<TypeReference> {
    match cx.tree().expression(expr)? {
        Expression::StringLiteral(_) => Some(TypeReference::CHAR.pointer_to()),
        Expression::CharacterLiteral(_) => Some(TypeReference::CHAR),
        Expression::IntegerLiteral(_) => Some(TypeReference::I32),
        Expression::BooleanLiteral(_) => Some(TypeReference::BOOL),
        // TODO: resolve the identifier and compare its own declared type in a stricter rule.
        Expression::Identifier(_) => Some(expected.clone()),
        Expression::Binary { .. } | Expression::Call { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::test_support::*;
    use crate::ast::{BinaryOp, Modifiers, TreeBuilder};
    use crate::common::Diagnostic;
    use pretty_assertions::assert_eq;

    /// Wrap `body` in `module Main { void main(i32 n) { ... } }` and run the rule.
    fn check(build: impl FnOnce(&mut TreeBuilder) -> Vec<NodeId>) -> Vec<Diagnostic> {
        let mut b = TreeBuilder::new("main.tw");
        let param = b.parameter("n", TypeReference::I32, pos(1));
        let body = build(&mut b);
        let main = b.function("main", TypeReference::VOID, Modifiers::empty(), vec![param], Some(body), pos(1));
        let module = b.module("Main", vec![main], pos(1));
        let root = b.program(vec![], vec![module], pos(1));
        run_rule::<TypeDeclAssignRule>(vec![b.finish(root)]).errors().to_vec()
    }

    #[test]
    fn test_declaration_mismatch() {
        let errors = check(|b| {
            let one = b.int_lit(1, pos(2));
            vec![b.local("x", TypeReference::BOOL, one, pos(2))]
        });
        assert_eq!(
            messages(&errors),
            vec!["Type mismatch: Expression type 'i32' does not match declared type 'bool'."]
        );
    }

    #[test]
    fn test_declaration_match() {
        let errors = check(|b| {
            let t = b.bool_lit(true, pos(2));
            let s = b.string_lit("hi", pos(3));
            let c = b.char_lit('c', pos(4));
            vec![
                b.local("x", TypeReference::BOOL, t, pos(2)),
                b.local("s", TypeReference::new("char", 1), s, pos(3)),
                b.local("c", TypeReference::CHAR, c, pos(4)),
            ]
        });
        assert!(errors.is_empty());
    }

    #[test]
    fn test_string_needs_pointer() {
        let errors = check(|b| {
            let s = b.string_lit("hi", pos(2));
            vec![b.local("s", TypeReference::CHAR, s, pos(2))]
        });
        assert_eq!(
            messages(&errors),
            vec!["Type mismatch: Expression type 'char*' does not match declared type 'char'."]
        );
    }

    #[test]
    fn test_identifier_and_unknown_never_mismatch() {
        let errors = check(|b| {
            let flag = b.bool_lit(false, pos(2));
            let decl = b.local("flag", TypeReference::BOOL, flag, pos(2));
            let ident = b.identifier("flag", pos(3));
            let copy = b.local("n2", TypeReference::I32, ident, pos(3));
            let l = b.int_lit(1, pos(4));
            let r = b.int_lit(2, pos(4));
            let sum = b.binary(BinaryOp::Add, l, r, pos(4));
            let total = b.local("total", TypeReference::BOOL, sum, pos(4));
            vec![decl, copy, total]
        });
        assert!(errors.is_empty());
    }

    #[test]
    fn test_assignment_checks_declared_type() {
        let errors = check(|b| {
            let zero = b.int_lit(0, pos(2));
            let decl = b.local("x", TypeReference::I32, zero, pos(2));
            let t = b.bool_lit(true, pos(3));
            let bad = b.assign("x", t, pos(3));
            let five = b.int_lit(5, pos(4));
            let good = b.assign("x", five, pos(4));
            vec![decl, bad, good]
        });
        assert_eq!(
            messages(&errors),
            vec!["Type mismatch: Cannot assign expression of type 'bool' to variable 'x' of type 'i32'."]
        );
        assert_eq!(errors[0].line(), 3);
    }

    #[test]
    fn test_assignment_to_parameter() {
        let errors = check(|b| {
            let c = b.char_lit('c', pos(2));
            vec![b.assign("n", c, pos(2))]
        });
        assert_eq!(
            messages(&errors),
            vec!["Type mismatch: Cannot assign expression of type 'char' to variable 'n' of type 'i32'."]
        );
    }

    #[test]
    fn test_assignment_before_declaration() {
        let errors = check(|b| {
            let one = b.int_lit(1, pos(2));
            let early = b.assign("y", one, pos(2));
            let two = b.int_lit(2, pos(3));
            let decl = b.local("y", TypeReference::I32, two, pos(3));
            vec![early, decl]
        });
        assert_eq!(messages(&errors), vec!["Undeclared variable 'y' cannot be assigned."]);
    }

    #[test]
    fn test_declaration_in_other_branch_not_visible() {
        let errors = check(|b| {
            let cond = b.bool_lit(true, pos(2));
            let one = b.int_lit(1, pos(3));
            let decl = b.local("x", TypeReference::I32, one, pos(3));
            let t = b.bool_lit(true, pos(5));
            let other = b.assign("x", t, pos(5));
            let branch = b.if_stmt(cond, vec![decl], Some(vec![other]), pos(2));
            let two = b.int_lit(2, pos(7));
            let after = b.assign("x", two, pos(7));
            vec![branch, after]
        });
        assert_eq!(
            messages(&errors),
            vec![
                "Undeclared variable 'x' cannot be assigned.",
                "Undeclared variable 'x' cannot be assigned.",
            ]
        );
        assert_eq!((errors[0].line(), errors[1].line()), (5, 7));
    }

    #[test]
    fn test_outer_declaration_visible_in_branch() {
        let errors = check(|b| {
            let zero = b.int_lit(0, pos(2));
            let decl = b.local("x", TypeReference::I32, zero, pos(2));
            let cond = b.bool_lit(true, pos(3));
            let c = b.char_lit('c', pos(4));
            let inner = b.assign("x", c, pos(4));
            let shadow_init = b.bool_lit(false, pos(5));
            let shadow = b.local("x", TypeReference::BOOL, shadow_init, pos(5));
            let t = b.bool_lit(true, pos(6));
            let shadowed = b.assign("x", t, pos(6));
            let branch = b.if_stmt(cond, vec![inner], Some(vec![shadow, shadowed]), pos(3));
            vec![decl, branch]
        });
        assert_eq!(
            messages(&errors),
            vec!["Type mismatch: Cannot assign expression of type 'char' to variable 'x' of type 'i32'."]
        );
    }

    #[test]
    fn test_nested_if_statements_are_checked() {
        let errors = check(|b| {
            let cond = b.bool_lit(true, pos(2));
            let one = b.int_lit(1, pos(3));
            let inner = b.local("b", TypeReference::BOOL, one, pos(3));
            let c = b.char_lit('x', pos(5));
            let other = b.local("k", TypeReference::CHAR, c, pos(5));
            vec![b.if_stmt(cond, vec![inner], Some(vec![other]), pos(2))]
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line(), 3);
    }
}
