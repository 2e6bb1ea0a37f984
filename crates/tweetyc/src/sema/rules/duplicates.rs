//! Name uniqueness rules

use std::collections::HashSet;

use crate::ast::{FunctionNode, ModuleNode, NodeId};
use crate::sema::{Rule, RuleContext};

/// Parameter names within one function must be unique.
#[derive(Debug, Default)]
pub struct DuplicateParameterRule;

impl Rule for DuplicateParameterRule {
    fn name(&self) -> &'static str {
        "duplicate-parameter"
    }

    fn analyze_function(&mut self, cx: &mut RuleContext<'_>, id: NodeId, function: &FunctionNode) {
        let tree = cx.tree();
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for &param in &function.parameters {
            let Some(param) = tree.parameter(param) else {
                continue;
            };
            if !seen.insert(param.name.as_str()) && reported.insert(param.name.as_str()) {
                cx.error(
                    id,
                    format!("Duplicate parameter '{}' in function '{}'.", param.name, function.name),
                );
            }
        }
    }
}

/// Function names within one module must be unique.
#[derive(Debug, Default)]
pub struct DuplicateFunctionRule;

impl Rule for DuplicateFunctionRule {
    fn name(&self) -> &'static str {
        "duplicate-function"
    }

    fn analyze_module(&mut self, cx: &mut RuleContext<'_>, _id: NodeId, module: &ModuleNode) {
        let tree = cx.tree();
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for &function_id in &module.functions {
            let Some(function) = tree.function(function_id) else {
                continue;
            };
            if !seen.insert(function.name.as_str()) && reported.insert(function.name.as_str()) {
                cx.error(
                    function_id,
                    format!("Duplicate function '{}' in module '{}'.", function.name, module.name),
                );
            }
        }
    }
}

/// Module names must be unique across the whole compilation.
///
/// Names compare case-insensitively, the same way imports resolve.
#[derive(Debug, Default)]
pub struct DuplicateModuleRule {
    seen: HashSet<String>,
}

impl Rule for DuplicateModuleRule {
    fn name(&self) -> &'static str {
        "duplicate-module"
    }

    fn analyze_module(&mut self, cx: &mut RuleContext<'_>, id: NodeId, module: &ModuleNode) {
        if !self.seen.insert(module.name.to_lowercase()) {
            cx.error(id, format!("Duplicate module '{}'.", module.name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::test_support::*;
    use crate::ast::{Modifiers, TreeBuilder, TypeReference};
    use pretty_assertions::assert_eq;

    fn function_with_params(b: &mut TreeBuilder, name: &str, params: &[&str]) -> NodeId {
        let params = params
            .iter()
            .map(|p| b.parameter(*p, TypeReference::I32, pos(2)))
            .collect();
        b.function(name, TypeReference::VOID, Modifiers::empty(), params, Some(vec![]), pos(2))
    }

    #[test]
    fn test_duplicate_parameter_reported_once() {
        let mut b = TreeBuilder::new("main.tw");
        let f = function_with_params(&mut b, "f", &["a", "a"]);
        let g = function_with_params(&mut b, "g", &["a", "b", "b", "b", "a"]);
        let module = b.module("Main", vec![f, g], pos(1));
        let program = b.program(vec![], vec![module], pos(1));

        let compilation = run_rule::<DuplicateParameterRule>(vec![b.finish(program)]);
        assert_eq!(
            messages(compilation.errors()),
            vec![
                "Duplicate parameter 'a' in function 'f'.",
                "Duplicate parameter 'b' in function 'g'.",
                "Duplicate parameter 'a' in function 'g'.",
            ]
        );
    }

    #[test]
    fn test_unique_parameters_pass() {
        let mut b = TreeBuilder::new("main.tw");
        let f = function_with_params(&mut b, "f", &["a", "b"]);
        let module = b.module("Main", vec![f], pos(1));
        let program = b.program(vec![], vec![module], pos(1));

        let compilation = run_rule::<DuplicateParameterRule>(vec![b.finish(program)]);
        assert!(compilation.errors().is_empty());
    }

    #[test]
    fn test_duplicate_function_same_module() {
        let mut b = TreeBuilder::new("main.tw");
        let first = function_with_params(&mut b, "F", &[]);
        let second = b.function("F", TypeReference::VOID, Modifiers::empty(), vec![], Some(vec![]), pos(7));
        let module = b.module("Main", vec![first, second], pos(1));
        let program = b.program(vec![], vec![module], pos(1));

        let compilation = run_rule::<DuplicateFunctionRule>(vec![b.finish(program)]);
        assert_eq!(compilation.errors().len(), 1);
        assert_eq!(compilation.errors()[0].line(), 7);
        assert_eq!(compilation.errors()[0].message, "Duplicate function 'F' in module 'Main'.");
    }

    #[test]
    fn test_same_function_name_in_different_modules() {
        let mut b = TreeBuilder::new("main.tw");
        let first = function_with_params(&mut b, "F", &[]);
        let second = function_with_params(&mut b, "F", &[]);
        let a = b.module("A", vec![first], pos(1));
        let c = b.module("B", vec![second], pos(5));
        let program = b.program(vec![], vec![a, c], pos(1));

        let compilation = run_rule::<DuplicateFunctionRule>(vec![b.finish(program)]);
        assert!(compilation.errors().is_empty());
    }

    #[test]
    fn test_duplicate_module_across_trees() {
        let mut trees = Vec::new();
        for (file, name) in [("a.tw", "Util"), ("b.tw", "util")] {
            let mut b = TreeBuilder::new(file);
            let module = b.module(name, vec![], pos(3));
            let program = b.program(vec![], vec![module], pos(1));
            trees.push(b.finish(program));
        }

        let compilation = run_rule::<DuplicateModuleRule>(trees);
        assert_eq!(messages(compilation.errors()), vec!["Duplicate module 'util'."]);
    }
}
