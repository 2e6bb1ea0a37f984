//! Cross-module call visibility

use std::collections::HashMap;

use crate::ast::{Expression, FunctionNode, Modifiers, NodeId};
use crate::sema::{Rule, RuleContext};

/// Where a function was declared and with which modifiers
#[derive(Debug, Clone)]
struct Declaration {
    module: String,
    modifiers: Modifiers,
}

/// Calls must target a known function that the calling module may see.
///
/// Functions are recorded as the walk reaches them, so the table grows in
/// declaration order across the whole compilation and a call only resolves
/// against functions visited before it. For each resolved call the rule
/// checks independently that the declaring module is the caller's own
/// module or imported by the caller's program, and that a function from
/// another module is exported.
#[derive(Debug, Default)]
pub struct FunctionCallVisibilityRule {
    functions: HashMap<String, Declaration>,
}

impl Rule for FunctionCallVisibilityRule {
    fn name(&self) -> &'static str {
        "function-call-visibility"
    }

    fn analyze_function(&mut self, cx: &mut RuleContext<'_>, id: NodeId, function: &FunctionNode) {
        let tree = cx.tree();
        let Some(module) = tree.enclosing_module(id).and_then(|m| tree.module(m)) else {
            panic!("function '{}' is not contained in a module", function.name);
        };

        self.functions.insert(
            function.name.clone(),
            Declaration {
                module: module.name.clone(),
                modifiers: function.modifiers,
            },
        );
    }

    fn analyze_expression(&mut self, cx: &mut RuleContext<'_>, id: NodeId, expr: &Expression) {
        let Expression::Call { name, .. } = expr else {
            return;
        };

        let Some(declaration) = self.functions.get(name) else {
            cx.error(id, format!("Tried to call unknown function '{}'.", name));
            return;
        };

        let tree = cx.tree();
        let Some(current) = tree.enclosing_module(id).and_then(|m| tree.module(m)) else {
            cx.error(id, format!("Function call '{}' is not inside any module.", name));
            return;
        };

        let same_module = current.name == declaration.module;
        let imported = tree.program().imports.iter().any(|&import| {
            tree.import(import)
                .is_some_and(|i| i.module_name.eq_ignore_ascii_case(&declaration.module))
        });

        if !same_module && !imported {
            cx.error(
                id,
                format!(
                    "Cannot call function '{}' from module '{}' because it is not imported.",
                    name, declaration.module
                ),
            );
        }

        if !same_module && !declaration.modifiers.contains(Modifiers::EXPORT) {
            cx.error(
                id,
                format!("Tried to call inaccessible function '{}' (not exported).", name),
            );
        }
    }
}
