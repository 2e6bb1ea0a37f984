//! Function body presence

use crate::ast::{FunctionNode, NodeId};
use crate::sema::{Rule, RuleContext};

/// Extern functions must not have a body; all others must.
#[derive(Debug, Default)]
pub struct FunctionBodyRule;

impl Rule for FunctionBodyRule {
    fn name(&self) -> &'static str {
        "function-body"
    }

    fn analyze_function(&mut self, cx: &mut RuleContext<'_>, id: NodeId, function: &FunctionNode) {
        match (function.is_extern(), function.body.is_some()) {
            (false, false) => {
                cx.error(id, format!("Non-externed function '{}' has no body.", function.name));
            }
            (true, true) => {
                cx.error(id, format!("Externed function '{}' has a body.", function.name));
            }
            _ => {}
        }
    }
}
