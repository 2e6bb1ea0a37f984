//! Import resolution

use std::collections::HashSet;

use crate::ast::{NodeId, ProgramNode};
use crate::sema::{Rule, RuleContext};
use crate::symbols::ModuleSymbol;

/// Every import must name a module declared somewhere in the compilation.
///
/// Module names match case-insensitively. Importing the same module twice
/// is only a warning.
#[derive(Debug, Default)]
pub struct ImportRule;

impl Rule for ImportRule {
    fn name(&self) -> &'static str {
        "import"
    }

    fn analyze_program(&mut self, cx: &mut RuleContext<'_>, _id: NodeId, program: &ProgramNode) {
        let known: HashSet<String> = cx
            .compilation()
            .all_symbols::<ModuleSymbol>()
            .map(|module| module.name.to_lowercase())
            .collect();

        let tree = cx.tree();
        let mut seen = HashSet::new();
        for &import_id in &program.imports {
            let Some(import) = tree.import(import_id) else {
                continue;
            };
            let key = import.module_name.to_lowercase();

            if !seen.insert(key.clone()) {
                cx.warning(
                    import_id,
                    format!("Duplicate import of module '{}'.", import.module_name),
                );
            }

            if !known.contains(&key) {
                cx.error(
                    import_id,
                    format!("Could not resolve import '{}'.", import.module_name),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::test_support::*;
    use crate::ast::{SyntaxTree, TreeBuilder};
    use pretty_assertions::assert_eq;

    fn tree(file: &str, imports: &[&str], module: &str) -> SyntaxTree {
        let mut b = TreeBuilder::new(file);
        let imports = imports.iter().map(|name| b.import(*name, pos(1))).collect();
        let module = b.module(module, vec![], pos(2));
        let program = b.program(imports, vec![module], pos(1));
        b.finish(program)
    }

    #[test]
    fn test_resolves_module_from_other_tree() {
        let main = tree("main.tw", &["io"], "Main");
        let io = tree("io.tw", &[], "IO");

        let compilation = run_rule::<ImportRule>(vec![main, io]);
        assert!(compilation.errors().is_empty());
        assert!(compilation.warnings().is_empty());
    }

    #[test]
    fn test_unresolved_import_is_error() {
        let main = tree("main.tw", &["Missing"], "Main");

        let compilation = run_rule::<ImportRule>(vec![main]);
        assert_eq!(messages(compilation.errors()), vec!["Could not resolve import 'Missing'."]);
        assert!(compilation.warnings().is_empty());
    }

    #[test]
    fn test_repeated_import_is_warning() {
        let main = tree("main.tw", &["Main", "MAIN"], "Main");

        let compilation = run_rule::<ImportRule>(vec![main]);
        assert!(compilation.errors().is_empty());
        assert_eq!(messages(compilation.warnings()), vec!["Duplicate import of module 'MAIN'."]);
    }
}
