//! Rule engine - drives every rule through one deterministic walk

use tracing::{debug, trace};

use crate::Compilation;
use crate::ast::*;
use crate::common::{CompileError, CompileResult};
use crate::config::AnalyzerConfig;
use crate::symbols::SymbolDictionary;
use super::{Diagnostics, Rule, RuleContext, RuleRegistry};

/// Runs a fixed set of rules over a compilation.
///
/// The walk is top-down in declaration order: program, then each module,
/// each of its functions, each statement of a function body and finally
/// the expressions under a statement in pre-order. At every node all rules
/// run in registration order, and whatever a rule reported is collected
/// before the next rule runs.
pub struct SemanticAnalyzer {
    rules: Vec<Box<dyn Rule>>,
    sink: Diagnostics,
    results: Diagnostics,
}

impl SemanticAnalyzer {
    pub fn new(registry: &RuleRegistry) -> Self {
        Self::from_rules(registry.instantiate())
    }

    /// Build an analyzer with the rules named in `config.disabled_rules` left out.
    pub fn with_config(registry: &RuleRegistry, config: &AnalyzerConfig) -> CompileResult<Self> {
        let mut rules = registry.instantiate();
        for name in &config.disabled_rules {
            if !rules.iter().any(|rule| rule.name() == name) {
                return Err(CompileError::unknown_rule(name));
            }
            debug!(rule = %name, "rule disabled");
        }
        rules.retain(|rule| !config.disabled_rules.iter().any(|name| name == rule.name()));
        Ok(Self::from_rules(rules))
    }

    fn from_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        debug!(count = rules.len(), "semantic rules instantiated");
        Self {
            rules,
            sink: Diagnostics::new(),
            results: Diagnostics::new(),
        }
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Walk every tree of `compilation` in registration order.
    ///
    /// Rule instances persist across trees, so state such as a
    /// compilation-wide function table accumulates in tree order.
    ///
    /// # Panics
    ///
    /// Panics if a tree holds a node of the wrong kind in a structural slot,
    /// e.g. a module id where an expression is expected.
    pub fn analyze(&mut self, compilation: &Compilation) -> Diagnostics {
        for dictionary in compilation.dictionaries() {
            self.analyze_tree(compilation, dictionary);
        }
        std::mem::take(&mut self.results)
    }

    fn analyze_tree(&mut self, compilation: &Compilation, dictionary: &SymbolDictionary) {
        let tree = dictionary.tree();
        debug!(tree = tree.name(), nodes = tree.len(), "analyzing tree");

        let root = tree.root();
        let program = tree.program();
        self.each_rule(compilation, dictionary, |rule, cx| {
            rule.analyze_program(cx, root, program);
        });

        for &id in &program.modules {
            self.analyze_module(compilation, dictionary, id);
        }
    }

    fn analyze_module(&mut self, compilation: &Compilation, dictionary: &SymbolDictionary, id: NodeId) {
        let tree = dictionary.tree();
        let module = tree.module(id).unwrap_or_else(|| defect(tree, id, "a module"));
        trace!(module = %module.name, "analyzing module");

        self.each_rule(compilation, dictionary, |rule, cx| {
            rule.analyze_module(cx, id, module);
        });

        for &function in &module.functions {
            self.analyze_function(compilation, dictionary, function);
        }
    }

    fn analyze_function(&mut self, compilation: &Compilation, dictionary: &SymbolDictionary, id: NodeId) {
        let tree = dictionary.tree();
        let function = tree.function(id).unwrap_or_else(|| defect(tree, id, "a function"));
        trace!(function = %function.name, "analyzing function");

        self.each_rule(compilation, dictionary, |rule, cx| {
            rule.analyze_function(cx, id, function);
        });

        for &stmt in function.body.iter().flatten() {
            self.analyze_statement(compilation, dictionary, stmt);
        }
    }

    fn analyze_statement(&mut self, compilation: &Compilation, dictionary: &SymbolDictionary, id: NodeId) {
        let tree = dictionary.tree();
        let stmt = tree.statement(id).unwrap_or_else(|| defect(tree, id, "a statement"));

        self.each_rule(compilation, dictionary, |rule, cx| {
            rule.analyze_statement(cx, id, stmt);
        });

        match stmt {
            Statement::LocalDeclaration { initializer, .. } => {
                self.analyze_expression(compilation, dictionary, *initializer);
            }
            Statement::Assignment { value, .. } => {
                self.analyze_expression(compilation, dictionary, *value);
            }
            Statement::Return { value } => {
                if let Some(value) = value {
                    self.analyze_expression(compilation, dictionary, *value);
                }
            }
            Statement::Expression { expr } => {
                self.analyze_expression(compilation, dictionary, *expr);
            }
            Statement::If {
                condition,
                then_block,
                else_block,
            } => {
                self.analyze_expression(compilation, dictionary, *condition);
                for &nested in then_block.iter().chain(else_block.iter().flatten()) {
                    self.analyze_statement(compilation, dictionary, nested);
                }
            }
        }
    }

    fn analyze_expression(&mut self, compilation: &Compilation, dictionary: &SymbolDictionary, id: NodeId) {
        let tree = dictionary.tree();
        let expr = tree.expression(id).unwrap_or_else(|| defect(tree, id, "an expression"));

        self.each_rule(compilation, dictionary, |rule, cx| {
            rule.analyze_expression(cx, id, expr);
        });

        match expr {
            Expression::Binary { left, right, .. } => {
                self.analyze_expression(compilation, dictionary, *left);
                self.analyze_expression(compilation, dictionary, *right);
            }
            Expression::Call { arguments, .. } => {
                for &arg in arguments {
                    self.analyze_expression(compilation, dictionary, arg);
                }
            }
            Expression::Identifier(_)
            | Expression::BooleanLiteral(_)
            | Expression::IntegerLiteral(_)
            | Expression::CharacterLiteral(_)
            | Expression::StringLiteral(_) => {}
        }
    }

    /// Run one hook of every rule, collecting each rule's reports right after it ran.
    fn each_rule<F>(&mut self, compilation: &Compilation, dictionary: &SymbolDictionary, mut hook: F)
    where
        F: FnMut(&mut dyn Rule, &mut RuleContext<'_>),
    {
        for rule in &mut self.rules {
            let mut cx = RuleContext::new(compilation, dictionary, &mut self.sink);
            hook(rule.as_mut(), &mut cx);
            self.results.append(&mut self.sink);
        }
    }
}

fn defect(tree: &SyntaxTree, id: NodeId, expected: &str) -> ! {
    panic!(
        "internal error: expected {} node at {} in tree '{}', found {}",
        expected,
        id,
        tree.name(),
        tree.kind(id).name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rules_run_in_registration_order() {
        let analyzer = SemanticAnalyzer::new(&RuleRegistry::builtin());
        let names: Vec<&str> = analyzer.rule_names().collect();
        assert_eq!(
            names,
            vec![
                "duplicate-parameter",
                "duplicate-function",
                "duplicate-module",
                "function-call-visibility",
                "function-body",
                "import",
                "type-declaration-assignment",
            ]
        );
    }

    #[test]
    fn test_disabled_rules_are_filtered() {
        let config = AnalyzerConfig {
            disabled_rules: vec!["import".to_string(), "function-body".to_string()],
            ..AnalyzerConfig::default()
        };
        let analyzer = SemanticAnalyzer::with_config(&RuleRegistry::builtin(), &config).unwrap();
        assert_eq!(analyzer.rule_names().count(), 5);
        assert!(analyzer.rule_names().all(|name| name != "import" && name != "function-body"));
    }
}
