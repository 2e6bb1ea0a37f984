//! Compilation - the unit of analysis handed to code generation

use std::sync::Arc;

use tracing::debug;

use crate::ast::SyntaxTree;
use crate::common::{CompileError, CompileResult, Diagnostic};
use crate::config::AnalyzerConfig;
use crate::sema::{RuleRegistry, SemanticAnalyzer};
use crate::symbols::{SymbolDictionary, TypedSymbol};

/// A set of syntax trees analyzed together.
///
/// Construction runs every semantic rule once; afterwards the compilation
/// is read-only. Code generation must not run when [`errors`](Self::errors)
/// is non-empty. Warnings never block it.
#[derive(Debug)]
pub struct Compilation {
    trees: Vec<Arc<SyntaxTree>>,
    dictionaries: Vec<SymbolDictionary>,
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Compilation {
    /// Analyze `trees` with the built-in rules and default configuration.
    pub fn new(trees: impl IntoIterator<Item = SyntaxTree>) -> Self {
        let analyzer = SemanticAnalyzer::new(&RuleRegistry::builtin());
        Self::analyze(trees, analyzer, &AnalyzerConfig::default())
    }

    /// Analyze `trees` with the rules of `registry`, filtered and tuned by `config`.
    pub fn with_config(
        trees: impl IntoIterator<Item = SyntaxTree>,
        registry: &RuleRegistry,
        config: &AnalyzerConfig,
    ) -> CompileResult<Self> {
        let analyzer = SemanticAnalyzer::with_config(registry, config)?;
        Ok(Self::analyze(trees, analyzer, config))
    }

    fn analyze(
        trees: impl IntoIterator<Item = SyntaxTree>,
        mut analyzer: SemanticAnalyzer,
        config: &AnalyzerConfig,
    ) -> Self {
        let trees: Vec<Arc<SyntaxTree>> = trees.into_iter().map(Arc::new).collect();
        let dictionaries = trees
            .iter()
            .map(|tree| SymbolDictionary::new(Arc::clone(tree)))
            .collect();
        debug!(trees = trees.len(), "starting compilation");

        if config.dump_ast {
            for tree in &trees {
                debug!(tree = tree.name(), "syntax tree:\n{:#?}", tree);
            }
        }

        let mut compilation = Self {
            trees,
            dictionaries,
            errors: Vec::new(),
            warnings: Vec::new(),
        };

        let mut diagnostics = analyzer.analyze(&compilation);
        if config.warnings_as_errors {
            let promoted = diagnostics.warnings.drain(..).map(Diagnostic::into_error);
            diagnostics.errors.extend(promoted);
        }

        debug!(
            errors = diagnostics.errors.len(),
            warnings = diagnostics.warnings.len(),
            "semantic analysis finished"
        );
        compilation.errors = diagnostics.errors;
        compilation.warnings = diagnostics.warnings;
        compilation
    }

    pub fn syntax_trees(&self) -> &[Arc<SyntaxTree>] {
        &self.trees
    }

    /// Dictionaries in tree registration order
    pub fn dictionaries(&self) -> impl Iterator<Item = &SymbolDictionary> {
        self.dictionaries.iter()
    }

    /// The symbol dictionary of a tree registered in this compilation.
    ///
    /// Trees are matched by identity, not by content.
    pub fn symbol_dictionary(&self, tree: &SyntaxTree) -> CompileResult<&SymbolDictionary> {
        self.dictionaries
            .iter()
            .find(|dictionary| std::ptr::eq(dictionary.tree().as_ref(), tree))
            .ok_or_else(|| CompileError::unknown_tree(tree.name()))
    }

    /// Every symbol of kind `T` across all trees, tree by tree in registration order.
    pub fn all_symbols<T: TypedSymbol>(&self) -> impl Iterator<Item = &T> {
        self.dictionaries.iter().flat_map(|dictionary| dictionary.all_symbols::<T>())
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Modifiers, TreeBuilder, TypeReference};
    use crate::common::Position;
    use crate::symbols::{FunctionSymbol, ModuleSymbol};
    use pretty_assertions::assert_eq;

    fn pos(line: u32) -> Position {
        Position::new(line, 1)
    }

    fn tree(file: &str, imports: &[&str], module: &str, functions: &[&str]) -> SyntaxTree {
        let mut b = TreeBuilder::new(file);
        let imports = imports.iter().map(|name| b.import(*name, pos(1))).collect();
        let functions = functions
            .iter()
            .map(|name| b.function(*name, TypeReference::VOID, Modifiers::EXPORT, vec![], Some(vec![]), pos(3)))
            .collect();
        let module = b.module(module, functions, pos(2));
        let root = b.program(imports, vec![module], pos(1));
        b.finish(root)
    }

    #[test]
    fn test_all_symbols_in_registration_order() {
        let compilation = Compilation::new(vec![
            tree("a.tw", &[], "A", &["a1", "a2"]),
            tree("b.tw", &[], "B", &["b1"]),
        ]);
        let modules: Vec<&str> = compilation.all_symbols::<ModuleSymbol>().map(|m| m.name.as_str()).collect();
        assert_eq!(modules, vec!["A", "B"]);
        let functions: Vec<&str> = compilation.all_symbols::<FunctionSymbol>().map(|f| f.name.as_str()).collect();
        assert_eq!(functions, vec!["a1", "a2", "b1"]);
    }

    #[test]
    fn test_symbol_dictionary_lookup() {
        let compilation = Compilation::new(vec![tree("a.tw", &[], "A", &[])]);
        let registered = Arc::clone(&compilation.syntax_trees()[0]);
        let dictionary = compilation.symbol_dictionary(&registered).unwrap();
        assert!(std::ptr::eq(dictionary.tree().as_ref(), registered.as_ref()));

        let stranger = tree("a.tw", &[], "A", &[]);
        assert_eq!(
            compilation.symbol_dictionary(&stranger).unwrap_err(),
            CompileError::unknown_tree("a.tw")
        );
    }

    #[test]
    fn test_diagnostics_merged_across_trees() {
        let compilation = Compilation::new(vec![
            tree("a.tw", &["Nowhere"], "A", &[]),
            tree("b.tw", &["A", "A"], "B", &[]),
        ]);
        assert_eq!(compilation.errors().len(), 1);
        assert_eq!(compilation.errors()[0].message, "Could not resolve import 'Nowhere'.");
        assert_eq!(compilation.warnings().len(), 1);
        assert!(compilation.has_errors());
    }

    #[test]
    fn test_warnings_as_errors() {
        let config = AnalyzerConfig::new().with_warnings_as_errors(true);
        let trees = vec![tree("a.tw", &["A", "A"], "A", &[])];
        let compilation = Compilation::with_config(trees, &RuleRegistry::builtin(), &config).unwrap();
        assert!(compilation.warnings().is_empty());
        assert_eq!(compilation.errors().len(), 1);
        assert_eq!(compilation.errors()[0].message, "Duplicate import of module 'A'.");
    }

    #[test]
    fn test_disabled_rule() {
        let config = AnalyzerConfig::new().disable_rule("import");
        let trees = vec![tree("a.tw", &["Nowhere"], "A", &[])];
        let compilation = Compilation::with_config(trees, &RuleRegistry::builtin(), &config).unwrap();
        assert!(compilation.errors().is_empty());
    }

    #[test]
    fn test_unknown_disabled_rule() {
        let config = AnalyzerConfig::new().disable_rule("no-such-rule");
        let result = Compilation::with_config(Vec::new(), &RuleRegistry::builtin(), &config);
        assert_eq!(result.unwrap_err(), CompileError::unknown_rule("no-such-rule"));
    }

    #[test]
    fn test_compilation_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Compilation>();
    }
}
