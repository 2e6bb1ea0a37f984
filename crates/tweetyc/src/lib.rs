//! TweetyLang compiler - semantic analysis core
//!
//! This library checks parsed TweetyLang programs before code generation.
//!
//! ## Architecture
//!
//! The analysis core is organized into:
//! - **AST** (`ast/`): Arena syntax trees with parent links and traversal
//! - **Symbols** (`symbols/`): Lazily derived, cached declaration symbols
//! - **Sema** (`sema/`): Rule engine and the built-in semantic rules
//! - **Compilation** (`compilation`): Trees, dictionaries and diagnostics of one run
//! - **Common** (`common/`): Shared infrastructure (errors, diagnostics, positions)

pub mod ast;
pub mod common;
pub mod compilation;
pub mod config;
pub mod sema;
pub mod symbols;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, Diagnostic, DiagnosticReporter, Position, Severity};
pub use compilation::Compilation;
pub use config::AnalyzerConfig;
pub use sema::{Diagnostics, Rule, RuleContext, RuleRegistry, SemanticAnalyzer};
pub use symbols::{Symbol, SymbolDictionary, TypedSymbol};
