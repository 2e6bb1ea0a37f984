//! Semantic analysis
//!
//! Independent [`Rule`]s hook into a single top-down walk over every tree
//! of a [`Compilation`](crate::Compilation). Rules only ever append
//! diagnostics; they never touch tree structure.

mod analyzer;
mod registry;
mod rule;
pub mod rules;

pub use analyzer::SemanticAnalyzer;
pub use registry::{RuleFactory, RuleRegistry};
pub use rule::{Diagnostics, Rule, RuleContext};
