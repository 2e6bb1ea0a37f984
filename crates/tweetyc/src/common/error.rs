//! Error types for misuse of the analysis API

use thiserror::Error;

/// Errors raised when the analysis core is driven incorrectly.
///
/// Problems in the analyzed program are never reported through this type;
/// those are [`Diagnostic`](super::Diagnostic)s collected on the compilation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("syntax tree '{name}' is not registered in this compilation")]
    UnknownTree { name: String },

    #[error("unknown semantic rule '{name}'")]
    UnknownRule { name: String },
}

impl CompileError {
    pub fn unknown_tree(name: impl Into<String>) -> Self {
        Self::UnknownTree { name: name.into() }
    }

    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;
