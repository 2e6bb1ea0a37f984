//! Declaration symbols
//!
//! Symbols are derived from declaring nodes on demand and cached per tree
//! by a [`SymbolDictionary`].

mod dictionary;
mod symbol;

pub use dictionary::SymbolDictionary;
pub use symbol::*;
