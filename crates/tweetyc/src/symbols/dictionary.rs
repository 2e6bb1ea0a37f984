//! Lazy per-tree symbol table

use std::sync::{Arc, OnceLock};

use crate::ast::{Modifiers, NodeId, NodeKind, Statement, SyntaxTree};
use super::*;

/// Maps declaring nodes of one tree to their canonical [`Symbol`].
///
/// A symbol is computed the first time its node is queried and cached for
/// the dictionary's lifetime, so repeated lookups return the same instance
/// (`Arc::ptr_eq` holds). Nodes that declare nothing are never cached.
///
/// The cache fills through `&self`, so a finished compilation can share its
/// dictionaries with other threads.
#[derive(Debug)]
pub struct SymbolDictionary {
    tree: Arc<SyntaxTree>,
    cache: Vec<OnceLock<Arc<Symbol>>>,
}

impl SymbolDictionary {
    pub(crate) fn new(tree: Arc<SyntaxTree>) -> Self {
        let cache = (0..tree.len()).map(|_| OnceLock::new()).collect();
        Self { tree, cache }
    }

    pub fn tree(&self) -> &Arc<SyntaxTree> {
        &self.tree
    }

    /// The symbol declared by `node`, if its kind declares one.
    ///
    /// # Panics
    ///
    /// Panics if `node` was not issued by this dictionary's tree.
    pub fn declared_symbol(&self, node: NodeId) -> Option<&Arc<Symbol>> {
        let Some(slot) = self.cache.get(node.index()) else {
            panic!("node {} does not belong to tree '{}'", node, self.tree.name());
        };
        if let Some(symbol) = slot.get() {
            return Some(symbol);
        }
        let computed = self.compute_declared_symbol(node)?;
        Some(slot.get_or_init(|| Arc::new(computed)))
    }

    /// Like [`declared_symbol`](Self::declared_symbol), filtered to kind `T`.
    pub fn declared_symbol_as<T: TypedSymbol>(&self, node: NodeId) -> Option<&T> {
        self.declared_symbol(node).and_then(|symbol| T::from_symbol(symbol))
    }

    /// Every symbol of kind `T` in the tree, in pre-order.
    ///
    /// Computes and caches symbols for every declaring node it passes.
    pub fn all_symbols<T: TypedSymbol>(&self) -> impl Iterator<Item = &T> + '_ {
        self.tree
            .descendants_and_self(self.tree.root())
            .filter_map(move |node| self.declared_symbol_as::<T>(node))
    }

    /// Symbol of the module enclosing `node`
    pub fn containing_module(&self, node: NodeId) -> Option<&ModuleSymbol> {
        let module = self.tree.enclosing_module(node)?;
        self.declared_symbol_as::<ModuleSymbol>(module)
    }

    /// Number of symbols computed so far
    pub fn cached_len(&self) -> usize {
        self.cache.iter().filter(|slot| slot.get().is_some()).count()
    }

    fn compute_declared_symbol(&self, node: NodeId) -> Option<Symbol> {
        let declaration = node;
        let symbol = match self.tree.kind(node) {
            NodeKind::Module(m) => Symbol::Module(ModuleSymbol {
                name: m.name.clone(),
                declaration,
            }),
            NodeKind::Function(f) => Symbol::Function(FunctionSymbol {
                name: f.name.clone(),
                return_type: f.return_type.clone(),
                is_export: f.is_export(),
                is_extern: f.is_extern(),
                declaration,
            }),
            NodeKind::Parameter(p) => Symbol::Parameter(ParameterSymbol {
                name: p.name.clone(),
                ty: p.ty.clone(),
                declaration,
            }),
            NodeKind::Statement(Statement::LocalDeclaration { name, ty, .. }) => {
                Symbol::Variable(VariableSymbol {
                    name: name.clone(),
                    ty: ty.clone(),
                    declaration,
                })
            }
            NodeKind::Struct(s) => Symbol::Struct(StructSymbol {
                name: s.name.clone(),
                is_export: s.modifiers.contains(Modifiers::EXPORT),
                is_extern: s.modifiers.contains(Modifiers::EXTERN),
                declaration,
            }),
            NodeKind::Field(f) => Symbol::Field(FieldSymbol {
                name: f.name.clone(),
                ty: f.ty.clone(),
                declaration,
            }),
            NodeKind::Program(_)
            | NodeKind::Import(_)
            | NodeKind::Statement(_)
            | NodeKind::Expression(_) => return None,
        };
        Some(symbol)
    }
}
