//! Symbol kinds

use crate::ast::{NodeId, TypeReference};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSymbol {
    pub name: String,
    pub declaration: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSymbol {
    pub name: String,
    pub return_type: TypeReference,
    pub is_export: bool,
    pub is_extern: bool,
    pub declaration: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSymbol {
    pub name: String,
    pub ty: TypeReference,
    pub declaration: NodeId,
}

/// A local variable introduced by a declaration statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSymbol {
    pub name: String,
    pub ty: TypeReference,
    pub declaration: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructSymbol {
    pub name: String,
    pub is_export: bool,
    pub is_extern: bool,
    pub declaration: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSymbol {
    pub name: String,
    pub ty: TypeReference,
    pub declaration: NodeId,
}

/// A declaration identity computed from a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Module(ModuleSymbol),
    Function(FunctionSymbol),
    Parameter(ParameterSymbol),
    Variable(VariableSymbol),
    Struct(StructSymbol),
    Field(FieldSymbol),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Module(s) => &s.name,
            Symbol::Function(s) => &s.name,
            Symbol::Parameter(s) => &s.name,
            Symbol::Variable(s) => &s.name,
            Symbol::Struct(s) => &s.name,
            Symbol::Field(s) => &s.name,
        }
    }

    /// Whether the declaration carries `export`
    pub fn is_export(&self) -> bool {
        match self {
            Symbol::Function(s) => s.is_export,
            Symbol::Struct(s) => s.is_export,
            _ => false,
        }
    }

    /// Whether the declaration carries `extern`
    pub fn is_extern(&self) -> bool {
        match self {
            Symbol::Function(s) => s.is_extern,
            Symbol::Struct(s) => s.is_extern,
            _ => false,
        }
    }

    /// The node this symbol was derived from
    pub fn declaration(&self) -> NodeId {
        match self {
            Symbol::Module(s) => s.declaration,
            Symbol::Function(s) => s.declaration,
            Symbol::Parameter(s) => s.declaration,
            Symbol::Variable(s) => s.declaration,
            Symbol::Struct(s) => s.declaration,
            Symbol::Field(s) => s.declaration,
        }
    }

    /// Declared type, for symbols that have one
    pub fn ty(&self) -> Option<&TypeReference> {
        match self {
            Symbol::Parameter(s) => Some(&s.ty),
            Symbol::Variable(s) => Some(&s.ty),
            Symbol::Field(s) => Some(&s.ty),
            Symbol::Module(_) | Symbol::Function(_) | Symbol::Struct(_) => None,
        }
    }
}

/// Symbol kinds that typed dictionary queries can filter by.
///
/// `Symbol` itself implements this and matches everything.
pub trait TypedSymbol: 'static {
    fn from_symbol(symbol: &Symbol) -> Option<&Self>;
}

impl TypedSymbol for Symbol {
    fn from_symbol(symbol: &Symbol) -> Option<&Self> {
        Some(symbol)
    }
}

macro_rules! typed_symbol {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl TypedSymbol for $ty {
                fn from_symbol(symbol: &Symbol) -> Option<&Self> {
                    match symbol {
                        Symbol::$variant(s) => Some(s),
                        _ => None,
                    }
                }
            }
        )*
    };
}

typed_symbol! {
    Module => ModuleSymbol,
    Function => FunctionSymbol,
    Parameter => ParameterSymbol,
    Variable => VariableSymbol,
    Struct => StructSymbol,
    Field => FieldSymbol,
}
