//! Type references and declaration modifiers

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

/// A named type with a pointer indirection count: `char*` is
/// `TypeReference { base: "char", pointer_level: 1 }`.
///
/// Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeReference {
    pub base: Cow<'static, str>,
    pub pointer_level: u8,
}

impl TypeReference {
    pub const VOID: TypeReference = TypeReference::builtin("void");
    pub const I32: TypeReference = TypeReference::builtin("i32");
    pub const BOOL: TypeReference = TypeReference::builtin("bool");
    pub const CHAR: TypeReference = TypeReference::builtin("char");

    const fn builtin(base: &'static str) -> Self {
        Self {
            base: Cow::Borrowed(base),
            pointer_level: 0,
        }
    }

    pub fn new(base: impl Into<String>, pointer_level: u8) -> Self {
        Self {
            base: Cow::Owned(base.into()),
            pointer_level,
        }
    }

    /// A pointer to this type
    pub fn pointer_to(&self) -> Self {
        Self {
            base: self.base.clone(),
            pointer_level: self.pointer_level + 1,
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        for _ in 0..self.pointer_level {
            f.write_str("*")?;
        }
        Ok(())
    }
}

/// Parses the textual form used in source code, e.g. `i32` or `char**`.
impl FromStr for TypeReference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let base = s.trim_end_matches('*').trim_end();
        if base.is_empty() {
            return Err(format!("invalid type reference '{}'", s));
        }
        if !base.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(format!("invalid type name '{}'", base));
        }
        let stars = s[base.len()..].chars().filter(|c| *c == '*').count();
        let pointer_level =
            u8::try_from(stars).map_err(|_| format!("too many indirections in '{}'", s))?;
        Ok(Self::new(base, pointer_level))
    }
}

bitflags! {
    /// Declaration modifiers written before a function or struct.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// `export`: callable from other modules
        const EXPORT = 1 << 0;
        /// `extern`: body provided outside the program
        const EXTERN = 1 << 1;
    }
}

impl Modifiers {
    /// Look up a modifier keyword, ignoring case.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("export") {
            Some(Self::EXPORT)
        } else if keyword.eq_ignore_ascii_case("extern") {
            Some(Self::EXTERN)
        } else {
            None
        }
    }
}
