//! Built-in semantic rules

mod body;
mod duplicates;
mod imports;
mod types;
mod visibility;

pub use body::FunctionBodyRule;
pub use duplicates::{DuplicateFunctionRule, DuplicateModuleRule, DuplicateParameterRule};
pub use imports::ImportRule;
pub use types::TypeDeclAssignRule;
pub use visibility::FunctionCallVisibilityRule;
