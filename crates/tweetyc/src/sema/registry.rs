//! Rule registration

use super::Rule;
use super::rules::*;

/// Creates a fresh rule instance
pub type RuleFactory = fn() -> Box<dyn Rule>;

fn instantiate<R: Rule + Default + 'static>() -> Box<dyn Rule> {
    Box::new(R::default())
}

/// Ordered list of rule factories.
///
/// Rules run in registration order at every node. Each analyzer built from
/// a registry gets its own instances, so rule state never outlives one
/// compilation.
#[derive(Clone)]
pub struct RuleRegistry {
    factories: Vec<RuleFactory>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Registry holding every built-in rule
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register::<DuplicateParameterRule>();
        registry.register::<DuplicateFunctionRule>();
        registry.register::<DuplicateModuleRule>();
        registry.register::<FunctionCallVisibilityRule>();
        registry.register::<FunctionBodyRule>();
        registry.register::<ImportRule>();
        registry.register::<TypeDeclAssignRule>();
        registry
    }

    pub fn register<R: Rule + Default + 'static>(&mut self) {
        self.factories.push(instantiate::<R>);
    }

    pub fn register_factory(&mut self, factory: RuleFactory) {
        self.factories.push(factory);
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Fresh instances of every registered rule, in order
    pub fn instantiate(&self) -> Vec<Box<dyn Rule>> {
        self.factories.iter().map(|factory| factory()).collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
