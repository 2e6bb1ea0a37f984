//! Analyzer configuration

/// Configuration options for a compilation's semantic analysis
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Log every tree at debug level before analysis
    pub dump_ast: bool,
    /// Names of rules to leave out of the walk
    pub disabled_rules: Vec<String>,
    /// Report every warning as an error
    pub warnings_as_errors: bool,
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disable_rule(mut self, name: impl Into<String>) -> Self {
        self.disabled_rules.push(name.into());
        self
    }

    pub fn with_warnings_as_errors(mut self, enabled: bool) -> Self {
        self.warnings_as_errors = enabled;
        self
    }

    pub fn with_dump_ast(mut self, enabled: bool) -> Self {
        self.dump_ast = enabled;
        self
    }
}
