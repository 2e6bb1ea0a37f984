//! Common infrastructure shared across the analysis layers

mod diagnostic;
mod error;
mod position;

pub use diagnostic::{Diagnostic, DiagnosticReporter, Severity};
pub use error::{CompileError, CompileResult};
pub use position::Position;
