//! Positioned diagnostics and pretty reporting

use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic as Report, Label};
use codespan_reporting::files::{Files, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};

use super::Position;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// An error or warning produced by semantic analysis.
///
/// Diagnostics are plain values: two diagnostics with the same severity,
/// position and message are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub severity: Severity,
    pub position: Position,
    pub message: String,
}

impl Diagnostic {
    pub fn error(position: Position, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            position,
            message: message.into(),
        }
    }

    pub fn warning(position: Position, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            position,
            message: message.into(),
        }
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Re-label this diagnostic as an error, keeping position and message.
    pub fn into_error(self) -> Self {
        Self {
            severity: Severity::Error,
            ..self
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.position, self.severity, self.message)
    }
}

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Render a diagnostic to stderr.
    pub fn report(&self, file_id: usize, diagnostic: &Diagnostic) {
        let _ = self.emit(&mut self.writer.lock(), file_id, diagnostic);
    }

    /// Render a diagnostic to an arbitrary terminal sink.
    pub fn emit(
        &self,
        writer: &mut dyn WriteColor,
        file_id: usize,
        diagnostic: &Diagnostic,
    ) -> Result<(), codespan_reporting::files::Error> {
        let range = self.byte_range(file_id, diagnostic.position)?;
        let report = match diagnostic.severity {
            Severity::Error => Report::error(),
            Severity::Warning => Report::warning(),
        };
        let report = report
            .with_message(diagnostic.message.clone())
            .with_labels(vec![Label::primary(file_id, range)]);

        term::emit(writer, &self.config, &self.files, &report)
    }

    /// Map a 1-based line/column onto a byte range covering one character.
    ///
    /// Positions past the end of the line or file clamp to the nearest end.
    fn byte_range(
        &self,
        file_id: usize,
        position: Position,
    ) -> Result<Range<usize>, codespan_reporting::files::Error> {
        let source = self.files.source(file_id)?;
        let line_index = position.line.saturating_sub(1) as usize;
        let Ok(line) = self.files.line_range(file_id, line_index) else {
            return Ok(source.len()..source.len());
        };

        let text = &source[line.clone()];
        let column = position.column.saturating_sub(1) as usize;
        match text.char_indices().nth(column) {
            Some((offset, ch)) if ch != '\n' && ch != '\r' => {
                let start = line.start + offset;
                Ok(start..start + ch.len_utf8())
            }
            _ => {
                let end = line.start + text.trim_end_matches(['\n', '\r']).len();
                Ok(end..end)
            }
        }
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codespan_reporting::term::termcolor::Buffer;

    fn render(source: &str, diagnostic: &Diagnostic) -> String {
        let mut reporter = DiagnosticReporter::new();
        let file_id = reporter.add_file("main.tw", source);
        let mut buffer = Buffer::no_color();
        reporter.emit(&mut buffer, file_id, diagnostic).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::warning(Position::new(3, 7), "Duplicate import of module 'io'.");
        assert_eq!(diag.to_string(), "3:7: warning: Duplicate import of module 'io'.");
    }

    #[test]
    fn test_into_error_keeps_position() {
        let diag = Diagnostic::warning(Position::new(1, 2), "w").into_error();
        assert!(diag.is_error());
        assert_eq!((diag.line(), diag.column()), (1, 2));
    }

    #[test]
    fn test_emit_points_at_position() {
        let source = "module Main {\n    fn f() { }\n}\n";
        let diag = Diagnostic::error(Position::new(2, 5), "Non-externed function 'f' has no body.");
        let output = render(source, &diag);
        assert!(output.contains("error: Non-externed function 'f' has no body."));
        assert!(output.contains("main.tw:2:5"));
    }

    #[test]
    fn test_emit_clamps_out_of_range_position() {
        let source = "module Main { }\n";
        let diag = Diagnostic::warning(Position::new(40, 1), "late");
        let output = render(source, &diag);
        assert!(output.contains("warning: late"));
    }
}
