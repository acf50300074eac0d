//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::{Files, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream};
use thiserror::Error;
use super::{Position, Span};
use crate::frontend::sema::SemanticError;

/// Error raised anywhere between reading a source file and accepting a program
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexical error at {position}: {message}")]
    Lexer {
        message: String,
        symbol: String,
        position: Position,
        span: Span,
    },

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error("Invalid program: {0}")]
    Program(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn lexer(symbol: impl Into<String>, position: Position, span: Span) -> Self {
        let symbol = symbol.into();
        Self::Lexer {
            message: format!("invalid symbol '{}'", symbol),
            symbol,
            position,
            span,
        }
    }

    pub fn lexer_with_message(
        message: impl Into<String>,
        symbol: impl Into<String>,
        position: Position,
        span: Span,
    ) -> Self {
        Self::Lexer {
            message: message.into(),
            symbol: symbol.into(),
            position,
            span,
        }
    }

    /// The semantic error, if this is one
    pub fn as_semantic(&self) -> Option<&SemanticError> {
        match self {
            CompileError::Semantic(err) => Some(err),
            _ => None,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

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

    /// Print `error` to stderr, pointing into `file_id` when one is known
    pub fn report_error(&self, file_id: Option<usize>, error: &CompileError) {
        let diagnostic = self.diagnostic(file_id, error);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }

    /// Render `error` without colors
    pub fn render(&self, file_id: Option<usize>, error: &CompileError) -> String {
        let diagnostic = self.diagnostic(file_id, error);
        let mut out = NoColor::new(Vec::new());
        let _ = term::emit(&mut out, &self.config, &self.files, &diagnostic);
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    fn diagnostic(&self, file_id: Option<usize>, error: &CompileError) -> Diagnostic<usize> {
        match error {
            CompileError::Lexer { message, span, .. } => {
                let diagnostic = Diagnostic::error().with_message("Lexical error");
                match file_id {
                    Some(id) => diagnostic.with_labels(vec![
                        Label::primary(id, span.start..span.end).with_message(message),
                    ]),
                    None => diagnostic.with_notes(vec![error.to_string()]),
                }
            }

            CompileError::Semantic(err) => {
                let diagnostic = Diagnostic::error()
                    .with_message(format!("Semantic error: {}", err.kind))
                    .with_code(err.kind.name());
                let range = file_id.zip(err.line).and_then(|(id, line)| {
                    self.line_range(id, line).map(|range| (id, range))
                });
                match range {
                    Some((id, range)) => diagnostic.with_labels(vec![
                        Label::primary(id, range).with_message(err.kind.to_string()),
                    ]),
                    None => match err.line {
                        Some(line) => diagnostic.with_notes(vec![format!("at line {}", line)]),
                        None => diagnostic,
                    },
                }
            }

            CompileError::Program(err) => {
                Diagnostic::error().with_message(format!("Invalid program: {}", err))
            }

            CompileError::Io(err) => {
                Diagnostic::error().with_message(format!("IO error: {}", err))
            }
        }
    }

    /// Byte range of a 1-based line, without its line terminator
    fn line_range(&self, file_id: usize, line: u32) -> Option<std::ops::Range<usize>> {
        let index = (line as usize).checked_sub(1)?;
        let range = self.files.line_range(file_id, index).ok()?;
        let source = self.files.source(file_id).ok()?;
        let text = &source[range.clone()];
        let trimmed = text.trim_end_matches(['\n', '\r']);
        let leading = trimmed.len() - trimmed.trim_start().len();
        Some(range.start + leading..range.start + trimmed.len())
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
