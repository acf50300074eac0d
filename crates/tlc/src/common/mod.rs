//! Common infrastructure shared by the scanner, the analyzer and the driver

mod error;
mod span;

pub use error::{CompileError, CompileResult, DiagnosticReporter};
pub use span::{Position, Span};
