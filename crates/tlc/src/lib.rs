//! Toy language frontend: scanner and static checker
//!
//! This library scans source text of a small imperative language (`int` and
//! `boolean` values, functions, procedures, `if`/`while`) and checks the
//! static correctness of programs delivered as JSON node programs by an
//! external parser.
//!
//! ## Architecture
//!
//! - **Common** (`common/`): Shared infrastructure (errors, spans, diagnostics)
//! - **Frontend** (`frontend/`): Lexer, AST and semantic analysis
//! - **Driver** (`driver/`): Reads inputs and reports diagnostics

pub mod common;
pub mod frontend;
pub mod driver;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, Position, Span};
pub use frontend::{CompileContext, FrontendConfig, ToyFrontend};
pub use frontend::ast::Program;
pub use frontend::lexer::{Lexer, Token, TokenKind};
pub use frontend::sema::{AnalyzerConfig, ReturnCheck, SemanticAnalyzer, SemanticError, SemanticErrorKind};
pub use driver::Pipeline;
