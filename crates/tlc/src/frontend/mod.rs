//! Toy language frontend
//!
//! The frontend is responsible for:
//! 1. Scanning source text into tokens
//! 2. Checking node programs handed over by an external parser

pub mod ast;
pub mod lexer;
pub mod sema;

use log::{debug, info};

use crate::common::{CompileError, CompileResult, DiagnosticReporter};
use ast::Program;
use lexer::{Lexer, Token};
use sema::{AnalyzerConfig, SemanticAnalyzer};

/// Configuration options passed to the frontend
#[derive(Debug, Clone, Default)]
pub struct FrontendConfig {
    pub dump_tokens: bool,
    pub dump_ast: bool,
    pub analyzer: AnalyzerConfig,
}

/// Compilation context providing access to diagnostics and file info
pub struct CompileContext<'a> {
    pub filename: String,
    /// Source file registered with the reporter, if the text is available
    pub file_id: Option<usize>,
    pub reporter: &'a DiagnosticReporter,
}

impl<'a> CompileContext<'a> {
    pub fn new(filename: impl Into<String>, file_id: Option<usize>, reporter: &'a DiagnosticReporter) -> Self {
        Self {
            filename: filename.into(),
            file_id,
            reporter,
        }
    }

    fn fail<T>(&self, error: impl Into<CompileError>) -> CompileResult<T> {
        let error = error.into();
        self.reporter.report_error(self.file_id, &error);
        Err(error)
    }
}

/// Scanner and semantic checker for the toy language
pub struct ToyFrontend;

impl ToyFrontend {
    pub fn new() -> Self {
        Self
    }

    /// Scan `source` into tokens ending with a single end-of-file marker
    pub fn scan(&self, source: &str, ctx: &CompileContext, config: &FrontendConfig) -> CompileResult<Vec<Token>> {
        info!("scanning {}", ctx.filename);

        let tokens = match Lexer::new(source).tokenize_all() {
            Ok(tokens) => tokens,
            Err(e) => return ctx.fail(e),
        };
        debug!("{} token(s)", tokens.len());

        if config.dump_tokens {
            eprintln!("=== Tokens ===");
            for token in &tokens {
                eprintln!("{:?}", token);
            }
            eprintln!("=== End Tokens ===\n");
        }

        Ok(tokens)
    }

    /// Run the semantic analyzer over a loaded node program
    pub fn check(&self, program: &Program, ctx: &CompileContext, config: &FrontendConfig) -> CompileResult<()> {
        if config.dump_ast {
            eprintln!("=== AST ===");
            eprintln!("{:#?}", program);
            eprintln!("=== End AST ===\n");
        }

        info!("analyzing {} ({} item(s))", ctx.filename, program.items.len());

        let mut analyzer = SemanticAnalyzer::with_config(config.analyzer);
        if let Err(e) = analyzer.check_program(&program.items) {
            return ctx.fail(e);
        }

        info!("{}: no semantic errors", ctx.filename);
        Ok(())
    }
}

impl Default for ToyFrontend {
    fn default() -> Self {
        Self::new()
    }
}
