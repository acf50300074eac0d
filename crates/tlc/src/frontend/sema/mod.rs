//! Semantic analysis module

mod error;
mod scope;
mod signatures;
mod types;
mod analyzer;

pub use error::{SemanticError, SemanticErrorKind};
pub use scope::{Scope, Symbol, SymbolKind};
pub use signatures::{Callable, CallableKind, FunctionSig, ProcedureSig, SignatureTable, BUILTIN_PRINT};
pub use types::TypeChecker;
pub use analyzer::{AnalyzerConfig, ReturnCheck, SemanticAnalyzer};
