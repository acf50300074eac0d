//! Semantic error taxonomy

use std::fmt;

use thiserror::Error;

use super::signatures::CallableKind;
use crate::frontend::ast::{JumpOp, Type};

/// What went wrong, with the names and types involved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticErrorKind {
    #[error("variable '{name}' is already declared in this scope")]
    DuplicateDeclaration { name: String },

    #[error("function/procedure '{name}' is already declared")]
    DuplicateSignature { name: String },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Type, found: Type },

    #[error("operator '{op}' requires {expected} operands, found {found}")]
    OperandTypeMismatch { op: &'static str, expected: Type, found: Type },

    #[error("use of undeclared variable '{name}'")]
    UndeclaredVariable { name: String },

    #[error("call to undeclared function/procedure '{name}'")]
    UndeclaredCallee { name: String },

    #[error("'{name}' takes {expected} argument(s) but {found} were supplied")]
    ArityMismatch { name: String, expected: usize, found: usize },

    #[error("argument {position} of '{name}' has type {found}, expected {expected}")]
    ArgumentTypeMismatch {
        name: String,
        position: usize,
        expected: Type,
        found: Type,
    },

    #[error("procedure '{name}' does not return a value")]
    ProcedureUsedAsValue { name: String },

    #[error("body of {callable} '{name}' has no prior declaration")]
    BodyWithoutDeclaration { name: String, callable: CallableKind },

    #[error("{callable} '{name}' already has a body")]
    DuplicateBody { name: String, callable: CallableKind },

    #[error("parameters of {callable} '{name}' do not match its declaration")]
    SignatureMismatch { name: String, callable: CallableKind },

    #[error("{callable} '{name}' is declared without a body")]
    MissingBody { name: String, callable: CallableKind },

    #[error("{construct} condition must be boolean, found {found}")]
    NonBooleanCondition { construct: &'static str, found: Type },

    #[error("'return' in procedure '{name}'")]
    ReturnInProcedure { name: String },

    #[error("return value of '{name}' has type {found}, expected {expected}")]
    ReturnTypeMismatch { name: String, expected: Type, found: Type },

    #[error("function '{name}' has no return statement")]
    MissingReturn { name: String },

    #[error("'return' outside of a function or procedure body")]
    ReturnOutsideBody,

    #[error("unknown operator '{op}'")]
    UnknownOperator { op: &'static str },

    #[error("empty expression")]
    EmptyExpression,

    #[error("'{op}' outside of a loop")]
    JumpOutsideLoop { op: JumpOp },
}

impl SemanticErrorKind {
    /// Stable name of the variant, used as the diagnostic code
    pub fn name(&self) -> &'static str {
        match self {
            SemanticErrorKind::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            SemanticErrorKind::DuplicateSignature { .. } => "DuplicateSignature",
            SemanticErrorKind::TypeMismatch { .. } => "TypeMismatch",
            SemanticErrorKind::OperandTypeMismatch { .. } => "OperandTypeMismatch",
            SemanticErrorKind::UndeclaredVariable { .. } => "UndeclaredVariable",
            SemanticErrorKind::UndeclaredCallee { .. } => "UndeclaredCallee",
            SemanticErrorKind::ArityMismatch { .. } => "ArityMismatch",
            SemanticErrorKind::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            SemanticErrorKind::ProcedureUsedAsValue { .. } => "ProcedureUsedAsValue",
            SemanticErrorKind::BodyWithoutDeclaration { .. } => "BodyWithoutDeclaration",
            SemanticErrorKind::DuplicateBody { .. } => "DuplicateBody",
            SemanticErrorKind::SignatureMismatch { .. } => "SignatureMismatch",
            SemanticErrorKind::MissingBody { .. } => "MissingBody",
            SemanticErrorKind::NonBooleanCondition { .. } => "NonBooleanCondition",
            SemanticErrorKind::ReturnInProcedure { .. } => "ReturnInProcedure",
            SemanticErrorKind::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            SemanticErrorKind::MissingReturn { .. } => "MissingReturn",
            SemanticErrorKind::ReturnOutsideBody => "ReturnOutsideBody",
            SemanticErrorKind::UnknownOperator { .. } => "UnknownOperator",
            SemanticErrorKind::EmptyExpression => "EmptyExpression",
            SemanticErrorKind::JumpOutsideLoop { .. } => "JumpOutsideLoop",
        }
    }
}

/// First violation found in a program, with the line of the offending node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub line: Option<u32>,
}

impl SemanticError {
    pub fn new(kind: SemanticErrorKind) -> Self {
        Self { kind, line: None }
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Fill in `line` unless a more precise one is already set
    pub fn or_line(mut self, line: Option<u32>) -> Self {
        if self.line.is_none() {
            self.line = line;
        }
        self
    }
}

impl From<SemanticErrorKind> for SemanticError {
    fn from(kind: SemanticErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Semantic error: {}", self.kind)?;
        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for SemanticError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_line() {
        let err = SemanticError::new(SemanticErrorKind::MissingReturn { name: "f".into() }).at_line(3);
        assert_eq!(err.to_string(), "Semantic error: function 'f' has no return statement (line 3)");
    }

    #[test]
    fn test_or_line_keeps_inner_line() {
        let err = SemanticError::new(SemanticErrorKind::EmptyExpression).at_line(2).or_line(Some(9));
        assert_eq!(err.line, Some(2));

        let err = SemanticError::new(SemanticErrorKind::EmptyExpression).or_line(Some(9));
        assert_eq!(err.line, Some(9));
    }

    #[test]
    fn test_names_callables() {
        let kind = SemanticErrorKind::MissingBody {
            name: "p".into(),
            callable: CallableKind::Procedure,
        };
        assert_eq!(kind.name(), "MissingBody");
        assert_eq!(kind.to_string(), "procedure 'p' is declared without a body");
    }
}
