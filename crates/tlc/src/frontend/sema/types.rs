//! Operator typing rules

use crate::frontend::ast::{BinaryOp, Type, UnaryOp};
use super::error::SemanticErrorKind;

/// Type checker for operators and conditions
pub struct TypeChecker;

impl TypeChecker {
    pub fn new() -> Self {
        Self
    }

    /// Get the result type of a binary operation
    pub fn binary_result_type(
        &self,
        op: BinaryOp,
        left: Type,
        right: Type,
    ) -> Result<Type, SemanticErrorKind> {
        if op.is_arithmetic() {
            Self::require(op.symbol(), Type::Int, left)?;
            Self::require(op.symbol(), Type::Int, right)?;
            return Ok(Type::Int);
        }

        if op.is_relational() {
            // int with int or boolean with boolean
            if left != right {
                return Err(SemanticErrorKind::TypeMismatch {
                    expected: left,
                    found: right,
                });
            }
            return Ok(Type::Boolean);
        }

        Self::require(op.symbol(), Type::Boolean, left)?;
        Self::require(op.symbol(), Type::Boolean, right)?;
        Ok(Type::Boolean)
    }

    /// Get the result type of a unary operation
    pub fn unary_result_type(&self, op: UnaryOp, operand: Type) -> Result<Type, SemanticErrorKind> {
        match op {
            UnaryOp::Not => {
                Self::require(op.symbol(), Type::Boolean, operand)?;
                Ok(Type::Boolean)
            }
            UnaryOp::Neg => Err(SemanticErrorKind::UnknownOperator { op: op.symbol() }),
        }
    }

    /// Check if a type can be used as an `if`/`while` condition
    pub fn is_condition_type(&self, ty: Type) -> bool {
        ty == Type::Boolean
    }

    fn require(op: &'static str, expected: Type, found: Type) -> Result<(), SemanticErrorKind> {
        if found != expected {
            return Err(SemanticErrorKind::OperandTypeMismatch { op, expected, found });
        }
        Ok(())
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::Type::{Boolean, Int};

    #[test]
    fn test_arithmetic() {
        let tc = TypeChecker::new();
        for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div] {
            assert_eq!(tc.binary_result_type(op, Int, Int), Ok(Int));
        }
        assert_eq!(
            tc.binary_result_type(BinaryOp::Add, Int, Boolean),
            Err(SemanticErrorKind::OperandTypeMismatch { op: "+", expected: Int, found: Boolean })
        );
        assert!(tc.binary_result_type(BinaryOp::Mul, Boolean, Boolean).is_err());
    }

    #[test]
    fn test_relational_requires_same_types() {
        let tc = TypeChecker::new();
        assert_eq!(tc.binary_result_type(BinaryOp::Eq, Int, Int), Ok(Boolean));
        assert_eq!(tc.binary_result_type(BinaryOp::Ne, Boolean, Boolean), Ok(Boolean));
        assert_eq!(tc.binary_result_type(BinaryOp::Lt, Int, Int), Ok(Boolean));
        assert_eq!(
            tc.binary_result_type(BinaryOp::Eq, Int, Boolean),
            Err(SemanticErrorKind::TypeMismatch { expected: Int, found: Boolean })
        );
    }

    #[test]
    fn test_logical() {
        let tc = TypeChecker::new();
        assert_eq!(tc.binary_result_type(BinaryOp::And, Boolean, Boolean), Ok(Boolean));
        assert_eq!(
            tc.binary_result_type(BinaryOp::Or, Boolean, Int),
            Err(SemanticErrorKind::OperandTypeMismatch { op: "||", expected: Boolean, found: Int })
        );
    }

    #[test]
    fn test_unary() {
        let tc = TypeChecker::new();
        assert_eq!(tc.unary_result_type(UnaryOp::Not, Boolean), Ok(Boolean));
        assert!(tc.unary_result_type(UnaryOp::Not, Int).is_err());
        assert_eq!(
            tc.unary_result_type(UnaryOp::Neg, Int),
            Err(SemanticErrorKind::UnknownOperator { op: "-" })
        );
    }
}
