//! Function and procedure signature tables

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::error::SemanticErrorKind;
use crate::frontend::ast::{Param, Type};

/// Name of the built-in output procedure callable as `print(expr)`
pub const BUILTIN_PRINT: &str = "print";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallableKind {
    Function,
    Procedure,
}

impl fmt::Display for CallableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallableKind::Function => write!(f, "function"),
            CallableKind::Procedure => write!(f, "procedure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSig {
    pub return_type: Type,
    pub params: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureSig {
    pub params: Vec<Param>,
}

/// Result of resolving a callee name
#[derive(Debug, Clone, Copy)]
pub enum Callable<'a> {
    Function(&'a FunctionSig),
    Procedure(&'a ProcedureSig),
}

impl Callable<'_> {
    pub fn kind(&self) -> CallableKind {
        match self {
            Callable::Function(_) => CallableKind::Function,
            Callable::Procedure(_) => CallableKind::Procedure,
        }
    }

    pub fn params(&self) -> &[Param] {
        match self {
            Callable::Function(sig) => &sig.params,
            Callable::Procedure(sig) => &sig.params,
        }
    }
}

/// Functions and procedures share one name space
#[derive(Debug, Default)]
pub struct SignatureTable {
    functions: HashMap<String, FunctionSig>,
    procedures: HashMap<String, ProcedureSig>,
    /// Declaration order, for deterministic completeness reports
    order: Vec<(String, CallableKind)>,
    implemented: HashSet<String>,
}

impl SignatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_function(
        &mut self,
        name: &str,
        return_type: Type,
        params: Vec<Param>,
    ) -> Result<(), SemanticErrorKind> {
        self.ensure_free(name)?;
        self.functions.insert(name.to_string(), FunctionSig { return_type, params });
        self.order.push((name.to_string(), CallableKind::Function));
        Ok(())
    }

    pub fn declare_procedure(&mut self, name: &str, params: Vec<Param>) -> Result<(), SemanticErrorKind> {
        self.ensure_free(name)?;
        self.procedures.insert(name.to_string(), ProcedureSig { params });
        self.order.push((name.to_string(), CallableKind::Procedure));
        Ok(())
    }

    fn ensure_free(&self, name: &str) -> Result<(), SemanticErrorKind> {
        if self.functions.contains_key(name) || self.procedures.contains_key(name) {
            return Err(SemanticErrorKind::DuplicateSignature { name: name.to_string() });
        }
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Callable<'_>> {
        if let Some(sig) = self.functions.get(name) {
            Some(Callable::Function(sig))
        } else {
            self.procedures.get(name).map(Callable::Procedure)
        }
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSig> {
        self.functions.get(name)
    }

    pub fn procedure(&self, name: &str) -> Option<&ProcedureSig> {
        self.procedures.get(name)
    }

    /// Record that `name` received a body; false if it already had one
    pub fn mark_implemented(&mut self, name: &str) -> bool {
        self.implemented.insert(name.to_string())
    }

    pub fn is_implemented(&self, name: &str) -> bool {
        self.implemented.contains(name)
    }

    /// Declared callables without a body: functions first, then procedures,
    /// each in declaration order
    pub fn missing_bodies(&self) -> Vec<(&str, CallableKind)> {
        let mut missing: Vec<_> = self
            .order
            .iter()
            .filter(|(name, _)| !self.implemented.contains(name))
            .map(|(name, kind)| (name.as_str(), *kind))
            .collect();
        missing.sort_by_key(|(_, kind)| *kind == CallableKind::Procedure);
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_and_procedure_share_names() {
        let mut table = SignatureTable::new();
        table.declare_function("f", Type::Int, vec![]).unwrap();
        assert_eq!(
            table.declare_procedure("f", vec![]),
            Err(SemanticErrorKind::DuplicateSignature { name: "f".into() })
        );

        let mut table = SignatureTable::new();
        table.declare_procedure("f", vec![]).unwrap();
        assert_eq!(
            table.declare_function("f", Type::Int, vec![]),
            Err(SemanticErrorKind::DuplicateSignature { name: "f".into() })
        );
    }

    #[test]
    fn test_lookup_distinguishes_callables() {
        let mut table = SignatureTable::new();
        table.declare_function("f", Type::Boolean, vec![Param::new(Type::Int, "a")]).unwrap();
        table.declare_procedure("p", vec![]).unwrap();

        let f = table.lookup("f").unwrap();
        assert_eq!(f.kind(), CallableKind::Function);
        assert_eq!(f.params().len(), 1);
        assert_eq!(table.lookup("p").map(|c| c.kind()), Some(CallableKind::Procedure));
        assert!(table.lookup("q").is_none());
        assert!(table.function("p").is_none());
        assert!(table.procedure("p").is_some());
    }

    #[test]
    fn test_missing_bodies_in_declaration_order() {
        let mut table = SignatureTable::new();
        table.declare_procedure("p1", vec![]).unwrap();
        table.declare_function("f1", Type::Int, vec![]).unwrap();
        table.declare_function("f2", Type::Int, vec![]).unwrap();
        table.declare_procedure("p2", vec![]).unwrap();

        assert!(table.mark_implemented("f1"));
        assert!(!table.mark_implemented("f1"));
        assert!(table.is_implemented("f1"));

        let missing = table.missing_bodies();
        assert_eq!(
            missing,
            vec![
                ("f2", CallableKind::Function),
                ("p1", CallableKind::Procedure),
                ("p2", CallableKind::Procedure),
            ]
        );
    }
}
