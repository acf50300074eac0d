//! Symbol table and scope management

use crate::frontend::ast::Type;
use super::error::SemanticErrorKind;
use std::collections::HashMap;

/// A variable binding
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: Type,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, ty: Type) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
        }
    }
}

/// Kind of symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Declared at top level, lives in the global frame
    Global,
    /// Declared inside a body or branch
    Local,
    /// Function/procedure parameter
    Parameter,
}

/// A scope frame, linked to the frame it was pushed from
///
/// The outermost frame is the global scope; `pop_to_parent` never removes it.
#[derive(Debug)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
    parent: Option<Box<Scope>>,
    loop_depth: usize,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
            parent: None,
            loop_depth: 0,
        }
    }

    /// Define a symbol in the innermost frame
    pub fn define(&mut self, symbol: Symbol) -> Result<(), SemanticErrorKind> {
        if self.symbols.contains_key(&symbol.name) {
            return Err(SemanticErrorKind::DuplicateDeclaration { name: symbol.name });
        }
        self.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Look a name up from the innermost frame outwards
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        if let Some(sym) = self.symbols.get(name) {
            Some(sym)
        } else if let Some(parent) = &self.parent {
            parent.lookup(name)
        } else {
            None
        }
    }

    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Push a new child scope
    pub fn push_child(&mut self) {
        let old_scope = std::mem::replace(self, Scope::new());
        self.loop_depth = old_scope.loop_depth;
        self.parent = Some(Box::new(old_scope));
    }

    /// Pop to parent scope; returns false at the global frame
    pub fn pop_to_parent(&mut self) -> bool {
        if let Some(parent) = self.parent.take() {
            *self = *parent;
            true
        } else {
            false
        }
    }

    /// Number of frames above the global one
    pub fn depth(&self) -> usize {
        self.parent.as_ref().map_or(0, |p| p.depth() + 1)
    }

    pub fn enter_loop(&mut self) {
        self.loop_depth += 1;
    }

    pub fn exit_loop(&mut self) {
        if self.loop_depth > 0 {
            self.loop_depth -= 1;
        }
    }

    pub fn in_loop(&self) -> bool {
        self.loop_depth > 0
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, ty: Type) -> Symbol {
        Symbol::new(name, SymbolKind::Local, ty)
    }

    #[test]
    fn test_same_frame_redefinition_fails() {
        let mut scope = Scope::new();
        scope.define(var("x", Type::Int)).unwrap();

        let err = scope.define(var("x", Type::Boolean)).unwrap_err();
        assert_eq!(err, SemanticErrorKind::DuplicateDeclaration { name: "x".into() });
        assert_eq!(scope.lookup("x").map(|s| s.ty), Some(Type::Int));
    }

    #[test]
    fn test_shadowing_in_child_frame() {
        let mut scope = Scope::new();
        scope.define(var("x", Type::Int)).unwrap();

        scope.push_child();
        scope.define(var("x", Type::Boolean)).unwrap();
        assert_eq!(scope.lookup("x").map(|s| s.ty), Some(Type::Boolean));
        assert!(scope.lookup_local("x").is_some());

        assert!(scope.pop_to_parent());
        assert_eq!(scope.lookup("x").map(|s| s.ty), Some(Type::Int));
    }

    #[test]
    fn test_outer_names_visible_from_inner_frames() {
        let mut scope = Scope::new();
        scope.define(Symbol::new("g", SymbolKind::Global, Type::Int)).unwrap();
        scope.push_child();
        scope.push_child();

        assert_eq!(scope.depth(), 2);
        assert_eq!(scope.lookup("g").map(|s| s.kind), Some(SymbolKind::Global));
        assert!(scope.lookup_local("g").is_none());
    }

    #[test]
    fn test_global_frame_is_never_popped() {
        let mut scope = Scope::new();
        scope.define(var("x", Type::Int)).unwrap();

        assert!(!scope.pop_to_parent());
        assert!(scope.lookup("x").is_some());
    }

    #[test]
    fn test_inner_bindings_dropped_on_pop() {
        let mut scope = Scope::new();
        scope.push_child();
        scope.define(var("tmp", Type::Int)).unwrap();
        scope.pop_to_parent();

        assert!(scope.lookup("tmp").is_none());
    }

    #[test]
    fn test_loop_depth_follows_frames() {
        let mut scope = Scope::new();
        assert!(!scope.in_loop());

        scope.push_child();
        scope.enter_loop();
        scope.push_child();
        assert!(scope.in_loop());

        scope.pop_to_parent();
        scope.exit_loop();
        scope.pop_to_parent();
        assert!(!scope.in_loop());
    }
}
