//! Declaration AST nodes

use super::{Expr, Param, Stmt, Type};
use serde::{Deserialize, Serialize};

/// Top-level declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Decl {
    /// Global variable: int x;
    VarDecl(VarDecl),

    /// Function signature: int soma(int a, int b);
    FuncDecl(FuncDecl),

    /// Procedure signature: procedure p(int a);
    ProcDecl(ProcDecl),

    /// Function implementation
    FuncBody(Body),

    /// Procedure implementation
    ProcBody(Body),
}

impl Decl {
    /// Discriminants that identify a declaration in a node program
    pub const KINDS: [&'static str; 5] = ["vardecl", "funcdecl", "procdecl", "funcbody", "procbody"];

    pub fn line(&self) -> Option<u32> {
        match self {
            Decl::VarDecl(d) => d.line,
            Decl::FuncDecl(d) => d.line,
            Decl::ProcDecl(d) => d.line,
            Decl::FuncBody(b) | Decl::ProcBody(b) => b.line,
        }
    }
}

/// Variable declaration with optional initializer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default, rename = "expr", skip_serializing_if = "Option::is_none")]
    pub init: Option<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl VarDecl {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            init: None,
            line: None,
        }
    }

    pub fn with_init(mut self, init: Expr) -> Self {
        self.init = Some(init);
        self
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

/// Function signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub return_type: Type,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl FuncDecl {
    pub fn new(name: impl Into<String>, return_type: Type, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            return_type,
            params,
            line: None,
        }
    }
}

/// Procedure signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl ProcDecl {
    pub fn new(name: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            params,
            line: None,
        }
    }
}

/// Function or procedure implementation; parameters are restated from the signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub body: Vec<Stmt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Body {
    pub fn new(name: impl Into<String>, params: Vec<Param>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            params,
            body,
            line: None,
        }
    }
}
