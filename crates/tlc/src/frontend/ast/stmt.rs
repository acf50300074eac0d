//! Statement AST nodes

use super::{Call, Expr, VarDecl};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Statement node, at top level or inside a body or branch
///
/// Expressions the language requires (`assign`, `return`, `print` operands and
/// conditions) are optional here so a missing one surfaces as a semantic error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Stmt {
    /// Variable declaration: int x; boolean b = true;
    VarDecl(VarDecl),

    /// Assignment: x = expr;
    Assign {
        name: String,
        #[serde(default)]
        expr: Option<Expr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<u32>,
    },

    /// Call statement: p(a, b);
    Call(Call),

    /// Return statement: return expr;
    Return {
        #[serde(default)]
        expr: Option<Expr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<u32>,
    },

    /// If statement: if (cond) { body } [else { else_body }]
    If {
        #[serde(default)]
        cond: Option<Expr>,
        #[serde(default)]
        body: Vec<Stmt>,
        #[serde(default, rename = "else", skip_serializing_if = "Option::is_none")]
        else_body: Option<Vec<Stmt>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<u32>,
    },

    /// While loop: while (cond) { body }
    While {
        #[serde(default)]
        cond: Option<Expr>,
        #[serde(default)]
        body: Vec<Stmt>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<u32>,
    },

    /// Print statement: print expr;
    Print {
        #[serde(default)]
        expr: Option<Expr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<u32>,
    },

    /// break; or continue;
    Jump {
        op: JumpOp,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<u32>,
    },
}

impl Stmt {
    pub fn assign(name: impl Into<String>, expr: Expr) -> Self {
        Stmt::Assign { name: name.into(), expr: Some(expr), line: None }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Stmt::Call(Call::new(name, args))
    }

    pub fn ret(expr: Expr) -> Self {
        Stmt::Return { expr: Some(expr), line: None }
    }

    pub fn if_else(cond: Expr, body: Vec<Stmt>, else_body: Option<Vec<Stmt>>) -> Self {
        Stmt::If { cond: Some(cond), body, else_body, line: None }
    }

    pub fn while_loop(cond: Expr, body: Vec<Stmt>) -> Self {
        Stmt::While { cond: Some(cond), body, line: None }
    }

    pub fn print(expr: Expr) -> Self {
        Stmt::Print { expr: Some(expr), line: None }
    }

    pub fn jump(op: JumpOp) -> Self {
        Stmt::Jump { op, line: None }
    }

    /// Source line recorded by the parser, if any
    pub fn line(&self) -> Option<u32> {
        match self {
            Stmt::VarDecl(decl) => decl.line,
            Stmt::Call(call) => call.line,
            Stmt::Assign { line, .. }
            | Stmt::Return { line, .. }
            | Stmt::If { line, .. }
            | Stmt::While { line, .. }
            | Stmt::Print { line, .. }
            | Stmt::Jump { line, .. } => *line,
        }
    }

    /// Attach a source line, builder style
    pub fn at_line(mut self, at: u32) -> Self {
        match &mut self {
            Stmt::VarDecl(decl) => decl.line = Some(at),
            Stmt::Call(call) => call.line = Some(at),
            Stmt::Assign { line, .. }
            | Stmt::Return { line, .. }
            | Stmt::If { line, .. }
            | Stmt::While { line, .. }
            | Stmt::Print { line, .. }
            | Stmt::Jump { line, .. } => *line = Some(at),
        }
        self
    }
}

/// Loop control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JumpOp {
    Break,
    Continue,
}

impl fmt::Display for JumpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JumpOp::Break => write!(f, "break"),
            JumpOp::Continue => write!(f, "continue"),
        }
    }
}
