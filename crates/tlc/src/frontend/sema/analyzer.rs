//! Semantic analyzer for node programs
//!
//! `check_program` runs three phases over the top-level items:
//!
//! 1. bind global variables and function/procedure signatures,
//! 2. check initializers, top-level statements and bodies in order,
//! 3. require a body for every declared signature.
//!
//! The first violation aborts the analysis.

use log::{debug, trace};

use super::error::{SemanticError, SemanticErrorKind};
use super::scope::{Scope, Symbol, SymbolKind};
use super::signatures::{Callable, CallableKind, SignatureTable, BUILTIN_PRINT};
use super::types::TypeChecker;
use crate::frontend::ast::*;

type SemaResult<T> = Result<T, SemanticError>;

/// How strictly a function body must return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReturnCheck {
    /// A `return` must appear among the body's direct statements
    #[default]
    DirectStatements,
    /// An `if` whose branches both return also counts
    AllPaths,
}

/// Analyzer options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub return_check: ReturnCheck,
    /// Reject `break`/`continue` outside of a `while` body
    pub require_loop_for_jumps: bool,
}

/// The body currently being checked
#[derive(Debug)]
struct BodyContext {
    name: String,
    /// `None` inside a procedure
    return_type: Option<Type>,
}

/// Semantic analyzer
///
/// All state lives in the value and is rebuilt by every `check_program`
/// call, so one analyzer can check any number of programs.
pub struct SemanticAnalyzer {
    scope: Scope,
    signatures: SignatureTable,
    type_checker: TypeChecker,
    config: AnalyzerConfig,
    current_body: Option<BodyContext>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            scope: Scope::new(),
            signatures: SignatureTable::new(),
            type_checker: TypeChecker::new(),
            config,
            current_body: None,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Accept the program or fail with its first violation
    pub fn check_program(&mut self, items: &[Item]) -> SemaResult<()> {
        self.reset();

        debug!("binding declarations of {} item(s)", items.len());
        for item in items {
            self.bind_item(item).map_err(|e| e.or_line(item.line()))?;
        }

        debug!("checking items");
        for item in items {
            self.check_item(item).map_err(|e| e.or_line(item.line()))?;
        }

        debug!("checking that every signature has a body");
        if let Some((name, callable)) = self.signatures.missing_bodies().first() {
            return Err(SemanticErrorKind::MissingBody {
                name: (*name).to_string(),
                callable: *callable,
            }
            .into());
        }

        Ok(())
    }

    fn reset(&mut self) {
        self.scope = Scope::new();
        self.signatures = SignatureTable::new();
        self.current_body = None;
    }

    fn bind_item(&mut self, item: &Item) -> SemaResult<()> {
        match item {
            Item::Decl(Decl::VarDecl(var)) => {
                self.scope.define(Symbol::new(&var.name, SymbolKind::Global, var.ty))?;
            }
            Item::Decl(Decl::FuncDecl(func)) => {
                self.signatures
                    .declare_function(&func.name, func.return_type, func.params.clone())?;
            }
            Item::Decl(Decl::ProcDecl(proc)) => {
                self.signatures.declare_procedure(&proc.name, proc.params.clone())?;
            }
            _ => {}
        }
        Ok(())
    }

    fn check_item(&mut self, item: &Item) -> SemaResult<()> {
        match item {
            Item::Decl(Decl::VarDecl(var)) => match &var.init {
                Some(init) => self.expect_type(var.ty, init),
                None => Ok(()),
            },
            Item::Decl(Decl::FuncDecl(_) | Decl::ProcDecl(_)) => Ok(()),
            Item::Decl(Decl::FuncBody(body)) => self.check_body(body, CallableKind::Function),
            Item::Decl(Decl::ProcBody(body)) => self.check_body(body, CallableKind::Procedure),
            Item::Stmt(stmt) => self.check_stmt(stmt),
        }
    }

    /// Check a function or procedure body against its declaration
    ///
    /// Parameters and the body's own declarations share one fresh frame.
    pub fn check_body(&mut self, body: &Body, callable: CallableKind) -> SemaResult<()> {
        let declared = match callable {
            CallableKind::Function => self
                .signatures
                .function(&body.name)
                .map(|sig| (sig.params.clone(), Some(sig.return_type))),
            CallableKind::Procedure => self
                .signatures
                .procedure(&body.name)
                .map(|sig| (sig.params.clone(), None)),
        };
        let Some((params, return_type)) = declared else {
            return Err(SemanticErrorKind::BodyWithoutDeclaration {
                name: body.name.clone(),
                callable,
            }
            .into());
        };

        if params != body.params {
            return Err(SemanticErrorKind::SignatureMismatch {
                name: body.name.clone(),
                callable,
            }
            .into());
        }
        if !self.signatures.mark_implemented(&body.name) {
            return Err(SemanticErrorKind::DuplicateBody {
                name: body.name.clone(),
                callable,
            }
            .into());
        }

        debug!("checking {} body '{}'", callable, body.name);
        self.current_body = Some(BodyContext {
            name: body.name.clone(),
            return_type,
        });
        self.scope.push_child();
        let result = self.check_body_contents(body, return_type.is_some());
        self.scope.pop_to_parent();
        self.current_body = None;
        result
    }

    fn check_body_contents(&mut self, body: &Body, needs_return: bool) -> SemaResult<()> {
        for param in &body.params {
            self.scope
                .define(Symbol::new(&param.name, SymbolKind::Parameter, param.ty))?;
        }

        for stmt in &body.body {
            self.check_stmt(stmt).map_err(|e| e.or_line(stmt.line()))?;
        }

        if needs_return && !self.returns(&body.body) {
            return Err(SemanticErrorKind::MissingReturn {
                name: body.name.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn returns(&self, stmts: &[Stmt]) -> bool {
        match self.config.return_check {
            ReturnCheck::DirectStatements => {
                stmts.iter().any(|stmt| matches!(stmt, Stmt::Return { .. }))
            }
            ReturnCheck::AllPaths => always_returns(stmts),
        }
    }

    /// Check one statement in the current scope
    pub fn check_stmt(&mut self, stmt: &Stmt) -> SemaResult<()> {
        trace!("checking statement at line {:?}", stmt.line());

        match stmt {
            Stmt::VarDecl(var) => {
                let kind = if self.scope.depth() == 0 {
                    SymbolKind::Global
                } else {
                    SymbolKind::Local
                };
                // The name is visible inside its own initializer
                self.scope.define(Symbol::new(&var.name, kind, var.ty))?;
                if let Some(init) = &var.init {
                    self.expect_type(var.ty, init)?;
                }
                Ok(())
            }

            Stmt::Assign { name, expr, .. } => {
                let target = self
                    .scope
                    .lookup(name)
                    .map(|sym| sym.ty)
                    .ok_or_else(|| SemanticErrorKind::UndeclaredVariable { name: name.clone() })?;
                let found = self.type_of_opt(expr.as_ref())?;
                if found != target {
                    return Err(SemanticErrorKind::TypeMismatch {
                        expected: target,
                        found,
                    }
                    .into());
                }
                Ok(())
            }

            Stmt::Call(call) => self.check_call_stmt(call).map_err(|e| e.or_line(call.line)),

            Stmt::Return { expr, .. } => self.check_return(expr.as_ref()),

            Stmt::If { cond, body, else_body, .. } => {
                self.check_condition("if", cond.as_ref())?;
                self.check_block(body, false)?;
                if let Some(else_body) = else_body {
                    self.check_block(else_body, false)?;
                }
                Ok(())
            }

            Stmt::While { cond, body, .. } => {
                self.check_condition("while", cond.as_ref())?;
                self.check_block(body, true)
            }

            Stmt::Print { expr, .. } => self.type_of_opt(expr.as_ref()).map(|_| ()),

            Stmt::Jump { op, .. } => {
                if self.config.require_loop_for_jumps && !self.scope.in_loop() {
                    return Err(SemanticErrorKind::JumpOutsideLoop { op: *op }.into());
                }
                Ok(())
            }
        }
    }

    /// Check a branch or loop body in its own frame
    fn check_block(&mut self, stmts: &[Stmt], is_loop: bool) -> SemaResult<()> {
        self.scope.push_child();
        if is_loop {
            self.scope.enter_loop();
        }

        let result = stmts
            .iter()
            .try_for_each(|stmt| self.check_stmt(stmt).map_err(|e| e.or_line(stmt.line())));

        if is_loop {
            self.scope.exit_loop();
        }
        self.scope.pop_to_parent();
        result
    }

    fn check_return(&self, expr: Option<&Expr>) -> SemaResult<()> {
        let Some(body) = &self.current_body else {
            return Err(SemanticErrorKind::ReturnOutsideBody.into());
        };
        let Some(expected) = body.return_type else {
            return Err(SemanticErrorKind::ReturnInProcedure {
                name: body.name.clone(),
            }
            .into());
        };

        let found = self.type_of_opt(expr)?;
        if found != expected {
            return Err(SemanticErrorKind::ReturnTypeMismatch {
                name: body.name.clone(),
                expected,
                found,
            }
            .into());
        }
        Ok(())
    }

    fn check_condition(&self, construct: &'static str, cond: Option<&Expr>) -> SemaResult<()> {
        let found = self.type_of_opt(cond)?;
        if !self.type_checker.is_condition_type(found) {
            return Err(SemanticErrorKind::NonBooleanCondition { construct, found }.into());
        }
        Ok(())
    }

    fn check_call_stmt(&self, call: &Call) -> SemaResult<()> {
        match self.signatures.lookup(&call.name) {
            Some(callable) => self.check_arguments(&call.name, callable.params(), &call.args),
            None if call.name == BUILTIN_PRINT => {
                if call.args.len() != 1 {
                    return Err(SemanticErrorKind::ArityMismatch {
                        name: call.name.clone(),
                        expected: 1,
                        found: call.args.len(),
                    }
                    .into());
                }
                for arg in &call.args {
                    self.type_of(arg)?;
                }
                Ok(())
            }
            None => Err(SemanticErrorKind::UndeclaredCallee {
                name: call.name.clone(),
            }
            .into()),
        }
    }

    /// Arity first, then each argument against its parameter (1-based positions)
    fn check_arguments(&self, name: &str, params: &[Param], args: &[Expr]) -> SemaResult<()> {
        if params.len() != args.len() {
            return Err(SemanticErrorKind::ArityMismatch {
                name: name.to_string(),
                expected: params.len(),
                found: args.len(),
            }
            .into());
        }

        for (position, (param, arg)) in params.iter().zip(args).enumerate() {
            let found = self.type_of(arg)?;
            if found != param.ty {
                return Err(SemanticErrorKind::ArgumentTypeMismatch {
                    name: name.to_string(),
                    position: position + 1,
                    expected: param.ty,
                    found,
                }
                .into());
            }
        }
        Ok(())
    }

    fn expect_type(&self, expected: Type, expr: &Expr) -> SemaResult<()> {
        let found = self.type_of(expr)?;
        if found != expected {
            return Err(SemanticErrorKind::TypeMismatch { expected, found }.into());
        }
        Ok(())
    }

    fn type_of_opt(&self, expr: Option<&Expr>) -> SemaResult<Type> {
        match expr {
            Some(expr) => self.type_of(expr),
            None => Err(SemanticErrorKind::EmptyExpression.into()),
        }
    }

    /// Compute the type of an expression in the current scope
    pub fn type_of(&self, expr: &Expr) -> SemaResult<Type> {
        match expr {
            Expr::Literal(lit) => match lit.value {
                Some(value) if value.ty() != lit.ty => Err(SemanticErrorKind::TypeMismatch {
                    expected: lit.ty,
                    found: value.ty(),
                }
                .into()),
                _ => Ok(lit.ty),
            },

            Expr::Variable { name, line } => self.scope.lookup(name).map(|sym| sym.ty).ok_or_else(|| {
                SemanticError::from(SemanticErrorKind::UndeclaredVariable { name: name.clone() })
                    .or_line(*line)
            }),

            Expr::Unary { op, operand } => {
                let operand = self.type_of(operand)?;
                Ok(self.type_checker.unary_result_type(*op, operand)?)
            }

            Expr::Binary { op, left, right } => {
                let left = self.type_of(left)?;
                let right = self.type_of(right)?;
                Ok(self.type_checker.binary_result_type(*op, left, right)?)
            }

            Expr::Call(call) => self.type_of_call(call).map_err(|e| e.or_line(call.line)),
        }
    }

    fn type_of_call(&self, call: &Call) -> SemaResult<Type> {
        match self.signatures.lookup(&call.name) {
            Some(Callable::Function(sig)) => {
                self.check_arguments(&call.name, &sig.params, &call.args)?;
                Ok(sig.return_type)
            }
            Some(Callable::Procedure(_)) => Err(SemanticErrorKind::ProcedureUsedAsValue {
                name: call.name.clone(),
            }
            .into()),
            None if call.name == BUILTIN_PRINT => Err(SemanticErrorKind::ProcedureUsedAsValue {
                name: call.name.clone(),
            }
            .into()),
            None => Err(SemanticErrorKind::UndeclaredCallee {
                name: call.name.clone(),
            }
            .into()),
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn always_returns(stmts: &[Stmt]) -> bool {
    stmts.iter().any(|stmt| match stmt {
        Stmt::Return { .. } => true,
        Stmt::If {
            body,
            else_body: Some(else_body),
            ..
        } => always_returns(body) && always_returns(else_body),
        _ => false,
    })
}
