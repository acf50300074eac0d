//! End-to-end checks through the JSON node-program boundary

use pretty_assertions::assert_eq;
use toy_lang::frontend::sema::CallableKind;
use toy_lang::frontend::ast::Type;
use toy_lang::{
    AnalyzerConfig, CompileError, FrontendConfig, Pipeline, SemanticError, SemanticErrorKind, TokenKind,
};

const SOMA_SOURCE: &str = include_str!("programs/soma.tl");
const SOMA: &str = include_str!("programs/soma.json");
const BAD_ASSIGN: &str = include_str!("programs/bad_assign.json");
const MISSING_BODY: &str = include_str!("programs/missing_body.json");
const LOOPS: &str = include_str!("programs/loops.json");

fn semantic(result: Result<(), CompileError>) -> SemanticError {
    match result {
        Err(CompileError::Semantic(err)) => err,
        other => panic!("expected a semantic error, got {other:?}"),
    }
}

#[test]
fn soma_program_is_accepted() {
    let mut pipeline = Pipeline::default();
    assert!(pipeline.check_json("soma.json", SOMA, Some(("soma.tl", SOMA_SOURCE))).is_ok());
}

#[test]
fn soma_source_scans() {
    let mut pipeline = Pipeline::default();
    let tokens = pipeline.scan_source("soma.tl", SOMA_SOURCE).unwrap();

    let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
    assert_eq!(eofs, 1);
    assert_eq!(tokens.last().map(|t| &t.kind), Some(&TokenKind::Eof));
    assert!(tokens.windows(2).all(|w| w[0].position.line <= w[1].position.line));

    let first_return = tokens.iter().find(|t| t.kind == TokenKind::Return).unwrap();
    assert_eq!((first_return.position.line, first_return.position.column), (4, 5));
}

#[test]
fn assigning_boolean_to_int_is_rejected() {
    let mut pipeline = Pipeline::default();
    let err = semantic(pipeline.check_json("bad_assign.json", BAD_ASSIGN, None));

    assert_eq!(
        err,
        SemanticError::new(SemanticErrorKind::TypeMismatch {
            expected: Type::Int,
            found: Type::Boolean,
        })
        .at_line(2)
    );
}

#[test]
fn declared_function_needs_a_body() {
    let mut pipeline = Pipeline::default();
    let err = semantic(pipeline.check_json("missing_body.json", MISSING_BODY, None));

    assert_eq!(
        err.kind,
        SemanticErrorKind::MissingBody {
            name: "f".into(),
            callable: CallableKind::Function,
        }
    );
}

#[test]
fn loops_accepted_unless_jumps_are_strict() {
    let mut pipeline = Pipeline::default();
    assert!(pipeline.check_json("loops.json", LOOPS, None).is_ok());

    let mut strict = Pipeline::new(FrontendConfig {
        analyzer: AnalyzerConfig {
            require_loop_for_jumps: true,
            ..AnalyzerConfig::default()
        },
        ..FrontendConfig::default()
    });
    let err = semantic(strict.check_json("loops.json", LOOPS, None));
    assert_eq!(err.line, Some(14));
    assert!(matches!(err.kind, SemanticErrorKind::JumpOutsideLoop { .. }));
}

#[test]
fn unknown_node_kind_is_a_load_error() {
    let mut pipeline = Pipeline::default();
    let result = pipeline.check_json("bad.json", r#"[{"kind":"for","line":1}]"#, None);
    assert!(matches!(result, Err(CompileError::Program(_))));
}
