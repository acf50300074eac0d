//! Token definitions for the toy language lexer

use crate::common::{Position, Span};
use logos::Logos;

/// Token with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, position: Position) -> Self {
        Self { kind, span, position }
    }
}

/// Line bookkeeping carried by the logos lexer
#[derive(Debug, Clone, Copy)]
pub struct LineTracker {
    pub line: u32,
    /// Byte offset where the current line starts
    pub line_start: usize,
}

impl Default for LineTracker {
    fn default() -> Self {
        Self { line: 1, line_start: 0 }
    }
}

fn newline(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    logos::Skip
}

/// All token kinds of the language
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = LineTracker)]
#[logos(skip r"[ \t\r]+")]
pub enum TokenKind {
    #[token("\n", newline)]
    Newline,

    // === Keywords ===
    #[token("int")]
    Int,
    #[token("boolean")]
    Boolean,
    #[token("procedure")]
    Procedure,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("return")]
    Return,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("print")]
    Print,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // === Identifiers ===
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // === Literals ===
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Number(i64),

    // === Operators ===
    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // Relational
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token(">=")]
    GtEq,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,

    // Logical
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,

    // Assignment
    #[token("=")]
    Assign,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // Special
    Eof,
}

impl TokenKind {
    /// Reserved-word kind for `word`, if it is one
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "int" => TokenKind::Int,
            "boolean" => TokenKind::Boolean,
            "procedure" => TokenKind::Procedure,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "return" => TokenKind::Return,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "print" => TokenKind::Print,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Boolean
                | TokenKind::Procedure
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Print
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// Check if this is an arithmetic, relational or logical operator
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::GtEq
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::Lt
                | TokenKind::AmpAmp
                | TokenKind::PipePipe
                | TokenKind::Bang
        )
    }

    /// Source text of fixed-spelling tokens
    pub fn symbol(&self) -> Option<&'static str> {
        let s = match self {
            TokenKind::Int => "int",
            TokenKind::Boolean => "boolean",
            TokenKind::Procedure => "procedure",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Return => "return",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Print => "print",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::GtEq => ">=",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::Lt => "<",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::Bang => "!",
            TokenKind::Assign => "=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semi => ";",
            TokenKind::Newline => "\n",
            TokenKind::Identifier(_) | TokenKind::Number(_) | TokenKind::Eof => return None,
        };
        Some(s)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Identifier(s) => write!(f, "identifier '{}'", s),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Newline => write!(f, "newline"),
            kind if kind.is_keyword() => {
                write!(f, "{}", kind.symbol().unwrap_or_default().to_uppercase())
            }
            kind => write!(f, "'{}'", kind.symbol().unwrap_or_default()),
        }
    }
}
