//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{CompileError, CompileResult, Position, Span};
use log::trace;
use logos::Logos;

/// Lexer for toy language source code
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    peeked: Option<Token>,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            peeked: None,
            at_eof: false,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> CompileResult<Token> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }

        if self.at_eof {
            let len = self.inner.source().len();
            return Ok(Token::new(TokenKind::Eof, Span::new(len, len), self.position_of(len)));
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let span = self.inner.span();
                let token = Token::new(kind, Span::new(span.start, span.end), self.position_of(span.start));
                trace!("{} at {}", token.kind, token.position);
                Ok(token)
            }
            Some(Err(())) => {
                let span = self.inner.span();
                let slice = self.inner.slice();
                let position = self.position_of(span.start);
                let span = Span::new(span.start, span.end);
                if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
                    Err(CompileError::lexer_with_message(
                        format!("integer literal '{}' is out of range", slice),
                        slice,
                        position,
                        span,
                    ))
                } else {
                    Err(CompileError::lexer(slice, position, span))
                }
            }
            None => {
                self.at_eof = true;
                let len = self.inner.source().len();
                Ok(Token::new(TokenKind::Eof, Span::new(len, len), self.position_of(len)))
            }
        }
    }

    /// Peek at the next token without consuming it
    pub fn peek(&mut self) -> CompileResult<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.next_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    /// Check if the next token matches the expected kind
    pub fn check(&mut self, expected: &TokenKind) -> CompileResult<bool> {
        Ok(std::mem::discriminant(&self.peek()?.kind) == std::mem::discriminant(expected))
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize_all(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Get the source being lexed
    pub fn source(&self) -> &'a str {
        self.inner.source()
    }

    /// Line/column of a byte offset on the current line; columns count characters
    fn position_of(&self, offset: usize) -> Position {
        let extras = &self.inner.extras;
        let start = extras.line_start.min(offset);
        let column = self.inner.source()[start..offset].chars().count() as u32 + 1;
        Position::new(extras.line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize_all()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_keywords() {
        let source = "int boolean procedure if else while return break continue print true false";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Int,
                TokenKind::Boolean,
                TokenKind::Procedure,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::Return,
                TokenKind::Break,
                TokenKind::Continue,
                TokenKind::Print,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_containing_keywords() {
        let source = "integer iffy _x soma2";
        let mut lexer = Lexer::new(source);

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(s) if s == "integer"));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(s) if s == "iffy"));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(s) if s == "_x"));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(s) if s == "soma2"));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Eof));
    }

    #[test]
    fn test_numbers_carry_values() {
        assert_eq!(
            kinds("0 42 007"),
            vec![TokenKind::Number(0), TokenKind::Number(42), TokenKind::Number(7), TokenKind::Eof]
        );
    }

    #[test]
    fn test_two_char_operators_before_single() {
        assert_eq!(
            kinds("== != >= <= > < = + - * / && || !"),
            vec![
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::GtEq,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::Lt,
                TokenKind::Assign,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
        // no whitespace between operands
        assert_eq!(
            kinds("a<=b"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::LtEq,
                TokenKind::Identifier("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let source = "int x;\n  x = 10;\n";
        let tokens = Lexer::new(source).tokenize_all().unwrap();
        let positions: Vec<(u32, u32)> = tokens
            .iter()
            .map(|t| (t.position.line, t.position.column))
            .collect();

        assert_eq!(
            positions,
            vec![(1, 1), (1, 5), (1, 6), (2, 3), (2, 5), (2, 7), (2, 9), (3, 1)]
        );
        assert_eq!(tokens[4].span, Span::new(11, 12));
    }

    #[test]
    fn test_tabs_count_as_one_column() {
        let tokens = Lexer::new("\tx").tokenize_all().unwrap();
        assert_eq!(tokens[0].position, Position::new(1, 2));
    }

    #[test]
    fn test_simple_function() {
        let source = "int soma(int a, int b) { return a + b; }";
        let tokens = Lexer::new(source).tokenize_all().unwrap();

        assert!(matches!(tokens[0].kind, TokenKind::Int));
        assert!(matches!(&tokens[1].kind, TokenKind::Identifier(s) if s == "soma"));
        assert!(matches!(tokens[2].kind, TokenKind::LParen));
        assert!(matches!(tokens[3].kind, TokenKind::Int));
        assert!(matches!(tokens[5].kind, TokenKind::Comma));
        assert!(matches!(tokens[8].kind, TokenKind::RParen));
        assert!(matches!(tokens[9].kind, TokenKind::LBrace));
        assert!(matches!(tokens[10].kind, TokenKind::Return));
        assert!(matches!(tokens[12].kind, TokenKind::Plus));
        assert!(matches!(tokens[14].kind, TokenKind::Semi));
        assert!(matches!(tokens[15].kind, TokenKind::RBrace));
        assert!(matches!(tokens[16].kind, TokenKind::Eof));
        assert_eq!(tokens.len(), 17);
    }

    #[test]
    fn test_invalid_symbol() {
        let err = Lexer::new("int x;\nx = 3 @ 4;").tokenize_all().unwrap_err();
        match err {
            CompileError::Lexer { symbol, position, span, .. } => {
                assert_eq!(symbol, "@");
                assert_eq!(position, Position::new(2, 7));
                assert_eq!(span, Span::new(13, 14));
            }
            other => panic!("expected lexer error, got {other:?}"),
        }
    }

    #[test]
    fn test_lone_ampersand_is_invalid() {
        let err = Lexer::new("a & b").tokenize_all().unwrap_err();
        assert!(matches!(err, CompileError::Lexer { symbol, .. } if symbol == "&"));
    }

    #[test]
    fn test_integer_overflow() {
        let err = Lexer::new("99999999999999999999").tokenize_all().unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_eof_once_and_lines_non_decreasing() {
        let source = "procedure p() {\n  print x;\n}\n\nwhile (a < b) { break; }";
        let tokens = Lexer::new(source).tokenize_all().unwrap();

        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        assert_eq!(eofs, 1);
        assert_eq!(tokens.last().map(|t| &t.kind), Some(&TokenKind::Eof));
        assert!(tokens.windows(2).all(|w| w[0].position.line <= w[1].position.line));
        assert_eq!(tokens.last().unwrap().position.line, 5);
    }

    #[test]
    fn test_empty_source() {
        let tokens = Lexer::new("").tokenize_all().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].position, Position::new(1, 1));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("x = 1");
        assert!(lexer.check(&TokenKind::Identifier(String::new())).unwrap());
        assert!(matches!(lexer.peek().unwrap().kind, TokenKind::Identifier(_)));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(_)));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Assign));
    }
}
