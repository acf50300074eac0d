//! Lexer module for tokenizing toy language source code

mod token;
mod scanner;

pub use token::{LineTracker, Token, TokenKind};
pub use scanner::Lexer;
