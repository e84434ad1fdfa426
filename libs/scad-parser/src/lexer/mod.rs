//! # Lexer
//!
//! Tokenizes source text for the parser. Whitespace and comments are
//! skipped; every lexeme carries its span so downstream stages can map
//! nodes back to the editor buffer.
//!
//! ## Example
//!
//! ```rust
//! use scad_parser::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("cube(10);").tokenize();
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::span::{Position, Span};

// =============================================================================
// LEXER
// =============================================================================

/// Converts source text into a stream of tokens.
pub struct Lexer<'a> {
    /// Source text being lexed.
    source: &'a str,
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Vector of tokens, always terminated by an EOF token.
    pub fn tokenize(mut self) -> Vec<Token> {
        while !self.cursor.is_eof() {
            self.skip_trivia();
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token();
        }

        let eof = self.cursor.position();
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(eof, eof), String::new()));

        self.tokens
    }

    /// Skip whitespace, line comments and block comments.
    fn skip_trivia(&mut self) {
        loop {
            self.cursor.advance_while(char::is_whitespace);

            if self.cursor.peek() == Some('/') && self.cursor.peek_next() == Some('/') {
                self.cursor.advance_while(|c| c != '\n');
                continue;
            }

            if self.cursor.peek() == Some('/') && self.cursor.peek_next() == Some('*') {
                self.cursor.advance();
                self.cursor.advance();
                while !self.cursor.is_eof() {
                    if self.cursor.peek() == Some('*') && self.cursor.peek_next() == Some('/') {
                        self.cursor.advance();
                        self.cursor.advance();
                        break;
                    }
                    self.cursor.advance();
                }
                continue;
            }

            break;
        }
    }

    /// Scan a single token starting at the current position.
    fn scan_token(&mut self) {
        let start = self.cursor.position();
        let c = match self.cursor.advance() {
            Some(c) => c,
            None => return,
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '#' => TokenKind::Hash,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,

            '=' => self.two_char('=', TokenKind::EqEq, TokenKind::Eq),
            '!' => self.two_char('=', TokenKind::BangEq, TokenKind::Bang),
            '<' => self.two_char('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => self.two_char('=', TokenKind::GtEq, TokenKind::Gt),
            '&' => self.two_char('&', TokenKind::AmpAmp, TokenKind::Error),
            '|' => self.two_char('|', TokenKind::PipePipe, TokenKind::Error),

            '"' => return self.scan_string(start),
            '0'..='9' => return self.scan_number(start),
            'a'..='z' | 'A'..='Z' | '_' => return self.scan_identifier(start),
            '$' => return self.scan_special_variable(start),

            _ => TokenKind::Error,
        };

        self.push(kind, start);
    }

    /// Consume `next` if it follows, producing `matched`, else `single`.
    fn two_char(&mut self, next: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.cursor.peek() == Some(next) {
            self.cursor.advance();
            matched
        } else {
            single
        }
    }

    /// Scan a string literal. An unterminated string runs to EOF and is
    /// still emitted as a String token so the parser can keep going.
    fn scan_string(&mut self, start: Position) {
        while let Some(c) = self.cursor.peek() {
            if c == '"' {
                self.cursor.advance();
                break;
            }
            if c == '\\' {
                self.cursor.advance();
            }
            self.cursor.advance();
        }
        self.push(TokenKind::String, start);
    }

    /// Scan a number literal with optional fraction and exponent.
    fn scan_number(&mut self, start: Position) {
        let mut has_dot = false;
        let mut has_exponent = false;

        while let Some(c) = self.cursor.peek() {
            match c {
                '0'..='9' => {
                    self.cursor.advance();
                }
                '.' if !has_dot && !has_exponent => {
                    has_dot = true;
                    self.cursor.advance();
                }
                'e' | 'E' if !has_exponent => {
                    has_exponent = true;
                    self.cursor.advance();
                    if matches!(self.cursor.peek(), Some('+') | Some('-')) {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }

        self.push(TokenKind::Number, start);
    }

    /// Scan an identifier or keyword.
    fn scan_identifier(&mut self, start: Position) {
        self.cursor.advance_while(|c| c.is_alphanumeric() || c == '_');

        let end = self.cursor.position();
        let text = &self.source[start.byte..end.byte];

        let kind = match text {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "undef" => TokenKind::Undef,
            "module" => TokenKind::Module,
            "function" => TokenKind::Function,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "let" => TokenKind::Let,
            "each" => TokenKind::Each,
            "include" => TokenKind::Include,
            "use" => TokenKind::Use,
            _ => TokenKind::Identifier,
        };

        self.tokens
            .push(Token::new(kind, Span::new(start, end), text.to_string()));
    }

    /// Scan a special variable like `$fn`.
    fn scan_special_variable(&mut self, start: Position) {
        self.cursor.advance_while(|c| c.is_alphanumeric() || c == '_');
        self.push(TokenKind::SpecialVariable, start);
    }

    /// Push a token spanning from `start` to the current position.
    fn push(&mut self, kind: TokenKind, start: Position) {
        let end = self.cursor.position();
        let text = self.source[start.byte..end.byte].to_string();
        self.tokens.push(Token::new(kind, Span::new(start, end), text));
    }
}

// =============================================================================
// TESTS
// =============================================================================
