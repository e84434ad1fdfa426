//! # Primary Expression Parsing
//!
//! Literals, identifiers, special variables and parenthesized
//! expressions.

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parse a primary expression.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// primary = number | string | boolean | undef | identifier
    ///         | special_variable | list | range | "(" expression ")"
    /// ```
    pub(super) fn parse_primary(&mut self) -> Result<CstNode, ParseError> {
        let token = self.peek().clone();
        let start = self.current_position();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                // Surface bad literals now rather than as Undef at
                // evaluation time.
                if token.text.parse::<f64>().is_err() {
                    self.record_error(ParseError::new(
                        ParseErrorKind::InvalidNumber {
                            text: token.text.clone(),
                        },
                        token.span,
                    ));
                }
                Ok(CstNode::with_text(NodeKind::Number, self.span_from(start), token.text))
            }

            TokenKind::String => {
                self.advance();
                if !token.text.ends_with('"') || token.text.len() < 2 {
                    self.record_error(ParseError::new(
                        ParseErrorKind::UnterminatedString,
                        token.span,
                    ));
                }
                Ok(CstNode::with_text(NodeKind::String, self.span_from(start), token.text))
            }

            TokenKind::True => {
                self.advance();
                Ok(CstNode::with_text(NodeKind::Boolean, self.span_from(start), "true"))
            }
            TokenKind::False => {
                self.advance();
                Ok(CstNode::with_text(NodeKind::Boolean, self.span_from(start), "false"))
            }

            TokenKind::Undef => {
                self.advance();
                Ok(CstNode::new(NodeKind::Undef, self.span_from(start)))
            }

            TokenKind::Identifier => {
                self.advance();
                Ok(CstNode::with_text(
                    NodeKind::Identifier,
                    self.span_from(start),
                    token.text,
                ))
            }

            TokenKind::SpecialVariable => {
                self.advance();
                Ok(CstNode::with_text(
                    NodeKind::SpecialVariable,
                    self.span_from(start),
                    token.text,
                ))
            }

            TokenKind::LBracket => self.parse_bracket_expression(),

            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }

            TokenKind::Eof => Err(ParseError::unexpected_eof("expression").with_span(token.span)),

            _ => Err(ParseError::unexpected_token(&token.text, "expression").with_span(token.span)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::cst::NodeKind;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn parse_expr(source: &str) -> crate::cst::CstNode {
        let full = format!("x = {};", source);
        let tokens = Lexer::new(&full).tokenize();
        let cst = Parser::new(&full, tokens).parse();
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);
        cst.root.children[0].children[1].clone()
    }

    #[test]
    fn test_parse_number() {
        let expr = parse_expr("42");
        assert_eq!(expr.kind, NodeKind::Number);
        assert_eq!(expr.text_or_empty(), "42");
    }

    #[test]
    fn test_parse_float() {
        let expr = parse_expr("3.14");
        assert_eq!(expr.kind, NodeKind::Number);
        assert_eq!(expr.text_or_empty(), "3.14");
    }

    #[test]
    fn test_parse_string() {
        let expr = parse_expr("\"hello\"");
        assert_eq!(expr.kind, NodeKind::String);
        assert_eq!(expr.text_or_empty(), "\"hello\"");
    }

    #[test]
    fn test_parse_booleans() {
        assert_eq!(parse_expr("true").text_or_empty(), "true");
        assert_eq!(parse_expr("false").text_or_empty(), "false");
    }

    #[test]
    fn test_parse_undef() {
        assert_eq!(parse_expr("undef").kind, NodeKind::Undef);
    }

    #[test]
    fn test_parse_identifier() {
        let expr = parse_expr("width");
        assert_eq!(expr.kind, NodeKind::Identifier);
        assert_eq!(expr.text_or_empty(), "width");
    }

    #[test]
    fn test_parse_special_variable() {
        let expr = parse_expr("$fn");
        assert_eq!(expr.kind, NodeKind::SpecialVariable);
        assert_eq!(expr.text_or_empty(), "$fn");
    }

    #[test]
    fn test_parse_parenthesized_unwraps() {
        let expr = parse_expr("(1 + 2)");
        assert_eq!(expr.kind, NodeKind::BinaryExpression);
    }

    #[test]
    fn test_unterminated_string_reported() {
        let source = "x = \"open";
        let tokens = Lexer::new(source).tokenize();
        let cst = Parser::new(source, tokens).parse();
        assert!(cst.errors.iter().any(|e| e.code() == "E006"));
    }
}
