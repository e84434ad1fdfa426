//! # Declaration Parsing
//!
//! Module and function definitions, including parameter lists with
//! default values.
//!
//! ## Grammar
//!
//! ```text
//! module_declaration   = "module" identifier "(" parameters? ")" statement
//! function_declaration = "function" identifier "(" parameters? ")" "=" expression ";"
//! parameters           = parameter ("," parameter)*
//! parameter            = identifier ("=" expression)?
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parse `module name(params) body`.
    pub(super) fn parse_module_declaration(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.advance(); // module

        let name = self.expect(TokenKind::Identifier)?.clone();
        let mut children = vec![CstNode::with_text(NodeKind::Identifier, name.span, name.text)];

        self.expect(TokenKind::LParen)?;
        children.push(self.parse_parameters()?);
        self.expect(TokenKind::RParen)?;

        children.push(self.parse_statement()?);

        Ok(CstNode::with_children(
            NodeKind::ModuleDeclaration,
            self.span_from(start),
            children,
        ))
    }

    /// Parse `function name(params) = expression;`.
    pub(super) fn parse_function_declaration(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.advance(); // function

        let name = self.expect(TokenKind::Identifier)?.clone();
        let mut children = vec![CstNode::with_text(NodeKind::Identifier, name.span, name.text)];

        self.expect(TokenKind::LParen)?;
        children.push(self.parse_parameters()?);
        self.expect(TokenKind::RParen)?;

        self.expect(TokenKind::Eq)?;
        children.push(self.parse_expression()?);

        if let Some(missing) = self.expect_or_missing(TokenKind::Semicolon) {
            children.push(missing);
        }

        Ok(CstNode::with_children(
            NodeKind::FunctionDeclaration,
            self.span_from(start),
            children,
        ))
    }

    /// Parse a parameter list (inside already-consumed parentheses).
    fn parse_parameters(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let mut children = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(CstNode::with_children(
                NodeKind::Parameters,
                self.span_from(start),
                children,
            ));
        }

        children.push(self.parse_parameter()?);
        while self.match_token(TokenKind::Comma) {
            if self.check(TokenKind::RParen) {
                break;
            }
            children.push(self.parse_parameter()?);
        }

        Ok(CstNode::with_children(
            NodeKind::Parameters,
            self.span_from(start),
            children,
        ))
    }

    /// Parse a single parameter with an optional default value.
    fn parse_parameter(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();

        let name = if self.check(TokenKind::SpecialVariable) {
            let token = self.advance().clone();
            CstNode::with_text(NodeKind::SpecialVariable, token.span, token.text)
        } else {
            let token = self.expect(TokenKind::Identifier)?.clone();
            CstNode::with_text(NodeKind::Identifier, token.span, token.text)
        };

        let mut children = vec![name];
        if self.match_token(TokenKind::Eq) {
            children.push(self.parse_expression()?);
        }

        Ok(CstNode::with_children(
            NodeKind::Parameter,
            self.span_from(start),
            children,
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(source: &str) -> crate::cst::Cst {
        let tokens = Lexer::new(source).tokenize();
        Parser::new(source, tokens).parse()
    }

    #[test]
    fn test_parse_module_declaration() {
        let cst = parse("module box(w, h=10) { cube([w, h, 1]); }");
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);

        let decl = &cst.root.children[0];
        assert_eq!(decl.kind, NodeKind::ModuleDeclaration);
        assert_eq!(
            decl.find_child(NodeKind::Identifier).unwrap().text_or_empty(),
            "box"
        );

        let params = decl.find_child(NodeKind::Parameters).unwrap();
        assert_eq!(params.children.len(), 2);
        // Second parameter has a default value.
        assert_eq!(params.children[1].children.len(), 2);
    }

    #[test]
    fn test_parse_module_with_statement_body() {
        let cst = parse("module rod(l) cylinder(h=l, r=1);");
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);

        let decl = &cst.root.children[0];
        assert_eq!(decl.kind, NodeKind::ModuleDeclaration);
        assert!(decl.find_child(NodeKind::ModuleCall).is_some());
    }

    #[test]
    fn test_parse_function_declaration() {
        let cst = parse("function area(r) = PI * r * r;");
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);

        let decl = &cst.root.children[0];
        assert_eq!(decl.kind, NodeKind::FunctionDeclaration);
        assert!(decl.find_child(NodeKind::BinaryExpression).is_some());
    }

    #[test]
    fn test_parse_function_missing_semicolon() {
        let cst = parse("function f(x) = x + 1");
        assert!(!cst.errors.is_empty());

        let decl = &cst.root.children[0];
        assert_eq!(decl.kind, NodeKind::FunctionDeclaration);
        assert!(decl.find_child(NodeKind::Missing).is_some());
    }

    #[test]
    fn test_parse_special_variable_parameter() {
        let cst = parse("module ring(r, $fn=32) { }");
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);

        let params = cst.root.children[0].find_child(NodeKind::Parameters).unwrap();
        assert_eq!(params.children[1].children[0].kind, NodeKind::SpecialVariable);
    }

    #[test]
    fn test_parse_empty_parameter_list() {
        let cst = parse("module thing() { }");
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);
        let params = cst.root.children[0].find_child(NodeKind::Parameters).unwrap();
        assert!(params.children.is_empty());
    }
}
