//! # AST Builder
//!
//! Lowers a CST into typed [`AstNode`]s. Statement dispatch is an
//! exhaustive match on [`NodeKind`]; only call names go through the
//! open [`ExtractorRegistry`], so an unknown CST shape is a compile
//! error here rather than a silent fall-through at runtime.
//!
//! Building is total: parser errors convert into structured
//! diagnostics, damaged statements are skipped via a recovery
//! strategy, and everything salvageable still lowers.
//!
//! ## Example
//!
//! ```rust
//! use scad_ast::builder::AstBuilder;
//! use scad_ast::registry::ExtractorRegistry;
//!
//! let source = "cube(10);";
//! let cst = scad_parser::parse(source);
//! let registry = ExtractorRegistry::with_builtins();
//! let (ast, diagnostics) = AstBuilder::new(source, &registry).build(&cst);
//! assert_eq!(ast.len(), 1);
//! assert!(!diagnostics.has_errors());
//! ```

mod arguments;
mod expressions;

pub use arguments::lower_arguments;
pub use expressions::{lower_bindings, lower_expression};

use crate::ast::{AstNode, ParamDecl};
use crate::diagnostics::Diagnostics;
use crate::error::ParserError;
use crate::location::SourceLocation;
use crate::recovery::RecoveryStrategyFactory;
use crate::registry::{ExtractedCall, ExtractorRegistry};
use scad_parser::error::ParseErrorKind;
use scad_parser::{Cst, CstNode, NodeKind, Span};
use tracing::{debug, warn};

// =============================================================================
// BUILDER
// =============================================================================

/// CST-to-AST builder for one source buffer.
pub struct AstBuilder<'a> {
    source: &'a str,
    registry: &'a ExtractorRegistry,
    recovery: RecoveryStrategyFactory,
    diagnostics: Diagnostics,
}

impl<'a> AstBuilder<'a> {
    pub fn new(source: &'a str, registry: &'a ExtractorRegistry) -> Self {
        Self {
            source,
            registry,
            recovery: RecoveryStrategyFactory::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Build the AST, consuming the builder. Parser errors are folded
    /// into the returned diagnostics.
    pub fn build(mut self, cst: &Cst) -> (Vec<AstNode>, Diagnostics) {
        for error in &cst.errors {
            let converted = self.convert_parse_error(error);
            self.diagnostics.error(converted);
        }

        let nodes = self.build_statements(&cst.root, &cst.root.children);
        debug!(
            statements = nodes.len(),
            errors = self.diagnostics.errors.len(),
            "ast build finished"
        );
        (nodes, self.diagnostics)
    }

    fn snippet(&self, span: Span) -> &'a str {
        self.source
            .get(span.start.byte..span.end.byte)
            .unwrap_or("")
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    /// Build a statement list, recovering across damaged regions.
    /// `parent` owns the list and is what recovery scans.
    fn build_statements(&mut self, parent: &CstNode, statements: &[CstNode]) -> Vec<AstNode> {
        let mut nodes = Vec::new();
        let mut index = 0;

        while index < statements.len() {
            let stmt = &statements[index];
            if stmt.kind == NodeKind::Error {
                let error = ParserError::unexpected_token(
                    stmt.text_or_empty().trim(),
                    SourceLocation::from(stmt.span),
                    self.snippet(stmt.span),
                );
                let resume = self
                    .recovery
                    .for_error(&error)
                    .recover(parent, stmt, &error)
                    .map(|node| node.span.start.byte);
                self.diagnostics.error(error);

                match resume {
                    Some(resume_at) => {
                        index = statements
                            .iter()
                            .enumerate()
                            .skip(index + 1)
                            .find(|(_, s)| s.span.start.byte >= resume_at)
                            .map(|(i, _)| i)
                            .unwrap_or(statements.len());
                    }
                    None => break,
                }
                continue;
            }

            if stmt.kind == NodeKind::Block {
                // A bare block just scopes its statements.
                let mut inner = self.build_statements(stmt, &stmt.children);
                nodes.append(&mut inner);
            } else if let Some(node) = self.build_statement(stmt) {
                nodes.push(node);
            }
            index += 1;
        }

        nodes
    }

    fn build_statement(&mut self, stmt: &CstNode) -> Option<AstNode> {
        match stmt.kind {
            NodeKind::ModuleCall => self.build_module_call(stmt),
            NodeKind::Assignment => self.build_assignment(stmt),
            NodeKind::ModuleDeclaration => self.build_module_declaration(stmt),
            NodeKind::FunctionDeclaration => self.build_function_declaration(stmt),
            NodeKind::ForBlock => self.build_for(stmt),
            NodeKind::IfBlock => self.build_if(stmt),
            NodeKind::LetBlock => self.build_let(stmt),
            NodeKind::IncludeStatement | NodeKind::UseStatement => self.build_include(stmt),
            NodeKind::Modifier => self.build_modifier(stmt),
            // The parser already reported these; nothing to lower.
            NodeKind::Error | NodeKind::Missing => None,
            other => {
                warn!(kind = ?other, "node is not a statement");
                None
            }
        }
    }

    /// The body of a call, loop or declaration: a block flattens to
    /// its statements, a single statement becomes a one-element list.
    fn build_body(&mut self, body: &CstNode) -> Vec<AstNode> {
        if body.kind == NodeKind::Block {
            self.build_statements(body, &body.children)
        } else {
            self.build_statement(body).into_iter().collect()
        }
    }

    fn build_module_call(&mut self, stmt: &CstNode) -> Option<AstNode> {
        let name_node = stmt.children.first()?;
        let name = name_node.text_or_empty().to_string();
        let args = stmt.find_child(NodeKind::Arguments)?;
        let parameters = lower_arguments(args);

        let children = match stmt.children.get(2) {
            Some(body) if body.kind == NodeKind::Missing => Vec::new(),
            Some(body) => self.build_body(body),
            None => Vec::new(),
        };

        let location = SourceLocation::from(stmt.span);
        let name_location = SourceLocation::from(name_node.span);

        let registry = self.registry;
        if let Some(extractor) = registry.get(&name) {
            let call = ExtractedCall {
                name: &name,
                parameters: &parameters,
                children,
                location,
                name_location,
                snippet: self.snippet(stmt.span),
            };
            Some(extractor.extract(call, &mut self.diagnostics))
        } else {
            Some(AstNode::ModuleCall {
                name,
                parameters,
                children,
                location,
                name_location,
            })
        }
    }

    fn build_assignment(&mut self, stmt: &CstNode) -> Option<AstNode> {
        let name_node = stmt.children.first()?;
        let value = stmt.children.get(1)?;
        Some(AstNode::Assignment {
            name: name_node.text_or_empty().trim_start_matches('$').to_string(),
            special: name_node.kind == NodeKind::SpecialVariable,
            value: lower_expression(value),
            location: SourceLocation::from(stmt.span),
            name_location: SourceLocation::from(name_node.span),
        })
    }

    fn build_module_declaration(&mut self, stmt: &CstNode) -> Option<AstNode> {
        let name_node = stmt.children.first()?;
        let params = stmt.find_child(NodeKind::Parameters)?;
        let body = stmt.children.get(2)?;
        Some(AstNode::ModuleDefinition {
            name: name_node.text_or_empty().to_string(),
            params: self.lower_param_decls(params),
            body: self.build_body(body),
            location: SourceLocation::from(stmt.span),
            name_location: SourceLocation::from(name_node.span),
        })
    }

    fn build_function_declaration(&mut self, stmt: &CstNode) -> Option<AstNode> {
        let name_node = stmt.children.first()?;
        let params = stmt.find_child(NodeKind::Parameters)?;
        let body = stmt.children.get(2)?;
        Some(AstNode::FunctionDefinition {
            name: name_node.text_or_empty().to_string(),
            params: self.lower_param_decls(params),
            body: lower_expression(body),
            location: SourceLocation::from(stmt.span),
            name_location: SourceLocation::from(name_node.span),
        })
    }

    fn build_for(&mut self, stmt: &CstNode) -> Option<AstNode> {
        let bindings = stmt.find_child(NodeKind::ForAssignments)?;
        let body = stmt.children.get(1)?;
        Some(AstNode::For {
            bindings: lower_bindings(bindings),
            body: self.build_body(body),
            location: SourceLocation::from(stmt.span),
        })
    }

    fn build_let(&mut self, stmt: &CstNode) -> Option<AstNode> {
        let bindings = stmt.find_child(NodeKind::ForAssignments)?;
        let body = stmt.children.get(1)?;
        Some(AstNode::Let {
            bindings: lower_bindings(bindings),
            body: self.build_body(body),
            location: SourceLocation::from(stmt.span),
        })
    }

    fn build_if(&mut self, stmt: &CstNode) -> Option<AstNode> {
        let condition = stmt.children.first()?;
        let then_branch = stmt.children.get(1)?;
        let else_branch = stmt
            .children
            .get(2)
            .map(|node| self.build_body(node))
            .unwrap_or_default();
        Some(AstNode::If {
            condition: lower_expression(condition),
            then_branch: self.build_body(then_branch),
            else_branch,
            location: SourceLocation::from(stmt.span),
        })
    }

    fn build_include(&mut self, stmt: &CstNode) -> Option<AstNode> {
        let path = stmt.find_child(NodeKind::String)?;
        Some(AstNode::Include {
            path: path.text_or_empty().trim_matches('"').to_string(),
            executes_body: stmt.kind == NodeKind::IncludeStatement,
            location: SourceLocation::from(stmt.span),
        })
    }

    fn build_modifier(&mut self, stmt: &CstNode) -> Option<AstNode> {
        let marker = stmt.children.first()?;
        let inner = stmt.children.get(1)?;
        Some(AstNode::Modifier {
            modifier: marker.text_or_empty().chars().next()?,
            children: self.build_statement(inner).into_iter().collect(),
            location: SourceLocation::from(stmt.span),
        })
    }

    fn lower_param_decls(&mut self, params: &CstNode) -> Vec<ParamDecl> {
        params
            .find_children(NodeKind::Parameter)
            .into_iter()
            .filter_map(|param| {
                let name_node = param.children.first()?;
                Some(ParamDecl {
                    name: name_node.text_or_empty().trim_start_matches('$').to_string(),
                    special: name_node.kind == NodeKind::SpecialVariable,
                    default: param.children.get(1).map(lower_expression),
                    location: SourceLocation::from(name_node.span),
                })
            })
            .collect()
    }

    // =========================================================================
    // ERROR CONVERSION
    // =========================================================================

    fn convert_parse_error(&self, error: &scad_parser::ParseError) -> ParserError {
        let position = SourceLocation::from(error.span);
        let snippet = self.snippet(error.span);

        match &error.kind {
            ParseErrorKind::UnexpectedToken { found, expected } => {
                ParserError::unexpected_token(found, position, snippet)
                    .with_context(format!("expected {expected}"))
            }
            ParseErrorKind::UnexpectedEof { expected } => {
                ParserError::missing_token(expected, position, snippet)
            }
            ParseErrorKind::MissingToken { expected } => {
                if expected == ";" {
                    ParserError::missing_semicolon(position, snippet)
                } else {
                    ParserError::missing_token(expected, position, snippet)
                }
            }
            ParseErrorKind::ExtraToken { found } => {
                ParserError::unexpected_token(found, position, snippet)
            }
            ParseErrorKind::InvalidNumber { text } => {
                ParserError::type_mismatch("number", "malformed literal", position, snippet)
                    .with_context(text.clone())
            }
            ParseErrorKind::UnterminatedString => {
                ParserError::missing_token("closing '\"'", position, snippet)
            }
            ParseErrorKind::NestingTooDeep { limit } => {
                ParserError::unexpected_token("deeply nested input", position, snippet)
                    .with_context(format!("nesting exceeds the maximum depth of {limit}"))
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
