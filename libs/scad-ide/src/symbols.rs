//! # Symbol Table
//!
//! Scope-aware symbol index built on demand from the AST. Each build
//! walks the statement tree once, recording declarations into a scope
//! tree and binding every identifier occurrence to its innermost
//! visible declaration. Occurrences bound to a shadowing inner
//! declaration never appear in the outer symbol's reference set.
//!
//! Module and function names are hoisted at scope entry, so a call can
//! legally precede its definition in the same scope. `PI` and `E` are
//! seeded into the global scope as constants.

use config::constants::BUILTIN_CONSTANTS;
use scad_ast::{AstNode, Binding, Expr, ExprKind, ParamValue, SourceLocation};
use scad_parser::Position;
use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// TYPES
// =============================================================================

/// Index into the scope tree.
pub type ScopeId = usize;

/// Index into the symbol list.
pub type SymbolId = usize;

/// One level of the lexical scope tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub id: ScopeId,
    /// Enclosing scope; None for the global scope.
    pub parent: Option<ScopeId>,
}

/// What a symbol declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Variable,
    Function,
    Module,
    Parameter,
    Constant,
}

/// A declared name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Location of the declaring identifier. Synthetic (zero) for
    /// seeded constants.
    pub declaration: SourceLocation,
    pub scope: ScopeId,
}

// =============================================================================
// SYMBOL TABLE
// =============================================================================

/// Scopes, symbols and per-symbol occurrence lists for one AST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
    /// Parallel to `symbols`; every occurrence including the
    /// declaration itself (except seeded constants).
    references: Vec<Vec<SourceLocation>>,
}

impl SymbolTable {
    /// Build the table from a program's statements.
    pub fn build(ast: &[AstNode]) -> Self {
        let mut table = Self {
            scopes: vec![Scope { id: 0, parent: None }],
            symbols: Vec::new(),
            references: Vec::new(),
        };

        for name in BUILTIN_CONSTANTS {
            table.symbols.push(Symbol {
                name: (*name).to_string(),
                kind: SymbolKind::Constant,
                declaration: SourceLocation::zero(),
                scope: 0,
            });
            table.references.push(Vec::new());
        }

        table.collect_scope(0, ast);
        debug!(
            symbols = table.symbols.len(),
            scopes = table.scopes.len(),
            "symbol table built"
        );
        table
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id]
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// All recorded occurrences of a symbol, declaration included.
    pub fn references(&self, id: SymbolId) -> &[SourceLocation] {
        &self.references[id]
    }

    /// The symbol whose declaration or reference covers a byte offset.
    pub fn symbol_at(&self, offset: usize) -> Option<SymbolId> {
        self.references
            .iter()
            .position(|occurrences| occurrences.iter().any(|loc| loc.contains(offset)))
    }

    // === SCOPE WALK ===

    fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope {
            id,
            parent: Some(parent),
        });
        id
    }

    fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        declaration: SourceLocation,
        scope: ScopeId,
    ) -> SymbolId {
        let id = self.symbols.len();
        self.symbols.push(Symbol {
            name: name.to_string(),
            kind,
            declaration,
            scope,
        });
        self.references.push(vec![declaration]);
        id
    }

    /// Most recent declaration of `name` in exactly `scope`.
    fn lookup_local(&self, name: &str, scope: ScopeId) -> Option<SymbolId> {
        self.symbols
            .iter()
            .rposition(|s| s.scope == scope && s.name == name)
    }

    /// Innermost visible declaration of `name` from `scope` outwards.
    fn resolve(&self, name: &str, scope: ScopeId) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(symbol) = self.lookup_local(name, id) {
                return Some(symbol);
            }
            current = self.scopes[id].parent;
        }
        None
    }

    fn record(&mut self, name: &str, location: SourceLocation, scope: ScopeId) {
        if let Some(id) = self.resolve(name, scope) {
            self.references[id].push(location);
        }
    }

    /// Walk a statement list forming one scope. Module and function
    /// names are declared before any statement is visited.
    fn collect_scope(&mut self, scope: ScopeId, statements: &[AstNode]) {
        for stmt in statements {
            match stmt {
                AstNode::ModuleDefinition {
                    name,
                    name_location,
                    ..
                } => {
                    self.declare(name, SymbolKind::Module, *name_location, scope);
                }
                AstNode::FunctionDefinition {
                    name,
                    name_location,
                    ..
                } => {
                    self.declare(name, SymbolKind::Function, *name_location, scope);
                }
                _ => {}
            }
        }

        for stmt in statements {
            self.visit_statement(stmt, scope);
        }
    }

    fn visit_statement(&mut self, stmt: &AstNode, scope: ScopeId) {
        match stmt {
            AstNode::Assignment {
                name,
                special,
                value,
                name_location,
                ..
            } => {
                // Value first, so `x = x + 1` reads the outer `x`.
                self.visit_expr(value, scope);
                if !special {
                    match self.lookup_local(name, scope) {
                        Some(id) => self.references[id].push(*name_location),
                        None => {
                            self.declare(name, SymbolKind::Variable, *name_location, scope);
                        }
                    }
                }
            }

            AstNode::ModuleDefinition { params, body, .. } => {
                let inner = self.push_scope(scope);
                self.declare_params(params, inner);
                self.collect_scope(inner, body);
            }

            AstNode::FunctionDefinition { params, body, .. } => {
                let inner = self.push_scope(scope);
                self.declare_params(params, inner);
                self.visit_expr(body, inner);
            }

            AstNode::ModuleCall {
                name,
                parameters,
                children,
                name_location,
                ..
            } => {
                self.record(name, *name_location, scope);
                for parameter in parameters {
                    if let ParamValue::Expr(expr) = &parameter.value {
                        self.visit_expr(expr, scope);
                    }
                }
                for child in children {
                    self.visit_statement(child, scope);
                }
            }

            AstNode::Transform {
                argument, children, ..
            } => {
                if let Some(ParamValue::Expr(expr)) = argument {
                    self.visit_expr(expr, scope);
                }
                for child in children {
                    self.visit_statement(child, scope);
                }
            }

            AstNode::BooleanOp { children, .. } | AstNode::Modifier { children, .. } => {
                for child in children {
                    self.visit_statement(child, scope);
                }
            }

            AstNode::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.visit_expr(condition, scope);
                let then_scope = self.push_scope(scope);
                self.collect_scope(then_scope, then_branch);
                if !else_branch.is_empty() {
                    let else_scope = self.push_scope(scope);
                    self.collect_scope(else_scope, else_branch);
                }
            }

            AstNode::For { bindings, body, .. } | AstNode::Let { bindings, body, .. } => {
                let inner = self.enter_bindings(bindings, scope);
                self.collect_scope(inner, body);
            }

            AstNode::Polygon { points, paths, .. } => {
                if let Some(expr) = points {
                    self.visit_expr(expr, scope);
                }
                if let Some(expr) = paths {
                    self.visit_expr(expr, scope);
                }
            }

            // Literal arguments fold into typed fields; anything left
            // as an expression still reads names from this scope.
            AstNode::Cube { parameters, .. }
            | AstNode::Sphere { parameters, .. }
            | AstNode::Cylinder { parameters, .. }
            | AstNode::Circle { parameters, .. }
            | AstNode::Square { parameters, .. } => {
                for parameter in parameters {
                    if let ParamValue::Expr(expr) = &parameter.value {
                        self.visit_expr(expr, scope);
                    }
                }
            }

            AstNode::Include { .. } => {}
        }
    }

    fn declare_params(&mut self, params: &[scad_ast::ParamDecl], scope: ScopeId) {
        for param in params {
            // Defaults may refer to earlier parameters.
            if let Some(default) = &param.default {
                self.visit_expr(default, scope);
            }
            if !param.special {
                self.declare(&param.name, SymbolKind::Parameter, param.location, scope);
            }
        }
    }

    /// New child scope with the bindings declared; values are read in
    /// the enclosing scope.
    fn enter_bindings(&mut self, bindings: &[Binding], scope: ScopeId) -> ScopeId {
        let inner = self.push_scope(scope);
        for binding in bindings {
            self.visit_expr(&binding.value, scope);
            self.declare(
                &binding.name,
                SymbolKind::Variable,
                binding.name_location,
                inner,
            );
        }
        inner
    }

    fn visit_expr(&mut self, expr: &Expr, scope: ScopeId) {
        match &expr.kind {
            ExprKind::Identifier(name) => self.record(name, expr.location, scope),

            ExprKind::FunctionCall { name, arguments } => {
                self.record(name, callee_location(expr.location, name), scope);
                for argument in arguments {
                    self.visit_expr(argument, scope);
                }
            }

            ExprKind::Unary { operand, .. } | ExprKind::Each(operand) => {
                self.visit_expr(operand, scope);
            }

            ExprKind::Binary { left, right, .. } => {
                self.visit_expr(left, scope);
                self.visit_expr(right, scope);
            }

            ExprKind::Ternary {
                condition,
                then_expr,
                else_expr,
            } => {
                self.visit_expr(condition, scope);
                self.visit_expr(then_expr, scope);
                self.visit_expr(else_expr, scope);
            }

            ExprKind::Range { start, step, end } => {
                self.visit_expr(start, scope);
                if let Some(step) = step {
                    self.visit_expr(step, scope);
                }
                self.visit_expr(end, scope);
            }

            ExprKind::List(items) => {
                for item in items {
                    self.visit_expr(item, scope);
                }
            }

            ExprKind::Index { object, index } => {
                self.visit_expr(object, scope);
                self.visit_expr(index, scope);
            }

            ExprKind::Member { object, .. } => self.visit_expr(object, scope),

            ExprKind::ListComprehension { bindings, element } => {
                let inner = self.enter_bindings(bindings, scope);
                self.visit_expr(element, inner);
            }

            ExprKind::Number(_)
            | ExprKind::String(_)
            | ExprKind::Boolean(_)
            | ExprKind::Undef
            | ExprKind::SpecialVariable(_)
            | ExprKind::Error(_) => {}
        }
    }
}

/// Location of just the callee name inside a call expression.
///
/// Identifiers cannot span lines, so the end position is the start
/// advanced by the name length.
fn callee_location(call: SourceLocation, name: &str) -> SourceLocation {
    let start = call.start;
    let end = Position::new(
        start.byte + name.len(),
        start.line,
        start.column + name.len(),
    );
    SourceLocation::new(start, end)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scad_ast::parse_to_ast;

    fn table(source: &str) -> SymbolTable {
        let (ast, diagnostics) = parse_to_ast(source);
        assert!(!diagnostics.has_errors(), "errors: {:?}", diagnostics.errors);
        SymbolTable::build(&ast)
    }

    fn find<'a>(table: &'a SymbolTable, name: &str) -> (SymbolId, &'a Symbol) {
        table
            .symbols()
            .iter()
            .enumerate()
            .find(|(_, s)| s.name == name)
            .unwrap_or_else(|| panic!("no symbol named {name}"))
    }

    #[test]
    fn test_seeds_builtin_constants() {
        let table = table("cube(1);");
        let (_, pi) = find(&table, "PI");
        assert_eq!(pi.kind, SymbolKind::Constant);
        assert_eq!(pi.scope, 0);
        assert!(find(&table, "E").1.kind == SymbolKind::Constant);
    }

    #[test]
    fn test_variable_references_collected() {
        let source = "width = 10;\nthing(width, width + 1);";
        let table = table(source);
        let (id, symbol) = find(&table, "width");

        assert_eq!(symbol.kind, SymbolKind::Variable);
        // Declaration plus two uses.
        assert_eq!(table.references(id).len(), 3);
        for location in table.references(id) {
            let text = &source[location.start.byte..location.end.byte];
            assert_eq!(text, "width");
        }
    }

    #[test]
    fn test_primitive_arguments_count_as_references() {
        let source = "height = 20;\ncylinder(h=height, r=1);";
        let table = table(source);
        let (id, symbol) = find(&table, "height");

        assert_eq!(symbol.kind, SymbolKind::Variable);
        // Declaration plus the use inside the cylinder call.
        assert_eq!(table.references(id).len(), 2);
    }

    #[test]
    fn test_module_hoisting_allows_forward_call() {
        let table = table("wheel(5);\nmodule wheel(r) { cylinder(h=2, r=r); }");
        let (id, symbol) = find(&table, "wheel");
        assert_eq!(symbol.kind, SymbolKind::Module);
        // Declaration plus the call before it.
        assert_eq!(table.references(id).len(), 2);
    }

    #[test]
    fn test_shadowing_splits_reference_sets() {
        let source = "x = 1;\nmodule m() { x = 2; thing(x); }\nthing(x);";
        let table = table(source);

        let ids: Vec<SymbolId> = table
            .symbols()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.name == "x")
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids.len(), 2);

        let outer = ids.iter().copied().find(|&id| table.symbol(id).scope == 0).unwrap();
        let inner = ids.iter().copied().find(|&id| table.symbol(id).scope != 0).unwrap();

        // Outer: declaration + trailing use. Inner: declaration + use
        // inside the module body.
        assert_eq!(table.references(outer).len(), 2);
        assert_eq!(table.references(inner).len(), 2);
    }

    #[test]
    fn test_for_binding_scopes_body() {
        let source = "for (i = [0:5]) thing(i);";
        let table = table(source);
        let (id, symbol) = find(&table, "i");
        assert_eq!(symbol.kind, SymbolKind::Variable);
        assert_eq!(table.references(id).len(), 2);
        assert_eq!(
            &source[symbol.declaration.start.byte..symbol.declaration.end.byte],
            "i"
        );
    }

    #[test]
    fn test_function_parameters_and_callee() {
        let source = "function area(r) = PI * r * r;\ny = area(3);";
        let table = table(source);

        let (r_id, r) = find(&table, "r");
        assert_eq!(r.kind, SymbolKind::Parameter);
        assert_eq!(table.references(r_id).len(), 3);

        let (area_id, _) = find(&table, "area");
        let call = table.references(area_id)[1];
        assert_eq!(&source[call.start.byte..call.end.byte], "area");

        let (pi_id, _) = find(&table, "PI");
        assert_eq!(table.references(pi_id).len(), 1);
    }

    #[test]
    fn test_symbol_at_hits_any_occurrence() {
        let source = "size = 4;\nthing(size);";
        let table = table(source);
        let (id, _) = find(&table, "size");

        assert_eq!(table.symbol_at(0), Some(id));
        let use_offset = source.rfind("size").unwrap();
        assert_eq!(table.symbol_at(use_offset), Some(id));
        assert_eq!(table.symbol_at(source.rfind(';').unwrap()), None);
    }

    #[test]
    fn test_reassignment_joins_existing_symbol() {
        let table = table("x = 1;\nx = x + 1;");
        let ids: Vec<_> = table
            .symbols()
            .iter()
            .filter(|s| s.name == "x")
            .collect();
        assert_eq!(ids.len(), 1);

        let (id, _) = find(&table, "x");
        // Two declaration-position occurrences plus the read.
        assert_eq!(table.references(id).len(), 3);
    }
}
