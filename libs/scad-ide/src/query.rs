//! # Structural Query Cache
//!
//! Repeated editor queries ("all module calls", "all identifiers")
//! against an unchanged buffer are answered from a bounded LRU cache.
//! The key pairs the query text with a 64-bit FNV-1a hash of the
//! source plus its length as a cheap secondary discriminator; any edit
//! changes the hash, so stale entries simply stop matching and age
//! out.

use config::constants::QUERY_CACHE_CAPACITY;
use scad_parser::{CstNode, NodeKind, Span};
use tracing::debug;

// =============================================================================
// HASHING
// =============================================================================

/// 64-bit FNV-1a.
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

// =============================================================================
// CACHE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryKey {
    query: String,
    source_hash: u64,
    source_len: usize,
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Bounded LRU cache of query results.
///
/// Entries are ordered least- to most-recently used; `get` promotes,
/// `insert` evicts the front when full.
pub struct QueryCache {
    entries: Vec<(QueryKey, Vec<Span>)>,
    capacity: usize,
    stats: CacheStats,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_capacity(QUERY_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            stats: CacheStats::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Cached result for a query against a specific source, promoted
    /// to most-recently-used on hit.
    pub fn get(&mut self, query: &str, source: &str) -> Option<Vec<Span>> {
        let key = Self::key(query, source);
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(index) => {
                self.stats.hits += 1;
                let entry = self.entries.remove(index);
                let result = entry.1.clone();
                self.entries.push(entry);
                Some(result)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Store a result, evicting the least recently used entry at
    /// capacity.
    pub fn insert(&mut self, query: &str, source: &str, result: Vec<Span>) {
        let key = Self::key(query, source);
        if let Some(index) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(index);
        } else if self.entries.len() >= self.capacity {
            let evicted = self.entries.remove(0);
            debug!(query = %evicted.0.query, "evicted query cache entry");
        }
        self.entries.push((key, result));
    }

    fn key(query: &str, source: &str) -> QueryKey {
        QueryKey {
            query: query.to_string(),
            source_hash: fnv1a_64(source.as_bytes()),
            source_len: source.len(),
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// QUERY EXECUTION
// =============================================================================

/// The query name of a node kind.
pub fn kind_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::SourceFile => "source_file",
        NodeKind::ModuleCall => "module_call",
        NodeKind::Assignment => "assignment",
        NodeKind::ModuleDeclaration => "module_declaration",
        NodeKind::FunctionDeclaration => "function_declaration",
        NodeKind::ForBlock => "for_block",
        NodeKind::ForAssignments => "for_assignments",
        NodeKind::ForAssignment => "for_assignment",
        NodeKind::IfBlock => "if_block",
        NodeKind::LetBlock => "let_block",
        NodeKind::IncludeStatement => "include_statement",
        NodeKind::UseStatement => "use_statement",
        NodeKind::BinaryExpression => "binary_expression",
        NodeKind::UnaryExpression => "unary_expression",
        NodeKind::TernaryExpression => "ternary_expression",
        NodeKind::FunctionCall => "function_call",
        NodeKind::IndexExpression => "index_expression",
        NodeKind::DotExpression => "dot_expression",
        NodeKind::ListComprehension => "list_comprehension",
        NodeKind::Range => "range",
        NodeKind::List => "list",
        NodeKind::Identifier => "identifier",
        NodeKind::SpecialVariable => "special_variable",
        NodeKind::Number => "number",
        NodeKind::String => "string",
        NodeKind::Boolean => "boolean",
        NodeKind::Undef => "undef",
        NodeKind::Operator => "operator",
        NodeKind::Arguments => "arguments",
        NodeKind::Argument => "argument",
        NodeKind::NamedArgument => "named_argument",
        NodeKind::Parameters => "parameters",
        NodeKind::Parameter => "parameter",
        NodeKind::Modifier => "modifier",
        NodeKind::Block => "block",
        NodeKind::Error => "error",
        NodeKind::Missing => "missing",
    }
}

/// Spans of every node whose kind matches the query name.
pub fn run_query(root: &CstNode, query: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    root.walk(&mut |node| {
        if kind_name(node.kind) == query {
            spans.push(node.span);
        }
    });
    spans
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_vectors() {
        // Published FNV-1a 64 test vectors.
        assert_eq!(fnv1a_64(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a_64(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_run_query_by_kind_name() {
        let cst = scad_parser::parse("cube(10); sphere(5); x = 1;");
        assert_eq!(run_query(&cst.root, "module_call").len(), 2);
        assert_eq!(run_query(&cst.root, "assignment").len(), 1);
        assert_eq!(run_query(&cst.root, "if_block").len(), 0);
    }

    #[test]
    fn test_hit_and_miss_accounting() {
        let mut cache = QueryCache::new();
        let source = "cube(1);";

        assert_eq!(cache.get("module_call", source), None);
        cache.insert("module_call", source, vec![Span::from_bytes(0, 8)]);
        assert!(cache.get("module_call", source).is_some());
        // Same query against edited source misses.
        assert_eq!(cache.get("module_call", "cube(2);"), None);

        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 2 });
    }

    #[test]
    fn test_lru_eviction_order() {
        let mut cache = QueryCache::with_capacity(2);
        cache.insert("a", "s", vec![]);
        cache.insert("b", "s", vec![]);

        // Touch "a" so "b" becomes the eviction candidate.
        assert!(cache.get("a", "s").is_some());
        cache.insert("c", "s", vec![]);

        assert!(cache.get("a", "s").is_some());
        assert!(cache.get("b", "s").is_none());
        assert!(cache.get("c", "s").is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_reinsert_replaces_entry() {
        let mut cache = QueryCache::with_capacity(2);
        cache.insert("a", "s", vec![]);
        cache.insert("a", "s", vec![Span::from_bytes(0, 1)]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a", "s"), Some(vec![Span::from_bytes(0, 1)]));
    }
}
