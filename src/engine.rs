//! The engine: a hash-consing arena for grammar nodes, their bookkeeping,
//! a derivative memo, and the table of lazy thunks used to tie recursive
//! grammars together.

use std::collections::HashMap;

use crate::bookkeeping::{BookKeeping, Target};
use crate::byteset::ByteSet;
use crate::error::invalid_grammar_id;
use crate::node::{GrammarId, GrammarNode};

/// A lazy thunk: given the engine, builds the grammar its placeholder
/// stands for. Any id the thunk needs, including its own placeholder's,
/// is captured by value when the thunk is built (a `GrammarId` is a
/// bare `Copy` integer, so this is never a borrow-checker problem).
pub(crate) type Thunk = std::rc::Rc<dyn Fn(&mut Engine) -> GrammarId>;

pub(crate) enum LazyState {
    Pending,
    Unforced(Thunk),
    Forced(GrammarId),
}

#[derive(Default)]
pub(crate) struct SolverState {
    pub(crate) targets: std::collections::HashSet<Target>,
    pub(crate) dirty: std::collections::HashSet<Target>,
    pub(crate) watches: HashMap<Target, std::collections::HashSet<Target>>,
    pub(crate) values_requested: std::collections::HashSet<Target>,
}

/// Owns every grammar node ever built and the state needed to answer
/// questions about them: the hash-cons cache, per-node bookkeeping, the
/// lazy-thunk table, the derivative memo, and (while one is in progress)
/// the worklist solver's scratch state.
pub struct Engine {
    pub(crate) nodes: Vec<GrammarNode>,
    pub(crate) cache: HashMap<GrammarNode, GrammarId>,
    pub(crate) bookkeeping: Vec<BookKeeping>,
    pub(crate) lazies: Vec<LazyState>,
    pub(crate) derivative_cache: HashMap<(GrammarId, u8), GrammarId>,
    pub(crate) solver: Option<SolverState>,
    null_id: GrammarId,
    epsilon_id: GrammarId,
}

impl Engine {
    /// Creates a fresh engine, pre-populated with the `Null` and
    /// `Epsilon` singletons.
    pub fn new() -> Self {
        let mut engine = Engine {
            nodes: Vec::new(),
            cache: HashMap::new(),
            bookkeeping: Vec::new(),
            lazies: Vec::new(),
            derivative_cache: HashMap::new(),
            solver: None,
            null_id: GrammarId(0),
            epsilon_id: GrammarId(0),
        };
        let null_id = engine.intern_with(
            GrammarNode::Null,
            BookKeeping::leaf(false, ByteSet::empty(), false),
        );
        let epsilon_id = engine.intern_with(
            GrammarNode::Epsilon,
            BookKeeping::leaf(true, ByteSet::empty(), true),
        );
        engine.null_id = null_id;
        engine.epsilon_id = epsilon_id;
        engine
    }

    /// The empty language, matching nothing (not even the empty string).
    pub fn null(&self) -> GrammarId {
        self.null_id
    }

    /// The language containing only the empty string.
    pub fn epsilon(&self) -> GrammarId {
        self.epsilon_id
    }

    pub(crate) fn node(&self, id: GrammarId) -> &GrammarNode {
        self.nodes
            .get(id.index())
            .unwrap_or_else(|| invalid_grammar_id(id, self.nodes.len()))
    }

    /// Interns a node with bottom bookkeeping (the common case: `Cat`
    /// and `Union` nodes, whose properties the solver fills in later).
    pub(crate) fn intern(&mut self, node: GrammarNode) -> GrammarId {
        self.intern_with(node, BookKeeping::bottom())
    }

    /// Interns a node with explicit initial bookkeeping, used for leaves
    /// (`Null`, `Epsilon`, `Chars`, `Any`) whose properties are known
    /// outright and never need the worklist solver's attention.
    pub(crate) fn intern_with(&mut self, node: GrammarNode, initial: BookKeeping) -> GrammarId {
        if let Some(&id) = self.cache.get(&node) {
            return id;
        }
        let id = GrammarId(self.nodes.len() as u32);
        self.nodes.push(node.clone());
        self.bookkeeping.push(initial);
        self.cache.insert(node, id);
        id
    }

    /// Allocates a fresh node that bypasses the hash-cons cache
    /// entirely. Used for `Lazy` placeholders: two calls to `lazy()`
    /// never collapse into the same id even if their thunks would
    /// eventually build the same grammar, because until forced there is
    /// nothing structural to compare.
    pub(crate) fn push_uncached(&mut self, node: GrammarNode, initial: BookKeeping) -> GrammarId {
        let id = GrammarId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.bookkeeping.push(initial);
        id
    }

    /// If `id` names a `Lazy` node that has already been forced,
    /// returns the grammar it forwards to. Otherwise returns `id`
    /// unchanged. Used to transparently substitute resolved lazies at
    /// the boundary of `union`/`cat`, mirroring how the donor grammar's
    /// `@cached` wrapper replaces forced `Lazy` arguments before
    /// normalizing.
    pub(crate) fn resolve_if_forced(&self, id: GrammarId) -> GrammarId {
        if let GrammarNode::Lazy(lazy_idx) = self.node(id) {
            if let LazyState::Forced(target) = self.lazies[lazy_idx.index()] {
                return target;
            }
        }
        id
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
