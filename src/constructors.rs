//! Smart constructors: every way to build a grammar node goes through
//! one of these, which is what keeps the hash-cons cache meaningful and
//! keeps nodes in the canonical shapes the solver and derivative
//! operator expect (no nested `Cat`s on the left, no `Union` with a
//! stray `Chars` sibling it could have absorbed, and so on).

use std::collections::HashSet;

use crate::bookkeeping::BookKeeping;
use crate::byteset::ByteSet;
use crate::engine::Engine;
use crate::node::{GrammarId, GrammarNode};

impl Engine {
    /// The set of bytes, seen as a one-byte-long language. Canonicalizes
    /// an empty set to `null()` and a full set to `any(1)`, so `Chars`
    /// nodes are never built in either degenerate shape.
    pub fn chars(&mut self, set: ByteSet) -> GrammarId {
        if set.is_empty() {
            return self.null();
        }
        if set.is_full() {
            return self.any(1);
        }
        let initial = BookKeeping::leaf(false, set.clone(), true);
        self.intern_with(GrammarNode::Chars(set), initial)
    }

    /// A single byte, as a one-byte-long language.
    pub fn char(&mut self, b: u8) -> GrammarId {
        self.chars(ByteSet::singleton(b))
    }

    /// Any `n` bytes, matched unconditionally. `any(0)` is `epsilon()`.
    pub fn any(&mut self, n: u32) -> GrammarId {
        if n == 0 {
            return self.epsilon();
        }
        let initial = BookKeeping::leaf(false, ByteSet::full(), true);
        self.intern_with(GrammarNode::Any(n), initial)
    }

    /// Any single byte.
    pub fn dot(&mut self) -> GrammarId {
        self.any(1)
    }

    /// The concatenation of `parts`, left to right. An empty slice is
    /// `epsilon()`; a single element is returned unchanged.
    pub fn cat(&mut self, parts: &[GrammarId]) -> GrammarId {
        let parts: Vec<GrammarId> = parts.iter().map(|&p| self.resolve_if_forced(p)).collect();
        match parts.as_slice() {
            [] => self.epsilon(),
            [single] => *single,
            _ => {
                let mut result = parts[parts.len() - 1];
                for &part in parts[..parts.len() - 1].iter().rev() {
                    result = self.cat2(part, result);
                }
                result
            }
        }
    }

    fn cat2(&mut self, left: GrammarId, right: GrammarId) -> GrammarId {
        let left = self.resolve_if_forced(left);
        let right = self.resolve_if_forced(right);
        match (self.node(left).clone(), self.node(right).clone()) {
            (GrammarNode::Epsilon, _) => right,
            (_, GrammarNode::Epsilon) => left,
            (GrammarNode::Null, _) | (_, GrammarNode::Null) => self.null(),
            (GrammarNode::Cat(u, v), _) => {
                let inner = self.cat2(v, right);
                self.cat2(u, inner)
            }
            (GrammarNode::Any(m), GrammarNode::Any(n)) => self.any(m + n),
            _ => self.intern(GrammarNode::Cat(left, right)),
        }
    }

    /// The union of `parts`. Flattens nested unions, drops `null()`
    /// summands, merges every `Chars`/`any(1)` summand into one, and
    /// collapses to a single child (or to `null()`) when there is
    /// nothing left to union.
    pub fn union(&mut self, parts: &[GrammarId]) -> GrammarId {
        let mut stack: Vec<GrammarId> = parts.iter().map(|&p| self.resolve_if_forced(p)).collect();
        let mut single_chars = ByteSet::empty();
        let mut has_chars = false;
        let mut has_epsilon = false;
        let mut members: HashSet<GrammarId> = HashSet::new();

        while let Some(child) = stack.pop() {
            match self.node(child).clone() {
                GrammarNode::Null => {}
                GrammarNode::Epsilon => has_epsilon = true,
                GrammarNode::Chars(set) => {
                    single_chars.union_with(&set);
                    has_chars = true;
                }
                GrammarNode::Any(1) => {
                    single_chars = ByteSet::full();
                    has_chars = true;
                }
                GrammarNode::Union(children) => stack.extend(children),
                _ => {
                    members.insert(child);
                }
            }
        }

        if has_epsilon {
            members.insert(self.epsilon());
        }
        if has_chars {
            let merged = self.chars(single_chars);
            members.insert(merged);
        }

        let mut members: Vec<GrammarId> = members.into_iter().collect();
        match members.len() {
            0 => self.null(),
            1 => members[0],
            _ => {
                members.sort_unstable();
                self.intern(GrammarNode::Union(members))
            }
        }
    }

    /// The exact sequence of bytes `literal`, as a concatenation of
    /// single-byte `Chars` nodes.
    pub fn literal(&mut self, bytes: &[u8]) -> GrammarId {
        let parts: Vec<GrammarId> = bytes.iter().map(|&b| self.char(b)).collect();
        self.cat(&parts)
    }

    /// `g` or the empty string.
    pub fn optional(&mut self, g: GrammarId) -> GrammarId {
        let eps = self.epsilon();
        self.union(&[eps, g])
    }

    /// Zero or more repetitions of `g`, tied together through a `Lazy`
    /// placeholder: `seq(g) = epsilon | cat(g, seq(g))`.
    pub fn seq(&mut self, g: GrammarId) -> GrammarId {
        self.lazy(move |engine, this| {
            let tail = engine.cat(&[g, this]);
            let eps = engine.epsilon();
            engine.union(&[eps, tail])
        })
    }
}
