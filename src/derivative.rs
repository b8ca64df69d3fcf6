//! The Brzozowski derivative operator and the memo cache over it.

use crate::node::{GrammarId, GrammarNode};
use crate::engine::Engine;

impl Engine {
    /// The left quotient of `id` by the byte `b`: the grammar matching
    /// exactly the continuations `w` such that `b . w` is matched by
    /// `id`.
    ///
    /// Memoized per `(id, b)`. Before doing any real work, checks
    /// whether `b` is even in `id`'s `possible_starts`; if not, the
    /// derivative is `null()` without inspecting `id`'s structure at
    /// all.
    pub fn derivative(&mut self, id: GrammarId, b: u8) -> GrammarId {
        if let Some(&cached) = self.derivative_cache.get(&(id, b)) {
            return cached;
        }
        let starts = self.possible_starts(id);
        let result = if !starts.contains(b) {
            self.null()
        } else {
            let raw = self.derivative_raw(id, b);
            self.compact(raw)
        };
        self.derivative_cache.insert((id, b), result);
        result
    }

    fn derivative_raw(&mut self, id: GrammarId, b: u8) -> GrammarId {
        match self.node(id).clone() {
            GrammarNode::Null | GrammarNode::Epsilon => self.null(),
            GrammarNode::Chars(set) => {
                if set.contains(b) {
                    self.epsilon()
                } else {
                    self.null()
                }
            }
            GrammarNode::Any(n) => self.any(n - 1),
            GrammarNode::Union(children) => {
                let derivs: Vec<GrammarId> =
                    children.iter().map(|&c| self.derivative(c, b)).collect();
                self.union(&derivs)
            }
            GrammarNode::Cat(left, right) => {
                // delta(left) . derivative(right, b), with the right
                // side wrapped in a fresh `Lazy` so that if delta(left)
                // turns out to be `null()`, `cat2`'s null-collapse rule
                // short-circuits before the thunk is ever forced. This
                // is what keeps a derivative of a self-referential `Cat`
                // (e.g. `x = chars . x`) from recursing forever: the
                // recursive call only actually happens if something
                // downstream needs it.
                let matches_empty_left = self.matches_empty(left);
                let left_deriv = self.derivative(left, b);
                let delta_left = if matches_empty_left {
                    self.epsilon()
                } else {
                    self.null()
                };
                let deferred_right = self.lazy(move |engine, _this| engine.derivative(right, b));
                let left_term = self.cat(&[delta_left, deferred_right]);
                let right_term = self.cat(&[left_deriv, right]);
                self.union(&[left_term, right_term])
            }
            GrammarNode::Lazy(lazy_idx) => {
                if let Some(target) = self.forced_target(lazy_idx) {
                    self.derivative(target, b)
                } else {
                    self.lazy(move |engine, _this| {
                        let resolved = engine.force(id);
                        engine.derivative(resolved, b)
                    })
                }
            }
        }
    }

    /// Collapses `id` to `null()` if it can no longer match anything,
    /// or to `epsilon()` if the only thing left it can match is the
    /// empty string. Keeps derivative chains from accumulating dead
    /// structure across repeated bytes.
    fn compact(&mut self, id: GrammarId) -> GrammarId {
        if !self.could_have_matches(id) {
            return self.null();
        }
        if self.matches_empty(id) && self.possible_starts(id).is_empty() {
            return self.epsilon();
        }
        id
    }
}
