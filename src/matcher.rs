//! Matching a whole byte string against a grammar, by folding
//! `derivative` across it and checking `matches_empty` at the end.

use crate::node::GrammarId;
use crate::engine::Engine;

impl Engine {
    /// Whether `id` matches `bytes` exactly (the whole string, not a
    /// prefix of it).
    pub fn matches(&mut self, id: GrammarId, bytes: &[u8]) -> bool {
        let mut current = id;
        for &b in bytes {
            current = self.derivative(current, b);
        }
        self.matches_empty(current)
    }
}
