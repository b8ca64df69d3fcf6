//! The worklist fixed-point solver.
//!
//! `matches_empty`, `possible_starts` and `could_have_matches` are mutually
//! recursive properties over a possibly-cyclic graph of grammar nodes
//! (cycles arise from `Lazy`-tied recursive grammars). Each is computed
//! as the least fixed point of a monotone update: start every composite
//! node at its bottom value and repeatedly recompute dirty targets until
//! nothing changes.
//!
//! A target only ever depends on other targets it actually read while
//! being recomputed (`values_requested`, drained into `watches` right
//! after), so the solver never revisits a target whose inputs could not
//! possibly have changed.

use std::collections::HashSet;

use log::trace;

use crate::bookkeeping::{Property, Target};
use crate::byteset::ByteSet;
use crate::engine::{Engine, SolverState};
use crate::node::{GrammarId, GrammarNode};

enum Value {
    Bool(bool),
    Set(ByteSet),
}

impl Engine {
    /// Whether `id` matches the empty string.
    pub fn matches_empty(&mut self, id: GrammarId) -> bool {
        self.ensure((Property::MatchesEmpty, id));
        self.bookkeeping[id.index()].matches_empty
    }

    /// The set of bytes that could begin a match of `id`.
    pub fn possible_starts(&mut self, id: GrammarId) -> ByteSet {
        self.ensure((Property::PossibleStarts, id));
        self.bookkeeping[id.index()].possible_starts.clone()
    }

    /// Whether `id` could possibly match anything at all (including the
    /// empty string).
    pub fn could_have_matches(&mut self, id: GrammarId) -> bool {
        self.ensure((Property::CouldHaveMatches, id));
        self.bookkeeping[id.index()].could_have_matches
    }

    /// Guarantees `target`'s bookkeeping field is final before
    /// returning. If called while another target is already mid-solve
    /// (i.e. from inside a `calc_*` routine reading a dependency), it
    /// instead just registers the read and lets the already-running
    /// solver pick the target up, returning whatever value is currently
    /// known (possibly still bottom).
    fn ensure(&mut self, target: Target) {
        if let Some(solver) = &mut self.solver {
            solver.values_requested.insert(target);
        }
        if self.is_complete(target) {
            return;
        }
        if self.solver.is_some() {
            self.request(target);
            return;
        }
        self.solver = Some(SolverState::default());
        self.request(target);
        self.run();
        self.solver = None;
    }

    fn is_complete(&self, target: Target) -> bool {
        self.bookkeeping[target.1.index()].complete.contains(target.0)
    }

    fn mark_complete(&mut self, target: Target) {
        self.bookkeeping[target.1.index()].complete.insert(target.0);
    }

    fn request(&mut self, target: Target) {
        if self.is_complete(target) {
            return;
        }
        let solver = self.solver.as_mut().expect("request() outside a solver run");
        if solver.targets.insert(target) {
            solver.dirty.insert(target);
        }
    }

    fn dependency(&mut self, from: Target, to: Target) {
        debug_assert!(!self.is_complete(from), "completed target {:?} re-read a dependency", from);
        if self.is_complete(to) {
            return;
        }
        self.request(to);
        self.solver
            .as_mut()
            .expect("dependency() outside a solver run")
            .watches
            .entry(to)
            .or_default()
            .insert(from);
    }

    fn run(&mut self) {
        loop {
            let dirty: HashSet<Target> = {
                let solver = self.solver.as_mut().expect("run() outside a solver run");
                std::mem::take(&mut solver.dirty)
            };
            if dirty.is_empty() {
                trace!("solver: worklist saturated");
                break;
            }
            trace!("solver: {} dirty target(s)", dirty.len());
            for target in dirty {
                if self.is_complete(target) {
                    continue;
                }
                self.solver.as_mut().unwrap().values_requested.clear();
                self.recompute_and_store(target);
                let requested: HashSet<Target> =
                    std::mem::take(&mut self.solver.as_mut().unwrap().values_requested);
                for dep in requested {
                    self.dependency(target, dep);
                }
            }
        }
        let targets: Vec<Target> = self.solver.as_ref().unwrap().targets.iter().copied().collect();
        for target in targets {
            self.mark_complete(target);
        }
    }

    fn recompute_and_store(&mut self, target: Target) {
        let (property, id) = target;
        if let GrammarNode::Lazy(_) = self.node(id) {
            let resolved = self.force(id);
            let value = match property {
                Property::MatchesEmpty => Value::Bool(self.matches_empty(resolved)),
                Property::PossibleStarts => Value::Set(self.possible_starts(resolved)),
                Property::CouldHaveMatches => Value::Bool(self.could_have_matches(resolved)),
            };
            self.store(target, value);
            return;
        }
        let value = match property {
            Property::MatchesEmpty => Value::Bool(self.calc_matches_empty(id)),
            Property::PossibleStarts => Value::Set(self.calc_possible_starts(id)),
            Property::CouldHaveMatches => Value::Bool(self.calc_could_have_matches(id)),
        };
        self.store(target, value);
    }

    fn store(&mut self, target: Target, value: Value) {
        let (property, id) = target;
        let bk = &mut self.bookkeeping[id.index()];
        let changed = match (property, value) {
            (Property::MatchesEmpty, Value::Bool(v)) => {
                let changed = bk.matches_empty != v;
                bk.matches_empty = v;
                changed
            }
            (Property::PossibleStarts, Value::Set(v)) => {
                let changed = bk.possible_starts != v;
                bk.possible_starts = v;
                changed
            }
            (Property::CouldHaveMatches, Value::Bool(v)) => {
                let changed = bk.could_have_matches != v;
                bk.could_have_matches = v;
                changed
            }
            _ => unreachable!("property/value kind mismatch"),
        };
        if changed {
            trace!("solver: {:?} of {:?} changed", property, id);
            if let Some(watchers) = self.solver.as_ref().unwrap().watches.get(&target).cloned() {
                self.solver.as_mut().unwrap().dirty.extend(watchers);
            }
        }
    }

    fn calc_matches_empty(&mut self, id: GrammarId) -> bool {
        match self.node(id).clone() {
            GrammarNode::Cat(l, r) => self.matches_empty(l) && self.matches_empty(r),
            GrammarNode::Union(children) => children.iter().any(|&c| self.matches_empty(c)),
            other => unreachable!("leaf nodes are already complete: {other:?}"),
        }
    }

    fn calc_possible_starts(&mut self, id: GrammarId) -> ByteSet {
        match self.node(id).clone() {
            GrammarNode::Cat(l, r) => {
                let mut starts = self.possible_starts(l);
                if self.matches_empty(l) {
                    starts.union_with(&self.possible_starts(r));
                }
                starts
            }
            GrammarNode::Union(children) => {
                let mut starts = ByteSet::empty();
                for c in children {
                    starts.union_with(&self.possible_starts(c));
                }
                starts
            }
            other => unreachable!("leaf nodes are already complete: {other:?}"),
        }
    }

    fn calc_could_have_matches(&mut self, id: GrammarId) -> bool {
        if self.matches_empty(id) {
            return true;
        }
        if self.possible_starts(id).is_empty() {
            return false;
        }
        match self.node(id).clone() {
            GrammarNode::Cat(l, r) => self.could_have_matches(l) && self.could_have_matches(r),
            GrammarNode::Union(children) => children.iter().any(|&c| self.could_have_matches(c)),
            other => unreachable!("leaf nodes are already complete: {other:?}"),
        }
    }
}
