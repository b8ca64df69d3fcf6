//! Construction and resolution of `Lazy` placeholders.
//!
//! A `Lazy` node lets a grammar refer to itself before it is fully built:
//! `seq` and mutually recursive grammars both go through here. Resolution
//! (`force`) walks the thunk chain once, breaking cycles back to the
//! placeholder being resolved, and back-patches every placeholder
//! discovered along the way so each is only ever forced once.

use std::collections::HashSet;
use std::rc::Rc;

use log::debug;

use crate::bookkeeping::BookKeeping;
use crate::engine::{Engine, LazyState, Thunk};
use crate::node::{GrammarId, GrammarNode, LazyId};

impl Engine {
    /// Reserves an unbound `Lazy` placeholder and returns its id. Its
    /// thunk must be attached with [`Engine::bind_lazy`] before the
    /// placeholder is ever forced.
    ///
    /// Exists for mutually recursive grammars, where neither of two
    /// placeholders can be built before the other: reserve both ids
    /// first, then bind each one's thunk, each free to capture the
    /// other's id by value (a bare `Copy` integer, so there is no
    /// borrow-checker obstacle to doing so).
    pub fn lazy_cell(&mut self) -> GrammarId {
        let lazy_idx = LazyId(self.lazies.len() as u32);
        self.lazies.push(LazyState::Pending);
        self.push_uncached(GrammarNode::Lazy(lazy_idx), BookKeeping::bottom())
    }

    /// Attaches a thunk to a placeholder previously returned by
    /// [`Engine::lazy_cell`]. Panics if `id` already has a thunk bound
    /// (a placeholder is bound at most once).
    pub fn bind_lazy<F>(&mut self, id: GrammarId, build: F)
    where
        F: Fn(&mut Engine) -> GrammarId + 'static,
    {
        let lazy_idx = self.lazy_id_of(id);
        match &self.lazies[lazy_idx.index()] {
            LazyState::Pending => {}
            _ => panic!("bind_lazy() called twice on the same placeholder"),
        }
        let thunk: Thunk = Rc::new(build);
        self.lazies[lazy_idx.index()] = LazyState::Unforced(thunk);
    }

    /// Creates a new `Lazy` placeholder whose body is `build`, called
    /// with the engine and the placeholder's own id once the
    /// placeholder is forced. A convenience for the common
    /// self-referential case, built from `lazy_cell` + `bind_lazy` the
    /// same way `Rc::new_cyclic` hands its closure a `Weak` pointing
    /// back at the `Rc` being constructed.
    ///
    /// ```ignore
    /// // seq(g) = epsilon | cat(g, seq(g)), tied together via self-reference
    /// let tail = engine.lazy(move |engine, this| {
    ///     let cat = engine.cat(&[g, this]);
    ///     engine.union(&[engine.epsilon(), cat])
    /// });
    /// ```
    pub fn lazy<F>(&mut self, build: F) -> GrammarId
    where
        F: Fn(&mut Engine, GrammarId) -> GrammarId + 'static,
    {
        let id = self.lazy_cell();
        self.bind_lazy(id, move |engine| build(engine, id));
        id
    }

    fn lazy_id_of(&self, id: GrammarId) -> LazyId {
        match self.node(id) {
            GrammarNode::Lazy(idx) => *idx,
            other => unreachable!("force() called on a non-lazy node: {other:?}"),
        }
    }

    pub(crate) fn forced_target(&self, lazy_idx: LazyId) -> Option<GrammarId> {
        match self.lazies[lazy_idx.index()] {
            LazyState::Forced(target) => Some(target),
            _ => None,
        }
    }

    /// Resolves `id` (which must name a `Lazy` node) to a concrete
    /// grammar, forcing its thunk (and any thunk it recursively refers
    /// back to) at most once.
    ///
    /// A self-reference that is never guarded by anything that could
    /// consume a byte first collapses to `Null` rather than looping
    /// forever: `Union`s drop the offending alternative, `Cat`s whose
    /// left or right side is the unguarded reference resolve to `Null`
    /// outright.
    pub(crate) fn force(&mut self, id: GrammarId) -> GrammarId {
        let root_idx = self.lazy_id_of(id);
        if let Some(target) = self.forced_target(root_idx) {
            return target;
        }
        debug!("lazy: forcing {:?}", id);

        let mut seen: HashSet<GrammarId> = HashSet::new();
        seen.insert(id);
        let mut to_assign: Vec<LazyId> = vec![root_idx];

        let mut thunked = self.invoke_thunk(root_idx);

        let final_value = loop {
            if seen.contains(&thunked) {
                debug!("lazy: {:?} loops back on itself, resolving to null", id);
                break self.null();
            }
            seen.insert(thunked);
            match self.node(thunked).clone() {
                GrammarNode::Union(children) if children.iter().any(|c| seen.contains(c)) => {
                    let kept: Vec<GrammarId> =
                        children.into_iter().filter(|c| !seen.contains(c)).collect();
                    thunked = self.union(&kept);
                }
                GrammarNode::Cat(left, right)
                    if seen.contains(&left) || seen.contains(&right) =>
                {
                    thunked = self.null();
                }
                GrammarNode::Lazy(idx2) => {
                    if let Some(target) = self.forced_target(idx2) {
                        thunked = target;
                    } else {
                        to_assign.push(idx2);
                        thunked = self.invoke_thunk(idx2);
                    }
                }
                _ => break thunked,
            }
        };

        debug!(
            "lazy: resolved {:?} to {:?}, back-patching {} placeholder(s)",
            id,
            final_value,
            to_assign.len()
        );
        for idx in to_assign {
            self.lazies[idx.index()] = LazyState::Forced(final_value);
        }
        final_value
    }

    fn invoke_thunk(&mut self, lazy_idx: LazyId) -> GrammarId {
        let thunk = match &self.lazies[lazy_idx.index()] {
            LazyState::Unforced(thunk) => thunk.clone(),
            LazyState::Forced(target) => return *target,
            LazyState::Pending => unreachable!("lazy node forced before its thunk was set"),
        };
        thunk(self)
    }
}
