//! The grammar node representation and the handles that refer to it.

use crate::byteset::ByteSet;
#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A handle to a grammar node living inside some [`crate::Engine`].
///
/// Cheap to copy, cheap to hash, meaningless outside the engine that
/// produced it: mixing handles from two different engines is a logic
/// error the same way mixing `Symbol`s from two different `SymbolSource`s
/// would be.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct GrammarId(pub(crate) u32);

impl GrammarId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// An index into the engine's table of lazy thunks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct LazyId(pub(crate) u32);

impl LazyId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The shape of a grammar node, in canonical (smart-constructed) form.
///
/// `Union`'s children are always sorted and deduplicated, so two calls that
/// build the same set of alternatives end up with structurally equal nodes
/// and therefore share a single hash-consed id.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) enum GrammarNode {
    Null,
    Epsilon,
    Chars(ByteSet),
    Any(u32),
    Cat(GrammarId, GrammarId),
    Union(Vec<GrammarId>),
    Lazy(LazyId),
}
