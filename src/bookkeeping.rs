//! The three monotone properties tracked per grammar node, and the small
//! bitset recording which of them have reached their final value.

use crate::byteset::ByteSet;
#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// One of the three fixed-point properties the solver computes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) enum Property {
    MatchesEmpty,
    PossibleStarts,
    CouldHaveMatches,
}

impl Property {
    const ALL: [Property; 3] = [
        Property::MatchesEmpty,
        Property::PossibleStarts,
        Property::CouldHaveMatches,
    ];

    fn bit(self) -> u8 {
        match self {
            Property::MatchesEmpty => 0b001,
            Property::PossibleStarts => 0b010,
            Property::CouldHaveMatches => 0b100,
        }
    }
}

/// A target the solver can work on: a property of a specific grammar node.
pub(crate) type Target = (Property, crate::node::GrammarId);

/// Which of a node's three properties are already known to be final.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub(crate) struct PropertySet(u8);

impl PropertySet {
    pub(crate) fn all() -> Self {
        let mut set = PropertySet::default();
        for p in Property::ALL {
            set.insert(p);
        }
        set
    }

    pub(crate) fn contains(self, p: Property) -> bool {
        self.0 & p.bit() != 0
    }

    pub(crate) fn insert(&mut self, p: Property) {
        self.0 |= p.bit();
    }
}

/// The current (possibly not-yet-final) values of a node's three properties.
///
/// Before the solver has touched a composite node these sit at their
/// bottom element (`false`, empty set, `false`); every update only ever
/// grows them, which is what lets the worklist solver stop once nothing
/// is left dirty.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub(crate) struct BookKeeping {
    pub(crate) matches_empty: bool,
    pub(crate) possible_starts: ByteSet,
    pub(crate) could_have_matches: bool,
    pub(crate) complete: PropertySet,
}

impl BookKeeping {
    pub(crate) fn bottom() -> Self {
        BookKeeping {
            matches_empty: false,
            possible_starts: ByteSet::empty(),
            could_have_matches: false,
            complete: PropertySet::default(),
        }
    }

    /// Bookkeeping for a leaf node, whose properties are known outright
    /// and never need the worklist solver to touch them.
    pub(crate) fn leaf(matches_empty: bool, possible_starts: ByteSet, could_have_matches: bool) -> Self {
        BookKeeping {
            matches_empty,
            possible_starts,
            could_have_matches,
            complete: PropertySet::all(),
        }
    }
}
