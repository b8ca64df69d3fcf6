//! A dense set of bytes, used for `Chars` payloads and for `possible_starts`.
//!
//! Backed by `bit_vec::BitVec`, the same bitmap type the donor grammar crate
//! uses for its symbol sets (`SymbolBitSet`).

use std::fmt;
use std::hash::{Hash, Hasher};

use bit_vec::BitVec;
#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A subset of `{0u8, ..., 255u8}`.
#[derive(Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ByteSet {
    bits: BitVec,
}

impl ByteSet {
    /// The empty set.
    pub fn empty() -> Self {
        ByteSet {
            bits: BitVec::from_elem(256, false),
        }
    }

    /// The set of all 256 bytes.
    pub fn full() -> Self {
        ByteSet {
            bits: BitVec::from_elem(256, true),
        }
    }

    /// A set containing exactly one byte.
    pub fn singleton(b: u8) -> Self {
        let mut set = Self::empty();
        set.insert(b);
        set
    }

    /// Builds a set from an iterator of bytes.
    pub fn from_bytes<I: IntoIterator<Item = u8>>(bytes: I) -> Self {
        let mut set = Self::empty();
        for b in bytes {
            set.insert(b);
        }
        set
    }

    /// Adds a byte to the set.
    pub fn insert(&mut self, b: u8) {
        self.bits.set(b as usize, true);
    }

    /// Checks whether a byte is a member.
    pub fn contains(&self, b: u8) -> bool {
        self.bits[b as usize]
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.bits.none()
    }

    /// Whether the set contains every byte.
    pub fn is_full(&self) -> bool {
        self.bits.all()
    }

    /// The number of member bytes.
    pub fn len(&self) -> usize {
        self.bits.iter().filter(|&present| present).count()
    }

    /// Unions `other` into `self` in place.
    pub fn union_with(&mut self, other: &ByteSet) {
        self.bits.union(&other.bits);
    }

    /// Iterates over the member bytes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, present)| present.then_some(i as u8))
    }
}

impl PartialEq for ByteSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for ByteSet {}

impl Hash for ByteSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.to_bytes().hash(state);
    }
}

impl fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<u8> for ByteSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self::from_bytes(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_full() {
        assert!(ByteSet::empty().is_empty());
        assert!(ByteSet::full().is_full());
        assert!(!ByteSet::full().is_empty());
        assert_eq!(ByteSet::full().len(), 256);
    }

    #[test]
    fn singleton_roundtrip() {
        let set = ByteSet::singleton(b'a');
        assert!(set.contains(b'a'));
        assert!(!set.contains(b'b'));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn union_grows() {
        let mut a = ByteSet::singleton(b'a');
        let b = ByteSet::singleton(b'b');
        a.union_with(&b);
        assert!(a.contains(b'a'));
        assert!(a.contains(b'b'));
        assert_eq!(a.len(), 2);
    }
}
