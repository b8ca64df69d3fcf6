//! Construction-precondition violations.
//!
//! Every precondition in this crate is a programmer error rather than a
//! recoverable condition: there is no I/O, no parsing, nothing a caller
//! could usefully retry. They are therefore raised as panics at the
//! construction boundary rather than threaded through a `Result`, the
//! same way the donor grammar crate panics on an out-of-range `Symbol`
//! rather than returning one.

use crate::node::GrammarId;

/// Panics with a message identifying the offending id.
///
/// Out-of-range ids only arise from mixing `GrammarId`s between two
/// different engines, or from holding onto one past the engine's
/// lifetime; both are logic errors, not something to recover from.
#[track_caller]
pub(crate) fn invalid_grammar_id(id: GrammarId, len: usize) -> ! {
    panic!(
        "grammar id {:?} is not valid for this engine (it has {} node(s)); \
         ids from a different Engine cannot be mixed in",
        id, len
    );
}
