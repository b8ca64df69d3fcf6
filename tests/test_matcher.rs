//! End-to-end matching scenarios against realistic small grammars.

use brzo::{ByteSet, Engine};

#[test]
fn literal_matches_exactly() {
    let mut engine = Engine::new();
    let g = engine.literal(b"ab");
    assert!(engine.matches(g, b"ab"));
    assert!(!engine.matches(g, b"a"));
    assert!(!engine.matches(g, b"abc"));
    assert!(!engine.matches_empty(g));

    let starts = engine.possible_starts(g);
    assert!(starts.contains(b'a'));
    assert_eq!(starts.len(), 1);
}

#[test]
fn union_of_literals_matches_keywords() {
    let mut engine = Engine::new();
    let t = engine.literal(b"true");
    let f = engine.literal(b"false");
    let n = engine.literal(b"null");
    let g = engine.union(&[t, f, n]);

    for word in [&b"true"[..], &b"false"[..], &b"null"[..]] {
        assert!(engine.matches(g, word));
    }
    assert!(!engine.matches(g, b"tru"));
    assert!(!engine.matches(g, b"True"));

    let starts = engine.possible_starts(g);
    assert!(starts.contains(b't'));
    assert!(starts.contains(b'f'));
    assert!(starts.contains(b'n'));
    assert_eq!(starts.len(), 3);
}

/// A quote, then any number of either a non-quote-non-backslash byte or
/// a backslash followed by any byte, then a closing quote.
fn json_string_grammar(engine: &mut Engine) -> brzo::GrammarId {
    let quote = engine.char(b'"');
    let backslash = engine.char(b'\\');
    let plain_bytes = ByteSet::from_bytes((0u8..=255u8).filter(|&b| b != b'"' && b != b'\\'));
    let plain = engine.chars(plain_bytes);
    let any_byte = engine.dot();
    let escape = engine.cat(&[backslash, any_byte]);
    let atom = engine.union(&[plain, escape]);
    let body = engine.seq(atom);
    engine.cat(&[quote, body, quote])
}

#[test]
fn json_string_accepts_escaped_backslash() {
    let mut engine = Engine::new();
    let json_string = json_string_grammar(&mut engine);
    assert!(engine.matches(json_string, b"\"\\\\\""));
    assert!(engine.matches(json_string, b"\"hello\""));
    assert!(engine.matches(json_string, b"\"\""));
    assert!(!engine.matches(json_string, b"\"unterminated"));
    assert!(!engine.matches(json_string, b"\"bad\\\""));
}
