//! The worklist fixed-point solver's three properties, exercised
//! directly rather than only through `matches`.

use brzo::{ByteSet, Engine};

#[test]
fn possible_starts_is_sound_for_union() {
    // The first byte of any string the grammar matches is always in possible_starts.
    let _ = env_logger::try_init();
    let mut engine = Engine::new();
    let red = engine.literal(b"red");
    let blue = engine.literal(b"blue");
    let g = engine.union(&[red, blue]);
    let starts = engine.possible_starts(g);
    assert!(starts.contains(b'r'));
    assert!(starts.contains(b'b'));
    assert_eq!(starts.len(), 2);
}

#[test]
fn possible_starts_through_cat_includes_right_side_only_if_left_is_nullable() {
    let mut engine = Engine::new();
    let a = engine.char(b'a');
    let b = engine.char(b'b');

    let non_nullable_cat = engine.cat(&[a, b]);
    let starts = engine.possible_starts(non_nullable_cat);
    assert!(starts.contains(b'a'));
    assert!(!starts.contains(b'b'));

    let optional_a = engine.optional(a);
    let nullable_cat = engine.cat(&[optional_a, b]);
    let starts = engine.possible_starts(nullable_cat);
    assert!(starts.contains(b'a'));
    assert!(starts.contains(b'b'));
}

#[test]
fn could_have_matches_is_false_for_null_and_true_for_anything_productive() {
    let mut engine = Engine::new();
    let null = engine.null();
    assert!(!engine.could_have_matches(null));

    let word = engine.literal(b"ok");
    assert!(engine.could_have_matches(word));

    let eps = engine.epsilon();
    assert!(engine.could_have_matches(eps));
}

#[test]
fn could_have_matches_propagates_through_cat_with_a_dead_side() {
    let mut engine = Engine::new();
    let null = engine.null();
    let a = engine.char(b'a');
    let dead = engine.cat(&[a, null]);
    assert!(!engine.could_have_matches(dead));
    assert_eq!(dead, null, "cat with a dead side collapses to null outright");
}

#[test]
fn queried_values_never_regress() {
    // Once observed, a property's value never changes on a later query.
    let mut engine = Engine::new();
    let a = engine.char(b'a');
    let b = engine.char(b'b');
    let g = engine.cat(&[a, b]);

    let first = engine.matches_empty(g);
    let second = engine.matches_empty(g);
    assert_eq!(first, second);

    let starts_1 = engine.possible_starts(g);
    let starts_2 = engine.possible_starts(g);
    assert_eq!(starts_1, starts_2);
}

#[test]
fn chars_constructor_reports_its_own_byte_set() {
    let mut engine = Engine::new();
    let digits = ByteSet::from_bytes(b'0'..=b'9');
    let g = engine.chars(digits);
    let starts = engine.possible_starts(g);
    assert!(starts.contains(b'5'));
    assert!(!starts.contains(b'a'));
}
