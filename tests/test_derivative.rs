//! Properties of the derivative operator and the smart-constructor
//! identities it relies on.

use brzo::Engine;

#[test]
fn union_with_null_is_identity() {
    let mut engine = Engine::new();
    let g = engine.literal(b"x");
    let null = engine.null();
    assert_eq!(engine.union(&[g, null]), g);
}

#[test]
fn cat_with_epsilon_is_identity() {
    let mut engine = Engine::new();
    let g = engine.literal(b"x");
    let eps = engine.epsilon();
    assert_eq!(engine.cat(&[g, eps]), g);
    assert_eq!(engine.cat(&[eps, g]), g);
}

#[test]
fn cat_with_null_is_null() {
    let mut engine = Engine::new();
    let g = engine.literal(b"x");
    let null = engine.null();
    assert_eq!(engine.cat(&[g, null]), null);
    assert_eq!(engine.cat(&[null, g]), null);
}

#[test]
fn derivative_matches_residual_language() {
    // matches(g, b·s) == matches(derivative(g, b), s)
    let mut engine = Engine::new();
    let g = engine.literal(b"abc");
    let d = engine.derivative(g, b'a');
    assert!(engine.matches(g, b"abc"));
    assert!(engine.matches(d, b"bc"));
    assert_eq!(engine.matches(g, b"abc"), engine.matches(d, b"bc"));

    let wrong_start = engine.derivative(g, b'z');
    assert_eq!(wrong_start, engine.null());
}

#[test]
fn derivative_of_union_distributes() {
    let mut engine = Engine::new();
    let cat_word = engine.literal(b"cat");
    let car_word = engine.literal(b"car");
    let g = engine.union(&[cat_word, car_word]);
    let d = engine.derivative(g, b'c');
    // both branches agree on "c", so the derivative still distinguishes "at" vs "ar"
    assert!(engine.matches(d, b"at"));
    assert!(engine.matches(d, b"ar"));
    assert!(!engine.matches(d, b"og"));
}

#[test]
fn hash_consing_keeps_identical_literals_equal() {
    let mut engine = Engine::new();
    let a = engine.literal(b"same");
    let b = engine.literal(b"same");
    assert_eq!(a, b);

    let union_a = engine.union(&[a, b]);
    assert_eq!(union_a, a, "union of a grammar with itself collapses to itself");
}

#[test]
fn matches_empty_agrees_with_matching_the_empty_string() {
    let mut engine = Engine::new();
    let word = engine.literal(b"x");
    let optional_word = engine.optional(word);
    assert_eq!(engine.matches(optional_word, b""), engine.matches_empty(optional_word));
    assert_eq!(engine.matches(word, b""), engine.matches_empty(word));
}
