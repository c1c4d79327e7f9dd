use cardroom_engine::cards::{full_deck, Card};
use cardroom_engine::deck::Deck;
use std::collections::HashSet;

fn draw_all(deck: &mut Deck) -> Vec<Card> {
    let mut out = Vec::new();
    while let Some(c) = deck.deal_card() {
        out.push(c);
    }
    out
}

#[test]
fn shuffle_keeps_exactly_the_52_cards() {
    let mut deck = Deck::new_with_seed(3);
    for _ in 0..20 {
        deck.shuffle();
        let drawn = draw_all(&mut deck);
        assert_eq!(drawn.len(), 52);
        let unique: HashSet<Card> = drawn.iter().copied().collect();
        assert_eq!(unique.len(), 52);
        let full: HashSet<Card> = full_deck().into_iter().collect();
        assert_eq!(unique, full);
    }
}

#[test]
fn same_seed_same_order() {
    let mut a = Deck::new_with_seed(42);
    let mut b = Deck::new_with_seed(42);
    a.shuffle();
    b.shuffle();
    assert_eq!(draw_all(&mut a), draw_all(&mut b));
}

#[test]
fn different_seeds_differ() {
    let mut a = Deck::new_with_seed(1);
    let mut b = Deck::new_with_seed(2);
    a.shuffle();
    b.shuffle();
    assert_ne!(draw_all(&mut a), draw_all(&mut b));
}

#[test]
fn burn_consumes_a_card() {
    let mut deck = Deck::new_with_seed(5);
    deck.shuffle();
    let top = deck.undealt()[0];
    deck.burn_card();
    assert_eq!(deck.remaining(), 51);
    assert!(!deck.undealt().contains(&top));
    assert_eq!(draw_all(&mut deck).len(), 51);
    assert_eq!(deck.deal_card(), None);
}
