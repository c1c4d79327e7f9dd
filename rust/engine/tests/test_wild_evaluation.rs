use cardroom_engine::cards::{parse_cards, Card, Rank};
use cardroom_engine::deck::Deck;
use cardroom_engine::hand::{compare_hands, evaluate_hand, Category};
use cardroom_engine::wild::{evaluate_with_wilds, WildRanks};

fn cards(text: &str) -> Vec<Card> {
    parse_cards(text).unwrap()
}

#[test]
fn four_aces_and_a_queen_make_five_aces() {
    let hs = evaluate_with_wilds(&cards("As Ah Ad Ac Qh"), WildRanks::queens());
    assert_eq!(hs.category, Category::FiveOfAKind);
    assert_eq!(hs.kickers, [14, 0, 0, 0, 0]);
    assert!(hs.cards.contains(&"Qh".parse().unwrap()));
}

#[test]
fn five_of_a_kind_outranks_royal_flush() {
    let five = evaluate_with_wilds(&cards("2s 2h 2d Qc Qh"), WildRanks::queens());
    let royal = evaluate_hand(&cards("Ts Js Qs Ks As"));
    assert_eq!(five.category, Category::FiveOfAKind);
    assert!(five.beats(&royal));
}

#[test]
fn lone_wild_pairs_the_highest_card() {
    let hs = evaluate_with_wilds(&cards("Qs 7h 9c 2d 4s"), WildRanks::queens());
    assert_eq!(hs.category, Category::OnePair);
    assert_eq!(hs.kickers[0], 9);
}

#[test]
fn wild_completes_straight_flush() {
    let hs = evaluate_with_wilds(&cards("5h 6h 7h 8h Qd 2c Kd"), WildRanks::queens());
    assert_eq!(hs.category, Category::StraightFlush);
    assert_eq!(hs.kickers[0], 9);
}

#[test]
fn active_rank_counts_as_wild() {
    let wilds = WildRanks::queens().with(Rank::Four);
    let hs = evaluate_with_wilds(&cards("4c 4d Ks Kh 9s 2c 3d"), wilds);
    assert_eq!(hs.category, Category::FourOfAKind);
    assert_eq!(hs.kickers[0], 13);
}

#[test]
fn wild_result_never_worse_than_natural_reading() {
    let mut deck = Deck::new_with_seed(99);
    for _ in 0..150 {
        deck.shuffle();
        let hand: Vec<Card> = (0..7).map(|_| deck.deal_card().unwrap()).collect();
        let natural = evaluate_hand(&hand);
        let wild = evaluate_with_wilds(&hand, WildRanks::queens());
        assert!(compare_hands(&wild, &natural).is_ge());

        let mut shuffled = hand.clone();
        shuffled.reverse();
        assert_eq!(evaluate_with_wilds(&shuffled, WildRanks::queens()), wild);
    }
}

#[test]
fn reported_cards_are_the_dealt_cards() {
    let hand = cards("Qs 3h 3d 8c 9s Jd 2c");
    let hs = evaluate_with_wilds(&hand, WildRanks::queens());
    assert_eq!(hs.category, Category::ThreeOfAKind);
    assert!(hs.cards.iter().all(|c| hand.contains(c)));
}
