use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::cards::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
    /// Only reachable with wild cards.
    FiveOfAKind = 10,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
            Category::FiveOfAKind => "Five of a Kind",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks, zero padded
    pub kickers: [u8; 5],
    /// The five cards making the hand, in display order.
    pub cards: [Card; 5],
}

impl HandStrength {
    pub fn beats(&self, other: &HandStrength) -> bool {
        compare_hands(self, other) == Ordering::Greater
    }
}

/// Orders two evaluated hands by category, then kickers. `Equal` is a true tie.
pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.category
        .cmp(&b.category)
        .then_with(|| a.kickers.cmp(&b.kickers))
}

/// Best five-card hand from 5 to 7 distinct cards.
///
/// Every 5-card subset is scored; among equal-valued subsets the one with the
/// greatest sorted card list is reported, so the result never depends on the
/// order the cards were passed in.
///
/// # Panics
///
/// Fewer than 5 or more than 7 cards, or a repeated card, is a caller bug.
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    assert_hand_input(cards);
    let mut best: Option<HandStrength> = None;
    for five in five_card_subsets(cards) {
        let (category, kickers) = score_five(&five);
        let candidate = HandStrength {
            category,
            kickers,
            cards: arrange(&five, &five, category),
        };
        if best.as_ref().map_or(true, |b| outranks(&candidate, b)) {
            best = Some(candidate);
        }
    }
    // assert_hand_input guarantees at least one subset
    best.unwrap_or_else(|| unreachable!("no five-card subset"))
}

pub(crate) fn assert_hand_input(cards: &[Card]) {
    assert!(
        (5..=7).contains(&cards.len()),
        "hand evaluation needs 5 to 7 cards, got {}",
        cards.len()
    );
    let mut sorted = cards.to_vec();
    sorted.sort();
    if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
        panic!("duplicate card {} in hand", w[0]);
    }
}

/// Greater value wins; equal values fall back to the sorted card set.
pub(crate) fn outranks(candidate: &HandStrength, incumbent: &HandStrength) -> bool {
    match compare_hands(candidate, incumbent) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => canonical(&candidate.cards) > canonical(&incumbent.cards),
    }
}

fn canonical(cards: &[Card; 5]) -> [Card; 5] {
    let mut c = *cards;
    c.sort_unstable_by(|a, b| b.cmp(a));
    c
}

pub(crate) fn five_card_subsets(cards: &[Card]) -> Vec<[Card; 5]> {
    let n = cards.len();
    let mut out = Vec::new();
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        out.push([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                    }
                }
            }
        }
    }
    out
}

/// Scores exactly five cards. Duplicates are allowed so that wild substitutes
/// can be scored as virtual cards.
pub(crate) fn score_five(cards: &[Card; 5]) -> (Category, [u8; 5]) {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }
    // (count, rank) high -> low
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| counts[r as usize] > 0)
        .map(|r| (counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let mut kickers = [0u8; 5];
    for (slot, &(_, r)) in kickers.iter_mut().zip(groups.iter()) {
        *slot = r;
    }

    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = if groups.len() == 5 {
        detect_straight_high(&kickers)
    } else {
        None
    };

    let shape: Vec<u8> = groups.iter().map(|&(count, _)| count).collect();
    let category = match (shape.as_slice(), straight, flush) {
        ([5], _, _) => Category::FiveOfAKind,
        (_, Some(14), true) => Category::RoyalFlush,
        (_, Some(_), true) => Category::StraightFlush,
        ([4, 1], _, _) => Category::FourOfAKind,
        ([3, 2], _, _) => Category::FullHouse,
        (_, _, true) => Category::Flush,
        (_, Some(_), false) => Category::Straight,
        ([3, 1, 1], _, _) => Category::ThreeOfAKind,
        ([2, 2, 1], _, _) => Category::TwoPair,
        ([2, 1, 1, 1], _, _) => Category::OnePair,
        _ => Category::HighCard,
    };
    if let Some(high) = straight {
        kickers = [high, 0, 0, 0, 0];
    }
    (category, kickers)
}

// ranks: five distinct values, high -> low
fn detect_straight_high(ranks: &[u8; 5]) -> Option<u8> {
    if ranks[0] - ranks[4] == 4 {
        Some(ranks[0])
    } else if *ranks == [14, 5, 4, 3, 2] {
        Some(5)
    } else {
        None
    }
}

/// Display order for `shown`, using the ranks of `scored` (which differ only
/// when wild cards were substituted). Groups first, larger groups and ranks
/// leading; a wheel shows its ace last.
pub(crate) fn arrange(shown: &[Card; 5], scored: &[Card; 5], category: Category) -> [Card; 5] {
    let mut counts = [0u8; 15];
    for c in scored {
        counts[c.rank.value() as usize] += 1;
    }
    let wheel = matches!(category, Category::Straight | Category::StraightFlush)
        && scored.iter().any(|c| c.rank.value() == 14)
        && scored.iter().any(|c| c.rank.value() == 2);
    let rank_key = |idx: usize| {
        let v = scored[idx].rank.value();
        if wheel && v == 14 { 1 } else { v }
    };
    let mut order = [0usize, 1, 2, 3, 4];
    order.sort_by(|&a, &b| {
        let ka = (counts[scored[a].rank.value() as usize], rank_key(a), shown[a]);
        let kb = (counts[scored[b].rank.value() as usize], rank_key(b), shown[b]);
        kb.cmp(&ka)
    });
    order.map(|i| shown[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(text: &str) -> [Card; 5] {
        let v = parse_cards(text).unwrap();
        [v[0], v[1], v[2], v[3], v[4]]
    }

    #[test]
    fn wheel_is_five_high() {
        let (cat, k) = score_five(&five("As 2d 3c 4h 5s"));
        assert_eq!(cat, Category::Straight);
        assert_eq!(k, [5, 0, 0, 0, 0]);
    }

    #[test]
    fn virtual_duplicates_score_as_five_of_a_kind() {
        let (cat, k) = score_five(&five("9s 9s 9d 9c 9h"));
        assert_eq!(cat, Category::FiveOfAKind);
        assert_eq!(k, [9, 0, 0, 0, 0]);
    }

    #[test]
    fn wheel_displays_ace_last() {
        let cards = five("As 2d 3c 4h 5s");
        let shown = arrange(&cards, &cards, Category::Straight);
        assert_eq!(shown[0].rank.value(), 5);
        assert_eq!(shown[4].rank.value(), 14);
    }

    #[test]
    fn full_house_displays_trips_first() {
        let cards = five("2s Kd 2c Kh 2h");
        let shown = arrange(&cards, &cards, Category::FullHouse);
        assert!(shown[..3].iter().all(|c| c.rank.value() == 2));
    }

    #[test]
    #[should_panic(expected = "duplicate card")]
    fn duplicate_input_panics() {
        let cards = parse_cards("As As Kd Qc Jh").unwrap();
        evaluate_hand(&cards);
    }

    #[test]
    #[should_panic(expected = "5 to 7 cards")]
    fn short_input_panics() {
        let cards = parse_cards("As Kd Qc Jh").unwrap();
        evaluate_hand(&cards);
    }
}
