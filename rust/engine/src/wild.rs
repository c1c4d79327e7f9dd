//! Evaluation with wild cards for Follow the Queen.
//!
//! Two phases: a direct five-of-a-kind check (enough naturals of one rank plus
//! wilds), then a bounded substitution search. Wild substitutes are enumerated
//! as rank multisets in one suit per subset, which keeps the worst case (three
//! wilds among seven cards) to a few thousand scored hands.

use serde::{Deserialize, Serialize};

use crate::cards::{all_ranks, Card, Rank, Suit};
use crate::hand::{
    arrange, assert_hand_input, evaluate_hand, five_card_subsets, outranks, score_five, Category,
    HandStrength,
};

/// Upper bound on substituted hands scored per evaluation.
pub const MAX_CANDIDATES: usize = 4096;

/// Set of wild ranks as a bitmask over rank values.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct WildRanks(u16);

impl WildRanks {
    pub const NONE: WildRanks = WildRanks(0);

    /// Queens only, the state before any card follows a Queen.
    pub fn queens() -> Self {
        Self::NONE.with(Rank::Queen)
    }

    pub fn with(self, rank: Rank) -> Self {
        WildRanks(self.0 | (1 << rank.value()))
    }

    pub fn contains(self, rank: Rank) -> bool {
        self.0 & (1 << rank.value()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn ranks(self) -> Vec<Rank> {
        all_ranks().into_iter().filter(|&r| self.contains(r)).collect()
    }

    pub fn is_wild(self, card: &Card) -> bool {
        self.contains(card.rank)
    }
}

impl FromIterator<Rank> for WildRanks {
    fn from_iter<I: IntoIterator<Item = Rank>>(iter: I) -> Self {
        iter.into_iter().fold(WildRanks::NONE, WildRanks::with)
    }
}

/// Best hand from 5 to 7 distinct cards where every card whose rank is in
/// `wilds` may stand for any rank and suit.
///
/// The returned `cards` are the dealt cards (wilds included) in display order;
/// `category` and `kickers` reflect the substituted hand.
///
/// # Panics
///
/// Same preconditions as [`evaluate_hand`].
pub fn evaluate_with_wilds(cards: &[Card], wilds: WildRanks) -> HandStrength {
    assert_hand_input(cards);
    let wild_count = cards.iter().filter(|c| wilds.is_wild(c)).count();
    if wild_count == 0 {
        return evaluate_hand(cards);
    }
    if let Some(five) = five_of_a_kind(cards, wilds, wild_count) {
        return five;
    }
    substitute(cards, wilds)
}

fn five_of_a_kind(cards: &[Card], wilds: WildRanks, wild_count: usize) -> Option<HandStrength> {
    let mut natural = [0usize; 15];
    for c in cards.iter().filter(|c| !wilds.is_wild(c)) {
        natural[c.rank.value() as usize] += 1;
    }
    // highest rank first; with no naturals at all the wilds become aces
    let rank = all_ranks()
        .into_iter()
        .rev()
        .find(|r| natural[r.value() as usize] + wild_count >= 5)?;

    let mut chosen: Vec<Card> = cards
        .iter()
        .filter(|c| !wilds.is_wild(c) && c.rank == rank)
        .copied()
        .collect();
    chosen.sort_unstable_by(|a, b| b.cmp(a));
    chosen.truncate(5);
    let mut wild_cards: Vec<Card> = cards.iter().filter(|c| wilds.is_wild(c)).copied().collect();
    wild_cards.sort_unstable_by(|a, b| b.cmp(a));
    chosen.extend(wild_cards.into_iter().take(5 - chosen.len()));

    let shown = [chosen[0], chosen[1], chosen[2], chosen[3], chosen[4]];
    Some(HandStrength {
        category: Category::FiveOfAKind,
        kickers: [rank.value(), 0, 0, 0, 0],
        cards: shown,
    })
}

fn substitute(cards: &[Card], wilds: WildRanks) -> HandStrength {
    let ranks = all_ranks();
    let mut best: Option<HandStrength> = None;
    let mut scored = 0usize;

    'subsets: for five in five_card_subsets(cards) {
        let wild_slots: Vec<usize> = (0..5).filter(|&i| wilds.is_wild(&five[i])).collect();
        if wild_slots.is_empty() {
            let (category, kickers) = score_five(&five);
            let candidate = HandStrength {
                category,
                kickers,
                cards: arrange(&five, &five, category),
            };
            scored += 1;
            if best.as_ref().map_or(true, |b| outranks(&candidate, b)) {
                best = Some(candidate);
            }
            continue;
        }

        // A flush can only come from naturals that already share a suit.
        let mut natural_suits = five
            .iter()
            .filter(|c| !wilds.is_wild(c))
            .map(|c| c.suit);
        let first = natural_suits.next().unwrap_or(Suit::Spades);
        let suit = if natural_suits.all(|s| s == first) {
            first
        } else {
            Suit::Clubs
        };

        // non-decreasing rank indices: combinations with repetition
        let k = wild_slots.len();
        let mut pick = vec![0usize; k];
        loop {
            if scored >= MAX_CANDIDATES {
                tracing::warn!(
                    limit = MAX_CANDIDATES,
                    "wild evaluation hit candidate limit, returning best found"
                );
                break 'subsets;
            }
            let mut virtual_hand = five;
            for (slot, &ri) in wild_slots.iter().zip(pick.iter()) {
                virtual_hand[*slot] = Card::new(ranks[ri], suit);
            }
            let (category, kickers) = score_five(&virtual_hand);
            scored += 1;
            let candidate = HandStrength {
                category,
                kickers,
                cards: arrange(&five, &virtual_hand, category),
            };
            if best.as_ref().map_or(true, |b| outranks(&candidate, b)) {
                best = Some(candidate);
            }

            // advance the multiset
            let mut i = k;
            loop {
                if i == 0 {
                    continue 'subsets;
                }
                i -= 1;
                if pick[i] < ranks.len() - 1 {
                    pick[i] += 1;
                    let v = pick[i];
                    for p in pick.iter_mut().skip(i + 1) {
                        *p = v;
                    }
                    break;
                }
            }
        }
    }

    best.unwrap_or_else(|| evaluate_hand(cards))
}
