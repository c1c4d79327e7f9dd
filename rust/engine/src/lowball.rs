//! Eight-or-better low hands for hi-lo stud.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::cards::Card;
use crate::hand::five_card_subsets;
use crate::wild::WildRanks;

/// A qualifying low: five distinct values of eight or under, aces count one.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LowHand {
    /// High -> low; lower is better.
    pub values: [u8; 5],
    pub cards: [Card; 5],
}

impl LowHand {
    /// `8-6-4-2-A` style label.
    pub fn label(&self) -> String {
        self.values
            .iter()
            .map(|&v| match v {
                1 => "A".to_string(),
                v => v.to_string(),
            })
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// `Greater` means `a` is the better (lower) hand.
pub fn compare_lows(a: &LowHand, b: &LowHand) -> Ordering {
    b.values.cmp(&a.values)
}

fn low_value(card: &Card) -> u8 {
    match card.rank.value() {
        14 => 1,
        v => v,
    }
}

/// Best qualifying low among all five-card subsets, if any. Wild cards fill
/// the lowest values the naturals leave open.
pub fn best_low(cards: &[Card], wilds: WildRanks) -> Option<LowHand> {
    let mut best: Option<LowHand> = None;
    for five in five_card_subsets(cards) {
        let Some(values) = low_values(&five, wilds) else {
            continue;
        };
        let mut shown = five;
        shown.sort_unstable_by_key(|c| std::cmp::Reverse(low_value(c)));
        let candidate = LowHand {
            values,
            cards: shown,
        };
        let better = match &best {
            None => true,
            Some(b) => match compare_lows(&candidate, b) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => candidate.cards > b.cards,
            },
        };
        if better {
            best = Some(candidate);
        }
    }
    best
}

fn low_values(five: &[Card; 5], wilds: WildRanks) -> Option<[u8; 5]> {
    let mut used = [false; 9];
    let mut wild_count = 0;
    for c in five {
        if wilds.is_wild(c) {
            wild_count += 1;
            continue;
        }
        let v = low_value(c);
        if v > 8 || used[v as usize] {
            return None;
        }
        used[v as usize] = true;
    }
    for v in 1..=8 {
        if wild_count == 0 {
            break;
        }
        if !used[v] {
            used[v] = true;
            wild_count -= 1;
        }
    }
    let mut values: Vec<u8> = (1..=8u8).rev().filter(|&v| used[v as usize]).collect();
    if values.len() != 5 {
        return None;
    }
    values.truncate(5);
    Some([values[0], values[1], values[2], values[3], values[4]])
}
