//! Pot distribution at showdown.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::hand::{compare_hands, Category, HandStrength};
use crate::lowball::{best_low, compare_lows, LowHand};
use crate::wild::{evaluate_with_wilds, WildRanks};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinType {
    Win,
    TieSplit,
    Low,
    LowTieSplit,
    /// Won both halves of a hi-lo pot.
    Scoop,
    TwoNaturalSevens,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub seat: usize,
    pub identity: String,
    pub amount: u32,
    /// `None` when everyone else folded.
    pub category: Option<Category>,
    #[serde(default)]
    pub low: Option<LowHand>,
    /// Best five cards, empty for an uncontested pot.
    pub cards: Vec<Card>,
    pub win_type: WinType,
}

/// A player still in the hand at showdown, with every card they can use.
#[derive(Debug, Clone)]
pub struct Contender {
    pub seat: usize,
    pub identity: String,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShowdownRules {
    pub wilds: WildRanks,
    pub hi_lo: bool,
    pub two_natural_sevens_wins: bool,
}

#[derive(Debug, Clone)]
pub struct ShowdownResult {
    pub winners: Vec<Winner>,
    pub hands: Vec<(usize, HandStrength)>,
}

/// Splits `amount` evenly; the remainder goes one chip at a time to seats in
/// `order`, which callers build clockwise from the dealer's left.
pub fn split_evenly(amount: u32, order: &[usize]) -> Vec<(usize, u32)> {
    if order.is_empty() {
        return Vec::new();
    }
    let n = order.len() as u32;
    let share = amount / n;
    let remainder = (amount % n) as usize;
    order
        .iter()
        .enumerate()
        .map(|(i, &seat)| (seat, share + u32::from(i < remainder)))
        .collect()
}

/// Evaluates every contender and divides `pot` among the winners.
///
/// `award_order` lists seats clockwise from the dealer's left and decides who
/// receives odd chips.
pub fn resolve(
    contenders: &[Contender],
    pot: u32,
    award_order: &[usize],
    rules: &ShowdownRules,
) -> ShowdownResult {
    let hands: Vec<(usize, HandStrength)> = contenders
        .iter()
        .map(|c| (c.seat, evaluate_with_wilds(&c.cards, rules.wilds)))
        .collect();
    let identity = |seat: usize| {
        contenders
            .iter()
            .find(|c| c.seat == seat)
            .map(|c| c.identity.clone())
            .unwrap_or_default()
    };
    let strength = |seat: usize| hands.iter().find(|(s, _)| *s == seat).map(|(_, h)| h);

    if rules.two_natural_sevens_wins && !rules.wilds.contains(Rank::Seven) {
        let holder = contenders
            .iter()
            .find(|c| c.cards.iter().filter(|card| card.rank == Rank::Seven).count() >= 2);
        if let Some(holder) = holder {
            let sevens: Vec<Card> = holder
                .cards
                .iter()
                .filter(|card| card.rank == Rank::Seven)
                .copied()
                .collect();
            tracing::info!(seat = holder.seat, "two natural sevens take the pot");
            let winner = Winner {
                seat: holder.seat,
                identity: holder.identity.clone(),
                amount: pot,
                category: strength(holder.seat).map(|h| h.category),
                low: None,
                cards: sevens,
                win_type: WinType::TwoNaturalSevens,
            };
            return ShowdownResult {
                winners: vec![winner],
                hands,
            };
        }
    }

    let high_seats = ordered(best_seats(&hands, compare_hands), award_order);

    let lows: Vec<(usize, LowHand)> = if rules.hi_lo {
        contenders
            .iter()
            .filter_map(|c| best_low(&c.cards, rules.wilds).map(|low| (c.seat, low)))
            .collect()
    } else {
        Vec::new()
    };
    let low_seats = ordered(best_seats(&lows, compare_lows), award_order);

    // the low half takes the odd chip; no qualifying low means high scoops
    let (high_pot, low_pot) = if low_seats.is_empty() {
        (pot, 0)
    } else {
        (pot / 2, pot - pot / 2)
    };

    let mut winners: Vec<Winner> = Vec::new();
    let high_type = if high_seats.len() > 1 {
        WinType::TieSplit
    } else {
        WinType::Win
    };
    for (seat, amount) in split_evenly(high_pot, &high_seats) {
        let hand = strength(seat);
        winners.push(Winner {
            seat,
            identity: identity(seat),
            amount,
            category: hand.map(|h| h.category),
            low: None,
            cards: hand.map(|h| h.cards.to_vec()).unwrap_or_default(),
            win_type: high_type,
        });
    }

    let low_type = if low_seats.len() > 1 {
        WinType::LowTieSplit
    } else {
        WinType::Low
    };
    for (seat, amount) in split_evenly(low_pot, &low_seats) {
        let low = lows.iter().find(|(s, _)| *s == seat).map(|(_, l)| l.clone());
        if let Some(existing) = winners.iter_mut().find(|w| w.seat == seat) {
            existing.amount += amount;
            existing.low = low;
            existing.win_type = WinType::Scoop;
            continue;
        }
        winners.push(Winner {
            seat,
            identity: identity(seat),
            amount,
            category: None,
            cards: low.as_ref().map(|l| l.cards.to_vec()).unwrap_or_default(),
            low,
            win_type: low_type,
        });
    }

    ShowdownResult { winners, hands }
}

fn best_seats<T>(entries: &[(usize, T)], cmp: fn(&T, &T) -> Ordering) -> Vec<usize> {
    let Some((_, first)) = entries.first() else {
        return Vec::new();
    };
    let best = entries.iter().skip(1).fold(first, |best, (_, v)| {
        if cmp(v, best) == Ordering::Greater { v } else { best }
    });
    entries
        .iter()
        .filter(|(_, v)| cmp(v, best) == Ordering::Equal)
        .map(|(s, _)| *s)
        .collect()
}

fn ordered(mut seats: Vec<usize>, award_order: &[usize]) -> Vec<usize> {
    seats.sort_by_key(|s| award_order.iter().position(|a| a == s).unwrap_or(usize::MAX));
    seats
}
