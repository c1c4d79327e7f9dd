//! Baseline bot for filling seats and running simulations.
//!
//! Rule-based and fully deterministic: the same snapshot always produces the
//! same action, so seeded simulations replay exactly.

use crate::Bot;
use cardroom_engine::cards::Card;
use cardroom_engine::hand::Category;
use cardroom_engine::player::PlayerAction;
use cardroom_engine::variant::Variant;
use cardroom_engine::view::{CardView, TableSnapshot};
use cardroom_engine::wild::{evaluate_with_wilds, WildRanks};

/// Simple baseline bot.
///
/// # Strategy
///
/// **Few cards known** (hold'em pre-flop, early stud streets):
/// - Premium starting cards (high pairs, AK, wild-backed pairs): Raise or call
/// - Playable cards: Call if cheap
/// - Weak cards: Fold to bets, check if free
///
/// **Five or more cards known:**
/// - Two Pair and better: Bet or call
/// - One Pair: Check or call small bets
/// - Weak hands: Fold unless the price is tiny
///
/// # Example
///
/// ```rust
/// use cardroom_ai::baseline::BaselineBot;
/// use cardroom_ai::Bot;
///
/// let bot = BaselineBot::new();
/// assert_eq!(bot.name(), "BaselineBot");
/// ```
#[derive(Debug, Clone)]
pub struct BaselineBot;

impl BaselineBot {
    pub fn new() -> Self {
        Self
    }

    /// Starting-hand strength for two hole cards, 0-10.
    fn holdem_preflop_strength(c1: Card, c2: Card) -> u8 {
        let r1 = c1.rank.value();
        let r2 = c2.rank.value();
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = c1.suit == c2.suit;

        if r1 == r2 {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        let base = match (high, low) {
            (14, 13) => 8,
            (14, 12) => 7,
            (14, 11) | (13, 12) => 6,
            (14, 10) | (13, 11) | (12, 11) => 5,
            (14, _) | (13, 10) | (12, 10) => 4,
            _ if high - low <= 2 && high >= 9 => 4,
            _ if high >= 11 && low >= 9 => 4,
            _ => 2,
        };
        if suited { (base + 1).min(10) } else { base }
    }

    /// Strength of an incomplete stud hand (under five cards), 0-10.
    fn partial_strength(cards: &[Card], wilds: WildRanks) -> u8 {
        let wild_count = cards.iter().filter(|c| wilds.is_wild(c)).count() as u8;
        let mut counts = [0u8; 15];
        for c in cards.iter().filter(|c| !wilds.is_wild(c)) {
            counts[c.rank.value() as usize] += 1;
        }
        let (best_count, best_rank) = (2..=14u8)
            .map(|r| (counts[r as usize], r))
            .max()
            .unwrap_or((0, 0));
        let made = best_count + wild_count;
        match made {
            4.. => 10,
            3 => 8,
            2 if best_rank >= 10 || wild_count > 0 => 6,
            2 => 4,
            _ if best_rank >= 12 => 3,
            _ => 1,
        }
    }

    /// Strength of a made hand (five to seven cards), 0-10.
    fn made_strength(cards: &[Card], wilds: WildRanks) -> u8 {
        let strength = evaluate_with_wilds(cards, wilds);
        let base = match strength.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind
            | Category::StraightFlush
            | Category::RoyalFlush
            | Category::FiveOfAKind => 10,
        };
        // Adjust for kicker strength within same category
        let kicker_boost = u8::from(strength.kickers[0] >= 12);
        (base + kicker_boost).min(10)
    }

    /// Strength of everything the viewer can use, or `None` without a seat.
    pub fn hand_strength(view: &TableSnapshot) -> Option<u8> {
        let me = view.seat(view.viewer?)?;
        let mut cards: Vec<Card> = me
            .down
            .iter()
            .filter_map(|c| match c {
                CardView::Face(card) => Some(*card),
                CardView::Hidden => None,
            })
            .collect();
        cards.extend_from_slice(&me.up);
        cards.extend_from_slice(&view.board);
        let wilds: WildRanks = view
            .wild
            .as_ref()
            .map(|w| w.wild_ranks.iter().copied().collect())
            .unwrap_or(WildRanks::NONE);

        let strength = match (view.variant, cards.len()) {
            (_, 5..=7) => Self::made_strength(&cards, wilds),
            (Variant::Holdem, 2) => Self::holdem_preflop_strength(cards[0], cards[1]),
            (_, 0) => 0,
            _ => Self::partial_strength(&cards, wilds),
        };
        Some(strength)
    }

    /// pot / (pot + call); a free look scores 1.0.
    fn pot_odds(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + to_call) as f32
    }

    fn decide(strength: u8, view: &TableSnapshot, my_bet: u32, stack: u32) -> PlayerAction {
        let to_call = view.current_bet.saturating_sub(my_bet).min(stack);
        let pot = view.pot;
        let min_raise_to = view.min_raise_to.unwrap_or(view.current_bet);
        // raise totals are clamped by the engine to an all-in
        let raise_to = |fraction_of_pot: u32| {
            let target = view.current_bet + pot * fraction_of_pot / 6;
            PlayerAction::Raise(target.max(min_raise_to))
        };

        if to_call == 0 {
            return match strength {
                9..=10 => raise_to(4),
                7..=8 => raise_to(3),
                _ => PlayerAction::Check,
            };
        }

        let pot_odds = Self::pot_odds(pot, to_call);
        if to_call >= stack {
            return if strength >= 7 {
                PlayerAction::AllIn
            } else {
                PlayerAction::Fold
            };
        }

        match strength {
            9..=10 => raise_to(3),
            7..=8 => PlayerAction::Call,
            5..=6 => {
                if pot_odds >= 0.7 || to_call <= pot / 4 {
                    PlayerAction::Call
                } else {
                    PlayerAction::Fold
                }
            }
            3..=4 => {
                if pot_odds >= 0.8 || to_call <= pot / 6 {
                    PlayerAction::Call
                } else {
                    PlayerAction::Fold
                }
            }
            _ => PlayerAction::Fold,
        }
    }
}

impl Default for BaselineBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for BaselineBot {
    fn choose_action(&self, view: &TableSnapshot) -> PlayerAction {
        let Some(me) = view.viewer.and_then(|seat| view.seat(seat)) else {
            return PlayerAction::Fold;
        };
        let strength = Self::hand_strength(view).unwrap_or(0);
        Self::decide(strength, view, me.current_bet, me.stack)
    }

    fn name(&self) -> &str {
        "BaselineBot"
    }
}
