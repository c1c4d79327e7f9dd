use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Player, PlayerAction as A};

/// A legal action with the chips it moves from the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "chips", rename_all = "snake_case")]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Raise(u32),
    AllIn(u32),
}

impl ValidatedAction {
    pub fn chips(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(c) | ValidatedAction::Raise(c) | ValidatedAction::AllIn(c) => c,
        }
    }
}

/// Validates a player action according to betting rules and stack size.
///
/// `player_bet` is what the player already has in this round, `table_bet` the
/// amount to match, and `min_raise_to` the smallest legal raise total. Raises
/// are expressed as the new total bet; one that reaches the whole stack becomes
/// an all-in and is exempt from the minimum.
///
/// # Errors
///
/// - [`GameError::CannotCheck`] - checking while facing a bet
/// - [`GameError::InvalidBetAmount`] - raise not above the current bet, or below the minimum
/// - [`GameError::InsufficientChips`] - acting with an empty stack
///
/// # Examples
///
/// ```
/// use cardroom_engine::rules::{validate_action, ValidatedAction};
/// use cardroom_engine::player::PlayerAction;
///
/// // Facing 50 with 20 already in: a call costs 30
/// let result = validate_action(1000, 20, 50, 100, PlayerAction::Call);
/// assert_eq!(result, Ok(ValidatedAction::Call(30)));
///
/// // Raise to 100 from 20 in
/// let result = validate_action(1000, 20, 50, 100, PlayerAction::Raise(100));
/// assert_eq!(result, Ok(ValidatedAction::Raise(80)));
///
/// // Raising past the stack is an all-in
/// let result = validate_action(60, 20, 50, 100, PlayerAction::Raise(500));
/// assert_eq!(result, Ok(ValidatedAction::AllIn(60)));
/// ```
///
/// ```
/// use cardroom_engine::rules::validate_action;
/// use cardroom_engine::player::PlayerAction;
/// use cardroom_engine::errors::GameError;
///
/// let result = validate_action(1000, 0, 50, 100, PlayerAction::Check);
/// assert_eq!(result, Err(GameError::CannotCheck { to_call: 50 }));
///
/// let result = validate_action(1000, 0, 50, 100, PlayerAction::Raise(70));
/// assert!(matches!(result, Err(GameError::InvalidBetAmount { minimum: 100, .. })));
/// ```
pub fn validate_action(
    stack: u32,
    player_bet: u32,
    table_bet: u32,
    min_raise_to: u32,
    action: A,
) -> Result<ValidatedAction, GameError> {
    let to_call = table_bet.saturating_sub(player_bet);
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CannotCheck { to_call })
            }
        }
        A::Call => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else if stack <= to_call {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::Raise(to) => {
            if stack == 0 {
                return Err(GameError::InsufficientChips);
            }
            if to <= table_bet {
                return Err(GameError::InvalidBetAmount {
                    amount: to,
                    minimum: min_raise_to,
                });
            }
            let max_to = player_bet + stack;
            if to >= max_to {
                Ok(ValidatedAction::AllIn(stack))
            } else if to < min_raise_to {
                Err(GameError::InvalidBetAmount {
                    amount: to,
                    minimum: min_raise_to,
                })
            } else {
                Ok(ValidatedAction::Raise(to - player_bet))
            }
        }
        A::AllIn => {
            if stack == 0 {
                Err(GameError::InsufficientChips)
            } else {
                Ok(ValidatedAction::AllIn(stack))
            }
        }
    }
}

/// Betting state of one round: the bet to match and the last full raise size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BettingRound {
    current_bet: u32,
    last_raise: u32,
    /// Big blind in hold'em, bring-in in stud.
    min_bet: u32,
}

/// What applying an action did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub chips: u32,
    /// The bet went up; everyone else must act again.
    pub reopened: bool,
}

impl BettingRound {
    pub fn new(min_bet: u32) -> Self {
        Self {
            current_bet: 0,
            last_raise: 0,
            min_bet,
        }
    }

    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }

    /// Smallest legal raise total.
    pub fn min_raise_to(&self) -> u32 {
        self.current_bet + self.last_raise.max(self.min_bet)
    }

    /// Forced opening bet (big blind, bring-in) that later raises build on.
    pub fn open(&mut self, amount: u32) {
        self.current_bet = amount;
        self.last_raise = amount;
    }

    pub fn reset_street(&mut self) {
        self.current_bet = 0;
        self.last_raise = 0;
    }

    pub fn validate(&self, player: &Player, action: A) -> Result<ValidatedAction, GameError> {
        if player.is_folded() {
            return Err(GameError::PlayerAlreadyFolded);
        }
        validate_action(
            player.stack(),
            player.current_bet(),
            self.current_bet,
            self.min_raise_to(),
            action,
        )
    }

    pub fn apply(&mut self, player: &mut Player, action: ValidatedAction) -> Result<Applied, GameError> {
        if action == ValidatedAction::Fold {
            player.fold()?;
            return Ok(Applied {
                chips: 0,
                reopened: false,
            });
        }
        let chips = action.chips();
        player.bet(chips)?;
        let new_bet = player.current_bet();
        let mut reopened = false;
        if new_bet > self.current_bet {
            let increment = new_bet - self.current_bet;
            // a short all-in raises the bet without resetting the raise size
            if increment >= self.last_raise {
                self.last_raise = increment;
            }
            self.current_bet = new_bet;
            reopened = true;
        }
        Ok(Applied { chips, reopened })
    }
}

/// True when nobody still able to act owes a decision.
pub fn round_closed(seats: &[Option<Player>], current_bet: u32) -> bool {
    let to_act: Vec<&Player> = seats.iter().flatten().filter(|p| p.can_act()).collect();
    match to_act.as_slice() {
        [] => true,
        [only] if only.current_bet() >= current_bet && (only.has_acted() || others_all_in(seats)) => {
            true
        }
        _ => to_act
            .iter()
            .all(|p| p.has_acted() && p.current_bet() == current_bet),
    }
}

fn others_all_in(seats: &[Option<Player>]) -> bool {
    seats
        .iter()
        .flatten()
        .filter(|p| p.is_active())
        .any(|p| p.is_all_in())
}

/// First seat clockwise after `from` that still owes a decision.
pub fn next_to_act(seats: &[Option<Player>], from: usize, current_bet: u32) -> Option<usize> {
    let n = seats.len();
    (1..=n).map(|i| (from + i) % n).find(|&seat| {
        seats[seat].as_ref().is_some_and(|p| {
            p.can_act() && (!p.has_acted() || p.current_bet() < current_bet)
        })
    })
}
