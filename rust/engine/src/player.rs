use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::HandStrength;
use serde::{Deserialize, Serialize};

/// Represents a player action during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid with nothing to call)
    Check,
    /// Match the current bet, all-in if short
    Call,
    /// Raise to a new total bet for this round
    Raise(u32),
    /// Commit every remaining chip
    AllIn,
}

impl PlayerAction {
    /// Builds an action from its transport form: a name plus optional amount.
    pub fn from_parts(name: &str, amount: Option<u32>) -> Result<Self, GameError> {
        match (name.trim().to_ascii_lowercase().as_str(), amount) {
            ("fold", _) => Ok(PlayerAction::Fold),
            ("check", _) => Ok(PlayerAction::Check),
            ("call", _) => Ok(PlayerAction::Call),
            ("raise" | "bet", Some(to)) => Ok(PlayerAction::Raise(to)),
            ("raise" | "bet", None) => Err(GameError::IllegalAction(
                "raise requires an amount".to_string(),
            )),
            ("allin" | "all_in" | "all-in", _) => Ok(PlayerAction::AllIn),
            (other, _) => Err(GameError::IllegalAction(format!("unknown action '{other}'"))),
        }
    }
}

/// Cards held by one player; stud shows `up` to the table, hold'em only uses `down`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerCards {
    pub down: Vec<Card>,
    pub up: Vec<Card>,
}

impl PlayerCards {
    pub fn all(&self) -> Vec<Card> {
        self.down.iter().chain(self.up.iter()).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.down.len() + self.up.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A seated player: stack, per-round and per-hand commitments, cards and flags.
#[derive(Debug, Clone)]
pub struct Player {
    identity: String,
    stack: u32,
    /// Chips put in during the current betting round
    current_bet: u32,
    /// Chips put in during the whole hand
    committed: u32,
    cards: Option<PlayerCards>,
    in_hand: bool,
    folded: bool,
    all_in: bool,
    acted: bool,
    revealed: bool,
    last_win: u32,
    result: Option<HandStrength>,
}

impl Player {
    pub fn new(identity: impl Into<String>, stack: u32) -> Self {
        Self {
            identity: identity.into(),
            stack,
            current_bet: 0,
            committed: 0,
            cards: None,
            in_hand: false,
            folded: false,
            all_in: false,
            acted: false,
            revealed: false,
            last_win: 0,
            result: None,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn committed(&self) -> u32 {
        self.committed
    }
    pub fn cards(&self) -> Option<&PlayerCards> {
        self.cards.as_ref()
    }
    /// Dealt into the current hand (had chips when it started).
    pub fn in_hand(&self) -> bool {
        self.in_hand
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn has_acted(&self) -> bool {
        self.acted
    }
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
    pub fn last_win(&self) -> u32 {
        self.last_win
    }
    /// Evaluated hand, set at showdown.
    pub fn hand_result(&self) -> Option<&HandStrength> {
        self.result.as_ref()
    }

    /// Still contesting the pot.
    pub fn is_active(&self) -> bool {
        self.in_hand && !self.folded
    }

    /// Can still take betting actions.
    pub fn can_act(&self) -> bool {
        self.is_active() && !self.all_in
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Moves chips from the stack into the current round.
    pub fn bet(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.stack {
            return Err(GameError::InsufficientChips);
        }
        self.stack -= amount;
        self.current_bet += amount;
        self.committed += amount;
        if self.stack == 0 && amount > 0 {
            self.all_in = true;
        }
        Ok(())
    }

    pub(crate) fn begin_hand(&mut self) {
        self.clear_hand();
        self.in_hand = self.stack > 0;
        self.cards = self.in_hand.then(PlayerCards::default);
        self.last_win = 0;
    }

    /// Drops every per-hand field; the stack stays.
    pub(crate) fn clear_hand(&mut self) {
        self.current_bet = 0;
        self.committed = 0;
        self.cards = None;
        self.in_hand = false;
        self.folded = false;
        self.all_in = false;
        self.acted = false;
        self.revealed = false;
        self.result = None;
    }

    pub(crate) fn give_down(&mut self, card: Card) {
        self.cards.get_or_insert_with(PlayerCards::default).down.push(card);
    }

    pub(crate) fn give_up(&mut self, card: Card) {
        self.cards.get_or_insert_with(PlayerCards::default).up.push(card);
    }

    pub(crate) fn fold(&mut self) -> Result<(), GameError> {
        if self.folded {
            return Err(GameError::PlayerAlreadyFolded);
        }
        self.folded = true;
        Ok(())
    }

    pub(crate) fn mark_acted(&mut self) {
        self.acted = true;
    }

    pub(crate) fn reopen(&mut self) {
        self.acted = false;
    }

    pub(crate) fn end_round(&mut self) {
        self.current_bet = 0;
        self.acted = false;
    }

    pub(crate) fn reveal(&mut self) -> bool {
        let newly = !self.revealed;
        self.revealed = true;
        newly
    }

    pub(crate) fn record_win(&mut self, amount: u32) {
        self.add_chips(amount);
        self.last_win += amount;
    }

    pub(crate) fn set_result(&mut self, result: HandStrength) {
        self.result = Some(result);
    }
}
