use serde::Serialize;
use thiserror::Error;

use crate::variant::Phase;

/// Failure classes surfaced to the transport layer.
///
/// None of them leaves the table in a partially-applied state: the caller can
/// re-prompt (validation), refuse the join (capacity) or wait for the next hand
/// (state).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Capacity,
    State,
    Config,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Cannot check, {to_call} to call")]
    CannotCheck { to_call: u32 },
    #[error("Insufficient chips for action")]
    InsufficientChips,
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("It's not seat {actual}'s turn (expected seat {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Seat {0} is empty")]
    EmptySeat(usize),
    #[error("Illegal action: {0}")]
    IllegalAction(String),
    #[error("Table is full ({capacity} seats)")]
    TableFull { capacity: usize },
    #[error("Name already taken: {0}")]
    NameTaken(String),
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already in progress")]
    HandInProgress,
    #[error("Need at least 2 players with chips, found {found}")]
    NotEnoughPlayers { found: usize },
    #[error("Not allowed during {phase}")]
    WrongPhase { phase: Phase },
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidBetAmount { .. }
            | GameError::CannotCheck { .. }
            | GameError::InsufficientChips
            | GameError::PlayerAlreadyFolded
            | GameError::NotPlayersTurn { .. }
            | GameError::EmptySeat(_)
            | GameError::IllegalAction(_) => ErrorKind::Validation,
            GameError::TableFull { .. } | GameError::NameTaken(_) => ErrorKind::Capacity,
            GameError::NoHandInProgress
            | GameError::HandInProgress
            | GameError::NotEnoughPlayers { .. }
            | GameError::WrongPhase { .. }
            | GameError::DeckExhausted => ErrorKind::State,
            GameError::InvalidConfig(_) => ErrorKind::Config,
        }
    }
}
