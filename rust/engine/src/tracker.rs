use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::variant::Phase;
use crate::wild::WildRanks;

/// One resolved Queen: the card that followed it set a new wild rank.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct WildChange {
    pub phase: Phase,
    /// The Queen that triggered the change.
    pub trigger: Card,
    pub new_rank: Rank,
    /// Seat that received the Queen.
    pub seat: usize,
}

/// Follow-the-Queen wild rank for the current hand.
///
/// Queens are always wild. Each face-up Queen clears the floating rank; the
/// next face-up non-Queen card, in deal order, sets it. A Queen that is the
/// last up card dealt leaves only Queens wild until something follows it.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WildRankState {
    active: Option<Rank>,
    pending: Option<(usize, Card)>,
    history: Vec<WildChange>,
}

impl WildRankState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_rank(&self) -> Option<Rank> {
        self.active
    }

    /// The Queen waiting for a follower, if the last up card was a Queen.
    pub fn pending_queen(&self) -> Option<Card> {
        self.pending.map(|(_, card)| card)
    }

    pub fn history(&self) -> &[WildChange] {
        &self.history
    }

    pub fn wild_ranks(&self) -> WildRanks {
        match self.active {
            Some(rank) => WildRanks::queens().with(rank),
            None => WildRanks::queens(),
        }
    }

    /// Feeds face-up cards in deal order; returns the changes they caused.
    pub fn observe(&mut self, phase: Phase, face_up: &[(usize, Card)]) -> &[WildChange] {
        let before = self.history.len();
        for &(seat, card) in face_up {
            if card.rank == Rank::Queen {
                self.active = None;
                self.pending = Some((seat, card));
                continue;
            }
            if let Some((queen_seat, queen)) = self.pending.take() {
                self.active = Some(card.rank);
                self.history.push(WildChange {
                    phase,
                    trigger: queen,
                    new_rank: card.rank,
                    seat: queen_seat,
                });
                tracing::debug!(%queen, follower = %card, "wild rank changed");
            }
        }
        &self.history[before..]
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
