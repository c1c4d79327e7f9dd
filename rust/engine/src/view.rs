//! Per-viewer table snapshots with hidden information redacted.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::hand::HandStrength;
use crate::session::Session;
use crate::showdown::Winner;
use crate::tracker::WildChange;
use crate::variant::{Phase, Variant};

/// A card slot as one viewer sees it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardView {
    Face(Card),
    Hidden,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: usize,
    pub identity: String,
    pub stack: u32,
    pub current_bet: u32,
    pub in_hand: bool,
    pub folded: bool,
    pub all_in: bool,
    pub revealed: bool,
    pub last_win: u32,
    pub is_dealer: bool,
    pub is_actor: bool,
    /// Down cards; `Hidden` unless the viewer may see them.
    pub down: Vec<CardView>,
    pub up: Vec<Card>,
    /// Evaluated hand after showdown, when the cards are visible to the viewer.
    pub hand: Option<HandStrength>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct WildView {
    pub wild_ranks: Vec<Rank>,
    pub active_rank: Option<Rank>,
    pub pending_queen: Option<Card>,
    pub history: Vec<WildChange>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub variant: Variant,
    pub phase: Phase,
    pub hand_number: u32,
    pub hand_active: bool,
    pub pot: u32,
    pub current_bet: u32,
    /// Smallest legal raise total while a hand is running.
    pub min_raise_to: Option<u32>,
    pub dealer_seat: Option<usize>,
    pub current_actor: Option<usize>,
    pub viewer: Option<usize>,
    pub board: Vec<Card>,
    pub wild: Option<WildView>,
    pub seats: Vec<SeatView>,
    pub winners: Vec<Winner>,
}

impl TableSnapshot {
    pub fn seat(&self, seat: usize) -> Option<&SeatView> {
        self.seats.iter().find(|s| s.seat == seat)
    }

    /// Chips the viewer needs to call, if it is their turn.
    pub fn to_call(&self) -> Option<u32> {
        let me = self.seat(self.viewer?)?;
        if !me.is_actor {
            return None;
        }
        Some(self.current_bet.saturating_sub(me.current_bet).min(me.stack))
    }
}

/// Builds what `viewer` may see. `None` is a spectator.
///
/// Down cards are shown to their owner only; in stud a player who revealed at
/// showdown shows them to everyone. Hold'em hole cards of winners surface
/// through the winners list instead.
pub fn snapshot(session: &Session, viewer: Option<usize>) -> TableSnapshot {
    let variant = session.variant();
    let seats = session
        .players()
        .map(|(seat, p)| {
            let visible =
                viewer == Some(seat) || (variant == Variant::Stud && p.is_revealed());
            let (down, up) = match p.cards() {
                Some(cards) => (
                    cards
                        .down
                        .iter()
                        .map(|&c| if visible { CardView::Face(c) } else { CardView::Hidden })
                        .collect(),
                    cards.up.clone(),
                ),
                None => (Vec::new(), Vec::new()),
            };
            SeatView {
                seat,
                identity: p.identity().to_string(),
                stack: p.stack(),
                current_bet: p.current_bet(),
                in_hand: p.in_hand(),
                folded: p.is_folded(),
                all_in: p.is_all_in(),
                revealed: p.is_revealed(),
                last_win: p.last_win(),
                is_dealer: session.dealer_seat() == Some(seat),
                is_actor: session.current_actor() == Some(seat),
                down,
                up,
                hand: if visible { p.hand_result().cloned() } else { None },
            }
        })
        .collect();

    let wild = (variant == Variant::Stud).then(|| {
        let state = session.wild_state();
        WildView {
            wild_ranks: session.wild_ranks().ranks(),
            active_rank: state.active_rank(),
            pending_queen: state.pending_queen(),
            history: state.history().to_vec(),
        }
    });

    TableSnapshot {
        variant,
        phase: session.phase(),
        hand_number: session.hand_number(),
        hand_active: session.hand_active(),
        pot: session.pot(),
        current_bet: session.current_bet(),
        min_raise_to: session.hand_active().then(|| session.min_raise_to()),
        dealer_seat: session.dealer_seat(),
        current_actor: session.current_actor(),
        viewer,
        board: session.board().to_vec(),
        wild,
        seats,
        winners: session.winners().to_vec(),
    }
}

impl Session {
    /// Shorthand for [`snapshot`].
    pub fn view(&self, viewer: Option<usize>) -> TableSnapshot {
        snapshot(self, viewer)
    }
}
