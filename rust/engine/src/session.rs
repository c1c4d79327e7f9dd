//! One table's game session: seats, the hand state machine and pot accounting.
//!
//! Every operation either fully applies or returns an error with the session
//! unchanged. When a betting round closes the session deals on by itself, all
//! the way to showdown if nobody is left to bet.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::config::{Stakes, TableConfig};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::logger::{format_hand_id, ActionRecord, HandRecord};
use crate::player::{Player, PlayerAction};
use crate::rules::{self, BettingRound, ValidatedAction};
use crate::showdown::{self, Contender, ShowdownRules, WinType, Winner};
use crate::tracker::{WildChange, WildRankState};
use crate::variant::{deal_steps, DealStep, Face, Phase, Variant};
use crate::wild::WildRanks;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcedBet {
    SmallBlind,
    BigBlind,
    Ante,
    BringIn,
}

/// What an operation did, in order.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    HandStarted {
        hand_number: u32,
        dealer_seat: usize,
    },
    ForcedBet {
        seat: usize,
        kind: ForcedBet,
        amount: u32,
    },
    ActionApplied {
        seat: usize,
        phase: Phase,
        action: ValidatedAction,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    WildRankChanged(WildChange),
    CardsRevealed {
        seat: usize,
    },
    PlayerLeft {
        seat: usize,
        identity: String,
    },
    HandComplete {
        winners: Vec<Winner>,
    },
    TableReset,
}

#[derive(Debug)]
pub struct Session {
    variant: Variant,
    config: TableConfig,
    seed: u64,
    seats: Vec<Option<Player>>,
    deck: Deck,
    board: Vec<Card>,
    /// Everything committed this hand, current round included.
    pot: u32,
    /// Chips left behind by players who quit mid-hand.
    forfeited: u32,
    betting: BettingRound,
    dealer: Option<usize>,
    actor: Option<usize>,
    phase: Phase,
    hand_active: bool,
    hand_number: u32,
    wild: WildRankState,
    actions: Vec<ActionRecord>,
    winners: Vec<Winner>,
    last_record: Option<HandRecord>,
}

impl Session {
    pub fn new(variant: Variant, config: TableConfig) -> Result<Self, GameError> {
        config.validate(variant)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            variant,
            seed,
            seats: vec![None; config.num_players],
            deck: Deck::new_with_seed(seed),
            board: Vec::new(),
            pot: 0,
            forfeited: 0,
            betting: BettingRound::new(config.min_bet()),
            dealer: None,
            actor: None,
            phase: Phase::PreDeal,
            hand_active: false,
            hand_number: 0,
            wild: WildRankState::new(),
            actions: Vec::new(),
            winners: Vec::new(),
            last_record: None,
            config,
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }
    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn current_bet(&self) -> u32 {
        self.betting.current_bet()
    }
    pub fn min_raise_to(&self) -> u32 {
        self.betting.min_raise_to()
    }
    pub fn dealer_seat(&self) -> Option<usize> {
        self.dealer
    }
    pub fn current_actor(&self) -> Option<usize> {
        self.actor
    }
    pub fn hand_active(&self) -> bool {
        self.hand_active
    }
    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.seats.get(seat).and_then(Option::as_ref)
    }
    /// Occupied seats with their players, in seat order.
    pub fn players(&self) -> impl Iterator<Item = (usize, &Player)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (i, p)))
    }
    pub fn seat_of(&self, identity: &str) -> Option<usize> {
        self.players()
            .find(|(_, p)| p.identity() == identity)
            .map(|(i, _)| i)
    }
    /// Floating wild state; only meaningful in stud.
    pub fn wild_state(&self) -> &WildRankState {
        &self.wild
    }
    pub fn wild_ranks(&self) -> WildRanks {
        match self.variant {
            Variant::Holdem => WildRanks::NONE,
            Variant::Stud => self.wild.wild_ranks(),
        }
    }
    pub fn winners(&self) -> &[Winner] {
        &self.winners
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }
    /// Record of the most recently completed hand.
    pub fn last_record(&self) -> Option<&HandRecord> {
        self.last_record.as_ref()
    }

    /// Chips `seat` must add to stay in.
    pub fn to_call(&self, seat: usize) -> u32 {
        self.player(seat).map_or(0, |p| {
            self.betting
                .current_bet()
                .saturating_sub(p.current_bet())
                .min(p.stack())
        })
    }

    /// Seats a new player in the lowest free seat.
    pub fn add_player(&mut self, identity: &str) -> Result<usize, GameError> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(GameError::IllegalAction("identity must not be empty".to_string()));
        }
        if self.hand_active {
            return Err(GameError::HandInProgress);
        }
        if self.seat_of(identity).is_some() {
            return Err(GameError::NameTaken(identity.to_string()));
        }
        let seat = self
            .seats
            .iter()
            .position(Option::is_none)
            .ok_or(GameError::TableFull {
                capacity: self.seats.len(),
            })?;
        self.seats[seat] = Some(Player::new(identity, self.config.starting_chips));
        tracing::info!(seat, identity, "player joined");
        Ok(seat)
    }

    /// Removes a player. Mid-hand the player folds and their chips stay in the pot.
    pub fn remove_player(&mut self, seat: usize) -> Result<Vec<SessionEvent>, GameError> {
        let player = self
            .seats
            .get_mut(seat)
            .and_then(Option::take)
            .ok_or(GameError::EmptySeat(seat))?;
        tracing::info!(seat, identity = player.identity(), "player left");
        let mut events = vec![SessionEvent::PlayerLeft {
            seat,
            identity: player.identity().to_string(),
        }];
        if self.hand_active && player.in_hand() {
            self.forfeited += player.committed();
            if player.is_active() {
                let n = self.seats.len();
                // resume from just before whoever was due, unless it was this seat
                let from = match self.actor {
                    Some(actor) if actor != seat => (actor + n - 1) % n,
                    _ => seat,
                };
                self.progress(from, &mut events)?;
            }
        }
        Ok(events)
    }

    pub fn start_hand(&mut self) -> Result<Vec<SessionEvent>, GameError> {
        if self.hand_active {
            return Err(GameError::HandInProgress);
        }
        if self.phase != Phase::PreDeal {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        let eligible = self.players().filter(|(_, p)| p.stack() > 0).count();
        if eligible < 2 {
            return Err(GameError::NotEnoughPlayers { found: eligible });
        }

        for p in self.seats.iter_mut().flatten() {
            p.begin_hand();
        }
        let dealer = match self.dealer {
            Some(d) if self.is_in_hand(d) => Some(d),
            Some(d) => self.next_in_hand(d),
            None => (0..self.seats.len()).find(|&s| self.is_in_hand(s)),
        }
        .ok_or(GameError::NotEnoughPlayers { found: eligible })?;

        self.dealer = Some(dealer);
        self.deck.shuffle();
        self.board.clear();
        self.pot = 0;
        self.forfeited = 0;
        self.betting = BettingRound::new(self.config.min_bet());
        self.wild.reset();
        self.actions.clear();
        self.winners.clear();
        self.hand_number += 1;
        self.hand_active = true;
        tracing::info!(
            hand = self.hand_number,
            dealer,
            variant = %self.variant,
            players = eligible,
            "hand started"
        );

        let mut events = vec![SessionEvent::HandStarted {
            hand_number: self.hand_number,
            dealer_seat: dealer,
        }];

        let opener = match self.config.stakes {
            Stakes::Blinds { small, big } => {
                let sb = self.next_in_hand(dealer).unwrap_or(dealer);
                let bb = self.next_in_hand(sb).unwrap_or(sb);
                self.post_forced(sb, small, ForcedBet::SmallBlind, &mut events)?;
                self.post_forced(bb, big, ForcedBet::BigBlind, &mut events)?;
                self.betting.open(big);
                self.enter_phase(self.variant.first_betting_phase(), &mut events)?;
                bb
            }
            Stakes::Ante { ante, bring_in } => {
                if ante > 0 {
                    for seat in self.in_hand_from(dealer) {
                        self.post_forced(seat, ante, ForcedBet::Ante, &mut events)?;
                    }
                    // antes are dead money, not part of the first round's bet
                    for p in self.seats.iter_mut().flatten() {
                        p.end_round();
                    }
                }
                self.enter_phase(self.variant.first_betting_phase(), &mut events)?;
                let seat = self.bring_in_seat().unwrap_or(dealer);
                self.post_forced(seat, bring_in, ForcedBet::BringIn, &mut events)?;
                self.betting.open(bring_in);
                self.player_mut(seat)?.mark_acted();
                seat
            }
        };

        self.progress(opener, &mut events)?;
        Ok(events)
    }

    /// Validates and applies `action` for `seat`, then advances the hand.
    pub fn apply_action(
        &mut self,
        seat: usize,
        action: PlayerAction,
    ) -> Result<Vec<SessionEvent>, GameError> {
        if !self.hand_active {
            return Err(GameError::NoHandInProgress);
        }
        let expected = self.actor.ok_or(GameError::NoHandInProgress)?;
        if seat != expected {
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: seat,
            });
        }
        let player = self.player(seat).ok_or(GameError::EmptySeat(seat))?;
        let validated = self.betting.validate(player, action)?;

        let phase = self.phase;
        let player = self
            .seats
            .get_mut(seat)
            .and_then(Option::as_mut)
            .ok_or(GameError::EmptySeat(seat))?;
        let applied = self.betting.apply(player, validated)?;
        player.mark_acted();
        self.pot += applied.chips;
        if applied.reopened {
            for (i, other) in self.seats.iter_mut().enumerate() {
                match other {
                    Some(p) if i != seat => p.reopen(),
                    _ => {}
                }
            }
        }
        self.actions.push(ActionRecord {
            seat,
            phase,
            action,
            chips: applied.chips,
        });
        tracing::debug!(seat, ?validated, pot = self.pot, "action applied");

        let mut events = vec![SessionEvent::ActionApplied {
            seat,
            phase,
            action: validated,
        }];
        self.progress(seat, &mut events)?;
        Ok(events)
    }

    /// Leaves showdown for the next hand: clears per-hand state and moves the button.
    pub fn new_hand(&mut self) -> Result<Vec<SessionEvent>, GameError> {
        if self.hand_active {
            return Err(GameError::HandInProgress);
        }
        if self.phase != Phase::Showdown {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        for p in self.seats.iter_mut().flatten() {
            p.clear_hand();
        }
        self.board.clear();
        self.wild.reset();
        self.pot = 0;
        self.forfeited = 0;
        self.betting.reset_street();
        self.winners.clear();
        if let Some(d) = self.dealer {
            let n = self.seats.len();
            self.dealer = (1..=n)
                .map(|i| (d + i) % n)
                .find(|&s| self.player(s).is_some_and(|p| p.stack() > 0))
                .or(Some(d));
        }
        let from = self.phase;
        self.phase = Phase::PreDeal;
        Ok(vec![SessionEvent::PhaseChanged {
            from,
            to: Phase::PreDeal,
        }])
    }

    /// Empties the table entirely.
    pub fn hard_reset(&mut self) -> Vec<SessionEvent> {
        tracing::warn!(hand = self.hand_number, "table reset");
        self.seats = vec![None; self.config.num_players];
        self.deck.reset();
        self.board.clear();
        self.pot = 0;
        self.forfeited = 0;
        self.betting = BettingRound::new(self.config.min_bet());
        self.dealer = None;
        self.actor = None;
        self.phase = Phase::PreDeal;
        self.hand_active = false;
        self.hand_number = 0;
        self.wild.reset();
        self.actions.clear();
        self.winners.clear();
        self.last_record = None;
        vec![SessionEvent::TableReset]
    }

    /// Shows a stud player's down cards to the whole table. Showdown only.
    pub fn reveal(&mut self, seat: usize) -> Result<Vec<SessionEvent>, GameError> {
        if self.variant != Variant::Stud {
            return Err(GameError::IllegalAction(
                "cards are only revealed in stud".to_string(),
            ));
        }
        if self.phase != Phase::Showdown {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        let player = self.player_mut(seat)?;
        if player.cards().map_or(true, |c| c.is_empty()) {
            return Err(GameError::IllegalAction("no cards to reveal".to_string()));
        }
        if player.reveal() {
            Ok(vec![SessionEvent::CardsRevealed { seat }])
        } else {
            Ok(Vec::new())
        }
    }

    /// Checks the table-wide invariants; used by tests and debug tooling.
    pub fn check_invariants(&self) -> Result<(), String> {
        let committed: u32 = self.players().map(|(_, p)| p.committed()).sum();
        if self.hand_active && self.pot != committed + self.forfeited {
            return Err(format!(
                "pot {} != committed {} + forfeited {}",
                self.pot, committed, self.forfeited
            ));
        }
        if !self.hand_active && self.phase == Phase::Showdown && self.pot != 0 {
            return Err(format!("pot {} left after showdown", self.pot));
        }

        let mut seen: Vec<Card> = self.board.clone();
        for (_, p) in self.players() {
            if let Some(cards) = p.cards() {
                seen.extend(cards.all());
            }
        }
        seen.extend_from_slice(self.deck.undealt());
        let total = seen.len();
        seen.sort();
        seen.dedup();
        if seen.len() != total {
            return Err("a card appears twice".to_string());
        }

        match (self.hand_active, self.actor) {
            (true, None) => return Err("hand active without an actor".to_string()),
            (false, Some(a)) => return Err(format!("seat {a} to act outside a hand")),
            (true, Some(a)) if !self.player(a).is_some_and(Player::can_act) => {
                return Err(format!("seat {a} to act but cannot act"));
            }
            _ => {}
        }
        for (seat, p) in self.players() {
            if p.current_bet() > self.betting.current_bet() {
                return Err(format!("seat {seat} bet above the table bet"));
            }
        }
        Ok(())
    }

    fn player_mut(&mut self, seat: usize) -> Result<&mut Player, GameError> {
        self.seats
            .get_mut(seat)
            .and_then(Option::as_mut)
            .ok_or(GameError::EmptySeat(seat))
    }

    fn is_in_hand(&self, seat: usize) -> bool {
        self.player(seat).is_some_and(Player::in_hand)
    }

    fn next_in_hand(&self, from: usize) -> Option<usize> {
        let n = self.seats.len();
        (1..=n).map(|i| (from + i) % n).find(|&s| self.is_in_hand(s))
    }

    /// Seats still contesting the pot, clockwise from the one after `from`.
    fn in_hand_from(&self, from: usize) -> Vec<usize> {
        let n = self.seats.len();
        (1..=n)
            .map(|i| (from + i) % n)
            .filter(|&s| self.player(s).is_some_and(Player::is_active))
            .collect()
    }

    fn active_count(&self) -> usize {
        self.players().filter(|(_, p)| p.is_active()).count()
    }

    fn post_forced(
        &mut self,
        seat: usize,
        amount: u32,
        kind: ForcedBet,
        events: &mut Vec<SessionEvent>,
    ) -> Result<(), GameError> {
        let player = self.player_mut(seat)?;
        let paid = amount.min(player.stack());
        player.bet(paid)?;
        self.pot += paid;
        events.push(SessionEvent::ForcedBet {
            seat,
            kind,
            amount: paid,
        });
        Ok(())
    }

    /// Lowest up card brings it in; suits break ties, clubs lowest.
    fn bring_in_seat(&self) -> Option<usize> {
        self.players()
            .filter(|(_, p)| p.is_active())
            .filter_map(|(seat, p)| {
                let card = p.cards()?.up.first().copied()?;
                Some((seat, card))
            })
            .min_by_key(|(_, c)| (c.rank, c.suit))
            .map(|(seat, _)| seat)
    }

    fn progress(&mut self, from: usize, events: &mut Vec<SessionEvent>) -> Result<(), GameError> {
        let mut from = from;
        loop {
            if self.active_count() <= 1 {
                self.award_uncontested(events);
                return Ok(());
            }
            let bet = self.betting.current_bet();
            if !rules::round_closed(&self.seats, bet) {
                if let Some(next) = rules::next_to_act(&self.seats, from, bet) {
                    self.actor = Some(next);
                    return Ok(());
                }
            }

            self.actor = None;
            for p in self.seats.iter_mut().flatten() {
                p.end_round();
            }
            self.betting.reset_street();
            let Some(next) = self.variant.next_phase(self.phase) else {
                return Ok(());
            };
            self.enter_phase(next, events)?;
            if next == Phase::Showdown {
                self.showdown(events);
                return Ok(());
            }
            from = self.dealer.unwrap_or(0);
        }
    }

    fn enter_phase(&mut self, next: Phase, events: &mut Vec<SessionEvent>) -> Result<(), GameError> {
        let from = self.phase;
        self.phase = next;
        events.push(SessionEvent::PhaseChanged { from, to: next });
        tracing::debug!(%from, to = %next, "phase changed");

        let order = self.in_hand_from(self.dealer.unwrap_or(0));
        let mut face_up = Vec::new();
        for step in deal_steps(next) {
            match *step {
                DealStep::Round(face) => {
                    for &seat in &order {
                        let card = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
                        let player = self.player_mut(seat)?;
                        match face {
                            Face::Down => player.give_down(card),
                            Face::Up => {
                                player.give_up(card);
                                face_up.push((seat, card));
                            }
                        }
                    }
                }
                DealStep::Board { burn, count } => {
                    if burn {
                        self.deck.burn_card();
                    }
                    for _ in 0..count {
                        let card = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
                        self.board.push(card);
                    }
                }
            }
        }
        if self.variant == Variant::Stud && !face_up.is_empty() {
            let changes = self.wild.observe(next, &face_up).to_vec();
            events.extend(changes.into_iter().map(SessionEvent::WildRankChanged));
        }
        Ok(())
    }

    fn award_uncontested(&mut self, events: &mut Vec<SessionEvent>) {
        self.actor = None;
        for p in self.seats.iter_mut().flatten() {
            p.end_round();
        }
        if self.phase != Phase::Showdown {
            events.push(SessionEvent::PhaseChanged {
                from: self.phase,
                to: Phase::Showdown,
            });
            self.phase = Phase::Showdown;
        }
        let amount = self.pot;
        self.pot = 0;
        let survivor = self
            .seats
            .iter_mut()
            .enumerate()
            .find_map(|(seat, p)| p.as_mut().filter(|p| p.is_active()).map(|p| (seat, p)));
        let winners = match survivor {
            Some((seat, player)) => {
                player.record_win(amount);
                tracing::info!(seat, amount, "pot awarded uncontested");
                vec![Winner {
                    seat,
                    identity: player.identity().to_string(),
                    amount,
                    category: None,
                    low: None,
                    cards: Vec::new(),
                    win_type: WinType::Win,
                }]
            }
            None => Vec::new(),
        };
        self.finish_hand(winners, events);
    }

    fn showdown(&mut self, events: &mut Vec<SessionEvent>) {
        let contenders: Vec<Contender> = self
            .players()
            .filter(|(_, p)| p.is_active())
            .map(|(seat, p)| {
                let mut cards = p.cards().map(|c| c.all()).unwrap_or_default();
                cards.extend_from_slice(&self.board);
                Contender {
                    seat,
                    identity: p.identity().to_string(),
                    cards,
                }
            })
            .collect();
        let award_order = self.in_hand_from(self.dealer.unwrap_or(0));
        let stud = self.variant == Variant::Stud;
        let rules = ShowdownRules {
            wilds: self.wild_ranks(),
            hi_lo: stud && self.config.stud.hi_lo,
            two_natural_sevens_wins: stud && self.config.stud.two_natural_sevens_wins,
        };
        let result = showdown::resolve(&contenders, self.pot, &award_order, &rules);

        for (seat, hand) in result.hands {
            if let Some(p) = self.seats.get_mut(seat).and_then(Option::as_mut) {
                p.set_result(hand);
            }
        }
        for w in &result.winners {
            if let Some(p) = self.seats.get_mut(w.seat).and_then(Option::as_mut) {
                p.record_win(w.amount);
            }
            tracing::info!(seat = w.seat, amount = w.amount, win_type = ?w.win_type, "pot awarded");
        }
        self.pot = 0;
        self.finish_hand(result.winners, events);
    }

    fn finish_hand(&mut self, winners: Vec<Winner>, events: &mut Vec<SessionEvent>) {
        self.hand_active = false;
        self.actor = None;
        let date = Utc::now().format("%Y%m%d").to_string();
        self.last_record = Some(HandRecord {
            hand_id: format_hand_id(&date, self.hand_number),
            seed: Some(self.seed),
            variant: self.variant,
            actions: self.actions.clone(),
            board: self.board.clone(),
            wild_history: self.wild.history().to_vec(),
            winners: winners.clone(),
            ts: None,
            meta: None,
        });
        self.winners = winners.clone();
        events.push(SessionEvent::HandComplete { winners });
    }
}
