//! Game variants as a tagged enum plus pure phase/dealing tables.
//!
//! Both variants share one session skeleton; everything that differs is looked
//! up here by matching on [`Variant`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Texas Hold'em: two hole cards, five community cards, blinds.
    Holdem,
    /// Seven-card stud, Follow the Queen: antes, bring-in, floating wild rank.
    Stud,
}

/// Every phase either variant can be in.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PreDeal,
    PreFlop,
    Flop,
    Turn,
    River,
    ThirdStreet,
    FourthStreet,
    FifthStreet,
    SixthStreet,
    SeventhStreet,
    Showdown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::PreDeal => "pre_deal",
            Phase::PreFlop => "pre_flop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            Phase::ThirdStreet => "third_street",
            Phase::FourthStreet => "fourth_street",
            Phase::FifthStreet => "fifth_street",
            Phase::SixthStreet => "sixth_street",
            Phase::SeventhStreet => "seventh_street",
            Phase::Showdown => "showdown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Face {
    Down,
    Up,
}

/// One dealing step performed when a phase is entered.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DealStep {
    /// One card to every player still in the hand, clockwise from the dealer's left.
    Round(Face),
    /// Shared cards on the board, optionally burning one first.
    Board { burn: bool, count: usize },
}

const HOLDEM_PHASES: [Phase; 6] = [
    Phase::PreDeal,
    Phase::PreFlop,
    Phase::Flop,
    Phase::Turn,
    Phase::River,
    Phase::Showdown,
];

const STUD_PHASES: [Phase; 7] = [
    Phase::PreDeal,
    Phase::ThirdStreet,
    Phase::FourthStreet,
    Phase::FifthStreet,
    Phase::SixthStreet,
    Phase::SeventhStreet,
    Phase::Showdown,
];

impl Variant {
    pub fn phases(self) -> &'static [Phase] {
        match self {
            Variant::Holdem => &HOLDEM_PHASES,
            Variant::Stud => &STUD_PHASES,
        }
    }

    /// The phase following `phase`, `None` after showdown or for a foreign phase.
    pub fn next_phase(self, phase: Phase) -> Option<Phase> {
        let phases = self.phases();
        let idx = phases.iter().position(|&p| p == phase)?;
        phases.get(idx + 1).copied()
    }

    pub fn first_betting_phase(self) -> Phase {
        match self {
            Variant::Holdem => Phase::PreFlop,
            Variant::Stud => Phase::ThirdStreet,
        }
    }

    /// Seats a single 52-card deck can serve without running dry.
    pub fn max_players(self) -> usize {
        match self {
            Variant::Holdem => 10,
            Variant::Stud => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Holdem => "holdem",
            Variant::Stud => "stud",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cards dealt on entering `phase`.
pub fn deal_steps(phase: Phase) -> &'static [DealStep] {
    use DealStep::{Board, Round};
    match phase {
        Phase::PreFlop => &[Round(Face::Down), Round(Face::Down)],
        Phase::Flop => &[Board {
            burn: true,
            count: 3,
        }],
        Phase::Turn | Phase::River => &[Board {
            burn: true,
            count: 1,
        }],
        Phase::ThirdStreet => &[Round(Face::Down), Round(Face::Down), Round(Face::Up)],
        Phase::FourthStreet | Phase::FifthStreet | Phase::SixthStreet => &[Round(Face::Up)],
        Phase::SeventhStreet => &[Round(Face::Down)],
        Phase::PreDeal | Phase::Showdown => &[],
    }
}
