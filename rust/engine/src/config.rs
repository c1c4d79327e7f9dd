use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::variant::Variant;

/// Forced bets for a table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stakes {
    Blinds { small: u32, big: u32 },
    Ante { ante: u32, bring_in: u32 },
}

/// Optional stud house rules.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StudRules {
    /// Split the pot between the best high and the best eight-or-better low.
    #[serde(default)]
    pub hi_lo: bool,
    /// Two natural sevens take the whole pot when sevens are not wild.
    #[serde(default)]
    pub two_natural_sevens_wins: bool,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub num_players: usize,
    pub starting_chips: u32,
    pub stakes: Stakes,
    /// Deck seed; `None` draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub stud: StudRules,
}

impl TableConfig {
    pub fn holdem(num_players: usize, starting_chips: u32, small: u32, big: u32) -> Self {
        Self {
            num_players,
            starting_chips,
            stakes: Stakes::Blinds { small, big },
            seed: None,
            stud: StudRules::default(),
        }
    }

    pub fn stud(num_players: usize, starting_chips: u32, ante: u32, bring_in: u32) -> Self {
        Self {
            num_players,
            starting_chips,
            stakes: Stakes::Ante { ante, bring_in },
            seed: None,
            stud: StudRules::default(),
        }
    }

    /// Five seats, 1000 chips, 10/20 blinds or 5 ante with a 10 bring-in.
    pub fn default_for(variant: Variant) -> Self {
        match variant {
            Variant::Holdem => Self::holdem(5, 1000, 10, 20),
            Variant::Stud => Self::stud(5, 1000, 5, 10),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_stud_rules(mut self, rules: StudRules) -> Self {
        self.stud = rules;
        self
    }

    /// Smallest opening bet: the big blind or the bring-in.
    pub fn min_bet(&self) -> u32 {
        match self.stakes {
            Stakes::Blinds { big, .. } => big,
            Stakes::Ante { bring_in, .. } => bring_in,
        }
    }

    pub fn validate(&self, variant: Variant) -> Result<(), GameError> {
        let max = variant.max_players();
        if !(2..=max).contains(&self.num_players) {
            return Err(GameError::InvalidConfig(format!(
                "{variant} seats 2 to {max} players, got {}",
                self.num_players
            )));
        }
        if self.starting_chips == 0 {
            return Err(GameError::InvalidConfig(
                "starting chips must be positive".to_string(),
            ));
        }
        match (variant, self.stakes) {
            (Variant::Holdem, Stakes::Blinds { small, big }) => {
                if big == 0 || small > big {
                    return Err(GameError::InvalidConfig(format!(
                        "blinds {small}/{big}: big blind must be positive and at least the small blind"
                    )));
                }
            }
            (Variant::Stud, Stakes::Ante { bring_in, .. }) => {
                if bring_in == 0 {
                    return Err(GameError::InvalidConfig(
                        "bring-in must be positive".to_string(),
                    ));
                }
            }
            (variant, _) => {
                return Err(GameError::InvalidConfig(format!(
                    "{variant} needs {} stakes",
                    match variant {
                        Variant::Holdem => "blind",
                        Variant::Stud => "ante",
                    }
                )));
            }
        }
        if variant == Variant::Holdem && (self.stud.hi_lo || self.stud.two_natural_sevens_wins) {
            return Err(GameError::InvalidConfig(
                "stud rules do not apply to hold'em".to_string(),
            ));
        }
        Ok(())
    }
}
