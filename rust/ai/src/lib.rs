//! # cardroom-ai: Seat-filling Bots
//!
//! Bots that choose actions from a seat's own [`TableSnapshot`], so they see
//! exactly what a human in that seat would.
//!
//! ## Core Components
//!
//! - [`Bot`] - Trait defining the interface for bot decision-making
//! - [`baseline`] - Hand-strength and pot-odds bot
//! - [`create_bot`] - Factory for bots by name
//!
//! ## Quick Start
//!
//! ```rust
//! use cardroom_ai::create_bot;
//! use cardroom_engine::config::TableConfig;
//! use cardroom_engine::session::Session;
//! use cardroom_engine::variant::Variant;
//!
//! let bot = create_bot("baseline").unwrap();
//! let config = TableConfig::default_for(Variant::Stud).with_seed(42);
//! let mut session = Session::new(Variant::Stud, config).unwrap();
//! session.add_player("ann").unwrap();
//! session.add_player("bob").unwrap();
//! session.start_hand().unwrap();
//!
//! let seat = session.current_actor().unwrap();
//! let action = bot.choose_action(&session.view(Some(seat)));
//! session.apply_action(seat, action).unwrap();
//! ```

use cardroom_engine::player::PlayerAction;
use cardroom_engine::view::TableSnapshot;

pub mod baseline;

/// Decision interface for automated players.
///
/// # Example Implementation
///
/// ```rust
/// use cardroom_ai::Bot;
/// use cardroom_engine::player::PlayerAction;
/// use cardroom_engine::view::TableSnapshot;
///
/// struct Folder;
///
/// impl Bot for Folder {
///     fn choose_action(&self, _view: &TableSnapshot) -> PlayerAction {
///         PlayerAction::Fold
///     }
///
///     fn name(&self) -> &str {
///         "Folder"
///     }
/// }
/// ```
pub trait Bot: Send + Sync {
    /// Picks an action for `view.viewer`, which must be the seat to act.
    fn choose_action(&self, view: &TableSnapshot) -> PlayerAction;

    fn name(&self) -> &str;
}

/// Checks when free, otherwise calls. Never folds, never raises.
#[derive(Debug, Clone, Default)]
pub struct CallingStation;

impl Bot for CallingStation {
    fn choose_action(&self, view: &TableSnapshot) -> PlayerAction {
        match view.to_call() {
            Some(owed) if owed > 0 => PlayerAction::Call,
            _ => PlayerAction::Check,
        }
    }

    fn name(&self) -> &str {
        "CallingStation"
    }
}

/// Names accepted by [`create_bot`].
pub const BOT_KINDS: [&str; 2] = ["baseline", "calling"];

/// Builds a bot by name, `None` for an unknown name.
///
/// ```rust
/// use cardroom_ai::create_bot;
///
/// assert_eq!(create_bot("baseline").unwrap().name(), "BaselineBot");
/// assert!(create_bot("psychic").is_none());
/// ```
pub fn create_bot(kind: &str) -> Option<Box<dyn Bot>> {
    match kind {
        "baseline" => Some(Box::new(baseline::BaselineBot::new())),
        "calling" => Some(Box::new(CallingStation)),
        _ => None,
    }
}
