//! # cardroom-engine: Multi-Player Game Session Core
//!
//! Table sessions for Texas Hold'em and seven-card stud "Follow the Queen".
//! Provides hand evaluation (with and without wild cards), a betting engine,
//! the hand state machine and per-viewer table snapshots, with a seeded RNG
//! so whole sessions can be replayed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Five-of-n hand evaluation and comparison
//! - [`wild`] - Wild-card evaluation for Follow the Queen
//! - [`lowball`] - Eight-or-better low hands for hi-lo
//! - [`tracker`] - Follow-the-Queen wild rank tracking
//! - [`rules`] - Action validation and betting round state
//! - [`session`] - Seats, the hand state machine and pot accounting
//! - [`showdown`] - Winner selection and pot splitting
//! - [`view`] - Redacted per-viewer snapshots
//! - [`logger`] - HandRecord serialization to JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use cardroom_engine::cards::parse_cards;
//! use cardroom_engine::hand::{evaluate_hand, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh 10h 2c 3d").unwrap();
//! let strength = evaluate_hand(&cards);
//! assert_eq!(strength.category, Category::RoyalFlush);
//! ```
//!
//! ## Wild Cards
//!
//! ```rust
//! use cardroom_engine::cards::parse_cards;
//! use cardroom_engine::hand::Category;
//! use cardroom_engine::wild::{evaluate_with_wilds, WildRanks};
//!
//! // Queens plus whatever followed the last face-up Queen
//! let wilds = WildRanks::queens().with(cardroom_engine::cards::Rank::Three);
//! let cards = parse_cards("Qs 3d 9h 9c 9s 2c Kd").unwrap();
//! assert_eq!(evaluate_with_wilds(&cards, wilds).category, Category::FiveOfAKind);
//! ```
//!
//! ## Running a Hand
//!
//! ```rust
//! use cardroom_engine::config::TableConfig;
//! use cardroom_engine::player::PlayerAction;
//! use cardroom_engine::session::Session;
//! use cardroom_engine::variant::{Phase, Variant};
//!
//! let config = TableConfig::holdem(3, 1000, 10, 20).with_seed(42);
//! let mut session = Session::new(Variant::Holdem, config).unwrap();
//! for name in ["ann", "bob", "cy"] {
//!     session.add_player(name).unwrap();
//! }
//! session.start_hand().unwrap();
//! assert_eq!(session.pot(), 30);
//!
//! // everyone folds to the big blind
//! while session.hand_active() {
//!     let seat = session.current_actor().unwrap();
//!     session.apply_action(seat, PlayerAction::Fold).unwrap();
//! }
//! assert_eq!(session.phase(), Phase::Showdown);
//! assert_eq!(session.winners()[0].amount, 30);
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod lowball;
pub mod player;
pub mod rules;
pub mod session;
pub mod showdown;
pub mod tracker;
pub mod variant;
pub mod view;
pub mod wild;
