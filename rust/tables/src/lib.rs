//! # cardroom-tables
//!
//! Many independent [`cardroom_engine`] sessions side by side. The
//! [`TableManager`] creates and looks up tables, serializes every operation on
//! one table behind that table's mutex, lets seated bots take their turns and
//! fans each accepted change out to subscribers through the [`EventBus`].
//!
//! ```rust
//! use cardroom_engine::config::TableConfig;
//! use cardroom_engine::player::PlayerAction;
//! use cardroom_engine::variant::Variant;
//! use cardroom_tables::{EventBus, TableEvent, TableManager};
//!
//! let manager = TableManager::new(EventBus::new());
//! let id = manager
//!     .create_table(Variant::Holdem, TableConfig::default_for(Variant::Holdem).with_seed(5))
//!     .unwrap();
//! let mut updates = manager.event_bus().subscribe(id.clone());
//!
//! manager.join(&id, "ann").unwrap();
//! manager.join(&id, "bob").unwrap();
//! let view = manager.start_hand(&id).unwrap();
//! let actor = view.current_actor.unwrap();
//! manager.act(&id, actor, PlayerAction::Fold).unwrap();
//!
//! let first = updates.receiver().try_recv().unwrap();
//! assert!(matches!(first.event, TableEvent::PlayerJoined { .. }));
//! ```

pub mod errors;
pub mod events;
pub mod logging;
pub mod manager;

pub use errors::{ErrorResponse, ErrorSeverity, TableError};
pub use events::{EventBus, EventSubscription, TableEvent, TableUpdate};
pub use logging::{init_logging, init_test_logging, LogEntry, TestLogSubscriber};
pub use manager::{Table, TableId, TableManager};
