#![allow(dead_code)]

use cardroom_engine::config::TableConfig;
use cardroom_engine::player::PlayerAction;
use cardroom_engine::variant::Variant;
use cardroom_engine::view::TableSnapshot;
use cardroom_tables::{EventBus, TableId, TableManager};

pub const NAMES: [&str; 5] = ["ann", "bob", "cy", "dee", "eve"];

pub fn manager() -> TableManager {
    TableManager::new(EventBus::new())
}

/// A table with `players` people already seated.
pub fn seated_table(
    manager: &TableManager,
    variant: Variant,
    players: usize,
    seed: u64,
) -> TableId {
    let config = TableConfig::default_for(variant).with_seed(seed);
    let id = manager.create_table(variant, config).unwrap();
    for name in NAMES.iter().take(players) {
        manager.join(&id, name).unwrap();
    }
    id
}

/// Calls or checks for whoever is due until the hand ends.
pub fn check_down(manager: &TableManager, id: &TableId) -> TableSnapshot {
    loop {
        let spectator = manager.view(id, None).unwrap();
        let Some(seat) = spectator.current_actor else {
            return spectator;
        };
        let view = manager.view(id, Some(seat)).unwrap();
        let action = match view.to_call() {
            Some(owed) if owed > 0 => PlayerAction::Call,
            _ => PlayerAction::Check,
        };
        manager.act(id, seat, action).unwrap();
        manager.get_table(id).unwrap().check_invariants().unwrap();
    }
}

pub fn total_chips(view: &TableSnapshot) -> u32 {
    view.seats.iter().map(|s| s.stack).sum::<u32>() + view.pot
}
