#![allow(dead_code)]

use cardroom_engine::config::TableConfig;
use cardroom_engine::player::PlayerAction;
use cardroom_engine::session::Session;
use cardroom_engine::variant::Variant;

pub const NAMES: [&str; 7] = ["ann", "bob", "cy", "dee", "eve", "fay", "gus"];

pub fn seated(variant: Variant, config: TableConfig) -> Session {
    let n = config.num_players;
    let mut session = Session::new(variant, config).unwrap();
    for name in NAMES.iter().take(n) {
        session.add_player(name).unwrap();
    }
    session
}

pub fn holdem(players: usize, seed: u64) -> Session {
    seated(
        Variant::Holdem,
        TableConfig::holdem(players, 1000, 10, 20).with_seed(seed),
    )
}

pub fn stud(players: usize, seed: u64) -> Session {
    seated(
        Variant::Stud,
        TableConfig::stud(players, 1000, 5, 10).with_seed(seed),
    )
}

/// Calls or checks until the hand ends.
pub fn check_down(session: &mut Session) {
    while session.hand_active() {
        let seat = session.current_actor().unwrap();
        let action = if session.to_call(seat) > 0 {
            PlayerAction::Call
        } else {
            PlayerAction::Check
        };
        session.apply_action(seat, action).unwrap();
        session.check_invariants().unwrap();
    }
}

pub fn total_chips(session: &Session) -> u32 {
    session.players().map(|(_, p)| p.stack()).sum::<u32>() + session.pot()
}
