mod common;

use cardroom_engine::player::PlayerAction;
use cardroom_engine::session::SessionEvent;
use cardroom_engine::variant::{Phase, Variant};
use cardroom_engine::view::CardView;
use cardroom_tables::{TableEvent, TableUpdate};
use common::{manager, seated_table};

fn drain(sub: &mut cardroom_tables::EventSubscription) -> Vec<TableUpdate> {
    let mut out = Vec::new();
    while let Ok(update) = sub.receiver().try_recv() {
        out.push(update);
    }
    out
}

#[test]
fn start_hand_broadcasts_forced_bets_and_deal() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 3, 21);
    let mut sub = manager.event_bus().subscribe(id.clone());

    manager.start_hand(&id).unwrap();
    let updates = drain(&mut sub);

    assert!(matches!(
        updates[0].event,
        TableEvent::Session(SessionEvent::HandStarted { hand_number: 1, .. })
    ));
    let forced = updates
        .iter()
        .filter(|u| matches!(u.event, TableEvent::Session(SessionEvent::ForcedBet { .. })))
        .count();
    assert_eq!(forced, 2);
    assert!(updates.iter().all(|u| u.table_id == id));
}

#[test]
fn broadcast_snapshots_never_show_hole_cards() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 3, 22);
    let mut sub = manager.event_bus().subscribe(id.clone());

    let view = manager.start_hand(&id).unwrap();
    manager
        .act(&id, view.current_actor.unwrap(), PlayerAction::Call)
        .unwrap();

    for update in drain(&mut sub) {
        let snapshot = update.snapshot.expect("session updates carry a snapshot");
        assert_eq!(snapshot.viewer, None);
        for seat in &snapshot.seats {
            assert!(seat.down.iter().all(|c| *c == CardView::Hidden));
        }
    }
}

#[test]
fn phase_changes_are_broadcast_in_order() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 2, 23);
    let mut sub = manager.event_bus().subscribe(id.clone());

    manager.start_hand(&id).unwrap();
    common::check_down(&manager, &id);

    let phases: Vec<Phase> = drain(&mut sub)
        .into_iter()
        .filter_map(|u| match u.event {
            TableEvent::Session(SessionEvent::PhaseChanged { to, .. }) => Some(to),
            _ => None,
        })
        .collect();
    let expected = [Phase::Flop, Phase::Turn, Phase::River, Phase::Showdown];
    assert!(phases.ends_with(&expected), "got {phases:?}");
}

#[test]
fn hand_complete_carries_the_winners() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 2, 24);
    let mut sub = manager.event_bus().subscribe(id.clone());

    let view = manager.start_hand(&id).unwrap();
    let folder = view.current_actor.unwrap();
    manager.act(&id, folder, PlayerAction::Fold).unwrap();

    let complete = drain(&mut sub)
        .into_iter()
        .find_map(|u| match u.event {
            TableEvent::Session(SessionEvent::HandComplete { winners }) => Some(winners),
            _ => None,
        })
        .expect("hand complete update");
    assert_eq!(complete.len(), 1);
    assert_ne!(complete[0].seat, folder);
    assert_eq!(complete[0].amount, 30);
}

#[test]
fn rejected_actions_broadcast_nothing() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 3, 25);
    manager.start_hand(&id).unwrap();
    let mut sub = manager.event_bus().subscribe(id.clone());

    assert!(manager.act(&id, 99, PlayerAction::Check).is_err());
    assert!(drain(&mut sub).is_empty());
}

#[test]
fn stud_wild_changes_reach_subscribers() {
    let manager = manager();
    let mut seen_wild = false;
    // some seed will put a queen face up; scan a few
    for seed in 0..40 {
        let id = seated_table(&manager, Variant::Stud, 5, seed);
        let mut sub = manager.event_bus().subscribe(id.clone());
        manager.start_hand(&id).unwrap();
        common::check_down(&manager, &id);
        seen_wild = drain(&mut sub).iter().any(|u| {
            matches!(
                u.event,
                TableEvent::Session(SessionEvent::WildRankChanged(_))
            )
        });
        manager.destroy(&id).unwrap();
        if seen_wild {
            break;
        }
    }
    assert!(seen_wild);
}

#[test]
fn destroy_notifies_and_closes_the_channel() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 2, 26);
    let mut sub = manager.event_bus().subscribe(id.clone());

    manager.destroy(&id).unwrap();
    let updates = drain(&mut sub);
    assert_eq!(
        updates.last().map(|u| &u.event),
        Some(&TableEvent::TableClosed {
            reason: "destroyed".into()
        })
    );
    assert!(sub.receiver().try_recv().is_err());
    assert_eq!(manager.event_bus().subscriber_count(), 0);
}
