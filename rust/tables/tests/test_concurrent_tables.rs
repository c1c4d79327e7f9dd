//! Many tables driven from many tasks at once.
mod common;

use cardroom_engine::player::PlayerAction;
use cardroom_engine::variant::Variant;
use cardroom_tables::TableManager;
use common::{check_down, manager, seated_table, total_chips};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn tables_are_created_concurrently_with_unique_ids() {
    let manager = Arc::new(manager());
    let mut join_set = JoinSet::new();

    for i in 0..10u64 {
        let manager = Arc::clone(&manager);
        join_set.spawn(async move {
            let variant = if i % 2 == 0 {
                Variant::Holdem
            } else {
                Variant::Stud
            };
            seated_table(&manager, variant, 3, 100 + i)
        });
    }

    let mut ids = HashSet::new();
    while let Some(result) = join_set.join_next().await {
        ids.insert(result.expect("task completed"));
    }
    assert_eq!(ids.len(), 10);
    assert_eq!(manager.active_tables().len(), 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn hands_on_different_tables_run_in_parallel() {
    let manager = Arc::new(manager());
    let ids: Vec<_> = (0..8u64)
        .map(|i| {
            let variant = if i % 2 == 0 {
                Variant::Holdem
            } else {
                Variant::Stud
            };
            seated_table(&manager, variant, 4, 200 + i)
        })
        .collect();

    let mut join_set = JoinSet::new();
    for id in ids.clone() {
        let manager = Arc::clone(&manager);
        join_set.spawn(async move {
            for _ in 0..3 {
                manager.start_hand(&id).expect("start");
                check_down(&manager, &id);
                manager.new_hand(&id).expect("new hand");
            }
            manager.view(&id, None).expect("view")
        });
    }

    while let Some(result) = join_set.join_next().await {
        let view = result.expect("task completed");
        assert_eq!(view.hand_number, 3);
        assert_eq!(total_chips(&view), 4000);
    }
}

/// Every seat hammers the same table; only the seat holding the turn gets
/// through and the table stays consistent.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_seats_on_one_table_stay_consistent() {
    let manager: Arc<TableManager> = Arc::new(manager());
    let id = seated_table(&manager, Variant::Holdem, 4, 300);
    manager.start_hand(&id).expect("start");

    let mut join_set = JoinSet::new();
    for seat in 0..4 {
        let manager = Arc::clone(&manager);
        let id = id.clone();
        join_set.spawn(async move {
            let mut accepted = 0;
            for _ in 0..200 {
                let view = manager.view(&id, Some(seat)).expect("view");
                if !view.hand_active {
                    break;
                }
                let action = match view.to_call() {
                    Some(owed) if owed > 0 => PlayerAction::Call,
                    _ => PlayerAction::Check,
                };
                if manager.act(&id, seat, action).is_ok() {
                    accepted += 1;
                }
                tokio::task::yield_now().await;
            }
            accepted
        });
    }

    let mut total_accepted = 0;
    while let Some(result) = join_set.join_next().await {
        total_accepted += result.expect("task completed");
    }
    let end = check_down(&manager, &id);
    assert!(total_accepted > 0);
    assert!(!end.hand_active);
    assert_eq!(total_chips(&end), 4000);
    manager
        .get_table(&id)
        .expect("table")
        .check_invariants()
        .expect("invariants");
}
