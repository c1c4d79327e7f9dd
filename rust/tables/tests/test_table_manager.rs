mod common;

use cardroom_engine::errors::GameError;
use cardroom_engine::logger::{HandLogger, HandRecord};
use cardroom_engine::player::PlayerAction;
use cardroom_engine::variant::{Phase, Variant};
use cardroom_engine::view::CardView;
use cardroom_tables::{EventBus, TableError, TableManager};
use common::{check_down, manager, seated_table, total_chips};

#[test]
fn unknown_table_is_not_found() {
    let manager = manager();
    let err = manager.view(&"missing".to_string(), None).unwrap_err();
    assert!(matches!(err, TableError::NotFound(_)));
    assert_eq!(err.error_code(), "table_not_found");
}

#[test]
fn invalid_config_is_rejected_before_creation() {
    let manager = manager();
    let mut config = cardroom_engine::config::TableConfig::default_for(Variant::Stud);
    config.num_players = 9;
    let err = manager.create_table(Variant::Stud, config).unwrap_err();
    assert_eq!(err.error_code(), "invalid_config");
    assert!(manager.active_tables().is_empty());
}

#[test]
fn joining_passes_engine_errors_through() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 2, 1);

    let err = manager.join(&id, "ann").unwrap_err();
    assert!(matches!(err, TableError::Game(GameError::NameTaken(_))));
    assert_eq!(err.error_code(), "table_capacity");

    manager.start_hand(&id).unwrap();
    let err = manager.join(&id, "zed").unwrap_err();
    assert!(matches!(err, TableError::Game(GameError::HandInProgress)));
}

#[test]
fn out_of_turn_action_leaves_table_untouched() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 3, 2);
    let before = manager.start_hand(&id).unwrap();
    let actor = before.current_actor.unwrap();
    let other = (actor + 1) % 3;

    let err = manager.act(&id, other, PlayerAction::Call).unwrap_err();
    assert!(matches!(
        err,
        TableError::Game(GameError::NotPlayersTurn { .. })
    ));
    assert_eq!(manager.view(&id, None).unwrap(), before);
}

#[test]
fn act_returns_the_acting_seats_view() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 3, 3);
    let view = manager.start_hand(&id).unwrap();
    let actor = view.current_actor.unwrap();

    let mine = manager.act(&id, actor, PlayerAction::Call).unwrap();
    assert_eq!(mine.viewer, Some(actor));
    let seat = mine.seat(actor).unwrap();
    assert!(seat.down.iter().all(|c| matches!(c, CardView::Face(_))));
    for other in mine.seats.iter().filter(|s| s.seat != actor) {
        assert!(other.down.iter().all(|c| *c == CardView::Hidden));
    }
}

#[test]
fn full_holdem_hand_conserves_chips() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 3, 4);
    manager.start_hand(&id).unwrap();

    let end = check_down(&manager, &id);
    assert!(!end.hand_active);
    assert_eq!(end.phase, Phase::Showdown);
    assert_eq!(end.board.len(), 5);
    assert!(!end.winners.is_empty());
    assert_eq!(total_chips(&end), 3000);
}

#[test]
fn new_hand_moves_the_button_and_deals_again() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 3, 5);
    let first = manager.start_hand(&id).unwrap();
    check_down(&manager, &id);

    let err = manager.start_hand(&id).unwrap_err();
    assert!(matches!(err, TableError::Game(GameError::WrongPhase { .. })));

    let idle = manager.new_hand(&id).unwrap();
    assert_eq!(idle.phase, Phase::PreDeal);
    let second = manager.start_hand(&id).unwrap();
    assert_eq!(second.hand_number, 2);
    assert_ne!(second.dealer_seat, first.dealer_seat);
}

#[test]
fn leaving_mid_hand_lets_the_rest_play_on() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 3, 6);
    let view = manager.start_hand(&id).unwrap();
    let actor = view.current_actor.unwrap();

    let after = manager.leave(&id, actor).unwrap();
    assert!(after.seat(actor).is_none());
    assert!(after.hand_active);
    assert_ne!(after.current_actor, Some(actor));

    let end = check_down(&manager, &id);
    // the leaver took nothing; everything else stays on the table
    assert_eq!(total_chips(&end), 2000);
}

#[test]
fn stud_reveal_shows_down_cards_to_everyone() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Stud, 3, 7);
    manager.start_hand(&id).unwrap();

    let err = manager.reveal(&id, 0).unwrap_err();
    assert!(matches!(err, TableError::Game(GameError::WrongPhase { .. })));

    let end = check_down(&manager, &id);
    assert_eq!(end.phase, Phase::Showdown);
    let hidden = end.seat(0).unwrap();
    assert!(hidden.down.iter().all(|c| *c == CardView::Hidden));

    manager.reveal(&id, 0).unwrap();
    let shown = manager.view(&id, None).unwrap();
    let seat = shown.seat(0).unwrap();
    assert!(seat.revealed);
    assert_eq!(seat.down.len(), 3);
    assert!(seat.down.iter().all(|c| matches!(c, CardView::Face(_))));

    // revealing twice changes nothing
    manager.reveal(&id, 0).unwrap();
    assert_eq!(manager.view(&id, None).unwrap(), shown);
}

#[test]
fn reset_empties_the_table() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 4, 8);
    manager.start_hand(&id).unwrap();

    let view = manager.reset(&id).unwrap();
    assert!(view.seats.is_empty());
    assert_eq!(view.hand_number, 0);
    assert_eq!(view.phase, Phase::PreDeal);
    assert_eq!(manager.join(&id, "ann").unwrap(), 0);
}

#[test]
fn destroy_removes_the_table() {
    let manager = manager();
    let keep = seated_table(&manager, Variant::Holdem, 2, 9);
    let gone = seated_table(&manager, Variant::Stud, 2, 10);
    assert_eq!(manager.active_tables().len(), 2);

    manager.destroy(&gone).unwrap();
    assert_eq!(manager.active_tables(), vec![keep]);
    assert!(matches!(
        manager.start_hand(&gone),
        Err(TableError::NotFound(_))
    ));
    assert!(matches!(manager.destroy(&gone), Err(TableError::NotFound(_))));
}

#[test]
fn unknown_bot_kind_is_rejected() {
    let manager = manager();
    let id = seated_table(&manager, Variant::Holdem, 1, 11);
    let err = manager.add_bot(&id, "robo", "psychic").unwrap_err();
    assert!(matches!(err, TableError::UnknownBot(_)));
    assert_eq!(manager.view(&id, None).unwrap().seats.len(), 1);
}

#[test]
fn bot_only_table_plays_a_whole_hand_on_start() {
    let manager = manager();
    let config = cardroom_engine::config::TableConfig::default_for(Variant::Stud).with_seed(12);
    let id = manager.create_table(Variant::Stud, config).unwrap();
    for name in ["b1", "b2", "b3", "b4"] {
        manager.add_bot(&id, name, "baseline").unwrap();
    }

    let end = manager.start_hand(&id).unwrap();
    assert!(!end.hand_active);
    assert_eq!(end.phase, Phase::Showdown);
    assert_eq!(total_chips(&end), 4000);
    manager.get_table(&id).unwrap().check_invariants().unwrap();
}

#[test]
fn finished_hands_are_written_to_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    let manager =
        TableManager::new(EventBus::new()).with_history(HandLogger::create(&path).unwrap());
    let id = seated_table(&manager, Variant::Holdem, 2, 13);

    for _ in 0..2 {
        manager.start_hand(&id).unwrap();
        check_down(&manager, &id);
        manager.new_hand(&id).unwrap();
    }

    let text = std::fs::read_to_string(&path).unwrap();
    let records: Vec<HandRecord> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert!(records[0].hand_id.ends_with("-000001"));
    assert!(records[1].hand_id.ends_with("-000002"));
    assert_eq!(records[0].seed, Some(13));
    assert_eq!(records[0].meta.as_ref().unwrap()["table_id"], id.as_str());
    assert!(records.iter().all(|r| r.ts.is_some()));
}
