use std::fs;
use std::path::PathBuf;

use cardroom_engine::cards::parse_cards;
use cardroom_engine::logger::{format_hand_id, ActionRecord, HandLogger, HandRecord};
use cardroom_engine::player::PlayerAction;
use cardroom_engine::variant::{Phase, Variant};

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    p
}

fn record() -> HandRecord {
    HandRecord {
        hand_id: "20250102-000001".to_string(),
        seed: Some(1),
        variant: Variant::Holdem,
        actions: vec![ActionRecord {
            seat: 0,
            phase: Phase::PreFlop,
            action: PlayerAction::Raise(60),
            chips: 50,
        }],
        board: parse_cards("Ac 7d 2s").unwrap(),
        wild_history: Vec::new(),
        winners: Vec::new(),
        ts: None,
        meta: None,
    }
}

#[test]
fn writes_jsonl_with_lf_only() {
    let path = tmp_path("handlog");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&record()).expect("write");
    logger.write(&record()).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let back: HandRecord = serde_json::from_str(lines[0]).unwrap();
    assert!(back.ts.is_some());
    assert_eq!(back.actions, record().actions);
    let _ = fs::remove_file(&path);
}

#[test]
fn hand_ids_are_sequential() {
    let mut logger = HandLogger::detached("20250102");
    assert_eq!(logger.next_id(), "20250102-000001");
    assert_eq!(logger.next_id(), "20250102-000002");
    assert_eq!(format_hand_id("20240101", 123), "20240101-000123");
}

#[test]
fn action_json_shape() {
    let json = serde_json::to_value(&record().actions[0]).unwrap();
    assert_eq!(json["phase"], "pre_flop");
    assert_eq!(json["action"]["type"], "raise");
    assert_eq!(json["action"]["amount"], 60);
}
