mod common;

use cardroom_engine::logger::HandRecord;
use cardroom_engine::variant::Variant;
use common::{EnvGuard, run_cli};
use serial_test::serial;

#[test]
#[serial]
fn deal_is_deterministic_with_a_seed() {
    let _env = EnvGuard::apply(&[]);
    let first = run_cli(&["deal", "--seed", "42"]);
    let second = run_cli(&["deal", "--seed", "42"]);
    assert_eq!(first.exit_code, 0, "{}", first.stderr);
    assert_eq!(first.stdout, second.stdout);

    assert!(first.stdout.contains("Seed: 42"));
    assert_eq!(first.stdout.matches("Seat ").count(), 5);
    let board = first
        .stdout
        .lines()
        .find(|l| l.starts_with("Board: "))
        .expect("board line");
    assert_eq!(board.trim_start_matches("Board: ").split(' ').count(), 5);
    assert!(first.stdout.contains("Winner: seat"));
}

#[test]
#[serial]
fn deal_stud_shows_up_cards_and_wilds() {
    let _env = EnvGuard::apply(&[]);
    let res = run_cli(&["deal", "--variant", "stud", "--players", "7", "--seed", "9"]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert_eq!(res.stdout.matches("| up: ").count(), 7);
    let wild = res
        .stdout
        .lines()
        .find(|l| l.starts_with("Wild: "))
        .expect("wild line");
    assert!(wild.split(' ').any(|r| r == "Q"));
    assert!(!res.stdout.contains("Board:"));
}

#[test]
#[serial]
fn deal_rejects_too_many_stud_players() {
    let _env = EnvGuard::apply(&[]);
    let res = run_cli(&["deal", "--variant", "stud", "--players", "8"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Engine error"));
}

#[test]
fn eval_with_wild_ranks() {
    let res = run_cli(&["eval", "7s", "7d", "Kh", "2c", "9s", "--wild", "2"]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("Hand: Three of a Kind"));

    let res = run_cli(&["eval", "7s", "7d", "Kh", "2c", "9s"]);
    assert!(res.stdout.contains("Hand: One Pair"));
}

#[test]
fn eval_reports_bad_cards() {
    let res = run_cli(&["eval", "7s", "7d", "Kh", "2c", "1z"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid input"));
}

#[test]
#[serial]
fn sim_writes_one_record_per_hand() {
    let _env = EnvGuard::apply(&[]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("hands.jsonl");
    let path_str = path.to_string_lossy().to_string();

    let res = run_cli(&[
        "sim",
        "--hands",
        "4",
        "--variant",
        "stud",
        "--players",
        "4",
        "--seed",
        "5",
        "--bots",
        "baseline,calling",
        "--output",
        &path_str,
    ]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("Simulated: 4 hands (seed 5)"));
    assert!(res.stdout.contains("[CallingStation]"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains('\r'));
    let records: Vec<HandRecord> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 4);
    for (i, record) in records.iter().enumerate() {
        assert!(record.hand_id.ends_with(&format!("-{:06}", i + 1)));
        assert_eq!(record.variant, Variant::Stud);
        assert_eq!(record.seed, Some(5));
        assert!(!record.winners.is_empty());
    }
}

#[test]
#[serial]
fn sim_keeps_chips_on_the_table() {
    let _env = EnvGuard::apply(&[]);
    let res = run_cli(&["sim", "--hands", "20", "--players", "3", "--seed", "8"]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);

    let stacks: u32 = res
        .stdout
        .lines()
        .filter(|l| l.starts_with("Seat "))
        .map(|l| {
            let after = l.split("stack ").nth(1).unwrap();
            after.split(' ').next().unwrap().parse::<u32>().unwrap()
        })
        .sum();
    assert_eq!(stacks, 3000);
}

#[test]
#[serial]
fn sim_rejects_bad_arguments() {
    let _env = EnvGuard::apply(&[]);
    let res = run_cli(&["sim", "--hands", "0"]);
    assert_eq!(res.exit_code, 2);

    let res = run_cli(&["sim", "--hands", "1", "--bots", "oracle"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("unknown bot"));
}
