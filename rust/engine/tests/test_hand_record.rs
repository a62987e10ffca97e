use std::fs;
use std::path::PathBuf;

use majiang_engine::game::{Game, Outcome};
use majiang_engine::logger::{format_hand_id, Action, ActionRecord, HandLogger, HandRecord};
use majiang_engine::player::Seat;
use majiang_engine::tiles::TileId;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    p
}

fn sample() -> HandRecord {
    HandRecord {
        hand_id: "20250102-000123".to_string(),
        seed: Some(42),
        seats: vec![Seat::East, Seat::West],
        dealer: Some(Seat::East),
        actions: vec![
            ActionRecord {
                seat: Seat::East,
                action: Action::Discard(TileId::new(17).unwrap()),
            },
            ActionRecord {
                seat: Seat::West,
                action: Action::Pass,
            },
        ],
        outcome: Some(Outcome::Exhausted),
        ts: None,
        meta: None,
    }
}

#[test]
fn hand_record_serializes_and_deserializes() {
    let rec = sample();
    let s = serde_json::to_string(&rec).expect("serialize");
    let back: HandRecord = serde_json::from_str(&s).expect("deserialize");
    assert_eq!(rec, back);
    assert!(s.contains("\"discard\":17"));
    assert!(s.contains("\"kind\":\"exhausted\""));
}

#[test]
fn id_format_is_date_and_sequence() {
    let id = format_hand_id("20251231", 42);
    assert_eq!(id, "20251231-000042");
    let mut logger = HandLogger::detached("20250101");
    assert_eq!(logger.next_id(), "20250101-000001");
    assert_eq!(logger.next_id(), "20250101-000002");
}

#[test]
fn writes_jsonl_with_lf_only_and_timestamp() {
    let path = tmp_path("handlog");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&sample()).expect("write");
    let mut second = sample();
    second.meta = Some(serde_json::json!({"note": "second"}));
    logger.write(&second).expect("write");
    drop(logger);

    let content = fs::read_to_string(&path).expect("read back");
    assert!(!content.contains('\r'));
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    let rec: HandRecord = serde_json::from_str(lines[1]).expect("parse line");
    assert!(rec.ts.is_some());
    assert_eq!(rec.meta, Some(serde_json::json!({"note": "second"})));
    let _ = fs::remove_file(&path);
}

#[test]
fn record_from_game_captures_history() {
    let mut game = Game::new_with_seed(5);
    game.init(&[Seat::East, Seat::South]).unwrap();
    game.start().unwrap();
    let dealer = game.current().unwrap();
    let picked = game.player(dealer).unwrap().picked().unwrap();
    game.discard(dealer, picked).unwrap();

    let rec = HandRecord::from_game(&game, "20250101-000001".into(), Some(5));
    assert_eq!(rec.seats, vec![Seat::East, Seat::South]);
    assert_eq!(rec.dealer, Some(Seat::East));
    assert_eq!(
        rec.actions.first(),
        Some(&ActionRecord {
            seat: Seat::East,
            action: Action::Discard(picked)
        })
    );
}
