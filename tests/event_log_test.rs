use std::fs;
use std::path::PathBuf;

use blockfall::core::{Board, GameSession};
use blockfall::types::{Direction, Phase};
use blockfall::EventLog;

fn temp_log_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("blockfall-{}-{}.jsonl", name, std::process::id()))
}

#[test]
fn event_log_appends_session_events_as_json_lines() {
    let path = temp_log_path("session");
    let _ = fs::remove_file(&path);

    let mut session = GameSession::new(31);
    let rows: Vec<&str> = std::iter::repeat("IIIIIIIIIII.").take(4).collect();
    session.start_on(Board::from_ascii(&rows).unwrap());
    for _ in 0..8 {
        session.move_piece(Direction::Right);
    }
    for _ in 0..40 {
        if session.tick().last_cleared > 0 {
            break;
        }
    }
    assert_eq!(session.phase(), Phase::Playing);

    {
        let mut log = EventLog::open(&path).unwrap();
        for ev in session.take_events() {
            log.record(&ev);
        }
        assert!(log.is_enabled());
    }
    // Reopening appends rather than truncating.
    {
        let mut log = EventLog::open(&path).unwrap();
        session.start();
        for ev in session.take_events() {
            log.record(&ev);
        }
    }

    let text = fs::read_to_string(&path).unwrap();
    let _ = fs::remove_file(&path);

    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let kinds: Vec<&str> = records.iter().map(|r| r["event"].as_str().unwrap()).collect();
    assert_eq!(kinds, ["started", "locked", "started"]);
    // The configured seed, so `--seed 31` replays the game.
    assert_eq!(records[0]["seed"], 31);

    let locked = &records[1];
    assert_eq!(locked["kind"], "I");
    assert_eq!(locked["rows_cleared"], 4);
    assert_eq!(locked["points"], 2400);
    assert_eq!(locked["score"], 2400);
    assert_eq!(locked["level"], 1);
    assert!(records.iter().all(|r| r["ts_ms"].as_u64().unwrap() > 0));
    assert_eq!(records[2]["session_id"], 2);
}

#[test]
fn event_log_open_fails_for_missing_directory() {
    let path = std::env::temp_dir()
        .join("blockfall-no-such-dir")
        .join("nested")
        .join("events.jsonl");
    assert!(EventLog::open(&path).is_err());
}
