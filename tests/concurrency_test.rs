//! Two connections writing to the same database file

use chrono::{TimeZone, Utc};
use cricket_fantasy::storage::*;
use cricket_fantasy::{CricketError, MatchId, PlayerId, TeamId};
use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

fn seed_fixture(path: &Path) {
    let mut db = CricketDatabase::open(path).unwrap();
    for (id, name) in [("t1", "Eagles"), ("t2", "Hawks")] {
        db.create_team(Team {
            id: TeamId::new(id),
            name: name.to_string(),
            image_path: String::new(),
        })
        .unwrap();
    }
    db.create_player(Player {
        id: PlayerId::new("p1"),
        team_id: TeamId::new("t1"),
        first_name: "Ada".to_string(),
        last_name: "Anders".to_string(),
        position: "Batsman".to_string(),
        image_path: String::new(),
    })
    .unwrap();
    db.create_match(CricketMatch {
        id: MatchId::new("m1"),
        home_team_id: TeamId::new("t1"),
        away_team_id: TeamId::new("t2"),
        match_date: Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap(),
    })
    .unwrap();
}

#[test]
fn test_concurrent_duplicate_performance_has_one_winner() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cricket.db");
    seed_fixture(&path);

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            let path = path.clone();
            thread::spawn(move || {
                let mut db = CricketDatabase::open(&path).unwrap();
                barrier.wait();
                db.create_performance(NewPerformance {
                    runs: 10 * (i + 1),
                    ..NewPerformance::new(MatchId::new("m1"), PlayerId::new("p1"))
                })
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(CricketError::UniqueConstraintViolation { entity: "Performance", .. })
    )));

    let db = CricketDatabase::open(&path).unwrap();
    let performances = db.performances_for_match(&MatchId::new("m1")).unwrap();
    assert_eq!(performances.len(), 1);

    let history = db.history_for_player(&PlayerId::new("p1")).unwrap().unwrap();
    assert_eq!(history.runs, u64::from(performances[0].runs));
}

#[test]
fn test_concurrent_pool_creation_has_one_winner() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cricket.db");
    seed_fixture(&path);

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            let path = path.clone();
            thread::spawn(move || {
                let mut db = CricketDatabase::open(&path).unwrap();
                barrier.wait();
                db.create_pool(NewPool {
                    cricket_match_id: MatchId::new("m1"),
                })
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("cricket.db");
    seed_fixture(&path);

    let db = CricketDatabase::open(&path).unwrap();
    assert_eq!(db.list_teams().unwrap().len(), 2);
    let m = db.get_match(&MatchId::new("m1")).unwrap();
    assert_eq!(m.home_team_id, TeamId::new("t1"));
}
