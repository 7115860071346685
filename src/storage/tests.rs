//! Unit tests for storage functionality

use super::schema::map_constraint;
use super::*;
use crate::error::CricketError;
use crate::types::*;
use chrono::{DateTime, TimeZone, Utc};

fn match_day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 14, 0, 0).unwrap()
}

fn create_test_db() -> CricketDatabase {
    CricketDatabase::open_in_memory()
        .unwrap()
        .with_id_generator(SequentialIdGenerator::default())
}

fn team(id: &str, name: &str) -> Team {
    Team {
        id: TeamId::new(id),
        name: name.to_string(),
        image_path: format!("/img/teams/{}.png", id),
    }
}

fn player(id: &str, team_id: &str, last_name: &str) -> Player {
    Player {
        id: PlayerId::new(id),
        team_id: TeamId::new(team_id),
        first_name: "Test".to_string(),
        last_name: last_name.to_string(),
        position: "Batsman".to_string(),
        image_path: String::new(),
    }
}

fn cricket_match(id: &str, home: &str, away: &str, day: u32) -> CricketMatch {
    CricketMatch {
        id: MatchId::new(id),
        home_team_id: TeamId::new(home),
        away_team_id: TeamId::new(away),
        match_date: match_day(day),
    }
}

fn performance(match_id: &str, player_id: &str, runs: i64, wickets: i64, catches: i64) -> NewPerformance {
    NewPerformance {
        runs,
        wickets,
        catches,
        ..NewPerformance::new(MatchId::new(match_id), PlayerId::new(player_id))
    }
}

/// Two teams, one player each, one match between them.
fn create_test_db_with_fixture() -> CricketDatabase {
    let mut db = create_test_db();
    db.create_team(team("t1", "Eagles")).unwrap();
    db.create_team(team("t2", "Hawks")).unwrap();
    db.create_player(player("p1", "t1", "Anders")).unwrap();
    db.create_player(player("p2", "t2", "Brook")).unwrap();
    db.create_match(cricket_match("m1", "t1", "t2", 1)).unwrap();
    db
}

#[test]
fn test_database_creation() {
    let _db = create_test_db();
    // Should not panic - database creation successful
}

#[test]
fn test_schema_initialization_is_idempotent() {
    let mut db = create_test_db_with_fixture();
    db.initialize_schema().unwrap();
    assert_eq!(db.list_teams().unwrap().len(), 2);
}

#[test]
fn test_foreign_keys_enabled() {
    let db = create_test_db();
    let enabled: bool = db
        .conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert!(enabled);
}

// ---- teams ----

#[test]
fn test_team_round_trip() {
    let mut db = create_test_db();
    let created = db.create_team(team("t1", "Eagles")).unwrap();
    assert_eq!(db.get_team(&TeamId::new("t1")).unwrap(), created);
}

#[test]
fn test_team_duplicate_id() {
    let mut db = create_test_db();
    db.create_team(team("t1", "Eagles")).unwrap();

    match db.create_team(team("t1", "Other")) {
        Err(CricketError::UniqueConstraintViolation { entity: "Team", .. }) => (),
        other => panic!("Expected UniqueConstraintViolation, got {:?}", other),
    }
    assert_eq!(db.get_team(&TeamId::new("t1")).unwrap().name, "Eagles");
}

#[test]
fn test_team_requires_name() {
    let mut db = create_test_db();
    match db.create_team(team("t1", "")) {
        Err(CricketError::InvalidValue { field: "name", .. }) => (),
        other => panic!("Expected InvalidValue, got {:?}", other),
    }
    assert!(db.list_teams().unwrap().is_empty());
}

#[test]
fn test_team_update_and_missing() {
    let mut db = create_test_db_with_fixture();
    let updated = db
        .update_team(
            &TeamId::new("t1"),
            TeamPatch {
                name: Some("Golden Eagles".to_string()),
                image_path: None,
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Golden Eagles");
    assert_eq!(updated.image_path, "/img/teams/t1.png");

    let missing = db.update_team(&TeamId::new("t9"), TeamPatch::default());
    assert!(matches!(missing, Err(CricketError::NotFound { entity: "Team", .. })));
}

#[test]
fn test_delete_team_still_referenced() {
    let mut db = create_test_db_with_fixture();
    match db.delete_team(&TeamId::new("t1")) {
        Err(CricketError::StillReferenced { referenced_by, .. }) => {
            assert_eq!(referenced_by, "players")
        }
        other => panic!("Expected StillReferenced, got {:?}", other),
    }

    db.create_team(team("t3", "Owls")).unwrap();
    db.delete_team(&TeamId::new("t3")).unwrap();
    assert!(matches!(
        db.delete_team(&TeamId::new("t3")),
        Err(CricketError::NotFound { .. })
    ));
}

// ---- players ----

#[test]
fn test_player_requires_existing_team() {
    let mut db = create_test_db();
    match db.create_player(player("p1", "ghost", "Nobody")) {
        Err(CricketError::ForeignKeyViolation { field, value, .. }) => {
            assert_eq!(field, "teamId");
            assert_eq!(value, "ghost");
        }
        other => panic!("Expected ForeignKeyViolation, got {:?}", other),
    }
}

#[test]
fn test_player_transfer() {
    let mut db = create_test_db_with_fixture();
    let id = PlayerId::new("p1");

    let bad = db.update_player(
        &id,
        PlayerPatch {
            team_id: Some(TeamId::new("ghost")),
            ..PlayerPatch::default()
        },
    );
    assert!(matches!(bad, Err(CricketError::ForeignKeyViolation { .. })));
    assert_eq!(db.get_player(&id).unwrap().team_id, TeamId::new("t1"));

    db.update_player(
        &id,
        PlayerPatch {
            team_id: Some(TeamId::new("t2")),
            ..PlayerPatch::default()
        },
    )
    .unwrap();
    let roster = db.team_roster(&TeamId::new("t2")).unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].last_name, "Anders");
}

#[test]
fn test_team_roster_unknown_team() {
    let db = create_test_db();
    assert!(matches!(
        db.team_roster(&TeamId::new("t1")),
        Err(CricketError::NotFound { .. })
    ));
    assert!(db.list_players_by_team(&TeamId::new("t1")).unwrap().is_empty());
}

#[test]
fn test_delete_player_removes_history() {
    let mut db = create_test_db_with_fixture();
    let id = PlayerId::new("p1");
    db.recompute_player_history(&id).unwrap();
    assert!(db.history_for_player(&id).unwrap().is_some());

    db.delete_player(&id).unwrap();
    assert!(db.history_for_player(&id).unwrap().is_none());
    assert!(matches!(db.get_player(&id), Err(CricketError::NotFound { .. })));
}

// ---- matches ----

#[test]
fn test_match_requires_distinct_teams() {
    let mut db = create_test_db_with_fixture();
    match db.create_match(cricket_match("m2", "t1", "t1", 2)) {
        Err(CricketError::InvalidMatchTeams { team_id }) => assert_eq!(team_id, "t1"),
        other => panic!("Expected InvalidMatchTeams, got {:?}", other),
    }
}

#[test]
fn test_match_requires_existing_teams() {
    let mut db = create_test_db_with_fixture();
    match db.create_match(cricket_match("m2", "t1", "ghost", 2)) {
        Err(CricketError::ForeignKeyViolation { field, .. }) => assert_eq!(field, "awayTeamId"),
        other => panic!("Expected ForeignKeyViolation, got {:?}", other),
    }
}

#[test]
fn test_match_round_trip_keeps_date() {
    let db = create_test_db_with_fixture();
    let fetched = db.get_match(&MatchId::new("m1")).unwrap();
    assert_eq!(fetched, cricket_match("m1", "t1", "t2", 1));
}

#[test]
fn test_match_update_revalidates_teams() {
    let mut db = create_test_db_with_fixture();
    let result = db.update_match(
        &MatchId::new("m1"),
        MatchPatch {
            away_team_id: Some(TeamId::new("t1")),
            ..MatchPatch::default()
        },
    );
    assert!(matches!(result, Err(CricketError::InvalidMatchTeams { .. })));

    let moved = db
        .update_match(
            &MatchId::new("m1"),
            MatchPatch {
                match_date: Some(match_day(9)),
                ..MatchPatch::default()
            },
        )
        .unwrap();
    assert_eq!(moved.match_date, match_day(9));
}

#[test]
fn test_matches_for_team_in_date_order() {
    let mut db = create_test_db_with_fixture();
    db.create_team(team("t3", "Owls")).unwrap();
    db.create_match(cricket_match("m0", "t3", "t1", 1)).unwrap();
    db.create_match(cricket_match("m3", "t2", "t3", 3)).unwrap();

    let ids: Vec<String> = db
        .list_matches_for_team(&TeamId::new("t1"))
        .unwrap()
        .into_iter()
        .map(|m| m.id.to_string())
        .collect();
    assert_eq!(ids, vec!["m0", "m1"]);
}

// ---- pools ----

#[test]
fn test_one_pool_per_match() {
    let mut db = create_test_db_with_fixture();
    let match_id = MatchId::new("m1");
    assert!(db.pool_for_match(&match_id).unwrap().is_none());

    let pool = db
        .create_pool(NewPool {
            cricket_match_id: match_id.clone(),
        })
        .unwrap();
    assert_eq!(db.pool_for_match(&match_id).unwrap(), Some(pool));

    match db.create_pool(NewPool {
        cricket_match_id: match_id,
    }) {
        Err(CricketError::UniqueConstraintViolation { entity: "Pool", .. }) => (),
        other => panic!("Expected UniqueConstraintViolation, got {:?}", other),
    }
}

#[test]
fn test_pool_requires_match() {
    let mut db = create_test_db();
    let result = db.create_pool(NewPool {
        cricket_match_id: MatchId::new("nope"),
    });
    assert!(matches!(result, Err(CricketError::ForeignKeyViolation { .. })));
}

#[test]
fn test_pool_reassignment() {
    let mut db = create_test_db_with_fixture();
    db.create_match(cricket_match("m2", "t2", "t1", 2)).unwrap();
    db.create_match(cricket_match("m3", "t1", "t2", 3)).unwrap();
    let p1 = db
        .create_pool(NewPool {
            cricket_match_id: MatchId::new("m1"),
        })
        .unwrap();
    db.create_pool(NewPool {
        cricket_match_id: MatchId::new("m2"),
    })
    .unwrap();

    let taken = db.update_pool(
        &p1.id,
        PoolPatch {
            cricket_match_id: Some(MatchId::new("m2")),
        },
    );
    assert!(matches!(taken, Err(CricketError::UniqueConstraintViolation { .. })));

    // Keeping its own match is not a conflict
    db.update_pool(&p1.id, PoolPatch::default()).unwrap();

    let moved = db
        .update_pool(
            &p1.id,
            PoolPatch {
                cricket_match_id: Some(MatchId::new("m3")),
            },
        )
        .unwrap();
    assert_eq!(moved.id, p1.id);
    assert_eq!(moved.cricket_match_id, MatchId::new("m3"));
    assert!(db.pool_for_match(&MatchId::new("m1")).unwrap().is_none());

    let missing = db.update_pool(
        &p1.id,
        PoolPatch {
            cricket_match_id: Some(MatchId::new("ghost")),
        },
    );
    assert!(matches!(
        missing,
        Err(CricketError::ForeignKeyViolation { field: "cricketMatchId", .. })
    ));
    assert_eq!(db.get_pool(&p1.id).unwrap(), moved);
}

#[test]
fn test_pool_generated_ids_are_deterministic() {
    let mut db = create_test_db_with_fixture();
    let pool = db
        .create_pool(NewPool {
            cricket_match_id: MatchId::new("m1"),
        })
        .unwrap();
    assert_eq!(pool.id.as_uuid(), uuid::Uuid::from_u128(1));
}

// ---- performances and history ----

#[test]
fn test_performance_unique_per_match_and_player() {
    let mut db = create_test_db_with_fixture();
    db.create_performance(performance("m1", "p1", 50, 0, 1)).unwrap();

    match db.create_performance(performance("m1", "p1", 10, 0, 0)) {
        Err(CricketError::UniqueConstraintViolation { entity, .. }) => {
            assert_eq!(entity, "Performance")
        }
        other => panic!("Expected UniqueConstraintViolation, got {:?}", other),
    }
    assert_eq!(db.performances_for_match(&MatchId::new("m1")).unwrap().len(), 1);
}

#[test]
fn test_performance_rejects_negative_stats() {
    let mut db = create_test_db_with_fixture();
    match db.create_performance(performance("m1", "p1", -5, 0, 0)) {
        Err(CricketError::InvalidValue { field: "runs", .. }) => (),
        other => panic!("Expected InvalidValue, got {:?}", other),
    }

    let mut bad_points = performance("m1", "p1", 5, 0, 0);
    bad_points.points = Some(-1);
    assert!(matches!(
        db.create_performance(bad_points),
        Err(CricketError::InvalidValue { field: "points", .. })
    ));
    assert!(db.history_for_player(&PlayerId::new("p1")).unwrap().is_none());
}

#[test]
fn test_performance_foreign_keys() {
    let mut db = create_test_db_with_fixture();
    match db.create_performance(performance("m9", "p1", 1, 0, 0)) {
        Err(CricketError::ForeignKeyViolation { field, .. }) => assert_eq!(field, "cricketMatchId"),
        other => panic!("Expected ForeignKeyViolation, got {:?}", other),
    }
    match db.create_performance(performance("m1", "p9", 1, 0, 0)) {
        Err(CricketError::ForeignKeyViolation { field, .. }) => {
            assert_eq!(field, "cricketPlayerId")
        }
        other => panic!("Expected ForeignKeyViolation, got {:?}", other),
    }
}

#[test]
fn test_performance_points_from_scoring_rules() {
    let mut db = create_test_db_with_fixture();
    let scored = db.create_performance(performance("m1", "p1", 50, 0, 1)).unwrap();
    assert_eq!(scored.points, 55);

    let mut explicit = performance("m1", "p2", 12, 3, 0);
    explicit.points = Some(40);
    assert_eq!(db.create_performance(explicit).unwrap().points, 40);
}

#[test]
fn test_history_follows_performance_writes() {
    let mut db = create_test_db_with_fixture();
    db.create_match(cricket_match("m2", "t2", "t1", 2)).unwrap();
    let p1 = PlayerId::new("p1");

    let first = db.create_performance(performance("m1", "p1", 50, 0, 1)).unwrap();
    db.create_performance(performance("m2", "p1", 20, 2, 0)).unwrap();

    let history = db.history_for_player(&p1).unwrap().unwrap();
    assert_eq!((history.runs, history.wickets, history.catches), (70, 2, 1));
    assert_eq!(history.points, 55 + 60);

    db.update_performance(
        &first.id,
        PerformancePatch {
            runs: Some(30),
            ..PerformancePatch::default()
        },
    )
    .unwrap();
    let corrected = db.history_for_player(&p1).unwrap().unwrap();
    assert_eq!(corrected.runs, 50);
    assert_eq!(corrected.points, 35 + 60);
    // The aggregate row is rewritten in place, not appended
    assert_eq!(corrected.id, history.id);

    db.delete_performance(&first.id).unwrap();
    let after_delete = db.history_for_player(&p1).unwrap().unwrap();
    assert_eq!(after_delete.runs, 20);
    assert_eq!(after_delete.points, 60);
}

#[test]
fn test_update_performance_points_handling() {
    let mut db = create_test_db_with_fixture();
    let mut new = performance("m1", "p1", 50, 0, 1);
    new.points = Some(70);
    let recorded = db.create_performance(new).unwrap();

    // Points-only correction leaves stats alone
    let only_points = db
        .update_performance(
            &recorded.id,
            PerformancePatch {
                points: Some(65),
                ..PerformancePatch::default()
            },
        )
        .unwrap();
    assert_eq!((only_points.runs, only_points.points), (50, 65));

    // Empty patch keeps the stored points
    let unchanged = db
        .update_performance(&recorded.id, PerformancePatch::default())
        .unwrap();
    assert_eq!(unchanged.points, 65);

    let negative = db.update_performance(
        &recorded.id,
        PerformancePatch {
            catches: Some(-1),
            ..PerformancePatch::default()
        },
    );
    assert!(matches!(negative, Err(CricketError::InvalidValue { .. })));
    assert_eq!(db.get_performance(&recorded.id).unwrap().catches, 1);
}

#[test]
fn test_manual_history_and_recompute() {
    let mut db = create_test_db_with_fixture();
    let p2 = PlayerId::new("p2");

    let seeded = db
        .create_player_history(NewPlayerHistory {
            player_id: p2.clone(),
            runs: 900,
            wickets: 10,
            catches: 4,
            points: 1120,
        })
        .unwrap();
    assert!(matches!(
        db.create_player_history(NewPlayerHistory {
            player_id: p2.clone(),
            runs: 0,
            wickets: 0,
            catches: 0,
            points: 0,
        }),
        Err(CricketError::UniqueConstraintViolation { .. })
    ));

    let rewritten = db.recompute_player_history(&p2).unwrap();
    assert_eq!(rewritten.id, seeded.id);
    assert_eq!(rewritten.runs, 0);

    db.update_player_history(
        &seeded.id,
        PlayerHistoryPatch {
            runs: Some(5),
            ..PlayerHistoryPatch::default()
        },
    )
    .unwrap();
    db.create_performance(performance("m1", "p1", 10, 0, 0)).unwrap();

    assert_eq!(db.recompute_all_histories().unwrap(), 2);
    assert_eq!(db.history_for_player(&p2).unwrap().unwrap().runs, 0);
    assert_eq!(db.history_for_player(&PlayerId::new("p1")).unwrap().unwrap().runs, 10);
}

#[test]
fn test_history_requires_player() {
    let mut db = create_test_db();
    let result = db.create_player_history(NewPlayerHistory {
        player_id: PlayerId::new("ghost"),
        runs: 1,
        wickets: 0,
        catches: 0,
        points: 1,
    });
    assert!(matches!(result, Err(CricketError::ForeignKeyViolation { .. })));
    assert!(matches!(
        db.recompute_player_history(&PlayerId::new("ghost")),
        Err(CricketError::NotFound { .. })
    ));
}

#[test]
fn test_history_total_can_exceed_a_single_performance_limit() {
    let mut db = create_test_db_with_fixture();
    db.create_match(cricket_match("m2", "t2", "t1", 2)).unwrap();
    let big = i64::from(u32::MAX) - 10;

    let mut first = performance("m1", "p1", 0, 0, 0);
    first.points = Some(big);
    let first = db.create_performance(first).unwrap();
    assert_eq!(first.points, u32::MAX - 10);

    let mut second = performance("m2", "p1", 0, 0, 0);
    second.points = Some(big);
    let second = db.create_performance(second).unwrap();

    let history = db.history_for_player(&PlayerId::new("p1")).unwrap().unwrap();
    assert_eq!(history.points, 2 * (u64::from(u32::MAX) - 10));

    db.update_performance(
        &second.id,
        PerformancePatch {
            points: Some(big - 5),
            ..PerformancePatch::default()
        },
    )
    .unwrap();
    let history = db.history_for_player(&PlayerId::new("p1")).unwrap().unwrap();
    assert_eq!(history.points, 2 * (u64::from(u32::MAX) - 10) - 5);
}

#[test]
fn test_history_rejects_negative_counts() {
    let mut db = create_test_db_with_fixture();
    let p2 = PlayerId::new("p2");

    let result = db.create_player_history(NewPlayerHistory {
        player_id: p2.clone(),
        runs: 10,
        wickets: -1,
        catches: 0,
        points: 20,
    });
    assert!(matches!(
        result,
        Err(CricketError::InvalidValue { field: "wickets", .. })
    ));
    assert!(db.history_for_player(&p2).unwrap().is_none());

    let seeded = db
        .create_player_history(NewPlayerHistory {
            player_id: p2.clone(),
            runs: 10,
            wickets: 1,
            catches: 2,
            points: 40,
        })
        .unwrap();

    for patch in [
        PlayerHistoryPatch {
            runs: Some(-5),
            ..PlayerHistoryPatch::default()
        },
        PlayerHistoryPatch {
            catches: Some(-1),
            points: Some(100),
            ..PlayerHistoryPatch::default()
        },
    ] {
        assert!(matches!(
            db.update_player_history(&seeded.id, patch),
            Err(CricketError::InvalidValue { .. })
        ));
    }
    assert_eq!(db.get_player_history(&seeded.id).unwrap(), seeded);
}

#[test]
fn test_delete_match_with_performances_refused() {
    let mut db = create_test_db_with_fixture();
    db.create_performance(performance("m1", "p1", 1, 0, 0)).unwrap();
    match db.delete_match(&MatchId::new("m1")) {
        Err(CricketError::StillReferenced { referenced_by, .. }) => {
            assert_eq!(referenced_by, "performances")
        }
        other => panic!("Expected StillReferenced, got {:?}", other),
    }
}

// ---- bets ----

#[test]
fn test_bet_option_names_unique() {
    let mut db = create_test_db();
    let top = db
        .create_bet_option(NewBetOption {
            bet_name: "Top run scorer".to_string(),
        })
        .unwrap();
    let wickets = db
        .create_bet_option(NewBetOption {
            bet_name: "Most wickets".to_string(),
        })
        .unwrap();

    assert!(matches!(
        db.create_bet_option(NewBetOption {
            bet_name: "Top run scorer".to_string(),
        }),
        Err(CricketError::UniqueConstraintViolation { .. })
    ));
    assert!(matches!(
        db.update_bet_option(
            &wickets.id,
            BetOptionPatch {
                bet_name: Some("Top run scorer".to_string()),
            },
        ),
        Err(CricketError::UniqueConstraintViolation { .. })
    ));

    db.update_bet_option(
        &top.id,
        BetOptionPatch {
            bet_name: Some("Top run scorer".to_string()),
        },
    )
    .unwrap();
    assert_eq!(db.find_bet_option("Most wickets").unwrap(), Some(wickets));
    let names: Vec<String> = db
        .list_bet_options()
        .unwrap()
        .into_iter()
        .map(|o| o.bet_name)
        .collect();
    assert_eq!(names, vec!["Most wickets", "Top run scorer"]);
}

#[test]
fn test_special_bet_foreign_keys() {
    let mut db = create_test_db_with_fixture();
    let option = db
        .create_bet_option(NewBetOption {
            bet_name: "Player of the match".to_string(),
        })
        .unwrap();

    match db.create_special_bet(NewSpecialBet {
        special_bet_id: option.id,
        player_id: PlayerId::new("ghost"),
    }) {
        Err(CricketError::ForeignKeyViolation { field, .. }) => assert_eq!(field, "playerId"),
        other => panic!("Expected ForeignKeyViolation, got {:?}", other),
    }
    match db.create_special_bet(NewSpecialBet {
        special_bet_id: BetOptionId::new(uuid::Uuid::from_u128(999)),
        player_id: PlayerId::new("p1"),
    }) {
        Err(CricketError::ForeignKeyViolation { field, .. }) => assert_eq!(field, "specialBetId"),
        other => panic!("Expected ForeignKeyViolation, got {:?}", other),
    }

    let bet = db
        .create_special_bet(NewSpecialBet {
            special_bet_id: option.id,
            player_id: PlayerId::new("p1"),
        })
        .unwrap();
    assert_eq!(db.get_special_bet(&bet.id).unwrap(), bet);
    assert_eq!(db.special_bets_for_option(&option.id).unwrap(), vec![bet.clone()]);

    assert!(matches!(
        db.delete_bet_option(&option.id),
        Err(CricketError::StillReferenced { .. })
    ));
    db.delete_special_bet(&bet.id).unwrap();
    db.delete_bet_option(&option.id).unwrap();
}

// ---- cross-table reads and bulk import ----

#[test]
fn test_match_overview() {
    let mut db = create_test_db_with_fixture();
    db.create_performance(performance("m1", "p1", 50, 0, 1)).unwrap();
    db.create_performance(performance("m1", "p2", 3, 4, 0)).unwrap();

    let overview = db.match_overview(&MatchId::new("m1")).unwrap();
    assert_eq!(overview.home_team.name, "Eagles");
    assert_eq!(overview.away_team.name, "Hawks");
    assert!(overview.pool.is_none());
    // Best scorer first: 83 points beats 55
    assert_eq!(overview.performances[0].cricket_player_id, PlayerId::new("p2"));

    db.create_pool(NewPool {
        cricket_match_id: MatchId::new("m1"),
    })
    .unwrap();
    assert!(db.match_overview(&MatchId::new("m1")).unwrap().pool.is_some());
}

#[test]
fn test_import_seed_is_all_or_nothing() {
    let mut db = create_test_db();
    let seed = SeedData {
        teams: vec![team("t1", "Eagles"), team("t2", "Hawks")],
        players: vec![player("p1", "t1", "Anders"), player("p2", "ghost", "Lost")],
        ..SeedData::default()
    };

    assert!(matches!(
        db.import_seed(seed),
        Err(CricketError::ForeignKeyViolation { .. })
    ));
    assert!(db.list_teams().unwrap().is_empty());
}

#[test]
fn test_import_seed_applies_in_dependency_order() {
    let mut db = create_test_db();
    let seed: SeedData = serde_json::from_value(serde_json::json!({
        "teams": [
            {"id": "t1", "name": "Eagles", "imagePath": "e.png"},
            {"id": "t2", "name": "Hawks", "imagePath": "h.png"}
        ],
        "players": [
            {"id": "p1", "teamId": "t1", "firstName": "Ada", "lastName": "Anders",
             "position": "Bowler", "imagePath": ""}
        ],
        "matches": [
            {"id": "m1", "homeTeamId": "t1", "awayTeamId": "t2",
             "matchDate": "2024-03-01T14:00:00Z"}
        ],
        "betOptions": [{"betName": "Top run scorer"}],
        "pools": [{"cricketMatchId": "m1"}],
        "performances": [{"cricketMatchId": "m1", "cricketPlayerId": "p1", "wickets": 2}]
    }))
    .unwrap();

    let summary = db.import_seed(seed).unwrap();
    assert_eq!(summary.teams, 2);
    assert_eq!(summary.performances, 1);
    assert!(db.pool_for_match(&MatchId::new("m1")).unwrap().is_some());
    assert_eq!(db.history_for_player(&PlayerId::new("p1")).unwrap().unwrap().points, 40);
}

// ---- engine constraints behind the validation pass ----

#[test]
fn test_engine_unique_constraint_is_mapped() {
    let db = create_test_db_with_fixture();
    let err = db
        .conn
        .execute(
            "INSERT INTO teams (id, name, image_path) VALUES ('t1', 'Again', '')",
            [],
        )
        .unwrap_err();
    assert!(matches!(
        map_constraint(err, "Team", "t1"),
        CricketError::UniqueConstraintViolation { .. }
    ));
}

#[test]
fn test_engine_foreign_key_constraint_is_mapped() {
    let db = create_test_db();
    let err = db
        .conn
        .execute(
            "INSERT INTO players (id, team_id, first_name, last_name, position, image_path)
             VALUES ('p1', 'ghost', '', '', '', '')",
            [],
        )
        .unwrap_err();
    assert!(matches!(
        map_constraint(err, "Player", "p1"),
        CricketError::ForeignKeyViolation { .. }
    ));
}

#[test]
fn test_engine_check_constraint_is_mapped() {
    let db = create_test_db_with_fixture();
    let same_teams = db
        .conn
        .execute(
            "INSERT INTO matches (id, home_team_id, away_team_id, match_date)
             VALUES ('m2', 't1', 't1', '2024-03-02 14:00:00+00:00')",
            [],
        )
        .unwrap_err();
    assert!(matches!(
        map_constraint(same_teams, "Match", "m2"),
        CricketError::InvalidValue { .. }
    ));

    let negative = db
        .conn
        .execute(
            "INSERT INTO performances
             (id, cricket_match_id, cricket_player_id, runs, wickets, catches, points)
             VALUES ('x', 'm1', 'p1', -1, 0, 0, 0)",
            [],
        )
        .unwrap_err();
    assert!(matches!(
        map_constraint(negative, "Performance", "x"),
        CricketError::InvalidValue { .. }
    ));
}

#[test]
fn test_non_constraint_errors_pass_through() {
    let err = map_constraint(rusqlite::Error::QueryReturnedNoRows, "Team", "t1");
    assert!(matches!(err, CricketError::Database(_)));
}

#[test]
fn test_clear_all_data() {
    let mut db = create_test_db_with_fixture();
    db.create_performance(performance("m1", "p1", 1, 0, 0)).unwrap();
    db.clear_all_data().unwrap();
    assert!(db.list_teams().unwrap().is_empty());
    assert!(db.list_matches().unwrap().is_empty());
}
