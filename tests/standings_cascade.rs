//! Database-backed flows. Run with a MySQL `DATABASE_URL` and `cargo test -- --ignored`.

use chrono::NaiveDate;
use sqlx::MySqlPool;
use tournament_service::common::error::AppError;
use tournament_service::common::state::AppState;
use tournament_service::models::matches::{MatchArgs, MatchStatus};
use tournament_service::models::standings::MatchResult;
use tournament_service::models::teams::{Team, TeamArgs};
use tournament_service::models::tournaments::{TournamentArgs, TournamentStatus};
use tournament_service::usecases::{matches, teams, tournaments};

fn state(db: MySqlPool) -> AppState {
    let upload_dir = std::env::temp_dir().join(format!("logos-{}", uuid::Uuid::new_v4()));
    AppState {
        db,
        upload_dir: upload_dir.as_path().into(),
    }
}

async fn new_team(ctx: &AppState, name: &str) -> Team {
    let args = TeamArgs {
        name: name.to_owned(),
        ..Default::default()
    };
    teams::create(ctx, args).await.unwrap()
}

fn tournament_args(status: Option<&str>) -> TournamentArgs {
    TournamentArgs {
        name: "Spring Cup".to_owned(),
        start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        end_date: None,
        tournament_type: "league".to_owned(),
        status: status.map(str::to_owned),
    }
}

fn match_args(home_team_id: i64, away_team_id: i64) -> MatchArgs {
    MatchArgs {
        tournament_id: None,
        home_team_id,
        away_team_id,
        home_team_score: None,
        away_team_score: None,
        match_date: None,
        status: None,
        round: Some("Round 1".to_owned()),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn home_win_updates_both_teams(db: MySqlPool) {
    let ctx = state(db);
    let home = new_team(&ctx, "Lions").await;
    let away = new_team(&ctx, "Tigers").await;
    let m = matches::create(&ctx, match_args(home.id, away.id)).await.unwrap();
    assert_eq!(m.status, MatchStatus::Scheduled);
    assert_eq!(m.home_team_name.as_deref(), Some("Lions"));

    let result = MatchResult::new(3, 1).unwrap();
    let m = matches::record_result(&ctx, m.id, result).await.unwrap();
    assert_eq!(m.status, MatchStatus::Completed);
    assert_eq!((m.home_team_score, m.away_team_score), (Some(3), Some(1)));

    let home = teams::fetch_one(&ctx, home.id).await.unwrap().standings;
    assert_eq!((home.played, home.wins, home.points), (1, 1, 3));
    assert_eq!((home.goals_scored, home.goals_conceded, home.goal_difference), (3, 1, 2));
    assert_eq!(home.last_5_games.to_string(), "W");

    let away = teams::fetch_one(&ctx, away.id).await.unwrap().standings;
    assert_eq!((away.played, away.losses, away.points), (1, 1, 0));
    assert_eq!((away.goals_scored, away.goals_conceded, away.goal_difference), (1, 3, -2));
    assert_eq!(away.last_5_games.to_string(), "L");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn draw_gives_each_team_a_point(db: MySqlPool) {
    let ctx = state(db);
    let home = new_team(&ctx, "Lions").await;
    let away = new_team(&ctx, "Tigers").await;
    let m = matches::create(&ctx, match_args(home.id, away.id)).await.unwrap();

    let result = MatchResult::new(2, 2).unwrap();
    matches::record_result(&ctx, m.id, result).await.unwrap();

    for team_id in [home.id, away.id] {
        let standings = teams::fetch_one(&ctx, team_id).await.unwrap().standings;
        assert_eq!((standings.played, standings.draws, standings.points), (1, 1, 1));
        assert_eq!(standings.goal_difference, 0);
        assert_eq!(standings.last_5_games.to_string(), "D");
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn result_cannot_be_recorded_twice(db: MySqlPool) {
    let ctx = state(db);
    let home = new_team(&ctx, "Lions").await;
    let away = new_team(&ctx, "Tigers").await;
    let m = matches::create(&ctx, match_args(home.id, away.id)).await.unwrap();

    matches::record_result(&ctx, m.id, MatchResult::new(1, 0).unwrap())
        .await
        .unwrap();
    let second = matches::record_result(&ctx, m.id, MatchResult::new(0, 4).unwrap()).await;
    assert_eq!(second.unwrap_err(), AppError::MatchesAlreadyCompleted);

    let home = teams::fetch_one(&ctx, home.id).await.unwrap().standings;
    assert_eq!((home.played, home.points), (1, 3));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn result_for_missing_match_is_not_found(db: MySqlPool) {
    let ctx = state(db);
    let result = matches::record_result(&ctx, 9999, MatchResult::new(1, 1).unwrap()).await;
    assert_eq!(result.unwrap_err(), AppError::MatchesNotFound);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn match_with_unknown_team_is_not_written(db: MySqlPool) {
    let ctx = state(db);
    let home = new_team(&ctx, "Lions").await;

    let created = matches::create(&ctx, match_args(home.id, 9999)).await;
    assert_eq!(created.unwrap_err(), AppError::TeamsNotFound);
    assert!(matches::fetch_all(&ctx).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn rejected_status_leaves_tournament_unchanged(db: MySqlPool) {
    let ctx = state(db);
    let tournament = tournaments::create(&ctx, tournament_args(None)).await.unwrap();
    assert_eq!(tournament.status, TournamentStatus::Upcoming);

    let mut args = tournament_args(Some("Invalid"));
    args.name = "Renamed Cup".to_owned();
    let updated = tournaments::update(&ctx, tournament.id, args).await;
    assert_eq!(updated.unwrap_err(), AppError::TournamentsInvalidStatus);

    let stored = tournaments::fetch_one(&ctx, tournament.id).await.unwrap();
    assert_eq!(stored.name, "Spring Cup");
    assert_eq!(stored.status, TournamentStatus::Upcoming);

    let updated = tournaments::update(&ctx, tournament.id, tournament_args(Some("Ongoing")))
        .await
        .unwrap();
    assert_eq!(updated.status, TournamentStatus::Ongoing);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn deleting_missing_entities_is_not_found(db: MySqlPool) {
    let ctx = state(db);
    assert_eq!(
        tournaments::delete(&ctx, 9999).await.unwrap_err(),
        AppError::TournamentsNotFound
    );
    assert_eq!(teams::delete(&ctx, 9999).await.unwrap_err(), AppError::TeamsNotFound);
    assert_eq!(matches::delete(&ctx, 9999).await.unwrap_err(), AppError::MatchesNotFound);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn teams_are_listed_by_points_then_goal_difference(db: MySqlPool) {
    let ctx = state(db);
    let leaders = new_team(&ctx, "Leaders").await;
    let chasers = new_team(&ctx, "Chasers").await;
    let trailers = new_team(&ctx, "Trailers").await;

    let m = matches::create(&ctx, match_args(leaders.id, trailers.id)).await.unwrap();
    matches::record_result(&ctx, m.id, MatchResult::new(5, 0).unwrap())
        .await
        .unwrap();
    let m = matches::create(&ctx, match_args(chasers.id, trailers.id)).await.unwrap();
    matches::record_result(&ctx, m.id, MatchResult::new(1, 0).unwrap())
        .await
        .unwrap();

    let order: Vec<_> = teams::fetch_all(&ctx)
        .await
        .unwrap()
        .into_iter()
        .map(|team| team.name)
        .collect();
    assert_eq!(order, ["Leaders", "Chasers", "Trailers"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn tournament_membership_is_idempotent(db: MySqlPool) {
    let ctx = state(db);
    let tournament = tournaments::create(&ctx, tournament_args(None)).await.unwrap();
    let team = new_team(&ctx, "Lions").await;
    new_team(&ctx, "Outsiders").await;

    teams::add_to_tournament(&ctx, team.id, tournament.id).await.unwrap();
    teams::add_to_tournament(&ctx, team.id, tournament.id).await.unwrap();

    let members = teams::fetch_by_tournament(&ctx, tournament.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, team.id);

    assert_eq!(
        teams::add_to_tournament(&ctx, team.id, 9999).await.unwrap_err(),
        AppError::TournamentsNotFound
    );

    teams::remove_from_tournament(&ctx, team.id, tournament.id).await.unwrap();
    teams::remove_from_tournament(&ctx, team.id, tournament.id).await.unwrap();
    assert!(teams::fetch_by_tournament(&ctx, tournament.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn team_update_derives_goal_difference(db: MySqlPool) {
    let ctx = state(db);
    let team = new_team(&ctx, "Lions").await;
    let args = TeamArgs {
        name: "Lions".to_owned(),
        played: 3,
        wins: 2,
        losses: 1,
        goals_scored: 7,
        goals_conceded: 4,
        last_5_games: "WLW".to_owned(),
        points: 6,
        ..Default::default()
    };
    let updated = teams::update(&ctx, team.id, args).await.unwrap();
    assert_eq!(updated.standings.goal_difference, 3);

    let stored = teams::fetch_one(&ctx, team.id).await.unwrap();
    assert_eq!(stored.standings, updated.standings);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn update_without_status_keeps_tournament_status(db: MySqlPool) {
    let ctx = state(db);
    let tournament = tournaments::create(&ctx, tournament_args(Some("ongoing")))
        .await
        .unwrap();
    assert_eq!(tournament.status, TournamentStatus::Ongoing);

    let mut args = tournament_args(None);
    args.name = "Renamed Cup".to_owned();
    let updated = tournaments::update(&ctx, tournament.id, args).await.unwrap();
    assert_eq!(updated.name, "Renamed Cup");
    assert_eq!(updated.status, TournamentStatus::Ongoing);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn update_cannot_complete_a_match(db: MySqlPool) {
    let ctx = state(db);
    let home = new_team(&ctx, "Lions").await;
    let away = new_team(&ctx, "Tigers").await;
    let m = matches::create(&ctx, match_args(home.id, away.id)).await.unwrap();

    let mut args = match_args(home.id, away.id);
    args.status = Some("completed".to_owned());
    let updated = matches::update(&ctx, m.id, args).await;
    assert_eq!(updated.unwrap_err(), AppError::MatchesInvalidTransition);

    let mut args = match_args(home.id, away.id);
    args.home_team_score = Some(2);
    args.away_team_score = Some(0);
    let updated = matches::update(&ctx, m.id, args).await;
    assert_eq!(updated.unwrap_err(), AppError::MatchesInvalidTransition);

    let stored = matches::fetch_one(&ctx, m.id).await.unwrap();
    assert_eq!(stored.status, MatchStatus::Scheduled);
    assert_eq!((stored.home_team_score, stored.away_team_score), (None, None));

    let m = matches::record_result(&ctx, m.id, MatchResult::new(2, 0).unwrap())
        .await
        .unwrap();
    assert_eq!(m.status, MatchStatus::Completed);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn update_cannot_reopen_a_completed_match(db: MySqlPool) {
    let ctx = state(db);
    let home = new_team(&ctx, "Lions").await;
    let away = new_team(&ctx, "Tigers").await;
    let m = matches::create(&ctx, match_args(home.id, away.id)).await.unwrap();
    matches::record_result(&ctx, m.id, MatchResult::new(1, 0).unwrap())
        .await
        .unwrap();

    let mut args = match_args(home.id, away.id);
    args.status = Some("scheduled".to_owned());
    let updated = matches::update(&ctx, m.id, args).await;
    assert_eq!(updated.unwrap_err(), AppError::MatchesAlreadyCompleted);

    let second = matches::record_result(&ctx, m.id, MatchResult::new(1, 0).unwrap()).await;
    assert_eq!(second.unwrap_err(), AppError::MatchesAlreadyCompleted);
    let standings = teams::fetch_one(&ctx, home.id).await.unwrap().standings;
    assert_eq!((standings.played, standings.points), (1, 3));

    let mut args = match_args(home.id, away.id);
    args.round = Some("Final".to_owned());
    let updated = matches::update(&ctx, m.id, args).await.unwrap();
    assert_eq!(updated.status, MatchStatus::Completed);
    assert_eq!(updated.round.as_deref(), Some("Final"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn failed_cascade_rolls_back_match_and_teams(db: MySqlPool) {
    let ctx = state(db);
    let home = new_team(&ctx, "Lions").await;
    let away = new_team(&ctx, "Tigers").await;
    let m = matches::create(&ctx, match_args(home.id, away.id)).await.unwrap();

    // An unreadable form makes the away side of the cascade fail after the home side ran.
    sqlx::query("UPDATE teams SET last_5_games = 'XX' WHERE id = ?")
        .bind(away.id)
        .execute(&ctx.db)
        .await
        .unwrap();

    let recorded = matches::record_result(&ctx, m.id, MatchResult::new(3, 1).unwrap()).await;
    assert_eq!(recorded.unwrap_err(), AppError::Unexpected);

    let stored = matches::fetch_one(&ctx, m.id).await.unwrap();
    assert_eq!(stored.status, MatchStatus::Scheduled);
    assert_eq!((stored.home_team_score, stored.away_team_score), (None, None));

    let home_after = teams::fetch_one(&ctx, home.id).await.unwrap();
    assert_eq!(home_after.standings, home.standings);
}
