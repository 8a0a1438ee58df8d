use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::entities::matches::Match as Entity;
use crate::models::matches::{Match, MatchArgs, MatchStatus};
use crate::models::standings::MatchResult;
use crate::repositories::{matches, teams as teams_repo};
use crate::usecases::{teams, tournaments};
use anyhow::anyhow;
use chrono::{Local, TimeDelta, Utc};
use tracing::info;

const DEFAULT_SCHEDULE_DAYS: i64 = 7;

async fn validate_participants<C: Context>(ctx: &C, args: &MatchArgs) -> ServiceResult<()> {
    if args.home_team_id == args.away_team_id {
        return Err(AppError::MatchesSameTeam);
    }
    teams::ensure_exists(ctx, args.home_team_id).await?;
    teams::ensure_exists(ctx, args.away_team_id).await?;
    if let Some(tournament_id) = args.tournament_id {
        tournaments::ensure_exists(ctx, tournament_id).await?;
    }
    Ok(())
}

/// New matches always start out scheduled and without a score.
pub async fn create<C: Context>(ctx: &C, args: MatchArgs) -> ServiceResult<Match> {
    validate_participants(ctx, &args).await?;
    let match_date = args.match_date.unwrap_or_else(|| {
        Local::now().naive_local() + TimeDelta::days(DEFAULT_SCHEDULE_DAYS)
    });
    let now = Utc::now();
    let new_match = Entity {
        id: 0,
        tournament_id: args.tournament_id,
        home_team_id: args.home_team_id,
        away_team_id: args.away_team_id,
        home_team_score: None,
        away_team_score: None,
        match_date,
        status: MatchStatus::Scheduled.as_str().to_owned(),
        round: args.round,
        created_at: now,
        updated_at: now,
        home_team_name: None,
        away_team_name: None,
    };
    let match_id = matches::create(ctx.db(), &new_match).await?;
    info!(
        match_id,
        home_team_id = new_match.home_team_id,
        away_team_id = new_match.away_team_id,
        "Created match"
    );
    fetch_one(ctx, match_id).await
}

pub async fn fetch_one<C: Context>(ctx: &C, match_id: i64) -> ServiceResult<Match> {
    match matches::fetch_one(ctx.db(), match_id).await {
        Ok(m) => Match::try_from(m),
        Err(sqlx::Error::RowNotFound) => Err(AppError::MatchesNotFound),
        Err(e) => unexpected(e),
    }
}

/// Ordered by match date.
pub async fn fetch_all<C: Context>(ctx: &C) -> ServiceResult<Vec<Match>> {
    match matches::fetch_all(ctx.db()).await {
        Ok(matches) => matches.into_iter().map(Match::try_from).collect(),
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_by_tournament<C: Context>(
    ctx: &C,
    tournament_id: i64,
) -> ServiceResult<Vec<Match>> {
    match matches::fetch_by_tournament(ctx.db(), tournament_id).await {
        Ok(matches) => matches.into_iter().map(Match::try_from).collect(),
        Err(e) => unexpected(e),
    }
}

/// Matches the team plays in, home or away.
pub async fn fetch_by_team<C: Context>(ctx: &C, team_id: i64) -> ServiceResult<Vec<Match>> {
    match matches::fetch_by_team(ctx.db(), team_id).await {
        Ok(matches) => matches.into_iter().map(Match::try_from).collect(),
        Err(e) => unexpected(e),
    }
}

/// Scores are only replaced when both are given. Team statistics are not touched,
/// so completing or reopening a match goes through [`record_result`] instead.
pub async fn update<C: Context>(ctx: &C, match_id: i64, args: MatchArgs) -> ServiceResult<Match> {
    let mut existing = match matches::fetch_one(ctx.db(), match_id).await {
        Ok(m) => m,
        Err(sqlx::Error::RowNotFound) => return Err(AppError::MatchesNotFound),
        Err(e) => return unexpected(e),
    };
    validate_participants(ctx, &args).await?;
    let status = args.status()?;
    let result = args.result()?;
    let current = existing.status.parse::<MatchStatus>().map_err(|_| {
        anyhow!(
            "match {match_id} has invalid stored status {:?}",
            existing.status
        )
    })?;
    current.check_update(status, result.is_some())?;

    existing.tournament_id = args.tournament_id;
    existing.home_team_id = args.home_team_id;
    existing.away_team_id = args.away_team_id;
    if let Some(match_date) = args.match_date {
        existing.match_date = match_date;
    }
    if let Some(status) = status {
        existing.status = status.as_str().to_owned();
    }
    existing.round = args.round;
    if let Some(result) = result {
        existing.home_team_score = Some(result.home_score);
        existing.away_team_score = Some(result.away_score);
    }
    matches::update(ctx.db(), &existing).await?;
    fetch_one(ctx, match_id).await
}

pub async fn delete<C: Context>(ctx: &C, match_id: i64) -> ServiceResult<()> {
    match matches::delete(ctx.db(), match_id).await {
        Ok(0) => Err(AppError::MatchesNotFound),
        Ok(_) => {
            info!(match_id, "Deleted match");
            Ok(())
        }
        Err(e) => unexpected(e),
    }
}

/// Stores the final score and folds it into both teams' standings.
///
/// The match row and both team rows are locked and written in one
/// transaction; any failure rolls all three back.
pub async fn record_result<C: Context>(
    ctx: &C,
    match_id: i64,
    result: MatchResult,
) -> ServiceResult<Match> {
    let mut tx = ctx.db().begin().await?;

    let mut m = match matches::fetch_one_for_update(&mut *tx, match_id).await {
        Ok(m) => m,
        Err(sqlx::Error::RowNotFound) => return Err(AppError::MatchesNotFound),
        Err(e) => return unexpected(e),
    };
    if m.status == MatchStatus::Completed.as_str() {
        return Err(AppError::MatchesAlreadyCompleted);
    }

    m.home_team_score = Some(result.home_score);
    m.away_team_score = Some(result.away_score);
    m.status = MatchStatus::Completed.as_str().to_owned();
    matches::update(&mut *tx, &m).await?;

    // Lock both teams in id order so concurrent results cannot deadlock.
    let mut team_ids = [m.home_team_id, m.away_team_id];
    team_ids.sort_unstable();
    for team_id in team_ids {
        match teams_repo::fetch_one_for_update(&mut *tx, team_id).await {
            Ok(_) => {}
            Err(sqlx::Error::RowNotFound) => return Err(AppError::TeamsNotFound),
            Err(e) => return unexpected(e),
        }
    }

    let (home_outcome, away_outcome) = result.outcomes();
    let home = teams::record_outcome(
        &mut *tx,
        m.home_team_id,
        result.home_score,
        result.away_score,
        home_outcome,
    )
    .await?;
    let away = teams::record_outcome(
        &mut *tx,
        m.away_team_id,
        result.away_score,
        result.home_score,
        away_outcome,
    )
    .await?;

    tx.commit().await?;
    info!(
        match_id,
        home_score = result.home_score,
        away_score = result.away_score,
        home_points = home.standings.points,
        away_points = away.standings.points,
        "Recorded match result"
    );
    fetch_one(ctx, match_id).await
}
