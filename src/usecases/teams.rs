use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::models::logos::LogoUpload;
use crate::models::standings::Outcome;
use crate::models::teams::{Team, TeamArgs};
use crate::repositories::{teams, tournament_teams};
use crate::usecases::{logos, tournaments};
use sqlx::MySqlConnection;
use tracing::{debug, info};

pub async fn create<C: Context>(ctx: &C, args: TeamArgs) -> ServiceResult<Team> {
    let standings = args.initial_standings()?;
    let team = Team {
        id: 0,
        name: args.name,
        standings,
        logo_path: args.logo_path,
    };
    let team_id = teams::create(ctx.db(), &team.to_entity()).await?;
    info!(team_id, name = %team.name, "Created team");
    Ok(Team { id: team_id, ..team })
}

pub async fn create_with_logo<C: Context>(
    ctx: &C,
    mut args: TeamArgs,
    logo: Option<LogoUpload>,
) -> ServiceResult<Team> {
    let logo_path = match logo {
        Some(upload) => Some(logos::save(ctx, upload).await?.logo_path()),
        None => None,
    };
    if let Some(logo_path) = &logo_path {
        args.logo_path = Some(logo_path.clone());
    }
    match create(ctx, args).await {
        Ok(team) => Ok(team),
        Err(e) => {
            if let Some(logo_path) = logo_path {
                logos::remove(ctx, &logo_path).await;
            }
            Err(e)
        }
    }
}

pub async fn fetch_one<C: Context>(ctx: &C, team_id: i64) -> ServiceResult<Team> {
    match teams::fetch_one(ctx.db(), team_id).await {
        Ok(team) => Team::try_from(team),
        Err(sqlx::Error::RowNotFound) => Err(AppError::TeamsNotFound),
        Err(e) => unexpected(e),
    }
}

/// Ordered by points, then goal difference, both descending.
pub async fn fetch_all<C: Context>(ctx: &C) -> ServiceResult<Vec<Team>> {
    match teams::fetch_all(ctx.db()).await {
        Ok(teams) => teams.into_iter().map(Team::try_from).collect(),
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_by_tournament<C: Context>(
    ctx: &C,
    tournament_id: i64,
) -> ServiceResult<Vec<Team>> {
    match teams::fetch_by_tournament(ctx.db(), tournament_id).await {
        Ok(teams) => teams.into_iter().map(Team::try_from).collect(),
        Err(e) => unexpected(e),
    }
}

pub async fn ensure_exists<C: Context>(ctx: &C, team_id: i64) -> ServiceResult<()> {
    match teams::exists(ctx.db(), team_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(AppError::TeamsNotFound),
        Err(e) => unexpected(e),
    }
}

/// Replaces the name and statistics. The logo is only changed through [`update_logo`].
pub async fn update<C: Context>(ctx: &C, team_id: i64, args: TeamArgs) -> ServiceResult<Team> {
    let existing = fetch_one(ctx, team_id).await?;
    let standings = args.standings()?;
    let team = Team {
        id: team_id,
        name: args.name,
        standings,
        logo_path: existing.logo_path,
    };
    teams::update(ctx.db(), &team.to_entity()).await?;
    Ok(team)
}

pub async fn update_logo<C: Context>(
    ctx: &C,
    team_id: i64,
    upload: LogoUpload,
) -> ServiceResult<Team> {
    let mut team = fetch_one(ctx, team_id).await?;
    let logo_path = logos::save(ctx, upload).await?.logo_path();
    if let Err(e) = teams::update_logo_path(ctx.db(), team_id, &logo_path).await {
        logos::remove(ctx, &logo_path).await;
        return unexpected(e);
    }
    if let Some(previous) = team.logo_path.replace(logo_path) {
        logos::remove(ctx, &previous).await;
    }
    Ok(team)
}

pub async fn delete<C: Context>(ctx: &C, team_id: i64) -> ServiceResult<()> {
    let team = fetch_one(ctx, team_id).await?;
    match teams::delete(ctx.db(), team_id).await {
        Ok(0) => return Err(AppError::TeamsNotFound),
        Ok(_) => info!(team_id, "Deleted team"),
        Err(e) => return unexpected(e),
    }
    if let Some(logo_path) = team.logo_path {
        logos::remove(ctx, &logo_path).await;
    }
    Ok(())
}

pub async fn add_to_tournament<C: Context>(
    ctx: &C,
    team_id: i64,
    tournament_id: i64,
) -> ServiceResult<()> {
    ensure_exists(ctx, team_id).await?;
    tournaments::ensure_exists(ctx, tournament_id).await?;
    match tournament_teams::add(ctx.db(), tournament_id, team_id).await {
        Ok(true) => {
            info!(team_id, tournament_id, "Added team to tournament");
            Ok(())
        }
        Ok(false) => {
            debug!(team_id, tournament_id, "Team already in tournament");
            Ok(())
        }
        Err(e) => unexpected(e),
    }
}

pub async fn remove_from_tournament<C: Context>(
    ctx: &C,
    team_id: i64,
    tournament_id: i64,
) -> ServiceResult<()> {
    match tournament_teams::remove(ctx.db(), tournament_id, team_id).await {
        Ok(removed) => {
            debug!(team_id, tournament_id, removed, "Removed team from tournament");
            Ok(())
        }
        Err(e) => unexpected(e),
    }
}

/// Locks the team row, folds one match into its statistics and stores it.
/// Must run inside the transaction that records the match result.
pub async fn record_outcome(
    conn: &mut MySqlConnection,
    team_id: i64,
    goals_for: i32,
    goals_against: i32,
    outcome: Outcome,
) -> ServiceResult<Team> {
    let mut team = match teams::fetch_one_for_update(&mut *conn, team_id).await {
        Ok(team) => Team::try_from(team)?,
        Err(sqlx::Error::RowNotFound) => return Err(AppError::TeamsNotFound),
        Err(e) => return unexpected(e),
    };
    team.standings.record(goals_for, goals_against, outcome)?;
    teams::update(&mut *conn, &team.to_entity()).await?;
    debug!(
        team_id,
        outcome = %outcome.code(),
        points = team.standings.points,
        form = %team.standings.last_5_games,
        "Recorded match outcome"
    );
    Ok(team)
}
