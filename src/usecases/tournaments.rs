use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::entities::tournaments::Tournament as Entity;
use crate::models::tournaments::{Tournament, TournamentArgs};
use crate::repositories::tournaments;
use chrono::Utc;
use tracing::info;

/// An omitted status means `upcoming`.
pub async fn create<C: Context>(ctx: &C, args: TournamentArgs) -> ServiceResult<Tournament> {
    let status = args.status()?.unwrap_or_default();
    let now = Utc::now();
    let tournament = Entity {
        id: 0,
        name: args.name,
        start_date: args.start_date,
        end_date: args.end_date,
        tournament_type: args.tournament_type,
        status: status.as_str().to_owned(),
        created_at: now,
        updated_at: now,
    };
    let tournament_id = tournaments::create(ctx.db(), &tournament).await?;
    info!(tournament_id, name = %tournament.name, "Created tournament");
    fetch_one(ctx, tournament_id).await
}

pub async fn fetch_one<C: Context>(ctx: &C, tournament_id: i64) -> ServiceResult<Tournament> {
    match tournaments::fetch_one(ctx.db(), tournament_id).await {
        Ok(tournament) => Tournament::try_from(tournament),
        Err(sqlx::Error::RowNotFound) => Err(AppError::TournamentsNotFound),
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_all<C: Context>(ctx: &C) -> ServiceResult<Vec<Tournament>> {
    match tournaments::fetch_all(ctx.db()).await {
        Ok(tournaments) => tournaments.into_iter().map(Tournament::try_from).collect(),
        Err(e) => unexpected(e),
    }
}

pub async fn ensure_exists<C: Context>(ctx: &C, tournament_id: i64) -> ServiceResult<()> {
    match tournaments::exists(ctx.db(), tournament_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(AppError::TournamentsNotFound),
        Err(e) => unexpected(e),
    }
}

/// An omitted status keeps the stored one.
pub async fn update<C: Context>(
    ctx: &C,
    tournament_id: i64,
    args: TournamentArgs,
) -> ServiceResult<Tournament> {
    let mut tournament = match tournaments::fetch_one(ctx.db(), tournament_id).await {
        Ok(tournament) => tournament,
        Err(sqlx::Error::RowNotFound) => return Err(AppError::TournamentsNotFound),
        Err(e) => return unexpected(e),
    };
    let status = args.status()?;

    tournament.name = args.name;
    tournament.start_date = args.start_date;
    tournament.end_date = args.end_date;
    tournament.tournament_type = args.tournament_type;
    if let Some(status) = status {
        tournament.status = status.as_str().to_owned();
    }
    tournaments::update(ctx.db(), &tournament).await?;
    fetch_one(ctx, tournament_id).await
}

pub async fn delete<C: Context>(ctx: &C, tournament_id: i64) -> ServiceResult<()> {
    match tournaments::delete(ctx.db(), tournament_id).await {
        Ok(0) => Err(AppError::TournamentsNotFound),
        Ok(_) => {
            info!(tournament_id, "Deleted tournament");
            Ok(())
        }
        Err(e) => unexpected(e),
    }
}
