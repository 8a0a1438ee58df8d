use crate::api::RequestContext;
use crate::common::axum_json::JsonBody;
use crate::common::error::{ServiceResponse, ServiceResult};
use crate::models::tournaments::{Tournament, TournamentArgs};
use crate::usecases::tournaments;
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;

pub async fn create_tournament(
    ctx: RequestContext,
    JsonBody(args): JsonBody<TournamentArgs>,
) -> ServiceResult<(StatusCode, Json<Tournament>)> {
    let tournament = tournaments::create(&ctx, args).await?;
    Ok((StatusCode::CREATED, Json(tournament)))
}

pub async fn fetch_tournaments(ctx: RequestContext) -> ServiceResponse<Vec<Tournament>> {
    let tournaments = tournaments::fetch_all(&ctx).await?;
    Ok(Json(tournaments))
}

pub async fn fetch_tournament(
    ctx: RequestContext,
    Path(tournament_id): Path<i64>,
) -> ServiceResponse<Tournament> {
    let tournament = tournaments::fetch_one(&ctx, tournament_id).await?;
    Ok(Json(tournament))
}

pub async fn update_tournament(
    ctx: RequestContext,
    Path(tournament_id): Path<i64>,
    JsonBody(args): JsonBody<TournamentArgs>,
) -> ServiceResponse<Tournament> {
    let tournament = tournaments::update(&ctx, tournament_id, args).await?;
    Ok(Json(tournament))
}

pub async fn delete_tournament(
    ctx: RequestContext,
    Path(tournament_id): Path<i64>,
) -> ServiceResult<StatusCode> {
    tournaments::delete(&ctx, tournament_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
