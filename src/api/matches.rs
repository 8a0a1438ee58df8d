use crate::api::RequestContext;
use crate::common::axum_json::JsonBody;
use crate::common::error::{ServiceResponse, ServiceResult};
use crate::models::matches::{Match, MatchArgs, ResultArgs};
use crate::models::standings::MatchResult;
use crate::usecases::matches;
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;

pub async fn create_match(
    ctx: RequestContext,
    JsonBody(args): JsonBody<MatchArgs>,
) -> ServiceResult<(StatusCode, Json<Match>)> {
    let m = matches::create(&ctx, args).await?;
    Ok((StatusCode::CREATED, Json(m)))
}

pub async fn fetch_matches(ctx: RequestContext) -> ServiceResponse<Vec<Match>> {
    let matches = matches::fetch_all(&ctx).await?;
    Ok(Json(matches))
}

pub async fn fetch_match(ctx: RequestContext, Path(match_id): Path<i64>) -> ServiceResponse<Match> {
    let m = matches::fetch_one(&ctx, match_id).await?;
    Ok(Json(m))
}

pub async fn fetch_tournament_matches(
    ctx: RequestContext,
    Path(tournament_id): Path<i64>,
) -> ServiceResponse<Vec<Match>> {
    let matches = matches::fetch_by_tournament(&ctx, tournament_id).await?;
    Ok(Json(matches))
}

pub async fn fetch_team_matches(
    ctx: RequestContext,
    Path(team_id): Path<i64>,
) -> ServiceResponse<Vec<Match>> {
    let matches = matches::fetch_by_team(&ctx, team_id).await?;
    Ok(Json(matches))
}

pub async fn update_match(
    ctx: RequestContext,
    Path(match_id): Path<i64>,
    JsonBody(args): JsonBody<MatchArgs>,
) -> ServiceResponse<Match> {
    let m = matches::update(&ctx, match_id, args).await?;
    Ok(Json(m))
}

pub async fn delete_match(
    ctx: RequestContext,
    Path(match_id): Path<i64>,
) -> ServiceResult<StatusCode> {
    matches::delete(&ctx, match_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Completes the match and updates both teams' standings.
pub async fn record_result(
    ctx: RequestContext,
    Path(match_id): Path<i64>,
    JsonBody(args): JsonBody<ResultArgs>,
) -> ServiceResponse<Match> {
    let result = MatchResult::try_from(args)?;
    let m = matches::record_result(&ctx, match_id, result).await?;
    Ok(Json(m))
}
