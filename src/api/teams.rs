use crate::api::RequestContext;
use crate::common::axum_json::JsonBody;
use crate::common::error::{AppError, ServiceResponse, ServiceResult};
use crate::models::logos::LogoUpload;
use crate::models::teams::{Team, TeamArgs};
use crate::usecases::{logos, teams};
use axum::Json;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, Path};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tracing::debug;

fn decoding_failed(e: MultipartError) -> AppError {
    debug!("Failed to decode multipart request: {e}");
    AppError::DecodingRequestFailed
}

async fn read_logo(field: Field<'_>) -> ServiceResult<LogoUpload> {
    let original_filename = field.file_name().map(str::to_owned);
    let bytes = field.bytes().await.map_err(decoding_failed)?;
    Ok(LogoUpload {
        original_filename,
        bytes,
    })
}

pub async fn create_team(
    ctx: RequestContext,
    JsonBody(args): JsonBody<TeamArgs>,
) -> ServiceResult<(StatusCode, Json<Team>)> {
    let team = teams::create(&ctx, args).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// Multipart form: `team` holds the JSON body, `logo` the optional image.
pub async fn create_team_with_logo(
    ctx: RequestContext,
    mut multipart: Multipart,
) -> ServiceResult<(StatusCode, Json<Team>)> {
    let mut args = None;
    let mut logo = None;
    while let Some(field) = multipart.next_field().await.map_err(decoding_failed)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("team") => {
                let bytes = field.bytes().await.map_err(decoding_failed)?;
                let team_args = serde_json::from_slice::<TeamArgs>(&bytes).map_err(|e| {
                    debug!("Failed to decode team part: {e}");
                    AppError::DecodingRequestFailed
                })?;
                args = Some(team_args);
            }
            // Forms submitted without a file still send an empty part.
            Some("logo") => {
                let upload = read_logo(field).await?;
                if !upload.bytes.is_empty() {
                    logo = Some(upload);
                }
            }
            _ => {}
        }
    }
    let args = args.ok_or(AppError::DecodingRequestFailed)?;
    let team = teams::create_with_logo(&ctx, args, logo).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn fetch_teams(ctx: RequestContext) -> ServiceResponse<Vec<Team>> {
    let teams = teams::fetch_all(&ctx).await?;
    Ok(Json(teams))
}

pub async fn fetch_team(ctx: RequestContext, Path(team_id): Path<i64>) -> ServiceResponse<Team> {
    let team = teams::fetch_one(&ctx, team_id).await?;
    Ok(Json(team))
}

pub async fn fetch_tournament_teams(
    ctx: RequestContext,
    Path(tournament_id): Path<i64>,
) -> ServiceResponse<Vec<Team>> {
    let teams = teams::fetch_by_tournament(&ctx, tournament_id).await?;
    Ok(Json(teams))
}

pub async fn update_team(
    ctx: RequestContext,
    Path(team_id): Path<i64>,
    JsonBody(args): JsonBody<TeamArgs>,
) -> ServiceResponse<Team> {
    let team = teams::update(&ctx, team_id, args).await?;
    Ok(Json(team))
}

pub async fn update_team_logo(
    ctx: RequestContext,
    Path(team_id): Path<i64>,
    mut multipart: Multipart,
) -> ServiceResponse<Team> {
    let mut logo = None;
    while let Some(field) = multipart.next_field().await.map_err(decoding_failed)? {
        if field.name() == Some("logo") {
            logo = Some(read_logo(field).await?);
        }
    }
    let logo = logo.ok_or(AppError::LogosMissing)?;
    let team = teams::update_logo(&ctx, team_id, logo).await?;
    Ok(Json(team))
}

pub async fn delete_team(
    ctx: RequestContext,
    Path(team_id): Path<i64>,
) -> ServiceResult<StatusCode> {
    teams::delete(&ctx, team_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_to_tournament(
    ctx: RequestContext,
    Path((team_id, tournament_id)): Path<(i64, i64)>,
) -> ServiceResult<StatusCode> {
    teams::add_to_tournament(&ctx, team_id, tournament_id).await?;
    Ok(StatusCode::OK)
}

pub async fn remove_from_tournament(
    ctx: RequestContext,
    Path((team_id, tournament_id)): Path<(i64, i64)>,
) -> ServiceResult<StatusCode> {
    teams::remove_from_tournament(&ctx, team_id, tournament_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn fetch_team_image(
    ctx: RequestContext,
    Path(filename): Path<String>,
) -> ServiceResult<impl IntoResponse> {
    let logo = logos::fetch(&ctx, &filename).await?;
    Ok(([(header::CONTENT_TYPE, logo.content_type)], logo.bytes))
}
