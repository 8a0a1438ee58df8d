use crate::common::context::Context;
use crate::common::init;
use crate::common::state::AppState;
use crate::settings::AppSettings;
use axum::Router;
use axum::extract::{DefaultBodyLimit, FromRequestParts};
use axum::http::request::Parts;
use axum::routing::{get, patch, post, put};
use sqlx::{MySql, Pool};
use std::convert::Infallible;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub mod matches;
pub mod teams;
pub mod tournaments;

/// Room for the multipart framing and the `team` part next to the logo itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub struct RequestContext {
    pub db: Pool<MySql>,
    pub upload_dir: Arc<Path>,
}

pub fn router(logo_max_bytes: usize) -> Router<AppState> {
    let logo_limit = logo_max_bytes + MULTIPART_OVERHEAD_BYTES;
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/tournaments",
            post(tournaments::create_tournament).get(tournaments::fetch_tournaments),
        )
        .route(
            "/api/tournaments/{id}",
            get(tournaments::fetch_tournament)
                .put(tournaments::update_tournament)
                .delete(tournaments::delete_tournament),
        )
        .route("/api/teams", post(teams::create_team).get(teams::fetch_teams))
        .route(
            "/api/teams/with-logo",
            post(teams::create_team_with_logo).layer(DefaultBodyLimit::max(logo_limit)),
        )
        .route(
            "/api/teams/{id}",
            get(teams::fetch_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route(
            "/api/teams/{id}/logo",
            put(teams::update_team_logo).layer(DefaultBodyLimit::max(logo_limit)),
        )
        .route(
            "/api/teams/{id}/tournament/{tournament_id}",
            post(teams::add_to_tournament).delete(teams::remove_from_tournament),
        )
        .route(
            "/api/teams/tournament/{tournament_id}",
            get(teams::fetch_tournament_teams),
        )
        .route("/api/teams/team-images/{filename}", get(teams::fetch_team_image))
        .route(
            "/api/matches",
            post(matches::create_match).get(matches::fetch_matches),
        )
        .route(
            "/api/matches/{id}",
            get(matches::fetch_match)
                .put(matches::update_match)
                .delete(matches::delete_match),
        )
        .route("/api/matches/{id}/result", patch(matches::record_result))
        .route(
            "/api/matches/tournament/{tournament_id}",
            get(matches::fetch_tournament_matches),
        )
        .route("/api/matches/team/{team_id}", get(matches::fetch_team_matches))
}

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let state = init::initialize_state(settings).await?;
    let app = router(settings.logo_max_bytes)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind((settings.app_host, settings.app_port)).await?;
    info!("Serving API on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("API shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn health() -> &'static str {
    "ok"
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self {
            db: state.db.clone(),
            upload_dir: state.upload_dir.clone(),
        })
    }
}

impl Context for RequestContext {
    fn db(&self) -> &Pool<MySql> {
        &self.db
    }

    fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }
}
