use crate::entities::matches::Match;
use sqlx::MySqlExecutor;

const TABLE_NAME: &str = "matches";
const READ_FIELDS: &str = r#"
id, tournament_id, home_team_id, away_team_id, home_team_score, away_team_score,
match_date, status, round, created_at, updated_at"#;
const JOINED_READ_FIELDS: &str = r#"
m.id, m.tournament_id, m.home_team_id, m.away_team_id, m.home_team_score,
m.away_team_score, m.match_date, m.status, m.round, m.created_at, m.updated_at,
home.name AS home_team_name, away.name AS away_team_name"#;
const JOINED_FROM: &str = const_str::concat!(
    " FROM ",
    TABLE_NAME,
    " m LEFT JOIN teams home ON home.id = m.home_team_id",
    " LEFT JOIN teams away ON away.id = m.away_team_id"
);

pub async fn create<'e, E: MySqlExecutor<'e>>(db: E, m: &Match) -> sqlx::Result<i64> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (tournament_id, home_team_id, away_team_id, home_team_score, away_team_score, ",
        "match_date, status, round) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
    );
    let res = sqlx::query(QUERY)
        .bind(m.tournament_id)
        .bind(m.home_team_id)
        .bind(m.away_team_id)
        .bind(m.home_team_score)
        .bind(m.away_team_score)
        .bind(m.match_date)
        .bind(&m.status)
        .bind(&m.round)
        .execute(db)
        .await?;
    Ok(res.last_insert_id() as _)
}

/// Fetches a match along with both team names.
pub async fn fetch_one<'e, E: MySqlExecutor<'e>>(db: E, id: i64) -> sqlx::Result<Match> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        JOINED_READ_FIELDS,
        JOINED_FROM,
        " WHERE m.id = ?"
    );
    sqlx::query_as(QUERY).bind(id).fetch_one(db).await
}

/// Locks the match row until the surrounding transaction ends.
/// Team names are not loaded.
pub async fn fetch_one_for_update<'e, E: MySqlExecutor<'e>>(
    db: E,
    id: i64,
) -> sqlx::Result<Match> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ? FOR UPDATE"
    );
    sqlx::query_as(QUERY).bind(id).fetch_one(db).await
}

pub async fn fetch_all<'e, E: MySqlExecutor<'e>>(db: E) -> sqlx::Result<Vec<Match>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        JOINED_READ_FIELDS,
        JOINED_FROM,
        " ORDER BY m.match_date, m.id"
    );
    sqlx::query_as(QUERY).fetch_all(db).await
}

pub async fn fetch_by_tournament<'e, E: MySqlExecutor<'e>>(
    db: E,
    tournament_id: i64,
) -> sqlx::Result<Vec<Match>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        JOINED_READ_FIELDS,
        JOINED_FROM,
        " WHERE m.tournament_id = ? ORDER BY m.match_date, m.id"
    );
    sqlx::query_as(QUERY)
        .bind(tournament_id)
        .fetch_all(db)
        .await
}

pub async fn fetch_by_team<'e, E: MySqlExecutor<'e>>(
    db: E,
    team_id: i64,
) -> sqlx::Result<Vec<Match>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        JOINED_READ_FIELDS,
        JOINED_FROM,
        " WHERE m.home_team_id = ? OR m.away_team_id = ? ORDER BY m.match_date, m.id"
    );
    sqlx::query_as(QUERY)
        .bind(team_id)
        .bind(team_id)
        .fetch_all(db)
        .await
}

pub async fn update<'e, E: MySqlExecutor<'e>>(db: E, m: &Match) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET tournament_id = ?, home_team_id = ?, away_team_id = ?, home_team_score = ?, ",
        "away_team_score = ?, match_date = ?, status = ?, round = ?, ",
        "updated_at = CURRENT_TIMESTAMP WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(m.tournament_id)
        .bind(m.home_team_id)
        .bind(m.away_team_id)
        .bind(m.home_team_score)
        .bind(m.away_team_score)
        .bind(m.match_date)
        .bind(&m.status)
        .bind(&m.round)
        .bind(m.id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete<'e, E: MySqlExecutor<'e>>(db: E, id: i64) -> sqlx::Result<u64> {
    const QUERY: &str = const_str::concat!("DELETE FROM ", TABLE_NAME, " WHERE id = ?");
    let res = sqlx::query(QUERY).bind(id).execute(db).await?;
    Ok(res.rows_affected())
}
