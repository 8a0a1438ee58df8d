use crate::entities::teams::Team;
use sqlx::MySqlExecutor;

const TABLE_NAME: &str = "teams";
const READ_FIELDS: &str = r#"
id, name, played, wins, draws, losses, goal_difference, goals_scored,
goals_conceded, last_5_games, points, logo_path"#;
const STANDINGS_ORDER: &str = " ORDER BY points DESC, goal_difference DESC, id";

pub async fn create<'e, E: MySqlExecutor<'e>>(db: E, team: &Team) -> sqlx::Result<i64> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (name, played, wins, draws, losses, goal_difference, goals_scored, ",
        "goals_conceded, last_5_games, points, logo_path) ",
        "VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    );
    let res = sqlx::query(QUERY)
        .bind(&team.name)
        .bind(team.played)
        .bind(team.wins)
        .bind(team.draws)
        .bind(team.losses)
        .bind(team.goal_difference)
        .bind(team.goals_scored)
        .bind(team.goals_conceded)
        .bind(&team.last_5_games)
        .bind(team.points)
        .bind(&team.logo_path)
        .execute(db)
        .await?;
    Ok(res.last_insert_id() as _)
}

pub async fn fetch_one<'e, E: MySqlExecutor<'e>>(db: E, id: i64) -> sqlx::Result<Team> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY).bind(id).fetch_one(db).await
}

/// Locks the row until the surrounding transaction ends.
pub async fn fetch_one_for_update<'e, E: MySqlExecutor<'e>>(db: E, id: i64) -> sqlx::Result<Team> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ? FOR UPDATE"
    );
    sqlx::query_as(QUERY).bind(id).fetch_one(db).await
}

pub async fn fetch_all<'e, E: MySqlExecutor<'e>>(db: E) -> sqlx::Result<Vec<Team>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        STANDINGS_ORDER
    );
    sqlx::query_as(QUERY).fetch_all(db).await
}

pub async fn fetch_by_tournament<'e, E: MySqlExecutor<'e>>(
    db: E,
    tournament_id: i64,
) -> sqlx::Result<Vec<Team>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id IN (SELECT team_id FROM tournament_teams WHERE tournament_id = ?)",
        STANDINGS_ORDER
    );
    sqlx::query_as(QUERY)
        .bind(tournament_id)
        .fetch_all(db)
        .await
}

pub async fn exists<'e, E: MySqlExecutor<'e>>(db: E, id: i64) -> sqlx::Result<bool> {
    const QUERY: &str = const_str::concat!("SELECT COUNT(*) FROM ", TABLE_NAME, " WHERE id = ?");
    let count: i64 = sqlx::query_scalar(QUERY).bind(id).fetch_one(db).await?;
    Ok(count > 0)
}

pub async fn update<'e, E: MySqlExecutor<'e>>(db: E, team: &Team) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET name = ?, played = ?, wins = ?, draws = ?, losses = ?, goal_difference = ?, ",
        "goals_scored = ?, goals_conceded = ?, last_5_games = ?, points = ?, logo_path = ? ",
        "WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(&team.name)
        .bind(team.played)
        .bind(team.wins)
        .bind(team.draws)
        .bind(team.losses)
        .bind(team.goal_difference)
        .bind(team.goals_scored)
        .bind(team.goals_conceded)
        .bind(&team.last_5_games)
        .bind(team.points)
        .bind(&team.logo_path)
        .bind(team.id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn update_logo_path<'e, E: MySqlExecutor<'e>>(
    db: E,
    id: i64,
    logo_path: &str,
) -> sqlx::Result<()> {
    const QUERY: &str =
        const_str::concat!("UPDATE ", TABLE_NAME, " SET logo_path = ? WHERE id = ?");
    sqlx::query(QUERY)
        .bind(logo_path)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete<'e, E: MySqlExecutor<'e>>(db: E, id: i64) -> sqlx::Result<u64> {
    const QUERY: &str = const_str::concat!("DELETE FROM ", TABLE_NAME, " WHERE id = ?");
    let res = sqlx::query(QUERY).bind(id).execute(db).await?;
    Ok(res.rows_affected())
}
