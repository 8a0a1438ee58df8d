use sqlx::MySqlExecutor;

const TABLE_NAME: &str = "tournament_teams";

/// Associating an already associated pair is a no-op.
pub async fn add<'e, E: MySqlExecutor<'e>>(
    db: E,
    tournament_id: i64,
    team_id: i64,
) -> sqlx::Result<bool> {
    const QUERY: &str = const_str::concat!(
        "INSERT IGNORE INTO ",
        TABLE_NAME,
        " (tournament_id, team_id) VALUES (?, ?)"
    );
    let res = sqlx::query(QUERY)
        .bind(tournament_id)
        .bind(team_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn remove<'e, E: MySqlExecutor<'e>>(
    db: E,
    tournament_id: i64,
    team_id: i64,
) -> sqlx::Result<bool> {
    const QUERY: &str = const_str::concat!(
        "DELETE FROM ",
        TABLE_NAME,
        " WHERE tournament_id = ? AND team_id = ?"
    );
    let res = sqlx::query(QUERY)
        .bind(tournament_id)
        .bind(team_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
