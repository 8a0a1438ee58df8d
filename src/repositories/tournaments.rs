use crate::entities::tournaments::Tournament;
use sqlx::MySqlExecutor;

const TABLE_NAME: &str = "tournaments";
const READ_FIELDS: &str = "id, name, start_date, end_date, `type`, status, created_at, updated_at";

pub async fn create<'e, E: MySqlExecutor<'e>>(
    db: E,
    tournament: &Tournament,
) -> sqlx::Result<i64> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (name, start_date, end_date, `type`, status) VALUES (?, ?, ?, ?, ?)"
    );
    let res = sqlx::query(QUERY)
        .bind(&tournament.name)
        .bind(tournament.start_date)
        .bind(tournament.end_date)
        .bind(&tournament.tournament_type)
        .bind(&tournament.status)
        .execute(db)
        .await?;
    Ok(res.last_insert_id() as _)
}

pub async fn fetch_one<'e, E: MySqlExecutor<'e>>(db: E, id: i64) -> sqlx::Result<Tournament> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY).bind(id).fetch_one(db).await
}

pub async fn fetch_all<'e, E: MySqlExecutor<'e>>(db: E) -> sqlx::Result<Vec<Tournament>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " ORDER BY id"
    );
    sqlx::query_as(QUERY).fetch_all(db).await
}

pub async fn exists<'e, E: MySqlExecutor<'e>>(db: E, id: i64) -> sqlx::Result<bool> {
    const QUERY: &str = const_str::concat!("SELECT COUNT(*) FROM ", TABLE_NAME, " WHERE id = ?");
    let count: i64 = sqlx::query_scalar(QUERY).bind(id).fetch_one(db).await?;
    Ok(count > 0)
}

pub async fn update<'e, E: MySqlExecutor<'e>>(
    db: E,
    tournament: &Tournament,
) -> sqlx::Result<()> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET name = ?, start_date = ?, end_date = ?, `type` = ?, status = ?, ",
        "updated_at = CURRENT_TIMESTAMP WHERE id = ?"
    );
    sqlx::query(QUERY)
        .bind(&tournament.name)
        .bind(tournament.start_date)
        .bind(tournament.end_date)
        .bind(&tournament.tournament_type)
        .bind(&tournament.status)
        .bind(tournament.id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete<'e, E: MySqlExecutor<'e>>(db: E, id: i64) -> sqlx::Result<u64> {
    const QUERY: &str = const_str::concat!("DELETE FROM ", TABLE_NAME, " WHERE id = ?");
    let res = sqlx::query(QUERY).bind(id).execute(db).await?;
    Ok(res.rows_affected())
}
