use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Match {
    pub id: i64,
    pub tournament_id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_team_score: Option<i32>,
    pub away_team_score: Option<i32>,
    pub match_date: NaiveDateTime,
    pub status: String,
    pub round: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Only present on queries joined against `teams`.
    #[sqlx(default)]
    pub home_team_name: Option<String>,
    #[sqlx(default)]
    pub away_team_name: Option<String>,
}
