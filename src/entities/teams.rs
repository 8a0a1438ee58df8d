use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goal_difference: i32,
    pub goals_scored: i32,
    pub goals_conceded: i32,
    pub last_5_games: String,
    pub points: i32,
    pub logo_path: Option<String>,
}
