pub mod matches;
pub mod teams;
pub mod tournament_teams;
pub mod tournaments;
