pub mod logos;
pub mod matches;
pub mod standings;
pub mod teams;
pub mod tournaments;
