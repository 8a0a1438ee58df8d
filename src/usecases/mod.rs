pub mod logos;
pub mod matches;
pub mod teams;
pub mod tournaments;
