use crate::common::error::{AppError, ServiceResult};
use crate::entities::teams::Team as Entity;
use crate::models::standings::{Form, Standings};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub standings: Standings,
    pub logo_path: Option<String>,
}

impl Team {
    pub fn to_entity(&self) -> Entity {
        let standings = &self.standings;
        Entity {
            id: self.id,
            name: self.name.clone(),
            played: standings.played,
            wins: standings.wins,
            draws: standings.draws,
            losses: standings.losses,
            goal_difference: standings.goal_difference,
            goals_scored: standings.goals_scored,
            goals_conceded: standings.goals_conceded,
            last_5_games: standings.last_5_games.to_string(),
            points: standings.points,
            logo_path: self.logo_path.clone(),
        }
    }
}

impl TryFrom<Entity> for Team {
    type Error = AppError;

    fn try_from(value: Entity) -> ServiceResult<Self> {
        let last_5_games = Form::from_str(&value.last_5_games).map_err(|_| {
            anyhow!(
                "team {} has invalid stored form {:?}",
                value.id,
                value.last_5_games
            )
        })?;
        Ok(Self {
            id: value.id,
            name: value.name,
            standings: Standings {
                played: value.played,
                wins: value.wins,
                draws: value.draws,
                losses: value.losses,
                goal_difference: value.goal_difference,
                goals_scored: value.goals_scored,
                goals_conceded: value.goals_conceded,
                last_5_games,
                points: value.points,
            },
            logo_path: value.logo_path,
        })
    }
}

/// Request body for creating or replacing a team.
///
/// `goalDifference` is accepted but ignored, it is always derived from the
/// goals scored and conceded.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamArgs {
    pub name: String,
    #[serde(default)]
    pub played: i32,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub draws: i32,
    #[serde(default)]
    pub losses: i32,
    #[serde(default)]
    pub goals_scored: i32,
    #[serde(default)]
    pub goals_conceded: i32,
    #[serde(default)]
    pub last_5_games: String,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub logo_path: Option<String>,
}

impl TeamArgs {
    /// Statistics for a new team: zeroed unless the team has already played.
    pub fn initial_standings(&self) -> ServiceResult<Standings> {
        if self.played == 0 {
            return Ok(Standings::default());
        }
        self.standings()
    }

    /// Counters must be non-negative. Goal difference is derived.
    pub fn standings(&self) -> ServiceResult<Standings> {
        let counters = [
            self.played,
            self.wins,
            self.draws,
            self.losses,
            self.goals_scored,
            self.goals_conceded,
            self.points,
        ];
        if counters.iter().any(|&counter| counter < 0) {
            return Err(AppError::TeamsInvalidStats);
        }
        Ok(Standings {
            played: self.played,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            goal_difference: self.goals_scored - self.goals_conceded,
            goals_scored: self.goals_scored,
            goals_conceded: self.goals_conceded,
            last_5_games: Form::from_str(&self.last_5_games)?,
            points: self.points,
        })
    }
}
