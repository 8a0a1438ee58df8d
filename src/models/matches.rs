use crate::common::error::{AppError, ServiceResult};
use crate::entities::matches::Match as Entity;
use crate::models::standings::MatchResult;
use anyhow::anyhow;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Ongoing,
    Completed,
    Postponed,
    Cancelled,
}

impl MatchStatus {
    const ALL: [MatchStatus; 5] = [
        MatchStatus::Scheduled,
        MatchStatus::Ongoing,
        MatchStatus::Completed,
        MatchStatus::Postponed,
        MatchStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Ongoing => "ongoing",
            MatchStatus::Completed => "completed",
            MatchStatus::Postponed => "postponed",
            MatchStatus::Cancelled => "cancelled",
        }
    }

    /// Checks a status or score change made without recording a result.
    ///
    /// Only a recorded result completes a match, and a completed match stays
    /// completed. Scores may only be corrected once the match is completed.
    pub fn check_update(self, requested: Option<MatchStatus>, rescored: bool) -> ServiceResult<()> {
        let completed = self == MatchStatus::Completed;
        match requested {
            Some(MatchStatus::Completed) if !completed => Err(AppError::MatchesInvalidTransition),
            Some(status) if completed && status != MatchStatus::Completed => {
                Err(AppError::MatchesAlreadyCompleted)
            }
            _ if rescored && !completed => Err(AppError::MatchesInvalidTransition),
            _ => Ok(()),
        }
    }
}

impl FromStr for MatchStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or(AppError::MatchesInvalidStatus)
    }
}

impl Display for MatchStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MatchStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i64,
    pub tournament_id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_team_score: Option<i32>,
    pub away_team_score: Option<i32>,
    pub match_date: NaiveDateTime,
    pub status: MatchStatus,
    pub round: Option<String>,
    pub home_team_name: Option<String>,
    pub away_team_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<Entity> for Match {
    type Error = AppError;

    fn try_from(value: Entity) -> ServiceResult<Self> {
        let status = MatchStatus::from_str(&value.status).map_err(|_| {
            anyhow!(
                "match {} has invalid stored status {:?}",
                value.id,
                value.status
            )
        })?;
        Ok(Self {
            id: value.id,
            tournament_id: value.tournament_id,
            home_team_id: value.home_team_id,
            away_team_id: value.away_team_id,
            home_team_score: value.home_team_score,
            away_team_score: value.away_team_score,
            match_date: value.match_date,
            status,
            round: value.round,
            home_team_name: value.home_team_name,
            away_team_name: value.away_team_name,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

/// Request body for creating or replacing a match.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchArgs {
    #[serde(default)]
    pub tournament_id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    #[serde(default)]
    pub home_team_score: Option<i32>,
    #[serde(default)]
    pub away_team_score: Option<i32>,
    #[serde(default)]
    pub match_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub round: Option<String>,
}

impl MatchArgs {
    pub fn status(&self) -> ServiceResult<Option<MatchStatus>> {
        self.status.as_deref().map(MatchStatus::from_str).transpose()
    }

    /// Only a complete score pair is taken from the request.
    pub fn result(&self) -> ServiceResult<Option<MatchResult>> {
        match (self.home_team_score, self.away_team_score) {
            (Some(home), Some(away)) => MatchResult::new(home, away).map(Some),
            _ => Ok(None),
        }
    }
}

/// Request body of `PATCH /api/matches/{id}/result`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultArgs {
    #[serde(default)]
    pub home_team_score: Option<i32>,
    #[serde(default)]
    pub away_team_score: Option<i32>,
}

impl TryFrom<ResultArgs> for MatchResult {
    type Error = AppError;

    fn try_from(args: ResultArgs) -> ServiceResult<Self> {
        match (args.home_team_score, args.away_team_score) {
            (Some(home), Some(away)) => MatchResult::new(home, away),
            _ => Err(AppError::MatchesMissingResult),
        }
    }
}
