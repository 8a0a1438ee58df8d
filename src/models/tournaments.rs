use crate::common::error::{AppError, ServiceResult};
use crate::entities::tournaments::Tournament as Entity;
use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TournamentStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
}

impl TournamentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Upcoming => "upcoming",
            TournamentStatus::Ongoing => "ongoing",
            TournamentStatus::Completed => "completed",
        }
    }
}

impl FromStr for TournamentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            TournamentStatus::Upcoming,
            TournamentStatus::Ongoing,
            TournamentStatus::Completed,
        ]
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(s))
        .ok_or(AppError::TournamentsInvalidStatus)
    }
}

impl Display for TournamentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TournamentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub tournament_type: String,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<Entity> for Tournament {
    type Error = AppError;

    fn try_from(value: Entity) -> ServiceResult<Self> {
        let status = TournamentStatus::from_str(&value.status)
            .map_err(|_| anyhow!("stored tournament has invalid status {:?}", value.status))?;
        Ok(Self {
            id: value.id,
            name: value.name,
            start_date: value.start_date,
            end_date: value.end_date,
            tournament_type: value.tournament_type,
            status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

/// Request body for creating or replacing a tournament.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentArgs {
    pub name: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "type", default)]
    pub tournament_type: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl TournamentArgs {
    /// `None` when the request leaves the status out.
    pub fn status(&self) -> ServiceResult<Option<TournamentStatus>> {
        self.status.as_deref().map(TournamentStatus::from_str).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("ONGOING".parse::<TournamentStatus>(), Ok(TournamentStatus::Ongoing));
        assert_eq!("Completed".parse::<TournamentStatus>(), Ok(TournamentStatus::Completed));
        assert_eq!("upcoming".parse::<TournamentStatus>(), Ok(TournamentStatus::Upcoming));
    }

    #[test]
    fn unknown_status_is_rejected() {
        for status in ["Invalid", "INVALID", "", "finished"] {
            assert_eq!(
                status.parse::<TournamentStatus>(),
                Err(AppError::TournamentsInvalidStatus)
            );
        }
    }

    #[test]
    fn missing_status_is_left_to_the_caller() {
        let args: TournamentArgs = serde_json::from_str(
            r#"{"name": "Spring Cup", "startDate": "2025-04-01", "type": "league"}"#,
        )
        .unwrap();
        assert_eq!(args.status(), Ok(None));
        assert_eq!(args.status().unwrap().unwrap_or_default(), TournamentStatus::Upcoming);
        assert_eq!(args.tournament_type, "league");
        assert_eq!(args.end_date, None);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let tournament = Tournament {
            id: 7,
            name: "Spring Cup".to_owned(),
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            end_date: None,
            tournament_type: "knockout".to_owned(),
            status: TournamentStatus::Ongoing,
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap(),
        };
        let json = serde_json::to_value(&tournament).unwrap();
        assert_eq!(json["startDate"], "2025-04-01");
        assert_eq!(json["type"], "knockout");
        assert_eq!(json["status"], "ongoing");
        assert!(json["endDate"].is_null());
    }
}
