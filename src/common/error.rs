use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;
pub type ServiceResponse<T> = ServiceResult<Json<T>>;

#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!("An unexpected error has occurred at {caller}: {}", e.into());
    Err(AppError::Unexpected)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    Unexpected,
    DecodingRequestFailed,

    TournamentsNotFound,
    TournamentsInvalidStatus,

    TeamsNotFound,
    TeamsInvalidForm,
    TeamsInvalidOutcome,
    TeamsInvalidStats,

    MatchesNotFound,
    MatchesInvalidStatus,
    MatchesMissingResult,
    MatchesInvalidScore,
    MatchesSameTeam,
    MatchesInvalidTransition,
    MatchesAlreadyCompleted,

    LogosNotFound,
    LogosMissing,
    LogosInvalidFilename,
    LogosUnsupportedType,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn as_str(&self) -> &str {
        self.code()
    }

    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unexpected => "unexpected",
            AppError::DecodingRequestFailed => "decoding_request_failed",

            AppError::TournamentsNotFound => "tournaments.not_found",
            AppError::TournamentsInvalidStatus => "tournaments.invalid_status",

            AppError::TeamsNotFound => "teams.not_found",
            AppError::TeamsInvalidForm => "teams.invalid_form",
            AppError::TeamsInvalidOutcome => "teams.invalid_outcome",
            AppError::TeamsInvalidStats => "teams.invalid_stats",

            AppError::MatchesNotFound => "matches.not_found",
            AppError::MatchesInvalidStatus => "matches.invalid_status",
            AppError::MatchesMissingResult => "matches.missing_result",
            AppError::MatchesInvalidScore => "matches.invalid_score",
            AppError::MatchesSameTeam => "matches.same_team",
            AppError::MatchesInvalidTransition => "matches.invalid_transition",
            AppError::MatchesAlreadyCompleted => "matches.already_completed",

            AppError::LogosNotFound => "logos.not_found",
            AppError::LogosMissing => "logos.missing",
            AppError::LogosInvalidFilename => "logos.invalid_filename",
            AppError::LogosUnsupportedType => "logos.unsupported_type",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            AppError::Unexpected => "An unexpected error has occurred.",
            AppError::DecodingRequestFailed => "Failed to decode request",

            AppError::TournamentsNotFound => "Tournament could not be found.",
            AppError::TournamentsInvalidStatus => {
                "Tournament status must be one of: upcoming, ongoing, completed."
            }

            AppError::TeamsNotFound => "Team could not be found.",
            AppError::TeamsInvalidForm => "Last 5 games must hold at most 5 results.",
            AppError::TeamsInvalidOutcome => "Match outcome must be one of W, D or L.",
            AppError::TeamsInvalidStats => {
                "Team statistics must be non-negative and within range."
            }

            AppError::MatchesNotFound => "Match could not be found.",
            AppError::MatchesInvalidStatus => {
                "Match status must be one of: scheduled, ongoing, completed, postponed, cancelled."
            }
            AppError::MatchesMissingResult => "Both homeTeamScore and awayTeamScore are required.",
            AppError::MatchesInvalidScore => "Scores must be between 0 and 999.",
            AppError::MatchesSameTeam => "A team cannot play against itself.",
            AppError::MatchesInvalidTransition => {
                "Matches are completed by recording a result, which also sets the scores."
            }
            AppError::MatchesAlreadyCompleted => {
                "A result has already been recorded for this match."
            }

            AppError::LogosNotFound => "Logo could not be found.",
            AppError::LogosMissing => "A non-empty logo file is required.",
            AppError::LogosInvalidFilename => "Invalid logo filename.",
            AppError::LogosUnsupportedType => "Logo must be a jpg, jpeg, png, gif or webp image.",
        }
    }

    pub const fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::DecodingRequestFailed
            | AppError::TournamentsInvalidStatus
            | AppError::TeamsInvalidForm
            | AppError::TeamsInvalidOutcome
            | AppError::TeamsInvalidStats
            | AppError::MatchesInvalidStatus
            | AppError::MatchesMissingResult
            | AppError::MatchesInvalidScore
            | AppError::MatchesSameTeam
            | AppError::MatchesInvalidTransition
            | AppError::LogosMissing
            | AppError::LogosInvalidFilename
            | AppError::LogosUnsupportedType => StatusCode::BAD_REQUEST,

            AppError::TournamentsNotFound
            | AppError::TeamsNotFound
            | AppError::MatchesNotFound
            | AppError::LogosNotFound => StatusCode::NOT_FOUND,

            AppError::MatchesAlreadyCompleted => StatusCode::CONFLICT,

            AppError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn response_parts(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.http_status_code();
        let response = ErrorResponse {
            code: self.code(),
            message: self.message(),
        };
        (status, Json(response))
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.response_parts().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_errors_map_to_404() {
        for e in [
            AppError::TournamentsNotFound,
            AppError::TeamsNotFound,
            AppError::MatchesNotFound,
            AppError::LogosNotFound,
        ] {
            assert_eq!(e.http_status_code(), StatusCode::NOT_FOUND, "{}", e.code());
        }
    }

    #[test]
    fn validation_errors_map_to_400() {
        for e in [
            AppError::DecodingRequestFailed,
            AppError::TournamentsInvalidStatus,
            AppError::MatchesMissingResult,
            AppError::TeamsInvalidOutcome,
            AppError::TeamsInvalidStats,
            AppError::MatchesInvalidTransition,
        ] {
            assert_eq!(e.http_status_code(), StatusCode::BAD_REQUEST, "{}", e.code());
        }
    }

    #[test]
    fn storage_errors_become_unexpected() {
        let e = AppError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(e, AppError::Unexpected);
        assert_eq!(e.http_status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn already_completed_is_a_conflict() {
        let (status, body) = AppError::MatchesAlreadyCompleted.response_parts();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.code, "matches.already_completed");
    }
}
