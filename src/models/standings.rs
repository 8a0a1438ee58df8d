use crate::common::error::AppError;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const FORM_LENGTH: usize = 5;
pub const MAX_SCORE: i32 = 999;

const POINTS_PER_WIN: i32 = 3;
const POINTS_PER_DRAW: i32 = 1;

/// A team's result in a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn from_scores(goals_for: i32, goals_against: i32) -> Self {
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }

    pub const fn code(&self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Draw => 'D',
            Outcome::Loss => 'L',
        }
    }

    pub const fn points(&self) -> i32 {
        match self {
            Outcome::Win => POINTS_PER_WIN,
            Outcome::Draw => POINTS_PER_DRAW,
            Outcome::Loss => 0,
        }
    }
}

impl TryFrom<char> for Outcome {
    type Error = AppError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        match code {
            'W' => Ok(Outcome::Win),
            'D' => Ok(Outcome::Draw),
            'L' => Ok(Outcome::Loss),
            _ => Err(AppError::TeamsInvalidOutcome),
        }
    }
}

/// The final score of a match, from the home team's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub home_score: i32,
    pub away_score: i32,
}

impl MatchResult {
    pub fn new(home_score: i32, away_score: i32) -> Result<Self, AppError> {
        let in_range = |score: i32| (0..=MAX_SCORE).contains(&score);
        if !in_range(home_score) || !in_range(away_score) {
            return Err(AppError::MatchesInvalidScore);
        }
        Ok(Self {
            home_score,
            away_score,
        })
    }

    /// Returns `(home, away)` outcomes.
    pub fn outcomes(&self) -> (Outcome, Outcome) {
        let home = Outcome::from_scores(self.home_score, self.away_score);
        let away = Outcome::from_scores(self.away_score, self.home_score);
        (home, away)
    }
}

/// Trailing form: the most recent outcomes, oldest first, at most [`FORM_LENGTH`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form(VecDeque<Outcome>);

impl Form {
    pub fn push(&mut self, outcome: Outcome) {
        if self.0.len() >= FORM_LENGTH {
            self.0.pop_front();
        }
        self.0.push_back(outcome);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Form {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() > FORM_LENGTH {
            return Err(AppError::TeamsInvalidForm);
        }
        let outcomes = s
            .chars()
            .map(Outcome::try_from)
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Form(outcomes))
    }
}

impl Display for Form {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for outcome in &self.0 {
            write!(f, "{}", outcome.code())?;
        }
        Ok(())
    }
}

impl Serialize for Form {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Aggregate league statistics of a team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standings {
    pub played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goal_difference: i32,
    pub goals_scored: i32,
    pub goals_conceded: i32,
    pub last_5_games: Form,
    pub points: i32,
}

fn add(total: i32, amount: i32) -> Result<i32, AppError> {
    total.checked_add(amount).ok_or(AppError::TeamsInvalidStats)
}

impl Standings {
    /// Folds a single match into the statistics.
    ///
    /// Nothing is changed when a counter would overflow.
    pub fn record(
        &mut self,
        goals_for: i32,
        goals_against: i32,
        outcome: Outcome,
    ) -> Result<(), AppError> {
        let played = add(self.played, 1)?;
        let goals_scored = add(self.goals_scored, goals_for)?;
        let goals_conceded = add(self.goals_conceded, goals_against)?;
        let goal_difference = goals_scored
            .checked_sub(goals_conceded)
            .ok_or(AppError::TeamsInvalidStats)?;
        let points = add(self.points, outcome.points())?;
        let (wins, draws, losses) = match outcome {
            Outcome::Win => (add(self.wins, 1)?, self.draws, self.losses),
            Outcome::Draw => (self.wins, add(self.draws, 1)?, self.losses),
            Outcome::Loss => (self.wins, self.draws, add(self.losses, 1)?),
        };

        self.played = played;
        self.wins = wins;
        self.draws = draws;
        self.losses = losses;
        self.goals_scored = goals_scored;
        self.goals_conceded = goals_conceded;
        self.goal_difference = goal_difference;
        self.points = points;
        self.last_5_games.push(outcome);
        Ok(())
    }
}
