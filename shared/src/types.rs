use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Storage-safe user identifier derived from an auth subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Subjects look like `provider|id`; the stores reject `|` in keys.
    pub fn from_subject(subject: &str) -> Self {
        Self(subject.replace('|', "-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The raw `Authorization` header value, forwarded to every backend untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(header_value: impl Into<String>) -> Self {
        Self(header_value.into())
    }

    pub fn header_value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Key of a statistics record: the lifetime aggregate or a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateRange {
    Lifetime,
    Day(NaiveDate),
}

impl DateRange {
    pub const LIFETIME_SENTINEL: &'static str = "1111-11-11";

    pub fn as_key(&self) -> String {
        match self {
            DateRange::Lifetime => Self::LIFETIME_SENTINEL.to_string(),
            DateRange::Day(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub puzzle: String,
    pub puzzle_solution: String,
    pub difficulty: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveGame {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub puzzle: String,
    #[serde(rename = "puzzleSolution")]
    pub puzzle_solution: String,
    pub difficulty: i64,
    #[serde(rename = "currentTime", default)]
    pub current_time: i64,
    #[serde(rename = "numHintsUsed", default)]
    pub num_hints_used: i64,
    #[serde(rename = "numWrongCellsPlayed", default)]
    pub num_wrong_cells_played: i64,
}

impl ActiveGame {
    /// A fresh game for `user_id` seeded from a catalog puzzle.
    pub fn from_puzzle(user_id: &UserId, puzzle: Puzzle) -> Self {
        Self {
            user_id: user_id.as_str().to_string(),
            puzzle: puzzle.puzzle,
            puzzle_solution: puzzle.puzzle_solution,
            difficulty: puzzle.difficulty,
            current_time: 0,
            num_hints_used: 0,
            num_wrong_cells_played: 0,
        }
    }
}

/// Save-game body, forwarded to the store as received.
///
/// Only the progress counters are checked; any other field the client keeps
/// on its game (moves, notes, ...) passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ActiveGamePatch(Map<String, Value>);

impl ActiveGamePatch {
    const COUNTER_FIELDS: [&'static str; 3] =
        ["currentTime", "numHintsUsed", "numWrongCellsPlayed"];

    /// `None` unless `body` is a non-empty object whose counters, when present,
    /// are non-negative integers.
    pub fn from_json(body: Value) -> Option<Self> {
        let Value::Object(fields) = body else {
            return None;
        };
        if fields.is_empty() {
            return None;
        }

        let counters_valid = Self::COUNTER_FIELDS
            .iter()
            .filter_map(|name| fields.get(*name))
            .all(|value| value.as_u64().is_some());

        counters_valid.then_some(Self(fields))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "dateRange")]
    pub date_range: String,
    #[serde(default)]
    pub score: i64,
    #[serde(rename = "averageSolveTime", default)]
    pub average_solve_time: f64,
    #[serde(rename = "fastestSolveTime", default)]
    pub fastest_solve_time: f64,
    #[serde(rename = "totalSolveTime", default)]
    pub total_solve_time: f64,
    #[serde(rename = "numHintsUsed", default)]
    pub num_hints_used: i64,
    #[serde(rename = "numWrongCellsPlayed", default)]
    pub num_wrong_cells_played: i64,
    #[serde(rename = "numGamesPlayed", default)]
    pub num_games_played: i64,
}

/// Metrics of one finished game, as fed into the statistics records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedSession {
    pub score: i64,
    pub solve_time: i64,
    pub num_hints_used: i64,
    pub num_wrong_cells_played: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub difficulty: i64,
    pub score: i64,
    pub solve_time: i64,
    pub num_hints_used: i64,
    pub num_wrong_cells_played: i64,
}
