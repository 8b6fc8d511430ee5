use shared::errors::{ErrorCode, Result};
use shared::{BearerToken, CompletedSession, DateRange, StatisticsRecord, UserId};

use crate::backend_client::StatisticsStoreClient;

/// Error identifiers for the three calls of one upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertCodes {
    pub fetch: ErrorCode,
    pub create: ErrorCode,
    pub update: ErrorCode,
}

impl UpsertCodes {
    pub fn for_range(date_range: DateRange) -> Self {
        match date_range {
            DateRange::Lifetime => Self {
                fetch: ErrorCode::EndGameGetTotalStatisticsFailed,
                create: ErrorCode::EndGameCreateTotalStatisticsFailed,
                update: ErrorCode::EndGameUpdateTotalStatisticsFailed,
            },
            DateRange::Day(_) => Self {
                fetch: ErrorCode::EndGameGetDailyStatisticsFailed,
                create: ErrorCode::EndGameCreateDailyStatisticsFailed,
                update: ErrorCode::EndGameUpdateDailyStatisticsFailed,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Merged,
}

/// First record for a key: every time field starts at the session's solve time.
pub fn new_record(
    user_id: &UserId,
    date_range: DateRange,
    session: &CompletedSession,
) -> StatisticsRecord {
    let solve_time = session.solve_time as f64;

    StatisticsRecord {
        user_id: user_id.as_str().to_string(),
        date_range: date_range.as_key(),
        score: session.score,
        average_solve_time: solve_time,
        fastest_solve_time: solve_time,
        total_solve_time: solve_time,
        num_hints_used: session.num_hints_used,
        num_wrong_cells_played: session.num_wrong_cells_played,
        num_games_played: 1,
    }
}

/// Folds one finished game into an existing record.
///
/// `score` is a running total, not an average. A stored fastest time of 0
/// means "never set" and is always replaced. Counters saturate instead of
/// wrapping on corrupt stored values.
pub fn merge_record(existing: &StatisticsRecord, session: &CompletedSession) -> StatisticsRecord {
    let solve_time = session.solve_time as f64;
    let total_solve_time = existing.total_solve_time + solve_time;
    let num_games_played = existing.num_games_played.saturating_add(1);

    let fastest_solve_time =
        if solve_time > existing.fastest_solve_time && existing.fastest_solve_time != 0.0 {
            existing.fastest_solve_time
        } else {
            solve_time
        };

    let average_solve_time = if num_games_played > 0 {
        total_solve_time / num_games_played as f64
    } else {
        total_solve_time
    };

    StatisticsRecord {
        user_id: existing.user_id.clone(),
        date_range: existing.date_range.clone(),
        score: existing.score.saturating_add(session.score),
        average_solve_time,
        fastest_solve_time,
        total_solve_time,
        num_hints_used: existing.num_hints_used.saturating_add(session.num_hints_used),
        num_wrong_cells_played: existing
            .num_wrong_cells_played
            .saturating_add(session.num_wrong_cells_played),
        num_games_played,
    }
}

#[derive(Debug, Clone)]
pub struct StatisticsService {
    store: StatisticsStoreClient,
}

impl StatisticsService {
    pub fn new(store: StatisticsStoreClient) -> Self {
        Self { store }
    }

    /// Creates or merges the `(user_id, date_range)` record with `session`.
    ///
    /// Only "found" and "not found" are acceptable fetch results; anything
    /// else aborts with the range's fetch identifier.
    #[tracing::instrument(skip(self, token, session), fields(user_id = %user_id, date_range = %date_range))]
    pub async fn record_session(
        &self,
        user_id: &UserId,
        date_range: DateRange,
        session: &CompletedSession,
        token: &BearerToken,
    ) -> Result<UpsertOutcome> {
        let codes = UpsertCodes::for_range(date_range);

        match self
            .store
            .find_record(user_id, date_range, token, codes.fetch)
            .await?
        {
            None => {
                let record = new_record(user_id, date_range, session);
                self.store.create_record(&record, token, codes.create).await?;

                tracing::info!(
                    score = record.score,
                    solve_time = record.total_solve_time,
                    "Statistics record created"
                );

                Ok(UpsertOutcome::Created)
            }
            Some(existing) => {
                let record = merge_record(&existing, session);
                self.store.update_record(&record, token, codes.update).await?;

                tracing::info!(
                    score = record.score,
                    games_played = record.num_games_played,
                    fastest_solve_time = record.fastest_solve_time,
                    "Statistics record merged"
                );

                Ok(UpsertOutcome::Merged)
            }
        }
    }
}
