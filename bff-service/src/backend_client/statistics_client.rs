use shared::errors::{ErrorCode, Result};
use shared::{BearerToken, DateRange, StatisticsRecord, UserId};

use super::transport::{BackendClient, BackendRequest};

const GAME_STATISTICS_PATH: &str = "/api/v1/user/gameStatistics";

#[derive(Debug, Clone)]
pub struct StatisticsStoreClient {
    backend: BackendClient,
}

impl StatisticsStoreClient {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// `Ok(None)` when the store has no record for the key yet.
    pub async fn find_record(
        &self,
        user_id: &UserId,
        date_range: DateRange,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<Option<StatisticsRecord>> {
        let request = BackendRequest::get(GAME_STATISTICS_PATH)
            .query("userID", user_id)
            .query("dateRange", date_range);

        let records: Option<Vec<StatisticsRecord>> =
            self.backend.call_optional(request, token, code).await?;

        Ok(records.and_then(|records| records.into_iter().next()))
    }

    pub async fn create_record(
        &self,
        record: &StatisticsRecord,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<()> {
        let request = BackendRequest::post(GAME_STATISTICS_PATH).json(&[record])?;
        self.backend.call_no_content(request, token, code).await
    }

    pub async fn update_record(
        &self,
        record: &StatisticsRecord,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<()> {
        let request = BackendRequest::patch(GAME_STATISTICS_PATH)
            .query("userID", &record.user_id)
            .query("dateRange", &record.date_range)
            .json(record)?;
        self.backend.call_no_content(request, token, code).await
    }
}
