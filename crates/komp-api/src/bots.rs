//! Bot endpoints.
//!
//! Bots are synthetic participants, capped at three per competition. The cap
//! is checked before the request so the user gets a message instead of a
//! backend 400.

use crate::client::{ApiClient, ApiError};
use crate::types::{BotCreateRequest, BotDto};

/// Maximum bots per competition.
pub const MAX_BOTS: usize = 3;

impl ApiClient {
    /// `GET /competitions/:id/bots`.
    pub async fn get_bots(&self, competition_id: i64) -> Result<Vec<BotDto>, ApiError> {
        self.get(&format!("/competitions/{competition_id}/bots"))
            .await
    }

    /// `POST /competitions/:id/bots`.
    pub async fn create_bots(
        &self,
        competition_id: i64,
        usernames: Vec<String>,
    ) -> Result<Vec<BotDto>, ApiError> {
        if usernames.is_empty() {
            return Err(ApiError::Invalid("no bot names given".into()));
        }
        if usernames.len() > MAX_BOTS {
            return Err(ApiError::Invalid(format!(
                "at most {MAX_BOTS} bots per competition"
            )));
        }
        let body = BotCreateRequest {
            count: u32::try_from(usernames.len()).unwrap_or(0),
            usernames,
        };
        self.post(&format!("/competitions/{competition_id}/bots"), &body)
            .await
    }

    /// `DELETE /competitions/:id/bots` — removes all bots.
    pub async fn delete_bots(&self, competition_id: i64) -> Result<(), ApiError> {
        self.delete_unit(&format!("/competitions/{competition_id}/bots"))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use komp_core::config::ApiConfig;
    use komp_core::SessionStore;

    fn client() -> (tempfile::TempDir, ApiClient) {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::at(dir.path().join("session.json"));
        let config = ApiConfig {
            base_url: "http://localhost:8080".into(),
            request_timeout_secs: 5,
        };
        let client = ApiClient::new(&config, session).unwrap();
        (dir, client)
    }

    #[tokio::test]
    async fn more_than_three_bots_rejected_client_side() {
        let (_dir, client) = client();
        let names = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let err = client.create_bots(1, names).await.unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
    }

    #[tokio::test]
    async fn empty_bot_list_rejected_client_side() {
        let (_dir, client) = client();
        let err = client.create_bots(1, Vec::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
    }
}
