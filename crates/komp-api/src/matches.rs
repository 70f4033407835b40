//! Match endpoints.
//!
//! The status machine (PENDING → IN_PROGRESS → COMPLETED) lives server-side;
//! the client observes it and drives only the start and score-submission
//! transitions.

use std::collections::HashMap;

use crate::client::{ApiClient, ApiError};
use crate::types::{MatchCreateRequest, MatchDto, SubmitScoresRequest};

impl ApiClient {
    /// `POST /matches`.
    pub async fn create_match(
        &self,
        competition_id: i64,
        title: Option<&str>,
        participant_ids: Vec<i64>,
    ) -> Result<MatchDto, ApiError> {
        if participant_ids.len() < 2 {
            return Err(ApiError::Invalid(
                "a match needs at least two participants".into(),
            ));
        }
        let body = MatchCreateRequest {
            competition_id,
            title: title.map(ToString::to_string),
            participant_ids,
        };
        self.post("/matches", &body).await
    }

    /// `GET /matches/competition/:id`.
    pub async fn get_matches_by_competition(
        &self,
        competition_id: i64,
    ) -> Result<Vec<MatchDto>, ApiError> {
        self.get(&format!("/matches/competition/{competition_id}"))
            .await
    }

    /// `GET /matches/:id`.
    pub async fn get_match(&self, match_id: i64) -> Result<MatchDto, ApiError> {
        self.get(&format!("/matches/{match_id}")).await
    }

    /// `POST /matches/:id/start` — PENDING → IN_PROGRESS.
    pub async fn start_match(&self, match_id: i64) -> Result<MatchDto, ApiError> {
        self.post(&format!("/matches/{match_id}/start"), &serde_json::json!({}))
            .await
    }

    /// `DELETE /matches/:id`.
    pub async fn delete_match(&self, match_id: i64) -> Result<(), ApiError> {
        self.delete_unit(&format!("/matches/{match_id}")).await
    }

    /// `POST /matches/:id/scores`, keyed by user id. Completion and stat
    /// recomputation happen server-side; callers re-fetch afterwards.
    pub async fn submit_scores(
        &self,
        match_id: i64,
        scores: HashMap<i64, i64>,
    ) -> Result<(), ApiError> {
        if scores.is_empty() {
            return Err(ApiError::Invalid("no scores to submit".into()));
        }
        let body = SubmitScoresRequest { scores };
        self.post_unit(&format!("/matches/{match_id}/scores"), &body)
            .await
    }
}
