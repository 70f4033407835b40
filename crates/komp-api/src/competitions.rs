//! Competition endpoints.

use crate::client::{ApiClient, ApiError};
use crate::types::{
    AddParticipantsRequest, CompetitionCreateRequest, CompetitionDto, ParticipantDto,
};

impl ApiClient {
    /// `POST /competitions`.
    pub async fn create_competition(
        &self,
        title: &str,
        icon: &str,
        participant_ids: Vec<i64>,
    ) -> Result<CompetitionDto, ApiError> {
        if title.trim().is_empty() {
            return Err(ApiError::Invalid("competition title is empty".into()));
        }
        let body = CompetitionCreateRequest {
            title: title.to_string(),
            icon: icon.to_string(),
            participant_ids,
        };
        self.post("/competitions", &body).await
    }

    /// `GET /competitions/:id`.
    pub async fn get_competition(&self, id: i64) -> Result<CompetitionDto, ApiError> {
        self.get(&format!("/competitions/{id}")).await
    }

    /// `GET /competitions/user/:id` — competitions the user participates in.
    pub async fn get_user_competitions(&self, user_id: i64) -> Result<Vec<CompetitionDto>, ApiError> {
        self.get(&format!("/competitions/user/{user_id}")).await
    }

    /// `GET /competitions/created-by/:id` — competitions the user created.
    pub async fn get_competitions_created_by(
        &self,
        user_id: i64,
    ) -> Result<Vec<CompetitionDto>, ApiError> {
        self.get(&format!("/competitions/created-by/{user_id}")).await
    }

    /// `GET /competitions/:id/participants` — leaderboard rows with
    /// server-computed stats.
    pub async fn get_participants(
        &self,
        competition_id: i64,
    ) -> Result<Vec<ParticipantDto>, ApiError> {
        self.get(&format!("/competitions/{competition_id}/participants"))
            .await
    }

    /// `POST /competitions/:id/participants`.
    pub async fn add_participants(
        &self,
        competition_id: i64,
        participant_ids: Vec<i64>,
    ) -> Result<CompetitionDto, ApiError> {
        let body = AddParticipantsRequest { participant_ids };
        self.post(&format!("/competitions/{competition_id}/participants"), &body)
            .await
    }

    /// `DELETE /competitions/:id`. Creator only.
    pub async fn delete_competition(&self, competition_id: i64) -> Result<(), ApiError> {
        self.delete_unit(&format!("/competitions/{competition_id}"))
            .await
    }

    /// `DELETE /competitions/:id/leave`. For non-creator participants.
    pub async fn leave_competition(&self, competition_id: i64) -> Result<(), ApiError> {
        self.delete_unit(&format!("/competitions/{competition_id}/leave"))
            .await
    }
}
