//! User profile, search, and friends-list endpoints.

use crate::client::{ApiClient, ApiError};
use crate::types::{UserProfile, UserRef, UserUpdateRequest};

impl ApiClient {
    /// `GET /users/profile/:id`.
    pub async fn get_profile(&self, user_id: i64) -> Result<UserProfile, ApiError> {
        self.get(&format!("/users/profile/{user_id}")).await
    }

    /// `PUT /users/profile`. Changing the password requires the current one.
    pub async fn update_profile(&self, update: &UserUpdateRequest) -> Result<(), ApiError> {
        self.put_unit("/users/profile", update).await
    }

    /// `GET /users/search?username=`. A 404 means "no users matched" and is
    /// surfaced as an empty list rather than an error.
    pub async fn search_users(&self, username: &str) -> Result<Vec<UserRef>, ApiError> {
        let path = format!("/users/search?username={}", Self::encode_query(username));
        match self.get(&path).await {
            Ok(users) => Ok(users),
            Err(ApiError::Api { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// `GET /users/friends/:id`.
    pub async fn get_friends(&self, user_id: i64) -> Result<Vec<UserRef>, ApiError> {
        self.get(&format!("/users/friends/{user_id}")).await
    }
}
