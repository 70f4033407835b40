//! Friend request endpoints.
//!
//! Requests are directional: the sender sees them under "sent", the receiver
//! under "received", until resolved by accept/reject/cancel.

use crate::client::{ApiClient, ApiError};
use crate::types::{FriendRequestDto, FriendRespondRequest, FriendSendRequest};

impl ApiClient {
    /// `POST /friends/send`.
    pub async fn send_friend_request(
        &self,
        sender_id: i64,
        receiver_username: &str,
    ) -> Result<(), ApiError> {
        let body = FriendSendRequest {
            sender_id,
            receiver_username: receiver_username.to_string(),
        };
        self.post_unit("/friends/send", &body).await
    }

    /// `POST /friends/respond`. `accepted = false` rejects.
    pub async fn respond_to_friend_request(
        &self,
        request_id: i64,
        accepted: bool,
    ) -> Result<(), ApiError> {
        let body = FriendRespondRequest {
            request_id,
            accepted,
        };
        self.post_unit("/friends/respond", &body).await
    }

    /// `GET /friends/received/:id`.
    pub async fn get_received_requests(
        &self,
        user_id: i64,
    ) -> Result<Vec<FriendRequestDto>, ApiError> {
        self.get(&format!("/friends/received/{user_id}")).await
    }

    /// `GET /friends/sent/:id`.
    pub async fn get_sent_requests(
        &self,
        user_id: i64,
    ) -> Result<Vec<FriendRequestDto>, ApiError> {
        self.get(&format!("/friends/sent/{user_id}")).await
    }

    /// `DELETE /friends/cancel/:requestId/:userId`. Only the sender may
    /// cancel a pending request.
    pub async fn cancel_friend_request(
        &self,
        request_id: i64,
        user_id: i64,
    ) -> Result<(), ApiError> {
        self.delete_unit(&format!("/friends/cancel/{request_id}/{user_id}"))
            .await
    }
}
