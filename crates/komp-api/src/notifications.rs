//! Notification endpoints.

use crate::client::{ApiClient, ApiError};
use crate::types::NotificationDto;

impl ApiClient {
    /// `GET /notifications`.
    pub async fn get_notifications(&self) -> Result<Vec<NotificationDto>, ApiError> {
        self.get("/notifications").await
    }

    /// `GET /notifications/unread`.
    pub async fn get_unread_notifications(&self) -> Result<Vec<NotificationDto>, ApiError> {
        self.get("/notifications/unread").await
    }

    /// `GET /notifications/unread/count`.
    pub async fn get_unread_count(&self) -> Result<u64, ApiError> {
        self.get("/notifications/unread/count").await
    }

    /// `POST /notifications/:id/read`.
    pub async fn mark_notification_read(&self, id: i64) -> Result<(), ApiError> {
        self.post_unit(&format!("/notifications/{id}/read"), &serde_json::json!({}))
            .await
    }

    /// `POST /notifications/read-all`.
    pub async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        self.post_unit("/notifications/read-all", &serde_json::json!({}))
            .await
    }
}
