//! Backend API response and request types.
//!
//! Serde structs matching the backend's camelCase JSON. These are flat DTOs:
//! the backend is the sole source of truth, so nothing here carries
//! client-side invariants beyond what serde enforces.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// User reference embedded in competitions and matches.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Response from `POST /users/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub token: String,
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
}

/// Full profile from `GET /users/profile/:id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Competition as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionDto {
    pub id: i64,
    pub title: String,
    pub icon: String,
    pub creator: UserRef,
    #[serde(default)]
    pub participants: Vec<UserRef>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Competition-scoped participant stats. Recomputed server-side after each
/// score submission; the client only displays them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: i64,
    pub username: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub matches_played: u32,
    pub points_scored: i64,
}

/// Match lifecycle, driven entirely by backend transitions.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Pending,
    InProgress,
    Completed,
}

/// Per-user score within a match.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchScoreDto {
    pub user_id: i64,
    pub score: i64,
    #[serde(default)]
    pub confirmed: bool,
}

/// Match as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub id: i64,
    pub title: String,
    pub match_number: u32,
    pub competition_id: i64,
    #[serde(default)]
    pub participants: Vec<UserRef>,
    pub status: MatchStatus,
    #[serde(default)]
    pub scores: Vec<MatchScoreDto>,
    #[serde(default)]
    pub scores_submitted: bool,
    #[serde(default)]
    pub started_at: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A pending friend request, directional. Appears in "received" or "sent"
/// lists depending on the query endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestDto {
    pub request_id: i64,
    pub sender_username: String,
}

/// Synthetic competition participant.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BotDto {
    pub id: i64,
    pub username: String,
}

/// Notification kinds the backend emits.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    FriendRequest,
    MatchCreated,
    FriendRequestAccepted,
    UserLeftCompetition,
}

/// Notification as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub message: String,
    #[serde(default)]
    pub related_id: Option<i64>,
    pub is_read: bool,
    pub created_at: String,
}

// =============================================================================
// Request bodies
// =============================================================================

/// Body for `POST /users/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body for `POST /users/signup`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Body for `PUT /users/profile`. All fields optional; omitted fields are
/// left unchanged server-side.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

/// Body for `POST /competitions`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionCreateRequest {
    pub title: String,
    pub icon: String,
    pub participant_ids: Vec<i64>,
}

/// Body for `POST /competitions/:id/participants`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddParticipantsRequest {
    pub participant_ids: Vec<i64>,
}

/// Body for `POST /matches`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCreateRequest {
    pub competition_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub participant_ids: Vec<i64>,
}

/// Body for `POST /matches/:id/scores`, keyed by user id.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitScoresRequest {
    pub scores: HashMap<i64, i64>,
}

/// Body for `POST /friends/send`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendSendRequest {
    pub sender_id: i64,
    pub receiver_username: String,
}

/// Body for `POST /friends/respond`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRespondRequest {
    pub request_id: i64,
    pub accepted: bool,
}

/// Body for `POST /competitions/:id/bots`.
#[derive(Debug, Clone, Serialize)]
pub struct BotCreateRequest {
    pub count: u32,
    pub usernames: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_competition_full() {
        let json = r#"{
            "id": 12,
            "title": "Weekend Football",
            "icon": "⚽",
            "creator": {"id": 1, "username": "alice", "email": "a@x.com", "role": "USER"},
            "participants": [
                {"id": 1, "username": "alice", "email": "a@x.com", "role": "USER"},
                {"id": 2, "username": "bob", "email": null, "role": "USER"}
            ],
            "createdAt": "2026-02-01T10:00:00Z",
            "updatedAt": "2026-02-02T10:00:00Z"
        }"#;
        let c: CompetitionDto = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, 12);
        assert_eq!(c.creator.username, "alice");
        assert_eq!(c.participants.len(), 2);
        assert!(c.participants[1].email.is_none());
        assert_eq!(c.updated_at.as_deref(), Some("2026-02-02T10:00:00Z"));
    }

    #[test]
    fn deserialize_competition_minimal() {
        let json = r#"{
            "id": 3,
            "title": "Darts",
            "icon": "🎯",
            "creator": {"id": 1, "username": "alice"},
            "createdAt": "2026-02-01T10:00:00Z"
        }"#;
        let c: CompetitionDto = serde_json::from_str(json).unwrap();
        assert!(c.participants.is_empty());
        assert!(c.updated_at.is_none());
    }

    #[test]
    fn deserialize_match_with_scores() {
        let json = r#"{
            "id": 9,
            "title": "Match 2",
            "matchNumber": 2,
            "competitionId": 12,
            "participants": [{"id": 1, "username": "alice"}, {"id": 2, "username": "bob"}],
            "status": "IN_PROGRESS",
            "scores": [
                {"userId": 1, "score": 3, "confirmed": true},
                {"userId": 2, "score": 1}
            ],
            "scoresSubmitted": false,
            "startedAt": "2026-02-03T18:00:00Z",
            "createdAt": "2026-02-03T17:00:00Z"
        }"#;
        let m: MatchDto = serde_json::from_str(json).unwrap();
        assert_eq!(m.status, MatchStatus::InProgress);
        assert_eq!(m.scores.len(), 2);
        assert!(m.scores[0].confirmed);
        assert!(!m.scores[1].confirmed);
        assert_eq!(m.started_at.as_deref(), Some("2026-02-03T18:00:00Z"));
    }

    #[test]
    fn deserialize_match_minimal_defaults() {
        let json = r#"{
            "id": 9,
            "title": "Match 1",
            "matchNumber": 1,
            "competitionId": 12,
            "status": "PENDING",
            "createdAt": "2026-02-03T17:00:00Z"
        }"#;
        let m: MatchDto = serde_json::from_str(json).unwrap();
        assert_eq!(m.status, MatchStatus::Pending);
        assert!(m.scores.is_empty());
        assert!(!m.scores_submitted);
        assert!(m.started_at.is_none());
    }

    #[test]
    fn match_status_parses_all_variants() {
        for (raw, expected) in [
            ("\"PENDING\"", MatchStatus::Pending),
            ("\"IN_PROGRESS\"", MatchStatus::InProgress),
            ("\"COMPLETED\"", MatchStatus::Completed),
        ] {
            let status: MatchStatus = serde_json::from_str(raw).unwrap();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn deserialize_notification() {
        let json = r#"{
            "id": 4,
            "type": "FRIEND_REQUEST_ACCEPTED",
            "message": "bob accepted your friend request",
            "relatedId": 2,
            "isRead": false,
            "createdAt": "2026-02-04T09:00:00Z"
        }"#;
        let n: NotificationDto = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationType::FriendRequestAccepted);
        assert_eq!(n.related_id, Some(2));
        assert!(!n.is_read);
    }

    #[test]
    fn deserialize_friend_request() {
        let json = r#"{"requestId": 5, "senderUsername": "carol"}"#;
        let r: FriendRequestDto = serde_json::from_str(json).unwrap();
        assert_eq!(r.request_id, 5);
        assert_eq!(r.sender_username, "carol");
    }

    #[test]
    fn deserialize_participant_stats() {
        let json = r#"{
            "id": 2, "username": "bob",
            "wins": 3, "draws": 1, "losses": 2,
            "matchesPlayed": 6, "pointsScored": 14
        }"#;
        let p: ParticipantDto = serde_json::from_str(json).unwrap();
        assert_eq!(p.wins, 3);
        assert_eq!(p.matches_played, 6);
        assert_eq!(p.points_scored, 14);
    }

    #[test]
    fn serialize_user_update_skips_unset_fields() {
        let req = UserUpdateRequest {
            new_username: Some("alice2".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"newUsername":"alice2"}"#);
    }

    #[test]
    fn serialize_match_create_omits_missing_title() {
        let req = MatchCreateRequest {
            competition_id: 12,
            title: None,
            participant_ids: vec![1, 2],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("title"));
        assert!(json.contains("\"competitionId\":12"));
        assert!(json.contains("\"participantIds\":[1,2]"));
    }

    #[test]
    fn serialize_scores_keyed_by_user_id() {
        let mut scores = HashMap::new();
        scores.insert(7, 3);
        let req = SubmitScoresRequest { scores };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"scores":{"7":3}}"#);
    }

    #[test]
    fn serialize_friend_send_uses_camel_case() {
        let req = FriendSendRequest {
            sender_id: 1,
            receiver_username: "bob".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"senderId\":1"));
        assert!(json.contains("\"receiverUsername\":\"bob\""));
    }
}
