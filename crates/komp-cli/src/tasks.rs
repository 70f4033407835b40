//! Background API tasks for the TUI.
//!
//! The event loop never awaits the network: every API call runs in a spawned
//! task that reports back over an mpsc channel as a typed [`UiMsg`]. The loop
//! drains the channel non-blocking each tick. A 401 is collapsed into
//! `TaskOutcome::Unauthorized` so the app has a single session-expiry path.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use komp_api::types::{
    AuthResponse, BotDto, CompetitionDto, FriendRequestDto, MatchDto, ParticipantDto, UserProfile,
    UserRef, UserUpdateRequest,
};
use komp_api::{ApiClient, ApiError};
use komp_core::{AppEvent, EventBus};

/// Outcome of a background API call, with 401 split out.
#[derive(Debug)]
pub enum TaskOutcome<T> {
    Ok(T),
    Err(String),
    Unauthorized,
}

impl<T> From<Result<T, ApiError>> for TaskOutcome<T> {
    fn from(res: Result<T, ApiError>) -> Self {
        match res {
            Ok(v) => Self::Ok(v),
            Err(ApiError::Unauthorized) => Self::Unauthorized,
            Err(e) => Self::Err(e.to_string()),
        }
    }
}

/// Messages from background tasks to the event loop.
#[derive(Debug)]
pub enum UiMsg {
    Login(TaskOutcome<AuthResponse>),
    Register(TaskOutcome<AuthResponse>),
    Competitions(TaskOutcome<Vec<CompetitionDto>>),
    CompetitionCreated(TaskOutcome<CompetitionDto>),
    CompetitionDetail(TaskOutcome<CompetitionDto>),
    Participants(TaskOutcome<Vec<ParticipantDto>>),
    Matches(TaskOutcome<Vec<MatchDto>>),
    MatchDetail(TaskOutcome<MatchDto>),
    MatchCreated(TaskOutcome<MatchDto>),
    MatchStarted(TaskOutcome<MatchDto>),
    MatchDeleted(TaskOutcome<()>),
    ScoresSubmitted(TaskOutcome<()>),
    Bots(TaskOutcome<Vec<BotDto>>),
    BotsCreated(TaskOutcome<Vec<BotDto>>),
    BotsDeleted(TaskOutcome<()>),
    ParticipantsAdded(TaskOutcome<CompetitionDto>),
    CompetitionDeleted(TaskOutcome<()>),
    CompetitionLeft(TaskOutcome<()>),
    SelectableFriends(TaskOutcome<Vec<UserRef>>),
    FriendsList(TaskOutcome<Vec<UserRef>>),
    ReceivedRequests(TaskOutcome<Vec<FriendRequestDto>>),
    SentRequests(TaskOutcome<Vec<FriendRequestDto>>),
    SearchResults {
        query: String,
        outcome: TaskOutcome<Vec<UserRef>>,
    },
    FriendRequestSent(TaskOutcome<()>),
    FriendRequestResponded {
        accepted: bool,
        outcome: TaskOutcome<()>,
    },
    FriendRequestCancelled(TaskOutcome<()>),
    Profile(TaskOutcome<UserProfile>),
    ProfileUpdated(TaskOutcome<()>),
    BadgeCount(usize),
}

/// Spawns API calls and routes their results back to the event loop.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: ApiClient,
    tx: mpsc::UnboundedSender<UiMsg>,
    bus: EventBus,
}

impl Dispatcher {
    pub const fn new(client: ApiClient, tx: mpsc::UnboundedSender<UiMsg>, bus: EventBus) -> Self {
        Self { client, tx, bus }
    }

    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    pub const fn bus(&self) -> &EventBus {
        &self.bus
    }

    fn spawn<T, F>(&self, fut: F, wrap: impl FnOnce(TaskOutcome<T>) -> UiMsg + Send + 'static)
    where
        T: Send + 'static,
        F: std::future::Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = fut.await.into();
            // The receiver only closes on shutdown; a failed send is fine.
            let _ = tx.send(wrap(outcome));
        });
    }

    // =========================================================================
    // Auth
    // =========================================================================

    pub fn login(&self, username: String, password: String) {
        let client = self.client.clone();
        self.spawn(
            async move { client.login(&username, &password).await },
            UiMsg::Login,
        );
    }

    /// Signup then login, the register-page flow.
    pub fn register(&self, username: String, email: String, password: String) {
        let client = self.client.clone();
        self.spawn(
            async move {
                client.signup(&username, &password, &email).await?;
                client.login(&username, &password).await
            },
            UiMsg::Register,
        );
    }

    // =========================================================================
    // Competitions
    // =========================================================================

    pub fn load_competitions(&self, user_id: i64) {
        let client = self.client.clone();
        self.spawn(
            async move { client.get_user_competitions(user_id).await },
            UiMsg::Competitions,
        );
    }

    pub fn create_competition(&self, title: String, icon: String, participant_ids: Vec<i64>) {
        let client = self.client.clone();
        self.spawn(
            async move {
                client
                    .create_competition(&title, &icon, participant_ids)
                    .await
            },
            UiMsg::CompetitionCreated,
        );
    }

    /// Load everything the competition screen shows.
    pub fn load_competition(&self, competition_id: i64) {
        let client = self.client.clone();
        self.spawn(
            async move { client.get_competition(competition_id).await },
            UiMsg::CompetitionDetail,
        );
        let client = self.client.clone();
        self.spawn(
            async move { client.get_participants(competition_id).await },
            UiMsg::Participants,
        );
        let client = self.client.clone();
        self.spawn(
            async move { client.get_matches_by_competition(competition_id).await },
            UiMsg::Matches,
        );
        let client = self.client.clone();
        self.spawn(
            async move { client.get_bots(competition_id).await },
            UiMsg::Bots,
        );
    }

    pub fn add_participants(&self, competition_id: i64, participant_ids: Vec<i64>) {
        let client = self.client.clone();
        self.spawn(
            async move { client.add_participants(competition_id, participant_ids).await },
            UiMsg::ParticipantsAdded,
        );
    }

    pub fn delete_competition(&self, competition_id: i64) {
        let client = self.client.clone();
        self.spawn(
            async move { client.delete_competition(competition_id).await },
            UiMsg::CompetitionDeleted,
        );
    }

    pub fn leave_competition(&self, competition_id: i64) {
        let client = self.client.clone();
        self.spawn(
            async move { client.leave_competition(competition_id).await },
            UiMsg::CompetitionLeft,
        );
    }

    // =========================================================================
    // Matches
    // =========================================================================

    pub fn create_match(&self, competition_id: i64, title: Option<String>, participants: Vec<i64>) {
        let client = self.client.clone();
        self.spawn(
            async move {
                client
                    .create_match(competition_id, title.as_deref(), participants)
                    .await
            },
            UiMsg::MatchCreated,
        );
    }

    pub fn load_match(&self, match_id: i64) {
        let client = self.client.clone();
        self.spawn(
            async move { client.get_match(match_id).await },
            UiMsg::MatchDetail,
        );
    }

    pub fn start_match(&self, match_id: i64) {
        let client = self.client.clone();
        self.spawn(
            async move { client.start_match(match_id).await },
            UiMsg::MatchStarted,
        );
    }

    pub fn delete_match(&self, match_id: i64) {
        let client = self.client.clone();
        self.spawn(
            async move { client.delete_match(match_id).await },
            UiMsg::MatchDeleted,
        );
    }

    pub fn submit_scores(&self, match_id: i64, scores: HashMap<i64, i64>) {
        let client = self.client.clone();
        self.spawn(
            async move { client.submit_scores(match_id, scores).await },
            UiMsg::ScoresSubmitted,
        );
    }

    // =========================================================================
    // Bots
    // =========================================================================

    pub fn create_bots(&self, competition_id: i64, usernames: Vec<String>) {
        let client = self.client.clone();
        self.spawn(
            async move { client.create_bots(competition_id, usernames).await },
            UiMsg::BotsCreated,
        );
    }

    pub fn delete_bots(&self, competition_id: i64) {
        let client = self.client.clone();
        self.spawn(
            async move { client.delete_bots(competition_id).await },
            UiMsg::BotsDeleted,
        );
    }

    // =========================================================================
    // Friends
    // =========================================================================

    /// Friends for a selection form (create competition, add participants).
    pub fn load_selectable_friends(&self, user_id: i64) {
        let client = self.client.clone();
        self.spawn(
            async move { client.get_friends(user_id).await },
            UiMsg::SelectableFriends,
        );
    }

    pub fn load_friends_screen(&self, user_id: i64) {
        let client = self.client.clone();
        self.spawn(
            async move { client.get_friends(user_id).await },
            UiMsg::FriendsList,
        );
        let client = self.client.clone();
        self.spawn(
            async move { client.get_received_requests(user_id).await },
            UiMsg::ReceivedRequests,
        );
        let client = self.client.clone();
        self.spawn(
            async move { client.get_sent_requests(user_id).await },
            UiMsg::SentRequests,
        );
    }

    pub fn search_users(&self, query: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.search_users(&query).await.into();
            let _ = tx.send(UiMsg::SearchResults { query, outcome });
        });
    }

    pub fn send_friend_request(&self, sender_id: i64, receiver_username: String) {
        let client = self.client.clone();
        self.spawn(
            async move {
                client
                    .send_friend_request(sender_id, &receiver_username)
                    .await
            },
            UiMsg::FriendRequestSent,
        );
    }

    /// Respond, then nudge the badge via the event bus.
    pub fn respond_to_request(&self, request_id: i64, accepted: bool) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let bus = self.bus.clone();
        tokio::spawn(async move {
            let outcome = client
                .respond_to_friend_request(request_id, accepted)
                .await
                .into();
            if matches!(outcome, TaskOutcome::Ok(())) {
                bus.publish(AppEvent::FriendRequestsChanged);
            }
            let _ = tx.send(UiMsg::FriendRequestResponded { accepted, outcome });
        });
    }

    pub fn cancel_friend_request(&self, request_id: i64, user_id: i64) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let bus = self.bus.clone();
        tokio::spawn(async move {
            let outcome = client.cancel_friend_request(request_id, user_id).await.into();
            if matches!(outcome, TaskOutcome::Ok(())) {
                bus.publish(AppEvent::FriendRequestsChanged);
            }
            let _ = tx.send(UiMsg::FriendRequestCancelled(outcome));
        });
    }

    // =========================================================================
    // Profile
    // =========================================================================

    pub fn load_profile(&self, user_id: i64) {
        let client = self.client.clone();
        self.spawn(
            async move { client.get_profile(user_id).await },
            UiMsg::Profile,
        );
    }

    pub fn update_profile(&self, update: UserUpdateRequest) {
        let client = self.client.clone();
        self.spawn(
            async move { client.update_profile(&update).await },
            UiMsg::ProfileUpdated,
        );
    }
}

/// Background badge refresher: a fixed-interval poll plus the event bus,
/// both funneling into the same idempotent fetch-and-set. There is no
/// ordering guarantee between the two triggers and none is needed.
pub fn spawn_badge_refresher(dispatcher: &Dispatcher, poll_interval: Duration) {
    let client = dispatcher.client.clone();
    let tx = dispatcher.tx.clone();
    let mut events = dispatcher.bus.subscribe();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(poll_interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                event = events.recv() => {
                    match event {
                        Ok(AppEvent::FriendRequestsChanged) => {}
                        // Lagged just means we missed hints; refresh anyway.
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {}
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
            let Some(user) = client.session().user() else {
                continue;
            };
            match client.get_received_requests(user.id).await {
                Ok(requests) => {
                    if tx.send(UiMsg::BadgeCount(requests.len())).is_err() {
                        break;
                    }
                }
                Err(e) => debug!(?e, "badge refresh failed"),
            }
        }
    });
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn outcome_maps_unauthorized() {
        let outcome: TaskOutcome<()> = Err::<(), _>(ApiError::Unauthorized).into();
        assert!(matches!(outcome, TaskOutcome::Unauthorized));
    }

    #[test]
    fn outcome_maps_api_error_to_message() {
        let outcome: TaskOutcome<()> = Err::<(), _>(ApiError::Api {
            status: 409,
            message: "already friends".into(),
        })
        .into();
        match outcome {
            TaskOutcome::Err(msg) => assert!(msg.contains("already friends")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn outcome_maps_ok() {
        let outcome: TaskOutcome<u32> = Ok::<_, ApiError>(7).into();
        assert!(matches!(outcome, TaskOutcome::Ok(7)));
    }
}
