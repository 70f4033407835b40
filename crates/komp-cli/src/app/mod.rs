//! TUI application state and update logic.
//!
//! The app is a plain state machine: terminal keys and background
//! [`UiMsg`](crate::tasks::UiMsg) results mutate it, the renderer reads it.
//! Every mutation that changes backend state is followed by a re-fetch of the
//! affected lists; the client never merges locally.

pub mod debounce;
pub mod filter;
pub mod keys;
pub mod state;
pub mod toasts;

use std::time::{Duration, Instant};

use komp_core::config::UiConfig;
use komp_core::AuthUser;

use crate::tasks::{Dispatcher, TaskOutcome, UiMsg};
use debounce::Debouncer;
use state::{
    CompetitionModal, CompetitionState, FriendsState, FriendsTab, HomeState, LoginState,
    ProfileState, RegisterState, Screen,
};
use toasts::ToastStack;

/// Top-level TUI state.
pub struct App {
    pub screen: Screen,
    pub user: Option<AuthUser>,
    pub login: LoginState,
    pub register: RegisterState,
    pub home: HomeState,
    pub competition: CompetitionState,
    pub friends: FriendsState,
    pub profile: ProfileState,
    pub toasts: ToastStack,
    /// Pending friend-request count shown in the header.
    pub badge_count: usize,
    pub should_quit: bool,
    ui: UiConfig,
}

impl App {
    pub fn new(ui: UiConfig, user: Option<AuthUser>) -> Self {
        let screen = if user.is_some() {
            Screen::Home
        } else {
            Screen::Login
        };
        let debounce = Debouncer::new(
            Duration::from_millis(ui.search_debounce_ms),
            ui.search_min_chars,
        );
        Self {
            screen,
            user,
            login: LoginState::default(),
            register: RegisterState::default(),
            home: HomeState::new(),
            competition: CompetitionState::new(),
            friends: FriendsState::new(debounce),
            profile: ProfileState::new(),
            toasts: ToastStack::new(Duration::from_millis(ui.toast_duration_ms)),
            badge_count: 0,
            should_quit: false,
            ui,
        }
    }

    /// Kick off the initial loads for a session restored from disk.
    pub fn load_initial(&mut self, dispatcher: &Dispatcher) {
        if let Some(user) = &self.user {
            self.home.loading = true;
            dispatcher.load_competitions(user.id);
        }
    }

    fn now() -> Instant {
        Instant::now()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn goto_home(&mut self, dispatcher: &Dispatcher) {
        self.screen = Screen::Home;
        if let Some(user) = &self.user {
            self.home.loading = true;
            self.home.error = None;
            dispatcher.load_competitions(user.id);
        }
    }

    pub fn goto_friends(&mut self, dispatcher: &Dispatcher) {
        self.screen = Screen::Friends;
        self.friends = FriendsState::new(Debouncer::new(
            Duration::from_millis(self.ui.search_debounce_ms),
            self.ui.search_min_chars,
        ));
        if let Some(user) = &self.user {
            self.friends.loading = true;
            dispatcher.load_friends_screen(user.id);
        }
    }

    pub fn goto_profile(&mut self, dispatcher: &Dispatcher) {
        self.screen = Screen::Profile;
        self.profile = ProfileState::new();
        if let Some(user) = &self.user {
            self.profile.loading = true;
            dispatcher.load_profile(user.id);
        }
    }

    pub fn open_competition(&mut self, id: i64, dispatcher: &Dispatcher) {
        self.screen = Screen::Competition;
        self.competition = CompetitionState::new();
        self.competition.id = Some(id);
        self.competition.loading = true;
        dispatcher.load_competition(id);
    }

    /// Session expired: navigate to the login screen exactly once. The HTTP
    /// wrapper already cleared the stored session.
    fn force_login(&mut self) {
        if self.screen == Screen::Login {
            return;
        }
        self.screen = Screen::Login;
        self.login = LoginState::default();
        self.user = None;
        self.toasts
            .info("Session expired, please log in again", Self::now());
    }

    /// Unwrap a background outcome, routing errors to a toast and 401 to the
    /// login screen.
    fn take<T>(&mut self, outcome: TaskOutcome<T>) -> Option<T> {
        match outcome {
            TaskOutcome::Ok(v) => Some(v),
            TaskOutcome::Err(msg) => {
                self.toasts.error(msg, Self::now());
                None
            }
            TaskOutcome::Unauthorized => {
                self.force_login();
                None
            }
        }
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Periodic work driven by the event loop: toast expiry and the search
    /// debounce.
    pub fn tick(&mut self, dispatcher: &Dispatcher) {
        let now = Self::now();
        self.toasts.sweep(now);
        if self.screen == Screen::Friends && self.friends.tab == FriendsTab::Search {
            if let Some(query) = self.friends.debounce.poll(now) {
                self.friends.searching = true;
                dispatcher.search_users(query);
            }
        }
    }

    // =========================================================================
    // Background task results
    // =========================================================================

    #[allow(clippy::too_many_lines)]
    pub fn handle_msg(&mut self, msg: UiMsg, dispatcher: &Dispatcher) {
        match msg {
            UiMsg::Login(outcome) => {
                self.login.submitting = false;
                match outcome {
                    TaskOutcome::Ok(resp) => {
                        self.user = Some(AuthUser {
                            id: resp.id,
                            username: resp.username,
                            email: resp.email,
                            role: resp.role,
                        });
                        self.login = LoginState::default();
                        self.goto_home(dispatcher);
                    }
                    TaskOutcome::Err(msg) => self.login.error = Some(msg),
                    TaskOutcome::Unauthorized => {
                        self.login.error = Some("Invalid credentials".into());
                    }
                }
            }
            UiMsg::Register(outcome) => {
                self.register.submitting = false;
                match outcome {
                    TaskOutcome::Ok(resp) => {
                        self.user = Some(AuthUser {
                            id: resp.id,
                            username: resp.username,
                            email: resp.email,
                            role: resp.role,
                        });
                        self.register = RegisterState::default();
                        self.toasts.success("Account created", Self::now());
                        self.goto_home(dispatcher);
                    }
                    TaskOutcome::Err(msg) => self.register.error = Some(msg),
                    TaskOutcome::Unauthorized => {
                        self.register.error = Some("Registration failed".into());
                    }
                }
            }
            UiMsg::Competitions(outcome) => {
                self.home.loading = false;
                match outcome {
                    TaskOutcome::Ok(competitions) => {
                        self.home.error = None;
                        self.home.set_competitions(competitions);
                    }
                    TaskOutcome::Err(msg) => self.home.error = Some(msg),
                    TaskOutcome::Unauthorized => self.force_login(),
                }
            }
            UiMsg::CompetitionCreated(outcome) => {
                if let Some(form) = &mut self.home.create {
                    form.submitting = false;
                }
                match outcome {
                    TaskOutcome::Ok(c) => {
                        self.home.create = None;
                        self.toasts
                            .success(format!("Competition \"{}\" created", c.title), Self::now());
                        if let Some(user) = &self.user {
                            dispatcher.load_competitions(user.id);
                        }
                    }
                    TaskOutcome::Err(msg) => {
                        if let Some(form) = &mut self.home.create {
                            form.error = Some(msg);
                        } else {
                            self.toasts.error(msg, Self::now());
                        }
                    }
                    TaskOutcome::Unauthorized => self.force_login(),
                }
            }
            UiMsg::CompetitionDetail(outcome) => {
                if self.screen != Screen::Competition {
                    return;
                }
                self.competition.loading = false;
                match outcome {
                    TaskOutcome::Ok(c) => {
                        if self.competition.id == Some(c.id) {
                            self.competition.competition = Some(c);
                            self.competition.error = None;
                        }
                    }
                    TaskOutcome::Err(msg) => self.competition.error = Some(msg),
                    TaskOutcome::Unauthorized => self.force_login(),
                }
            }
            UiMsg::Participants(outcome) => {
                if self.screen != Screen::Competition {
                    return;
                }
                if let Some(participants) = self.take(outcome) {
                    self.competition.participants = participants;
                }
            }
            UiMsg::Matches(outcome) => {
                if self.screen != Screen::Competition {
                    return;
                }
                if let Some(matches) = self.take(outcome) {
                    self.competition.matches = matches;
                    if self.competition.selected >= self.competition.matches.len() {
                        self.competition.selected =
                            self.competition.matches.len().saturating_sub(1);
                    }
                }
            }
            UiMsg::Bots(outcome) => {
                if self.screen != Screen::Competition {
                    return;
                }
                if let Some(bots) = self.take(outcome) {
                    self.competition.bots = bots;
                }
            }
            UiMsg::MatchDetail(outcome) => {
                let Some(detail) = self.take(outcome) else {
                    return;
                };
                if let Some(CompetitionModal::MatchDetail(form)) = &mut self.competition.modal {
                    if form.match_id == detail.id {
                        form.set_detail(detail);
                    }
                }
            }
            UiMsg::MatchCreated(outcome) => {
                if let Some(CompetitionModal::CreateMatch(form)) = &mut self.competition.modal {
                    form.submitting = false;
                }
                match outcome {
                    TaskOutcome::Ok(m) => {
                        self.competition.modal = None;
                        self.toasts
                            .success(format!("Match \"{}\" created", m.title), Self::now());
                        self.reload_competition(dispatcher);
                    }
                    TaskOutcome::Err(msg) => {
                        if let Some(CompetitionModal::CreateMatch(form)) =
                            &mut self.competition.modal
                        {
                            form.error = Some(msg);
                        } else {
                            self.toasts.error(msg, Self::now());
                        }
                    }
                    TaskOutcome::Unauthorized => self.force_login(),
                }
            }
            UiMsg::MatchStarted(outcome) => {
                if let Some(m) = self.take(outcome) {
                    self.toasts
                        .success(format!("Match {} started", m.match_number), Self::now());
                    self.reload_competition(dispatcher);
                }
            }
            UiMsg::MatchDeleted(outcome) => {
                if self.take(outcome).is_some() {
                    self.toasts.success("Match deleted", Self::now());
                    self.reload_competition(dispatcher);
                }
            }
            UiMsg::ScoresSubmitted(outcome) => {
                let ok = match outcome {
                    TaskOutcome::Ok(()) => true,
                    TaskOutcome::Err(msg) => {
                        if let Some(CompetitionModal::MatchDetail(form)) =
                            &mut self.competition.modal
                        {
                            form.error = Some(msg);
                        } else {
                            self.toasts.error(msg, Self::now());
                        }
                        false
                    }
                    TaskOutcome::Unauthorized => {
                        self.force_login();
                        false
                    }
                };
                if let Some(CompetitionModal::MatchDetail(form)) = &mut self.competition.modal {
                    form.submitting = false;
                    if ok {
                        form.editing = false;
                        // Stats are recomputed server-side; fetch the fresh
                        // match while the list and leaderboard reload below.
                        dispatcher.load_match(form.match_id);
                    }
                }
                if ok {
                    self.toasts.success("Scores submitted", Self::now());
                    self.reload_competition(dispatcher);
                }
            }
            UiMsg::BotsCreated(outcome) => {
                if let Some(CompetitionModal::ManageBots(form)) = &mut self.competition.modal {
                    form.submitting = false;
                }
                match outcome {
                    TaskOutcome::Ok(bots) => {
                        self.competition.modal = None;
                        self.toasts
                            .success(format!("{} bot(s) in play", bots.len()), Self::now());
                        self.reload_competition(dispatcher);
                    }
                    TaskOutcome::Err(msg) => {
                        if let Some(CompetitionModal::ManageBots(form)) =
                            &mut self.competition.modal
                        {
                            form.error = Some(msg);
                        } else {
                            self.toasts.error(msg, Self::now());
                        }
                    }
                    TaskOutcome::Unauthorized => self.force_login(),
                }
            }
            UiMsg::BotsDeleted(outcome) => {
                if self.take(outcome).is_some() {
                    self.toasts.success("Bots removed", Self::now());
                    self.reload_competition(dispatcher);
                }
            }
            UiMsg::ParticipantsAdded(outcome) => {
                if let Some(CompetitionModal::AddParticipants(form)) = &mut self.competition.modal {
                    form.submitting = false;
                }
                match outcome {
                    TaskOutcome::Ok(c) => {
                        self.competition.modal = None;
                        self.toasts.success(
                            format!("Competition now has {} participants", c.participants.len()),
                            Self::now(),
                        );
                        self.reload_competition(dispatcher);
                    }
                    TaskOutcome::Err(msg) => {
                        if let Some(CompetitionModal::AddParticipants(form)) =
                            &mut self.competition.modal
                        {
                            form.error = Some(msg);
                        } else {
                            self.toasts.error(msg, Self::now());
                        }
                    }
                    TaskOutcome::Unauthorized => self.force_login(),
                }
            }
            UiMsg::CompetitionDeleted(outcome) => {
                if self.take(outcome).is_some() {
                    self.toasts.success("Competition deleted", Self::now());
                    self.goto_home(dispatcher);
                }
            }
            UiMsg::CompetitionLeft(outcome) => {
                if self.take(outcome).is_some() {
                    self.toasts.success("Left competition", Self::now());
                    self.goto_home(dispatcher);
                }
            }
            UiMsg::SelectableFriends(outcome) => {
                let Some(friends) = self.take(outcome) else {
                    if let Some(form) = &mut self.home.create {
                        form.friends_loading = false;
                    }
                    return;
                };
                if let Some(form) = &mut self.home.create {
                    form.friends = friends;
                    form.friends_loading = false;
                } else if let Some(CompetitionModal::AddParticipants(form)) =
                    &mut self.competition.modal
                {
                    // Friends already in the competition can't be added twice.
                    let existing: Vec<i64> = self
                        .competition
                        .competition
                        .as_ref()
                        .map(|c| c.participants.iter().map(|p| p.id).collect())
                        .unwrap_or_default();
                    form.friends = friends
                        .into_iter()
                        .filter(|f| !existing.contains(&f.id))
                        .collect();
                    form.loading = false;
                }
            }
            UiMsg::FriendsList(outcome) => {
                if self.screen != Screen::Friends {
                    return;
                }
                self.friends.loading = false;
                if let Some(friends) = self.take(outcome) {
                    self.friends.friends = friends;
                }
            }
            UiMsg::ReceivedRequests(outcome) => {
                if let Some(requests) = self.take(outcome) {
                    // The badge converges on the same count as the list.
                    self.badge_count = requests.len();
                    if self.screen == Screen::Friends {
                        self.friends.received = requests;
                    }
                }
            }
            UiMsg::SentRequests(outcome) => {
                if self.screen != Screen::Friends {
                    return;
                }
                if let Some(requests) = self.take(outcome) {
                    self.friends.sent = requests;
                }
            }
            UiMsg::SearchResults { query, outcome } => {
                // Drop stale results: the user may have kept typing or left.
                if self.screen != Screen::Friends
                    || self.friends.tab != FriendsTab::Search
                    || self.friends.query.value.trim() != query
                {
                    return;
                }
                self.friends.searching = false;
                match outcome {
                    TaskOutcome::Ok(results) => {
                        self.friends.error = None;
                        self.friends.results = results;
                        self.friends.selected = 0;
                    }
                    TaskOutcome::Err(msg) => self.friends.error = Some(msg),
                    TaskOutcome::Unauthorized => self.force_login(),
                }
            }
            UiMsg::FriendRequestSent(outcome) => {
                if self.take(outcome).is_some() {
                    self.toasts.success("Friend request sent", Self::now());
                    self.friends.query.clear();
                    self.friends.results.clear();
                    self.friends.debounce.reset();
                    if let Some(user) = &self.user {
                        dispatcher.load_friends_screen(user.id);
                    }
                }
            }
            UiMsg::FriendRequestResponded { accepted, outcome } => {
                if self.take(outcome).is_some() {
                    let message = if accepted {
                        "Friend request accepted"
                    } else {
                        "Friend request rejected"
                    };
                    self.toasts.success(message, Self::now());
                    if let Some(user) = &self.user {
                        dispatcher.load_friends_screen(user.id);
                    }
                }
            }
            UiMsg::FriendRequestCancelled(outcome) => {
                if self.take(outcome).is_some() {
                    self.toasts.success("Friend request cancelled", Self::now());
                    if let Some(user) = &self.user {
                        dispatcher.load_friends_screen(user.id);
                    }
                }
            }
            UiMsg::Profile(outcome) => {
                if self.screen != Screen::Profile {
                    return;
                }
                self.profile.loading = false;
                match outcome {
                    TaskOutcome::Ok(profile) => {
                        self.profile.profile = Some(profile);
                        self.profile.error = None;
                    }
                    TaskOutcome::Err(msg) => self.profile.error = Some(msg),
                    TaskOutcome::Unauthorized => self.force_login(),
                }
            }
            UiMsg::ProfileUpdated(outcome) => {
                if let Some(form) = &mut self.profile.edit {
                    form.submitting = false;
                }
                match outcome {
                    TaskOutcome::Ok(()) => {
                        self.profile.edit = None;
                        self.toasts.success("Profile updated", Self::now());
                        if let Some(user) = &self.user {
                            dispatcher.load_profile(user.id);
                        }
                    }
                    TaskOutcome::Err(msg) => {
                        if let Some(form) = &mut self.profile.edit {
                            form.error = Some(msg);
                        } else {
                            self.toasts.error(msg, Self::now());
                        }
                    }
                    TaskOutcome::Unauthorized => self.force_login(),
                }
            }
            UiMsg::BadgeCount(count) => {
                self.badge_count = count;
            }
        }
    }

    /// Reload everything the competition screen shows.
    fn reload_competition(&mut self, dispatcher: &Dispatcher) {
        if self.screen != Screen::Competition {
            return;
        }
        if let Some(id) = self.competition.id {
            dispatcher.load_competition(id);
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use komp_api::types::FriendRequestDto;
    use komp_api::ApiClient;
    use komp_core::config::ApiConfig;
    use komp_core::{EventBus, SessionStore};
    use tokio::sync::mpsc::UnboundedReceiver;

    fn fixtures() -> (App, Dispatcher, UnboundedReceiver<UiMsg>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::at(dir.path().join("session.json"));
        let config = ApiConfig {
            base_url: "http://localhost:8080".into(),
            request_timeout_secs: 1,
        };
        let client = ApiClient::new(&config, session).unwrap();
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(client, tx, EventBus::default());
        let user = AuthUser {
            id: 1,
            username: "alice".into(),
            email: None,
            role: "USER".into(),
        };
        let app = App::new(UiConfig::default(), Some(user));
        (app, dispatcher, rx, dir)
    }

    #[test]
    fn unauthorized_result_navigates_to_login_once() {
        let (mut app, dispatcher, _rx, _dir) = fixtures();
        assert_eq!(app.screen, Screen::Home);

        app.handle_msg(UiMsg::Competitions(TaskOutcome::Unauthorized), &dispatcher);
        assert_eq!(app.screen, Screen::Login);
        assert!(app.user.is_none());
        let toasts_after_first = app.toasts.iter().count();

        // A second stale 401 result must not navigate or toast again.
        app.handle_msg(UiMsg::Competitions(TaskOutcome::Unauthorized), &dispatcher);
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.toasts.iter().count(), toasts_after_first);
    }

    #[test]
    fn error_result_becomes_error_toast() {
        let (mut app, dispatcher, _rx, _dir) = fixtures();
        app.handle_msg(
            UiMsg::MatchDeleted(TaskOutcome::Err("API error (409): nope".into())),
            &dispatcher,
        );
        let messages: Vec<&str> = app.toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["API error (409): nope"]);
    }

    #[test]
    fn received_requests_update_badge_from_any_screen() {
        let (mut app, dispatcher, _rx, _dir) = fixtures();
        assert_eq!(app.screen, Screen::Home);
        let requests = vec![
            FriendRequestDto {
                request_id: 1,
                sender_username: "bob".into(),
            },
            FriendRequestDto {
                request_id: 2,
                sender_username: "carol".into(),
            },
        ];
        app.handle_msg(UiMsg::ReceivedRequests(TaskOutcome::Ok(requests)), &dispatcher);
        assert_eq!(app.badge_count, 2);
        // Off the friends screen the list itself is not touched.
        assert!(app.friends.received.is_empty());
    }

    #[test]
    fn stale_search_results_are_dropped() {
        let (mut app, dispatcher, _rx, _dir) = fixtures();
        app.screen = Screen::Friends;
        app.friends.tab = FriendsTab::Search;
        app.friends.query.value = "carol".into();
        app.handle_msg(
            UiMsg::SearchResults {
                query: "car".into(),
                outcome: TaskOutcome::Ok(Vec::new()),
            },
            &dispatcher,
        );
        // Result for an old query while a newer one is typed: ignored.
        assert!(app.friends.searching || app.friends.results.is_empty());
        app.handle_msg(
            UiMsg::SearchResults {
                query: "carol".into(),
                outcome: TaskOutcome::Ok(Vec::new()),
            },
            &dispatcher,
        );
        assert!(!app.friends.searching);
    }

    #[test]
    fn badge_count_message_is_idempotent() {
        let (mut app, dispatcher, _rx, _dir) = fixtures();
        app.handle_msg(UiMsg::BadgeCount(3), &dispatcher);
        app.handle_msg(UiMsg::BadgeCount(3), &dispatcher);
        assert_eq!(app.badge_count, 3);
    }
}
