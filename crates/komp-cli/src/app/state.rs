//! Application state and types.

use std::collections::HashSet;

use komp_api::types::{
    BotDto, CompetitionDto, FriendRequestDto, MatchDto, ParticipantDto, UserProfile, UserRef,
};

use super::debounce::Debouncer;
use super::filter::CompetitionFilter;

/// Active screen. Each screen owns its own state struct on `App`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Home,
    Competition,
    Friends,
    Profile,
}

/// Single-line text input with a cursor.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.byte_cursor(), c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_cursor();
            self.value.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Byte offset of the char cursor.
    fn byte_cursor(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

/// Login form.
#[derive(Debug, Default)]
pub struct LoginState {
    pub username: InputField,
    pub password: InputField,
    pub focus: usize,
    pub error: Option<String>,
    pub submitting: bool,
}

/// Register form.
#[derive(Debug, Default)]
pub struct RegisterState {
    pub username: InputField,
    pub email: InputField,
    pub password: InputField,
    pub confirm: InputField,
    pub focus: usize,
    pub error: Option<String>,
    pub submitting: bool,
}

impl RegisterState {
    /// Basic form validation; the backend does the authoritative checks.
    pub fn validate(&self) -> Result<(), String> {
        if self.username.value.trim().len() < 3 {
            return Err("Username must be at least 3 characters".into());
        }
        if self.username.value.trim().chars().count() > 20 {
            return Err("Username must be at most 20 characters".into());
        }
        if self.email.value.trim().is_empty() {
            return Err("Email is required".into());
        }
        if self.password.value.len() < 6 {
            return Err("Password must be at least 6 characters".into());
        }
        if self.password.value != self.confirm.value {
            return Err("Passwords do not match".into());
        }
        Ok(())
    }
}

/// Emoji choices for new competitions.
pub const COMPETITION_ICONS: &[&str] = &["🏆", "⚽", "🏀", "🎾", "🎯", "🎱", "♟️", "🏓", "🃏", "🎮"];

/// Max competition title length, mirrored from the backend constraint.
pub const MAX_TITLE_LEN: usize = 50;

/// Focus areas within the create-competition form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateCompetitionFocus {
    Title,
    Icon,
    Friends,
}

/// Create-competition modal form.
#[derive(Debug)]
pub struct CreateCompetitionForm {
    pub title: InputField,
    pub icon_idx: usize,
    pub friends: Vec<UserRef>,
    pub friends_loading: bool,
    pub selected: HashSet<i64>,
    pub cursor: usize,
    pub focus: CreateCompetitionFocus,
    pub error: Option<String>,
    pub submitting: bool,
}

impl CreateCompetitionForm {
    pub fn new() -> Self {
        Self {
            title: InputField::default(),
            icon_idx: 0,
            friends: Vec::new(),
            friends_loading: true,
            selected: HashSet::new(),
            cursor: 0,
            focus: CreateCompetitionFocus::Title,
            error: None,
            submitting: false,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.value.trim().is_empty() {
            return Err("Title is required".into());
        }
        if self.title.value.chars().count() > MAX_TITLE_LEN {
            return Err(format!("Title must be at most {MAX_TITLE_LEN} characters"));
        }
        if self.selected.is_empty() {
            return Err("Select at least one friend".into());
        }
        Ok(())
    }

    pub fn icon(&self) -> &'static str {
        COMPETITION_ICONS
            .get(self.icon_idx)
            .copied()
            .unwrap_or("🏆")
    }
}

/// Home screen: the competition list.
#[derive(Debug)]
pub struct HomeState {
    pub competitions: Vec<CompetitionDto>,
    pub loading: bool,
    pub error: Option<String>,
    pub filter: CompetitionFilter,
    /// Typing goes into the filter box instead of hotkeys.
    pub filter_focused: bool,
    pub selected: usize,
    pub create: Option<CreateCompetitionForm>,
    visible: Vec<usize>,
    derived_stale: bool,
}

impl HomeState {
    pub fn new() -> Self {
        Self {
            competitions: Vec::new(),
            loading: false,
            error: None,
            filter: CompetitionFilter::default(),
            filter_focused: false,
            selected: 0,
            create: None,
            visible: Vec::new(),
            derived_stale: true,
        }
    }

    pub fn set_competitions(&mut self, competitions: Vec<CompetitionDto>) {
        self.competitions = competitions;
        self.derived_stale = true;
    }

    /// Mark the derived list for recomputation after a filter change.
    pub fn invalidate(&mut self) {
        self.derived_stale = true;
    }

    /// Indices of visible competitions, recomputed only when inputs changed.
    pub fn visible_indices(&mut self) -> &[usize] {
        if self.derived_stale {
            self.visible = self.filter.apply(&self.competitions);
            self.derived_stale = false;
            if self.selected >= self.visible.len() {
                self.selected = self.visible.len().saturating_sub(1);
            }
        }
        &self.visible
    }

    /// The competition currently under the cursor.
    pub fn selected_competition(&mut self) -> Option<&CompetitionDto> {
        let selected = self.selected;
        let idx = *self.visible_indices().get(selected)?;
        self.competitions.get(idx)
    }
}

/// Tabs on the competition screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompetitionTab {
    Leaderboard,
    Matches,
    Bots,
}

impl CompetitionTab {
    pub const fn next(self) -> Self {
        match self {
            Self::Leaderboard => Self::Matches,
            Self::Matches => Self::Bots,
            Self::Bots => Self::Leaderboard,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Leaderboard => "Leaderboard",
            Self::Matches => "Matches",
            Self::Bots => "Bots",
        }
    }
}

/// One score row in the match-detail modal.
#[derive(Debug)]
pub struct ScoreEntry {
    pub user_id: i64,
    pub username: String,
    pub input: InputField,
    pub confirmed: bool,
}

/// Match-detail modal: view scores, or enter them as a participant.
#[derive(Debug)]
pub struct MatchDetailForm {
    pub match_id: i64,
    pub detail: Option<MatchDto>,
    pub entries: Vec<ScoreEntry>,
    pub cursor: usize,
    /// Re-opening score entry on a COMPLETED match.
    pub editing: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

impl MatchDetailForm {
    pub fn new(match_id: i64) -> Self {
        Self {
            match_id,
            detail: None,
            entries: Vec::new(),
            cursor: 0,
            editing: false,
            submitting: false,
            error: None,
        }
    }

    /// Seed score rows from a fetched match: existing scores, else zeros.
    pub fn set_detail(&mut self, detail: MatchDto) {
        self.entries = detail
            .participants
            .iter()
            .map(|p| {
                let existing = detail.scores.iter().find(|s| s.user_id == p.id);
                let mut input = InputField::default();
                let value = existing.map_or(0, |s| s.score);
                input.value = value.to_string();
                input.cursor = input.value.chars().count();
                ScoreEntry {
                    user_id: p.id,
                    username: p.username.clone(),
                    input,
                    confirmed: existing.is_some_and(|s| s.confirmed),
                }
            })
            .collect();
        self.detail = Some(detail);
    }

    /// Parsed scores keyed by user id; zero for blank rows.
    pub fn scores(&self) -> std::collections::HashMap<i64, i64> {
        self.entries
            .iter()
            .map(|e| (e.user_id, e.input.value.trim().parse().unwrap_or(0)))
            .collect()
    }
}

/// Create-match modal form.
#[derive(Debug)]
pub struct CreateMatchForm {
    pub title: InputField,
    pub candidates: Vec<UserRef>,
    pub selected: HashSet<i64>,
    pub cursor: usize,
    pub title_focused: bool,
    pub error: Option<String>,
    pub submitting: bool,
}

impl CreateMatchForm {
    /// With exactly two participants in the competition, both play; with
    /// more, the user picks a subset.
    pub fn new(candidates: Vec<UserRef>) -> Self {
        let selected = if candidates.len() == 2 {
            candidates.iter().map(|c| c.id).collect()
        } else {
            HashSet::new()
        };
        Self {
            title: InputField::default(),
            candidates,
            selected,
            cursor: 0,
            title_focused: true,
            error: None,
            submitting: false,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.selected.len() < 2 {
            return Err("Select at least two participants".into());
        }
        Ok(())
    }
}

/// Max bot name length, mirrored from the backend constraint.
pub const MAX_BOT_NAME_LEN: usize = 20;

/// Manage-bots modal form.
#[derive(Debug)]
pub struct ManageBotsForm {
    pub names: Vec<InputField>,
    pub focus: usize,
    pub error: Option<String>,
    pub submitting: bool,
}

impl ManageBotsForm {
    /// One input slot per possible bot; blank slots are ignored on submit.
    pub fn new() -> Self {
        Self {
            names: vec![InputField::default(); komp_api::bots::MAX_BOTS],
            focus: 0,
            error: None,
            submitting: false,
        }
    }

    /// Non-empty trimmed names, or a message naming what's wrong.
    pub fn usernames(&self, existing: usize) -> Result<Vec<String>, String> {
        let names: Vec<String> = self
            .names
            .iter()
            .map(|n| n.value.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            return Err("Enter at least one bot name".into());
        }
        if names.iter().any(|n| n.chars().count() > MAX_BOT_NAME_LEN) {
            return Err(format!("Bot names are capped at {MAX_BOT_NAME_LEN} characters"));
        }
        if existing + names.len() > komp_api::bots::MAX_BOTS {
            return Err(format!(
                "At most {} bots per competition",
                komp_api::bots::MAX_BOTS
            ));
        }
        Ok(names)
    }
}

/// Add-participants modal form.
#[derive(Debug)]
pub struct AddParticipantsForm {
    pub friends: Vec<UserRef>,
    pub loading: bool,
    pub selected: HashSet<i64>,
    pub cursor: usize,
    pub error: Option<String>,
    pub submitting: bool,
}

impl AddParticipantsForm {
    pub fn new() -> Self {
        Self {
            friends: Vec::new(),
            loading: true,
            selected: HashSet::new(),
            cursor: 0,
            error: None,
            submitting: false,
        }
    }
}

/// Modal overlays on the competition screen.
#[derive(Debug)]
pub enum CompetitionModal {
    CreateMatch(CreateMatchForm),
    MatchDetail(MatchDetailForm),
    ManageBots(ManageBotsForm),
    AddParticipants(AddParticipantsForm),
    ConfirmDeleteCompetition,
    ConfirmLeaveCompetition,
    ConfirmDeleteMatch(i64),
}

/// Competition detail screen.
#[derive(Debug)]
pub struct CompetitionState {
    pub id: Option<i64>,
    pub competition: Option<CompetitionDto>,
    pub participants: Vec<ParticipantDto>,
    pub matches: Vec<MatchDto>,
    pub bots: Vec<BotDto>,
    pub tab: CompetitionTab,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub modal: Option<CompetitionModal>,
}

impl CompetitionState {
    pub fn new() -> Self {
        Self {
            id: None,
            competition: None,
            participants: Vec::new(),
            matches: Vec::new(),
            bots: Vec::new(),
            tab: CompetitionTab::Leaderboard,
            selected: 0,
            loading: false,
            error: None,
            modal: None,
        }
    }

    /// Leaderboard rows sorted by wins for display. Stats themselves are
    /// server-computed.
    pub fn leaderboard(&self) -> Vec<&ParticipantDto> {
        let mut rows: Vec<&ParticipantDto> = self.participants.iter().collect();
        rows.sort_by(|a, b| b.wins.cmp(&a.wins).then(b.points_scored.cmp(&a.points_scored)));
        rows
    }

    pub fn selected_match(&self) -> Option<&MatchDto> {
        self.matches.get(self.selected)
    }
}

/// Tabs on the friends screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendsTab {
    Friends,
    Received,
    Sent,
    Search,
}

impl FriendsTab {
    pub const fn next(self) -> Self {
        match self {
            Self::Friends => Self::Received,
            Self::Received => Self::Sent,
            Self::Sent => Self::Search,
            Self::Search => Self::Friends,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Friends => "Friends",
            Self::Received => "Received",
            Self::Sent => "Sent",
            Self::Search => "Search",
        }
    }
}

/// Friends screen.
#[derive(Debug)]
pub struct FriendsState {
    pub tab: FriendsTab,
    pub friends: Vec<UserRef>,
    pub received: Vec<FriendRequestDto>,
    pub sent: Vec<FriendRequestDto>,
    pub selected: usize,
    pub query: InputField,
    pub debounce: Debouncer,
    pub results: Vec<UserRef>,
    pub searching: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl FriendsState {
    pub fn new(debounce: Debouncer) -> Self {
        Self {
            tab: FriendsTab::Friends,
            friends: Vec::new(),
            received: Vec::new(),
            sent: Vec::new(),
            selected: 0,
            query: InputField::default(),
            debounce,
            results: Vec::new(),
            searching: false,
            loading: false,
            error: None,
        }
    }

    /// Rows in the active tab, for cursor clamping.
    pub fn row_count(&self) -> usize {
        match self.tab {
            FriendsTab::Friends => self.friends.len(),
            FriendsTab::Received => self.received.len(),
            FriendsTab::Sent => self.sent.len(),
            FriendsTab::Search => self.results.len(),
        }
    }
}

/// Edit-profile modal form.
#[derive(Debug, Default)]
pub struct EditProfileForm {
    pub new_username: InputField,
    pub current_password: InputField,
    pub new_password: InputField,
    pub confirm_password: InputField,
    pub focus: usize,
    pub error: Option<String>,
    pub submitting: bool,
}

impl EditProfileForm {
    pub fn validate(&self) -> Result<(), String> {
        let wants_username = !self.new_username.value.trim().is_empty();
        let wants_password = !self.new_password.value.is_empty();
        if !wants_username && !wants_password {
            return Err("Nothing to change".into());
        }
        if wants_username && self.new_username.value.trim().chars().count() > 20 {
            return Err("Username must be at most 20 characters".into());
        }
        if wants_password {
            if self.current_password.value.is_empty() {
                return Err("Current password is required".into());
            }
            if self.new_password.value.len() < 6 {
                return Err("New password must be at least 6 characters".into());
            }
            if self.new_password.value != self.confirm_password.value {
                return Err("Passwords do not match".into());
            }
        }
        Ok(())
    }
}

/// Profile screen.
#[derive(Debug)]
pub struct ProfileState {
    pub profile: Option<UserProfile>,
    pub loading: bool,
    pub error: Option<String>,
    pub edit: Option<EditProfileForm>,
}

impl ProfileState {
    pub fn new() -> Self {
        Self {
            profile: None,
            loading: false,
            error: None,
            edit: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn input_field_edits_at_cursor() {
        let mut field = InputField::default();
        field.insert('a');
        field.insert('c');
        field.left();
        field.insert('b');
        assert_eq!(field.value, "abc");
        field.right();
        field.backspace();
        assert_eq!(field.value, "ab");
    }

    #[test]
    fn input_field_handles_multibyte_chars() {
        let mut field = InputField::default();
        field.insert('é');
        field.insert('x');
        field.left();
        field.left();
        field.insert('a');
        assert_eq!(field.value, "aéx");
    }

    #[test]
    fn register_rejects_password_mismatch() {
        let mut form = RegisterState::default();
        form.username.value = "alice".into();
        form.email.value = "a@x.com".into();
        form.password.value = "secret1".into();
        form.confirm.value = "secret2".into();
        assert!(form.validate().is_err());
        form.confirm.value = "secret1".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn register_rejects_short_username() {
        let mut form = RegisterState::default();
        form.username.value = "ab".into();
        form.email.value = "a@x.com".into();
        form.password.value = "secret1".into();
        form.confirm.value = "secret1".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn create_competition_requires_title_and_friends() {
        let mut form = CreateCompetitionForm::new();
        assert!(form.validate().is_err());
        form.title.value = "Darts night".into();
        assert!(form.validate().is_err());
        form.selected.insert(2);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn create_match_preselects_both_of_two() {
        let candidates = vec![
            UserRef {
                id: 1,
                username: "a".into(),
                email: None,
                role: None,
            },
            UserRef {
                id: 2,
                username: "b".into(),
                email: None,
                role: None,
            },
        ];
        let form = CreateMatchForm::new(candidates);
        assert!(form.validate().is_ok());
        assert_eq!(form.selected.len(), 2);
    }

    #[test]
    fn bots_form_enforces_cap_including_existing() {
        let mut form = ManageBotsForm::new();
        form.names = vec![
            InputField {
                value: "bot-a".into(),
                cursor: 5,
            },
            InputField {
                value: "bot-b".into(),
                cursor: 5,
            },
        ];
        assert!(form.usernames(0).is_ok());
        assert!(form.usernames(2).is_err());
    }

    #[test]
    fn edit_profile_requires_current_password_for_change() {
        let mut form = EditProfileForm::default();
        form.new_password.value = "secret1".into();
        form.confirm_password.value = "secret1".into();
        assert!(form.validate().is_err());
        form.current_password.value = "old".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn home_memoizes_until_invalidated() {
        let mut home = HomeState::new();
        home.set_competitions(Vec::new());
        assert!(home.visible_indices().is_empty());
        // Mutating the filter without invalidation keeps the cached list;
        // the key handlers always call invalidate() after edits.
        home.filter.participant = "x".into();
        home.invalidate();
        assert!(home.visible_indices().is_empty());
    }
}
