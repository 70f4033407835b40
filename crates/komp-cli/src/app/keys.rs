//! Terminal key handling, one handler per screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use komp_api::types::{MatchStatus, UserUpdateRequest};

use super::state::{
    AddParticipantsForm, CompetitionModal, CompetitionTab, CreateCompetitionFocus,
    CreateCompetitionForm, CreateMatchForm, FriendsTab, InputField, ManageBotsForm,
    MatchDetailForm, Screen, COMPETITION_ICONS,
};
use super::App;
use crate::tasks::Dispatcher;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent, dispatcher: &Dispatcher) {
        // Ctrl+C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        // Dismiss the oldest toast from anywhere.
        if key.code == KeyCode::Char('t') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.toasts.dismiss_front();
            return;
        }
        match self.screen {
            Screen::Login => self.handle_login_key(key, dispatcher),
            Screen::Register => self.handle_register_key(key, dispatcher),
            Screen::Home => self.handle_home_key(key, dispatcher),
            Screen::Competition => self.handle_competition_key(key, dispatcher),
            Screen::Friends => self.handle_friends_key(key, dispatcher),
            Screen::Profile => self.handle_profile_key(key, dispatcher),
        }
    }

    // =========================================================================
    // Login / Register
    // =========================================================================

    fn handle_login_key(&mut self, key: KeyEvent, dispatcher: &Dispatcher) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
            self.screen = Screen::Register;
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.login.focus = (self.login.focus + 1) % 2,
            KeyCode::BackTab | KeyCode::Up => self.login.focus = (self.login.focus + 1) % 2,
            KeyCode::Enter => {
                if self.login.submitting {
                    return;
                }
                let username = self.login.username.value.trim().to_string();
                let password = self.login.password.value.clone();
                if username.is_empty() || password.is_empty() {
                    self.login.error = Some("Username and password are required".into());
                    return;
                }
                self.login.error = None;
                self.login.submitting = true;
                dispatcher.login(username, password);
            }
            _ => {
                let field = if self.login.focus == 0 {
                    &mut self.login.username
                } else {
                    &mut self.login.password
                };
                edit_field(field, key.code);
            }
        }
    }

    fn handle_register_key(&mut self, key: KeyEvent, dispatcher: &Dispatcher) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('l') {
            self.screen = Screen::Login;
            return;
        }
        match key.code {
            KeyCode::Esc => self.screen = Screen::Login,
            KeyCode::Tab | KeyCode::Down => self.register.focus = (self.register.focus + 1) % 4,
            KeyCode::BackTab | KeyCode::Up => {
                self.register.focus = (self.register.focus + 3) % 4;
            }
            KeyCode::Enter => {
                if self.register.submitting {
                    return;
                }
                match self.register.validate() {
                    Ok(()) => {
                        self.register.error = None;
                        self.register.submitting = true;
                        dispatcher.register(
                            self.register.username.value.trim().to_string(),
                            self.register.email.value.trim().to_string(),
                            self.register.password.value.clone(),
                        );
                    }
                    Err(msg) => self.register.error = Some(msg),
                }
            }
            _ => {
                let field = match self.register.focus {
                    0 => &mut self.register.username,
                    1 => &mut self.register.email,
                    2 => &mut self.register.password,
                    _ => &mut self.register.confirm,
                };
                edit_field(field, key.code);
            }
        }
    }

    // =========================================================================
    // Home
    // =========================================================================

    fn handle_home_key(&mut self, key: KeyEvent, dispatcher: &Dispatcher) {
        if self.home.create.is_some() {
            self.handle_create_competition_key(key, dispatcher);
            return;
        }
        if self.home.filter_focused {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.home.filter_focused = false,
                KeyCode::Char(c) => {
                    self.home.filter.participant.push(c);
                    self.home.invalidate();
                }
                KeyCode::Backspace => {
                    self.home.filter.participant.pop();
                    self.home.invalidate();
                }
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.home.filter_focused = true,
            KeyCode::Char('s') => {
                self.home.filter.key = self.home.filter.key.next();
                self.home.invalidate();
            }
            KeyCode::Char('d') => {
                self.home.filter.direction = self.home.filter.direction.toggled();
                self.home.invalidate();
            }
            KeyCode::Char('r') => self.goto_home(dispatcher),
            KeyCode::Char('f') => self.goto_friends(dispatcher),
            KeyCode::Char('p') => self.goto_profile(dispatcher),
            KeyCode::Char('n') => {
                self.home.create = Some(CreateCompetitionForm::new());
                if let Some(user) = &self.user {
                    dispatcher.load_selectable_friends(user.id);
                }
            }
            KeyCode::Up => self.home.selected = self.home.selected.saturating_sub(1),
            KeyCode::Down => {
                let count = self.home.visible_indices().len();
                if count > 0 {
                    self.home.selected = (self.home.selected + 1).min(count - 1);
                }
            }
            KeyCode::Enter => {
                if let Some(c) = self.home.selected_competition() {
                    let id = c.id;
                    self.open_competition(id, dispatcher);
                }
            }
            _ => {}
        }
    }

    fn handle_create_competition_key(&mut self, key: KeyEvent, dispatcher: &Dispatcher) {
        let Some(form) = &mut self.home.create else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.home.create = None,
            KeyCode::Tab => {
                form.focus = match form.focus {
                    CreateCompetitionFocus::Title => CreateCompetitionFocus::Icon,
                    CreateCompetitionFocus::Icon => CreateCompetitionFocus::Friends,
                    CreateCompetitionFocus::Friends => CreateCompetitionFocus::Title,
                };
            }
            KeyCode::Enter => {
                if form.submitting {
                    return;
                }
                match form.validate() {
                    Ok(()) => {
                        form.error = None;
                        form.submitting = true;
                        dispatcher.create_competition(
                            form.title.value.trim().to_string(),
                            form.icon().to_string(),
                            form.selected.iter().copied().collect(),
                        );
                    }
                    Err(msg) => form.error = Some(msg),
                }
            }
            KeyCode::Left if form.focus == CreateCompetitionFocus::Icon => {
                form.icon_idx = form.icon_idx.checked_sub(1).unwrap_or(COMPETITION_ICONS.len() - 1);
            }
            KeyCode::Right if form.focus == CreateCompetitionFocus::Icon => {
                form.icon_idx = (form.icon_idx + 1) % COMPETITION_ICONS.len();
            }
            KeyCode::Up if form.focus == CreateCompetitionFocus::Friends => {
                form.cursor = form.cursor.saturating_sub(1);
            }
            KeyCode::Down if form.focus == CreateCompetitionFocus::Friends => {
                if !form.friends.is_empty() {
                    form.cursor = (form.cursor + 1).min(form.friends.len() - 1);
                }
            }
            KeyCode::Char(' ') if form.focus == CreateCompetitionFocus::Friends => {
                if let Some(friend) = form.friends.get(form.cursor) {
                    if !form.selected.remove(&friend.id) {
                        form.selected.insert(friend.id);
                    }
                }
            }
            _ if form.focus == CreateCompetitionFocus::Title => {
                edit_field(&mut form.title, key.code);
            }
            _ => {}
        }
    }

    // =========================================================================
    // Competition
    // =========================================================================

    fn handle_competition_key(&mut self, key: KeyEvent, dispatcher: &Dispatcher) {
        if self.competition.modal.is_some() {
            self.handle_competition_modal_key(key, dispatcher);
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.goto_home(dispatcher),
            KeyCode::Tab => {
                self.competition.tab = self.competition.tab.next();
                self.competition.selected = 0;
            }
            KeyCode::Char('r') => {
                if let Some(id) = self.competition.id {
                    self.competition.loading = true;
                    dispatcher.load_competition(id);
                }
            }
            KeyCode::Up => {
                self.competition.selected = self.competition.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let count = match self.competition.tab {
                    CompetitionTab::Leaderboard => self.competition.participants.len(),
                    CompetitionTab::Matches => self.competition.matches.len(),
                    CompetitionTab::Bots => self.competition.bots.len(),
                };
                if count > 0 {
                    self.competition.selected = (self.competition.selected + 1).min(count - 1);
                }
            }
            KeyCode::Enter if self.competition.tab == CompetitionTab::Matches => {
                if let Some(m) = self.competition.selected_match() {
                    let id = m.id;
                    self.competition.modal =
                        Some(CompetitionModal::MatchDetail(MatchDetailForm::new(id)));
                    dispatcher.load_match(id);
                }
            }
            KeyCode::Char('n') if self.competition.tab == CompetitionTab::Matches => {
                let candidates = self
                    .competition
                    .competition
                    .as_ref()
                    .map(|c| c.participants.clone())
                    .unwrap_or_default();
                self.competition.modal =
                    Some(CompetitionModal::CreateMatch(CreateMatchForm::new(candidates)));
            }
            KeyCode::Char('s') if self.competition.tab == CompetitionTab::Matches => {
                if let Some(m) = self.competition.selected_match() {
                    if m.status == MatchStatus::Pending {
                        dispatcher.start_match(m.id);
                    } else {
                        self.toasts
                            .info("Only pending matches can be started", super::App::now());
                    }
                }
            }
            KeyCode::Char('x') if self.competition.tab == CompetitionTab::Matches => {
                if let Some(m) = self.competition.selected_match() {
                    let id = m.id;
                    self.competition.modal = Some(CompetitionModal::ConfirmDeleteMatch(id));
                }
            }
            KeyCode::Char('b') if self.competition.tab == CompetitionTab::Bots => {
                self.competition.modal = Some(CompetitionModal::ManageBots(ManageBotsForm::new()));
            }
            KeyCode::Char('x') if self.competition.tab == CompetitionTab::Bots => {
                if let Some(id) = self.competition.id {
                    if self.competition.bots.is_empty() {
                        self.toasts.info("No bots to remove", super::App::now());
                    } else {
                        dispatcher.delete_bots(id);
                    }
                }
            }
            KeyCode::Char('a') => {
                self.competition.modal =
                    Some(CompetitionModal::AddParticipants(AddParticipantsForm::new()));
                if let Some(user) = &self.user {
                    dispatcher.load_selectable_friends(user.id);
                }
            }
            KeyCode::Char('D') => {
                if self.is_creator() {
                    self.competition.modal = Some(CompetitionModal::ConfirmDeleteCompetition);
                } else {
                    self.toasts
                        .info("Only the creator can delete a competition", super::App::now());
                }
            }
            KeyCode::Char('L') => {
                if self.is_creator() {
                    self.toasts
                        .info("The creator cannot leave; delete instead", super::App::now());
                } else {
                    self.competition.modal = Some(CompetitionModal::ConfirmLeaveCompetition);
                }
            }
            _ => {}
        }
    }

    fn is_creator(&self) -> bool {
        match (&self.user, &self.competition.competition) {
            (Some(user), Some(c)) => c.creator.id == user.id,
            _ => false,
        }
    }

    #[allow(clippy::too_many_lines)]
    fn handle_competition_modal_key(&mut self, key: KeyEvent, dispatcher: &Dispatcher) {
        let competition_id = self.competition.id;
        let existing_bots = self.competition.bots.len();
        let Some(modal) = &mut self.competition.modal else {
            return;
        };
        match modal {
            CompetitionModal::CreateMatch(form) => match key.code {
                KeyCode::Esc => self.competition.modal = None,
                KeyCode::Tab => form.title_focused = !form.title_focused,
                KeyCode::Enter => {
                    if form.submitting {
                        return;
                    }
                    match form.validate() {
                        Ok(()) => {
                            form.error = None;
                            form.submitting = true;
                            let title = form.title.value.trim().to_string();
                            let title = if title.is_empty() { None } else { Some(title) };
                            if let Some(id) = competition_id {
                                dispatcher.create_match(
                                    id,
                                    title,
                                    form.selected.iter().copied().collect(),
                                );
                            }
                        }
                        Err(msg) => form.error = Some(msg),
                    }
                }
                KeyCode::Up if !form.title_focused => {
                    form.cursor = form.cursor.saturating_sub(1);
                }
                KeyCode::Down if !form.title_focused => {
                    if !form.candidates.is_empty() {
                        form.cursor = (form.cursor + 1).min(form.candidates.len() - 1);
                    }
                }
                KeyCode::Char(' ') if !form.title_focused => {
                    if let Some(candidate) = form.candidates.get(form.cursor) {
                        if !form.selected.remove(&candidate.id) {
                            form.selected.insert(candidate.id);
                        }
                    }
                }
                _ if form.title_focused => edit_field(&mut form.title, key.code),
                _ => {}
            },
            CompetitionModal::MatchDetail(form) => {
                let is_participant = self
                    .user
                    .as_ref()
                    .zip(form.detail.as_ref())
                    .is_some_and(|(u, d)| d.participants.iter().any(|p| p.id == u.id));
                let status = form.detail.as_ref().map(|d| d.status);
                let can_edit = is_participant
                    && (status == Some(MatchStatus::InProgress)
                        || (status == Some(MatchStatus::Completed) && form.editing));
                match key.code {
                    KeyCode::Esc => self.competition.modal = None,
                    KeyCode::Up => form.cursor = form.cursor.saturating_sub(1),
                    KeyCode::Down => {
                        if !form.entries.is_empty() {
                            form.cursor = (form.cursor + 1).min(form.entries.len() - 1);
                        }
                    }
                    KeyCode::Char('e')
                        if is_participant
                            && status == Some(MatchStatus::Completed)
                            && !form.editing =>
                    {
                        form.editing = true;
                    }
                    KeyCode::Enter if can_edit => {
                        if form.submitting {
                            return;
                        }
                        form.error = None;
                        form.submitting = true;
                        dispatcher.submit_scores(form.match_id, form.scores());
                    }
                    KeyCode::Char(c) if can_edit && c.is_ascii_digit() => {
                        if let Some(entry) = form.entries.get_mut(form.cursor) {
                            entry.input.insert(c);
                        }
                    }
                    KeyCode::Backspace if can_edit => {
                        if let Some(entry) = form.entries.get_mut(form.cursor) {
                            entry.input.backspace();
                        }
                    }
                    _ => {}
                }
            }
            CompetitionModal::ManageBots(form) => match key.code {
                KeyCode::Esc => self.competition.modal = None,
                KeyCode::Tab | KeyCode::Down => {
                    form.focus = (form.focus + 1) % form.names.len();
                }
                KeyCode::BackTab | KeyCode::Up => {
                    form.focus = (form.focus + form.names.len() - 1) % form.names.len();
                }
                KeyCode::Enter => {
                    if form.submitting {
                        return;
                    }
                    match form.usernames(existing_bots) {
                        Ok(names) => {
                            form.error = None;
                            form.submitting = true;
                            if let Some(id) = competition_id {
                                dispatcher.create_bots(id, names);
                            }
                        }
                        Err(msg) => form.error = Some(msg),
                    }
                }
                _ => {
                    if let Some(field) = form.names.get_mut(form.focus) {
                        edit_field(field, key.code);
                    }
                }
            },
            CompetitionModal::AddParticipants(form) => match key.code {
                KeyCode::Esc => self.competition.modal = None,
                KeyCode::Up => form.cursor = form.cursor.saturating_sub(1),
                KeyCode::Down => {
                    if !form.friends.is_empty() {
                        form.cursor = (form.cursor + 1).min(form.friends.len() - 1);
                    }
                }
                KeyCode::Char(' ') => {
                    if let Some(friend) = form.friends.get(form.cursor) {
                        if !form.selected.remove(&friend.id) {
                            form.selected.insert(friend.id);
                        }
                    }
                }
                KeyCode::Enter => {
                    if form.submitting {
                        return;
                    }
                    if form.selected.is_empty() {
                        form.error = Some("Select at least one friend".into());
                        return;
                    }
                    form.error = None;
                    form.submitting = true;
                    if let Some(id) = competition_id {
                        dispatcher.add_participants(id, form.selected.iter().copied().collect());
                    }
                }
                _ => {}
            },
            CompetitionModal::ConfirmDeleteCompetition => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.competition.modal = None;
                    if let Some(id) = competition_id {
                        dispatcher.delete_competition(id);
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => self.competition.modal = None,
                _ => {}
            },
            CompetitionModal::ConfirmLeaveCompetition => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.competition.modal = None;
                    if let Some(id) = competition_id {
                        dispatcher.leave_competition(id);
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => self.competition.modal = None,
                _ => {}
            },
            CompetitionModal::ConfirmDeleteMatch(match_id) => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    let id = *match_id;
                    self.competition.modal = None;
                    dispatcher.delete_match(id);
                }
                KeyCode::Char('n') | KeyCode::Esc => self.competition.modal = None,
                _ => {}
            },
        }
    }

    // =========================================================================
    // Friends
    // =========================================================================

    fn handle_friends_key(&mut self, key: KeyEvent, dispatcher: &Dispatcher) {
        if self.friends.tab == FriendsTab::Search {
            self.handle_friends_search_key(key, dispatcher);
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.goto_home(dispatcher),
            KeyCode::Tab => {
                self.friends.tab = self.friends.tab.next();
                self.friends.selected = 0;
            }
            KeyCode::Char('r') => {
                if let Some(user) = &self.user {
                    self.friends.loading = true;
                    dispatcher.load_friends_screen(user.id);
                }
            }
            KeyCode::Up => self.friends.selected = self.friends.selected.saturating_sub(1),
            KeyCode::Down => {
                let count = self.friends.row_count();
                if count > 0 {
                    self.friends.selected = (self.friends.selected + 1).min(count - 1);
                }
            }
            KeyCode::Char('a') if self.friends.tab == FriendsTab::Received => {
                if let Some(request) = self.friends.received.get(self.friends.selected) {
                    dispatcher.respond_to_request(request.request_id, true);
                }
            }
            KeyCode::Char('x') if self.friends.tab == FriendsTab::Received => {
                if let Some(request) = self.friends.received.get(self.friends.selected) {
                    dispatcher.respond_to_request(request.request_id, false);
                }
            }
            KeyCode::Char('x') if self.friends.tab == FriendsTab::Sent => {
                if let (Some(request), Some(user)) = (
                    self.friends.sent.get(self.friends.selected),
                    self.user.as_ref(),
                ) {
                    dispatcher.cancel_friend_request(request.request_id, user.id);
                }
            }
            _ => {}
        }
    }

    fn handle_friends_search_key(&mut self, key: KeyEvent, dispatcher: &Dispatcher) {
        match key.code {
            KeyCode::Esc => self.goto_home(dispatcher),
            KeyCode::Tab => {
                self.friends.tab = self.friends.tab.next();
                self.friends.selected = 0;
            }
            KeyCode::Up => self.friends.selected = self.friends.selected.saturating_sub(1),
            KeyCode::Down => {
                if !self.friends.results.is_empty() {
                    self.friends.selected =
                        (self.friends.selected + 1).min(self.friends.results.len() - 1);
                }
            }
            KeyCode::Enter => {
                // With results on screen, Enter sends a request to the
                // highlighted user; otherwise it fires the search immediately.
                if let Some(found) = self.friends.results.get(self.friends.selected) {
                    let Some(user) = self.user.as_ref() else {
                        return;
                    };
                    if found.username == user.username {
                        self.friends.error =
                            Some("You cannot send a friend request to yourself".into());
                        return;
                    }
                    dispatcher.send_friend_request(user.id, found.username.clone());
                } else {
                    let query = self.friends.query.value.trim().to_string();
                    if query.is_empty() {
                        return;
                    }
                    self.friends.debounce.mark_fired(&query);
                    self.friends.searching = true;
                    dispatcher.search_users(query);
                }
            }
            KeyCode::Char(c) => {
                self.friends.query.insert(c);
                self.friends.results.clear();
                self.friends.selected = 0;
                self.friends
                    .debounce
                    .input(&self.friends.query.value, std::time::Instant::now());
            }
            KeyCode::Backspace => {
                self.friends.query.backspace();
                self.friends.results.clear();
                self.friends.selected = 0;
                self.friends
                    .debounce
                    .input(&self.friends.query.value, std::time::Instant::now());
            }
            KeyCode::Left => self.friends.query.left(),
            KeyCode::Right => self.friends.query.right(),
            _ => {}
        }
    }

    // =========================================================================
    // Profile
    // =========================================================================

    fn handle_profile_key(&mut self, key: KeyEvent, dispatcher: &Dispatcher) {
        if let Some(form) = &mut self.profile.edit {
            match key.code {
                KeyCode::Esc => self.profile.edit = None,
                KeyCode::Tab | KeyCode::Down => form.focus = (form.focus + 1) % 4,
                KeyCode::BackTab | KeyCode::Up => form.focus = (form.focus + 3) % 4,
                KeyCode::Enter => {
                    if form.submitting {
                        return;
                    }
                    match form.validate() {
                        Ok(()) => {
                            form.error = None;
                            form.submitting = true;
                            let new_username = form.new_username.value.trim();
                            let update = UserUpdateRequest {
                                new_username: (!new_username.is_empty())
                                    .then(|| new_username.to_string()),
                                current_password: (!form.current_password.value.is_empty())
                                    .then(|| form.current_password.value.clone()),
                                new_password: (!form.new_password.value.is_empty())
                                    .then(|| form.new_password.value.clone()),
                            };
                            dispatcher.update_profile(update);
                        }
                        Err(msg) => form.error = Some(msg),
                    }
                }
                _ => {
                    let field = match form.focus {
                        0 => &mut form.new_username,
                        1 => &mut form.current_password,
                        2 => &mut form.new_password,
                        _ => &mut form.confirm_password,
                    };
                    edit_field(field, key.code);
                }
            }
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.goto_home(dispatcher),
            KeyCode::Char('e') => self.profile.edit = Some(super::state::EditProfileForm::default()),
            KeyCode::Char('r') => {
                if let Some(user) = &self.user {
                    self.profile.loading = true;
                    dispatcher.load_profile(user.id);
                }
            }
            _ => {}
        }
    }
}

/// Route plain editing keys into a text field.
fn edit_field(field: &mut InputField, code: KeyCode) {
    match code {
        KeyCode::Char(c) => field.insert(c),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Left => field.left(),
        KeyCode::Right => field.right(),
        _ => {}
    }
}
