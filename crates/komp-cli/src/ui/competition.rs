//! Competition detail screen: leaderboard, matches, bots, and their modals.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use komp_api::types::MatchStatus;
use komp_core::timefmt;

use super::{centered_rect, error_line, field_line, render_modal};
use crate::app::state::{CompetitionModal, CompetitionTab};
use crate::app::App;
use crate::commands::fmt::{match_status_str, participant_names, truncate};

pub fn draw(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    draw_summary(frame, app, chunks[0]);
    match app.competition.tab {
        CompetitionTab::Leaderboard => draw_leaderboard(frame, app, chunks[1]),
        CompetitionTab::Matches => draw_matches(frame, app, chunks[1]),
        CompetitionTab::Bots => draw_bots(frame, app, chunks[1]),
    }

    match &app.competition.modal {
        Some(CompetitionModal::CreateMatch(_)) => draw_create_match(frame, app, area),
        Some(CompetitionModal::MatchDetail(_)) => draw_match_detail(frame, app, area),
        Some(CompetitionModal::ManageBots(_)) => draw_manage_bots(frame, app, area),
        Some(CompetitionModal::AddParticipants(_)) => draw_add_participants(frame, app, area),
        Some(CompetitionModal::ConfirmDeleteCompetition) => draw_confirm(
            frame,
            area,
            "Delete competition",
            "Delete this competition for everyone? [y/n]",
        ),
        Some(CompetitionModal::ConfirmLeaveCompetition) => draw_confirm(
            frame,
            area,
            "Leave competition",
            "Leave this competition? [y/n]",
        ),
        Some(CompetitionModal::ConfirmDeleteMatch(_)) => {
            draw_confirm(frame, area, "Delete match", "Delete this match? [y/n]");
        }
        None => {}
    }
}

fn draw_summary(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut lines = Vec::new();
    if let Some(c) = &app.competition.competition {
        lines.push(Line::from(vec![
            Span::raw(format!("{} ", c.icon)),
            Span::styled(
                c.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  by {} · created {}",
                    c.creator.username,
                    timefmt::format_date(&c.created_at)
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(Span::raw(format!(
            "Players: {}",
            participant_names(&c.participants)
        ))));
    } else if app.competition.loading {
        lines.push(Line::from("Loading..."));
    } else if let Some(msg) = &app.competition.error {
        lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(tab_title(app))),
        area,
    );
}

fn tab_title(app: &App) -> String {
    [
        CompetitionTab::Leaderboard,
        CompetitionTab::Matches,
        CompetitionTab::Bots,
    ]
    .iter()
    .map(|tab| {
        if *tab == app.competition.tab {
            format!("[{}]", tab.label())
        } else {
            format!(" {} ", tab.label())
        }
    })
    .collect::<Vec<_>>()
    .join(" ")
}

fn draw_leaderboard(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "  {:<16} {:>5} {:>6} {:>7} {:>7} {:>7}",
            "PLAYER", "WINS", "DRAWS", "LOSSES", "PLAYED", "POINTS"
        ),
        Style::default().fg(Color::DarkGray),
    ))];
    let rows = app.competition.leaderboard();
    if rows.is_empty() {
        lines.push(Line::from("  No scores yet. Start competing!"));
    }
    for (rank, p) in rows.iter().enumerate() {
        let selected =
            app.competition.tab == CompetitionTab::Leaderboard && rank == app.competition.selected;
        let style = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{} {:<16} {:>5} {:>6} {:>7} {:>7} {:>7}",
                if selected { ">" } else { " " },
                truncate(&p.username, 16),
                p.wins,
                p.draws,
                p.losses,
                p.matches_played,
                p.points_scored,
            ),
            style,
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Leaderboard")),
        area,
    );
}

fn draw_matches(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut lines = Vec::new();
    if app.competition.matches.is_empty() {
        lines.push(Line::from("  No matches yet. Press n to create one."));
    }
    for (row, m) in app.competition.matches.iter().enumerate() {
        let selected =
            app.competition.tab == CompetitionTab::Matches && row == app.competition.selected;
        let status_color = match m.status {
            MatchStatus::Pending => Color::DarkGray,
            MatchStatus::InProgress => Color::Blue,
            MatchStatus::Completed => Color::Green,
        };
        let style = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, style),
            Span::styled(
                format!("#{:<3} {:<24}", m.match_number, truncate(&m.title, 24)),
                style,
            ),
            Span::styled(
                format!("{:<12}", match_status_str(m.status)),
                Style::default().fg(status_color),
            ),
            Span::styled(
                truncate(&participant_names(&m.participants), 36),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Matches")),
        area,
    );
}

fn draw_bots(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "  {} of {} bot slots in use · b manage · x remove all",
            app.competition.bots.len(),
            komp_api::bots::MAX_BOTS
        ),
        Style::default().fg(Color::DarkGray),
    ))];
    for (row, bot) in app.competition.bots.iter().enumerate() {
        let selected =
            app.competition.tab == CompetitionTab::Bots && row == app.competition.selected;
        let style = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{} 🤖 {}", if selected { ">" } else { " " }, bot.username),
            style,
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Bots")),
        area,
    );
}

fn draw_create_match(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(CompetitionModal::CreateMatch(form)) = &app.competition.modal else {
        return;
    };
    let modal = centered_rect(56, 14, area);
    let mut lines = vec![
        Line::from(""),
        field_line("Title (optional)", &form.title.value, form.title_focused, false),
        Line::from(""),
        Line::from(Span::styled(
            "Participants (space to toggle, at least two):",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    for (i, candidate) in form.candidates.iter().enumerate() {
        let mark = if form.selected.contains(&candidate.id) {
            "[x]"
        } else {
            "[ ]"
        };
        let focused = !form.title_focused && form.cursor == i;
        let style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("  {mark} {}", candidate.username),
            style,
        )));
    }
    lines.push(Line::from(""));
    if form.submitting {
        lines.push(Line::from("Creating..."));
    }
    lines.push(error_line(form.error.as_deref()));
    render_modal(frame, modal, "New match", Color::Green, lines);
}

fn draw_match_detail(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(CompetitionModal::MatchDetail(form)) = &app.competition.modal else {
        return;
    };
    let modal = centered_rect(56, 14, area);
    let mut lines = Vec::new();
    match &form.detail {
        None => lines.push(Line::from("Loading match...")),
        Some(detail) => {
            let status_color = match detail.status {
                MatchStatus::Pending => Color::DarkGray,
                MatchStatus::InProgress => Color::Blue,
                MatchStatus::Completed => Color::Green,
            };
            lines.push(Line::from(vec![
                Span::styled(
                    detail.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    match_status_str(detail.status),
                    Style::default().fg(status_color),
                ),
            ]));
            lines.push(Line::from(""));
            for (i, entry) in form.entries.iter().enumerate() {
                let focused = form.cursor == i;
                let style = if focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                let confirmed = if entry.confirmed { " ✓" } else { "" };
                lines.push(Line::from(Span::styled(
                    format!(
                        "{} {:<16} {:>5}{confirmed}",
                        if focused { ">" } else { " " },
                        truncate(&entry.username, 16),
                        entry.input.value,
                    ),
                    style,
                )));
            }
            lines.push(Line::from(""));
            let hint = match detail.status {
                MatchStatus::InProgress => "Type scores, Enter to submit",
                MatchStatus::Completed if form.editing => "Edit scores, Enter to save",
                MatchStatus::Completed => "e to edit scores",
                MatchStatus::Pending => "Match has not started",
            };
            lines.push(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    if form.submitting {
        lines.push(Line::from("Submitting..."));
    }
    lines.push(error_line(form.error.as_deref()));
    render_modal(frame, modal, "Match details", Color::Blue, lines);
}

fn draw_manage_bots(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(CompetitionModal::ManageBots(form)) = &app.competition.modal else {
        return;
    };
    let modal = centered_rect(50, 11, area);
    let mut lines = vec![Line::from(Span::styled(
        format!("Up to {} bots. Blank slots are skipped.", komp_api::bots::MAX_BOTS),
        Style::default().fg(Color::DarkGray),
    ))];
    for (i, name) in form.names.iter().enumerate() {
        lines.push(field_line("Bot name", &name.value, form.focus == i, false));
    }
    lines.push(Line::from(""));
    if form.submitting {
        lines.push(Line::from("Creating..."));
    }
    lines.push(error_line(form.error.as_deref()));
    render_modal(frame, modal, "Manage bots", Color::Magenta, lines);
}

fn draw_add_participants(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(CompetitionModal::AddParticipants(form)) = &app.competition.modal else {
        return;
    };
    let modal = centered_rect(50, 14, area);
    let mut lines = vec![Line::from(Span::styled(
        "Friends not yet in this competition:",
        Style::default().fg(Color::DarkGray),
    ))];
    if form.loading {
        lines.push(Line::from("  loading friends..."));
    } else if form.friends.is_empty() {
        lines.push(Line::from("  everyone you know is already playing"));
    }
    for (i, friend) in form.friends.iter().enumerate() {
        let mark = if form.selected.contains(&friend.id) {
            "[x]"
        } else {
            "[ ]"
        };
        let style = if form.cursor == i {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("  {mark} {}", friend.username),
            style,
        )));
    }
    lines.push(Line::from(""));
    if form.submitting {
        lines.push(Line::from("Adding..."));
    }
    lines.push(error_line(form.error.as_deref()));
    render_modal(frame, modal, "Add participants", Color::Green, lines);
}

fn draw_confirm(frame: &mut Frame<'_>, area: Rect, title: &str, prompt: &str) {
    let modal = centered_rect(44, 5, area);
    let lines = vec![Line::from(""), Line::from(prompt.to_string())];
    render_modal(frame, modal, title, Color::Red, lines);
}
