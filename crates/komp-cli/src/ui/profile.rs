//! Profile screen and edit-profile modal.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::{centered_rect, error_line, field_line, render_modal};
use crate::app::App;

pub fn draw(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut lines = Vec::new();
    if app.profile.loading {
        lines.push(Line::from("Loading profile..."));
    } else if let Some(msg) = &app.profile.error {
        lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(profile) = &app.profile.profile {
        lines.push(Line::from(""));
        lines.push(row("Username", &profile.username));
        if let Some(email) = &profile.email {
            lines.push(row("Email", email));
        }
        lines.push(row("Role", &profile.role));
        lines.push(row("User ID", &profile.id.to_string()));
        if let Some(avatar) = &profile.avatar_url {
            lines.push(row("Avatar", avatar));
        }
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Profile")),
        area,
    );

    if app.profile.edit.is_some() {
        draw_edit_modal(frame, app, area);
    }
}

fn row<'a>(label: &'a str, value: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{label:>12}: "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(value.to_string()),
    ])
}

fn draw_edit_modal(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(form) = &app.profile.edit else {
        return;
    };
    let modal = centered_rect(54, 11, area);
    let lines = vec![
        Line::from(Span::styled(
            "Leave a field blank to keep it unchanged.",
            Style::default().fg(Color::DarkGray),
        )),
        field_line("New username", &form.new_username.value, form.focus == 0, false),
        field_line(
            "Current password",
            &form.current_password.value,
            form.focus == 1,
            true,
        ),
        field_line(
            "New password",
            &form.new_password.value,
            form.focus == 2,
            true,
        ),
        field_line(
            "Confirm password",
            &form.confirm_password.value,
            form.focus == 3,
            true,
        ),
        Line::from(""),
        if form.submitting {
            Line::from("Saving...")
        } else {
            Line::from("")
        },
        error_line(form.error.as_deref()),
    ];
    render_modal(frame, modal, "Edit profile", Color::Yellow, lines);
}
