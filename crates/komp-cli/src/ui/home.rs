//! Home screen: the competition list with filter and sort controls.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use komp_core::timefmt;

use super::{centered_rect, error_line, field_line, render_modal};
use crate::app::state::{CreateCompetitionFocus, CreateCompetitionForm};
use crate::app::App;
use crate::commands::fmt::truncate;

pub fn draw(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    draw_filter_bar(frame, app, chunks[0]);
    draw_list(frame, app, chunks[1]);

    if app.home.create.is_some() {
        draw_create_modal(frame, app, area);
    }
}

fn draw_filter_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let filter = &app.home.filter;
    let cursor = if app.home.filter_focused { "█" } else { "" };
    let line = Line::from(vec![
        Span::styled("Filter by user: ", Style::default().fg(Color::DarkGray)),
        Span::raw(filter.participant.as_str()),
        Span::styled(cursor, Style::default().fg(Color::White)),
        Span::styled(
            format!(
                "    sort: {} ({})",
                filter.key.label(),
                filter.direction.label()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_list(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let selected = app.home.selected;
    let loading = app.home.loading;
    let error = app.home.error.clone();

    let mut lines: Vec<Line<'_>> = Vec::new();
    if let Some(msg) = &error {
        lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        )));
    } else if loading {
        lines.push(Line::from("Loading competitions..."));
    } else {
        let visible: Vec<usize> = app.home.visible_indices().to_vec();
        if visible.is_empty() {
            lines.push(Line::from("No competitions. Press n to create one."));
        }
        for (row, idx) in visible.iter().enumerate() {
            let Some(c) = app.home.competitions.get(*idx) else {
                continue;
            };
            let marker = if row == selected { "> " } else { "  " };
            let style = if row == selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(
                    format!(
                        "{} {:<30} {:>2} players  {}",
                        c.icon,
                        truncate(&c.title, 30),
                        c.participants.len(),
                        timefmt::format_date(&c.created_at),
                    ),
                    style,
                ),
            ]));
        }
    }
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Your competitions"),
        ),
        area,
    );
}

fn draw_create_modal(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(form) = &app.home.create else {
        return;
    };
    let modal = centered_rect(56, 16, area);
    let mut lines = vec![
        Line::from(""),
        field_line(
            "Title",
            &form.title.value,
            form.focus == CreateCompetitionFocus::Title,
            false,
        ),
        icon_row(form),
        Line::from(""),
        Line::from(Span::styled(
            "Friends (space to toggle):",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if form.friends_loading {
        lines.push(Line::from("  loading friends..."));
    } else if form.friends.is_empty() {
        lines.push(Line::from("  no friends yet; add some first"));
    }
    for (i, friend) in form.friends.iter().enumerate() {
        let mark = if form.selected.contains(&friend.id) {
            "[x]"
        } else {
            "[ ]"
        };
        let focused = form.focus == CreateCompetitionFocus::Friends && form.cursor == i;
        let style = if focused {
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
        lines.push(Line::from("Creating..."));
    }
    lines.push(error_line(form.error.as_deref()));
    render_modal(frame, modal, "New competition", Color::Green, lines);
}

fn icon_row(form: &CreateCompetitionForm) -> Line<'_> {
    let focused = form.focus == CreateCompetitionFocus::Icon;
    let marker = if focused { "◀ ▶" } else { "   " };
    Line::from(vec![
        Span::styled("              Icon: ", Style::default().fg(Color::DarkGray)),
        Span::raw(form.icon()),
        Span::styled(format!("  {marker}"), Style::default().fg(Color::DarkGray)),
    ])
}
