//! Friends screen: friends list, requests, and debounced user search.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::state::FriendsTab;
use crate::app::App;
use crate::commands::fmt::truncate;

pub fn draw(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = [
        FriendsTab::Friends,
        FriendsTab::Received,
        FriendsTab::Sent,
        FriendsTab::Search,
    ]
    .iter()
    .map(|tab| {
        let label = match *tab {
            FriendsTab::Received => format!("{} ({})", tab.label(), app.friends.received.len()),
            _ => tab.label().to_string(),
        };
        if *tab == app.friends.tab {
            format!("[{label}]")
        } else {
            format!(" {label} ")
        }
    })
    .collect::<Vec<_>>()
    .join(" ");

    let mut lines: Vec<Line<'_>> = Vec::new();
    if app.friends.loading {
        lines.push(Line::from("Loading..."));
    }
    if let Some(msg) = &app.friends.error {
        lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    match app.friends.tab {
        FriendsTab::Friends => draw_friend_rows(app, &mut lines),
        FriendsTab::Received => draw_request_rows(app, &mut lines, true),
        FriendsTab::Sent => draw_request_rows(app, &mut lines, false),
        FriendsTab::Search => draw_search(app, &mut lines),
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

fn draw_friend_rows(app: &App, lines: &mut Vec<Line<'_>>) {
    if app.friends.friends.is_empty() && !app.friends.loading {
        lines.push(Line::from(
            "  No friends yet. Switch to the Search tab to find people.",
        ));
    }
    for (i, friend) in app.friends.friends.iter().enumerate() {
        let selected = i == app.friends.selected;
        let style = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{} {}",
                if selected { ">" } else { " " },
                truncate(&friend.username, 24)
            ),
            style,
        )));
    }
}

fn draw_request_rows(app: &App, lines: &mut Vec<Line<'_>>, received: bool) {
    let requests = if received {
        &app.friends.received
    } else {
        &app.friends.sent
    };
    if requests.is_empty() && !app.friends.loading {
        lines.push(Line::from(if received {
            "  No pending requests."
        } else {
            "  No sent requests."
        }));
    }
    for (i, request) in requests.iter().enumerate() {
        let selected = i == app.friends.selected;
        let style = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let hint = if received {
            "a accept · x reject"
        } else {
            "x cancel"
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "{} {:<24}",
                    if selected { ">" } else { " " },
                    truncate(&request.sender_username, 24)
                ),
                style,
            ),
            Span::styled(
                if selected { hint } else { "" },
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
}

fn draw_search<'a>(app: &'a App, lines: &mut Vec<Line<'a>>) {
    lines.push(Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.friends.query.value.as_str()),
        Span::styled("█", Style::default().fg(Color::White)),
    ]));
    lines.push(Line::from(""));
    if app.friends.searching {
        lines.push(Line::from("Searching..."));
    } else if app.friends.results.is_empty() && !app.friends.query.value.trim().is_empty() {
        lines.push(Line::from("  No users found."));
    }
    for (i, user) in app.friends.results.iter().enumerate() {
        let selected = i == app.friends.selected;
        let style = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "{} {:<24}",
                    if selected { ">" } else { " " },
                    truncate(&user.username, 24)
                ),
                style,
            ),
            Span::styled(
                if selected { "Enter to send request" } else { "" },
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
}
