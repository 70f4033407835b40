//! TUI rendering, one module per screen.

mod competition;
mod friends;
mod home;
mod login;
mod profile;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::state::Screen;
use crate::app::toasts::ToastKind;
use crate::app::App;

/// Draw the full UI.
pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Screen body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    match app.screen {
        Screen::Login => login::draw_login(frame, app, chunks[1]),
        Screen::Register => login::draw_register(frame, app, chunks[1]),
        Screen::Home => home::draw(frame, app, chunks[1]),
        Screen::Competition => competition::draw(frame, app, chunks[1]),
        Screen::Friends => friends::draw(frame, app, chunks[1]),
        Screen::Profile => profile::draw(frame, app, chunks[1]),
    }
    draw_status_bar(frame, app, chunks[2]);
    draw_toasts(frame, app);
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        "Komp",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(user) = &app.user {
        spans.push(Span::raw(format!(" | {}", user.username)));
    }
    if app.badge_count > 0 {
        spans.push(Span::styled(
            format!(" | ✉ {} friend request(s)", app.badge_count),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let hints = match app.screen {
        Screen::Login => "Enter login | Tab next field | Ctrl+R register | Esc quit",
        Screen::Register => "Enter submit | Tab next field | Ctrl+L login | Esc back",
        Screen::Home => {
            "Enter open | n new | / filter | s sort | d direction | f friends | p profile | q quit"
        }
        Screen::Competition => {
            "Tab switch | Enter details | n new match | s start | a add | b bots | Esc back"
        }
        Screen::Friends => "Tab switch | a accept | x reject/cancel | Enter send | Esc back",
        Screen::Profile => "e edit | r reload | Esc back",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        area,
    );
}

/// Stack live toasts in the top-right corner.
fn draw_toasts(frame: &mut Frame<'_>, app: &App) {
    if app.toasts.is_empty() {
        return;
    }
    let screen = frame.area();
    let width = 40.min(screen.width);
    // A handful at most; older toasts expire on their own.
    for (i, toast) in app.toasts.iter().take(4).enumerate() {
        let y = screen.y + 1 + u16::try_from(i).unwrap_or(0) * 3;
        if y + 3 > screen.height {
            break;
        }
        let area = Rect::new(screen.right().saturating_sub(width + 1), y, width, 3);
        let (color, title) = match toast.kind {
            ToastKind::Success => (Color::Green, "ok"),
            ToastKind::Error => (Color::Red, "error"),
            ToastKind::Info => (Color::Blue, "info"),
        };
        let widget = Paragraph::new(toast.message.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .style(Style::default().fg(color)),
            );
        frame.render_widget(Clear, area);
        frame.render_widget(widget, area);
    }
}

/// Centered overlay rect for modals.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Render a bordered modal panel with the given title and lines.
pub(crate) fn render_modal(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    border_color: Color,
    lines: Vec<Line<'_>>,
) {
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(Clear, area);
    frame.render_widget(panel, area);
}

/// One line of an input form: label, value, focus marker.
pub(crate) fn field_line<'a>(
    label: &'a str,
    value: &'a str,
    focused: bool,
    mask: bool,
) -> Line<'a> {
    let shown = if mask {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let cursor = if focused { "█" } else { "" };
    Line::from(vec![
        Span::styled(
            format!("{label:>18}: "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(shown),
        Span::styled(cursor, Style::default().fg(Color::White)),
    ])
}

/// Error line shown inside forms.
pub(crate) fn error_line(error: Option<&str>) -> Line<'_> {
    match error {
        Some(msg) => Line::from(Span::styled(msg, Style::default().fg(Color::Red))),
        None => Line::from(""),
    }
}
