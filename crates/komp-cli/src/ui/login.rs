//! Login and register screens.

use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::text::Line;
use ratatui::Frame;

use super::{centered_rect, error_line, field_line, render_modal};
use crate::app::App;

pub fn draw_login(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let modal = centered_rect(50, 9, area);
    let busy = if app.login.submitting {
        Line::from("Logging in...")
    } else {
        Line::from("")
    };
    let lines = vec![
        Line::from(""),
        field_line(
            "Username",
            &app.login.username.value,
            app.login.focus == 0,
            false,
        ),
        field_line(
            "Password",
            &app.login.password.value,
            app.login.focus == 1,
            true,
        ),
        Line::from(""),
        busy,
        error_line(app.login.error.as_deref()),
    ];
    render_modal(frame, modal, "Log in", Color::Cyan, lines);
}

pub fn draw_register(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let modal = centered_rect(50, 11, area);
    let busy = if app.register.submitting {
        Line::from("Creating account...")
    } else {
        Line::from("")
    };
    let lines = vec![
        Line::from(""),
        field_line(
            "Username",
            &app.register.username.value,
            app.register.focus == 0,
            false,
        ),
        field_line(
            "Email",
            &app.register.email.value,
            app.register.focus == 1,
            false,
        ),
        field_line(
            "Password",
            &app.register.password.value,
            app.register.focus == 2,
            true,
        ),
        field_line(
            "Confirm password",
            &app.register.confirm.value,
            app.register.focus == 3,
            true,
        ),
        Line::from(""),
        busy,
        error_line(app.register.error.as_deref()),
    ];
    render_modal(frame, modal, "Create account", Color::Cyan, lines);
}
