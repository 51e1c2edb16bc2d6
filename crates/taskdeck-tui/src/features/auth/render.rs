//! Auth screen view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{AuthField, AuthMessage, AuthMode, AuthState};
use crate::render::{SPINNER_FRAMES, centered_rect};

const FORM_WIDTH: u16 = 56;

pub fn render_auth(frame: &mut Frame, state: &AuthState, spinner_frame: usize, area: Rect) {
    let fields = state.mode.fields();
    // title + subtitle + blank, 2 lines per field, blank + message + blank + hints
    let form_height = 3 + fields.len() as u16 * 2 + 4 + 2;
    let form_area = centered_rect(area, FORM_WIDTH, form_height);

    let (title, subtitle) = match state.mode {
        AuthMode::Login => ("Welcome Back", "Login to manage your tasks"),
        AuthMode::Register => ("Create Account", "Sign up to get started"),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" taskdeck ");
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center),
        Line::from(""),
    ];

    let focused = state.focused();
    let label_width = fields
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0);
    let mut cursor = None;
    for field in fields {
        let is_focused = *field == focused;
        let pointer = if is_focused { "> " } else { "  " };
        let label = format!("{pointer}{:<label_width$}  ", field.label());
        let input = state.field(*field);
        let shown = if *field == AuthField::Password {
            "•".repeat(input.value().chars().count())
        } else {
            input.value().to_string()
        };

        if is_focused {
            let cursor_offset = if *field == AuthField::Password {
                input.cursor()
            } else {
                input.cursor_width()
            };
            cursor = Some((
                inner.x + label.chars().count() as u16 + cursor_offset as u16,
                inner.y + lines.len() as u16,
            ));
        }

        let label_style = if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(label, label_style),
            Span::styled(shown, Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(""));
    }

    if state.submitting {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        let text = match state.mode {
            AuthMode::Login => "Logging in...",
            AuthMode::Register => "Creating account...",
        };
        lines.push(Line::from(Span::styled(
            format!("{spinner} {text}"),
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(message) = &state.message {
        let color = match message {
            AuthMessage::Error(_) => Color::Red,
            AuthMessage::Notice(_) => Color::Green,
        };
        lines.push(Line::from(Span::styled(
            message.text().to_string(),
            Style::default().fg(color),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    let toggle_hint = match state.mode {
        AuthMode::Login => "Ctrl-T: Don't have an account? Sign up",
        AuthMode::Register => "Ctrl-T: Already have an account? Login",
    };
    lines.push(Line::from(Span::styled(
        toggle_hint,
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "Tab next field · Enter submit · Esc quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);

    if let Some((x, y)) = cursor
        && !state.submitting
        && x < inner.right()
        && y < inner.bottom()
    {
        frame.set_cursor_position((x, y));
    }
}
