//! Dashboard view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph};
use taskdeck_core::api::Task;
use taskdeck_core::tasks::TaskStats;

use super::state::{DashboardFocus, DashboardState, EMPTY_LIST};
use crate::common::TextField;
use crate::render::SPINNER_FRAMES;

const STATS_HEIGHT: u16 = 3;
const DRAFT_HEIGHT: u16 = 4;
const SEARCH_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;

pub fn render_dashboard(
    frame: &mut Frame,
    state: &DashboardState,
    refreshing: bool,
    spinner_frame: usize,
    area: Rect,
) {
    let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];

    if state.loading {
        let text = Paragraph::new(Line::from(Span::styled(
            format!("{spinner} Loading tasks..."),
            Style::default().fg(Color::Yellow),
        )))
        .alignment(Alignment::Center);
        let y = area.y + area.height / 2;
        frame.render_widget(text, Rect::new(area.x, y, area.width, 1));
        return;
    }

    let stats = state.stats();
    let stats_height = if stats.percent().is_some() {
        STATS_HEIGHT
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(stats_height),
            Constraint::Length(DRAFT_HEIGHT),
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    render_header(frame, refreshing, spinner, chunks[0]);
    if stats_height > 0 {
        render_stats(frame, stats, chunks[1]);
    }
    render_draft(frame, state, spinner, chunks[2]);
    render_search(frame, state, chunks[3]);
    render_list(frame, state, chunks[4]);
    render_footer(frame, state.focus, chunks[5]);
}

fn render_header(frame: &mut Frame, refreshing: bool, spinner: &str, area: Rect) {
    let mut spans = vec![Span::styled(
        " My Tasks",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if refreshing {
        spans.push(Span::styled(
            format!("  {spinner} refreshing"),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_stats(frame: &mut Frame, stats: TaskStats, area: Rect) {
    let Some(percent) = stats.percent() else {
        return;
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(
            " Total {}  ·  Completed {}  ·  Pending {} ",
            stats.total,
            stats.completed,
            stats.pending()
        ));
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Green))
        .percent(u16::from(percent))
        .label(format!("{percent}% done"));
    frame.render_widget(gauge, area);
}

fn render_draft(frame: &mut Frame, state: &DashboardState, spinner: &str, area: Rect) {
    let active = matches!(
        state.focus,
        DashboardFocus::Title | DashboardFocus::Description
    );
    let title = if state.adding {
        format!(" New Task {spinner} adding... ")
    } else {
        " New Task ".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(active))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = [
        ("Title       ", &state.title, DashboardFocus::Title),
        ("Description ", &state.description, DashboardFocus::Description),
    ];
    for (row, (label, field, focus)) in rows.into_iter().enumerate() {
        let y = inner.y + row as u16;
        if y >= inner.bottom() {
            break;
        }
        let line_area = Rect::new(inner.x, y, inner.width, 1);
        render_field(frame, label, field, state.focus == focus, line_area);
    }
}

fn render_search(frame: &mut Frame, state: &DashboardState, area: Rect) {
    let active = state.focus == DashboardFocus::Search;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(active))
        .title(" Search ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_field(frame, "/ ", &state.search, active, inner);
}

fn render_field(frame: &mut Frame, label: &str, field: &TextField, focused: bool, area: Rect) {
    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let line = Line::from(vec![
        Span::styled(label.to_string(), label_style),
        Span::styled(field.value().to_string(), Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if focused {
        let x = area.x + label.chars().count() as u16 + field.cursor_width() as u16;
        if x < area.right() {
            frame.set_cursor_position((x, area.y));
        }
    }
}

fn render_list(frame: &mut Frame, state: &DashboardState, area: Rect) {
    let visible = state.visible_tasks();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state.focus == DashboardFocus::List))
        .title(format!(" Tasks ({}) ", visible.len()));

    if visible.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            EMPTY_LIST,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| ListItem::new(task_line(task, state.is_busy(&task.id))))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn task_line(task: &Task, busy: bool) -> Line<'static> {
    let (mark, title_style) = if task.completed {
        (
            Span::styled("[x] ", Style::default().fg(Color::Green)),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        (
            Span::styled("[ ] ", Style::default().fg(Color::Gray)),
            Style::default().fg(Color::White),
        )
    };

    let mut spans = vec![mark, Span::styled(task.title.clone(), title_style)];
    if let Some(description) = task.description_text() {
        spans.push(Span::styled(
            format!("  {description}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if busy {
        spans.push(Span::styled(" …", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn render_footer(frame: &mut Frame, focus: DashboardFocus, area: Rect) {
    let hints = match focus {
        DashboardFocus::List => {
            "j/k move · space toggle · d delete · a add · / search · r refresh · L logout · q quit"
        }
        DashboardFocus::Title | DashboardFocus::Description => {
            "Tab switch field · Enter add task · Esc back to list"
        }
        DashboardFocus::Search => "Type to filter · Enter/Esc back to list",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        area,
    );
}

fn border_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
