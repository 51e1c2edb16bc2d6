//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyEventKind};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::auth::{self, AuthState};
use crate::features::dashboard::{self, DashboardState};
use crate::features::{ScreenTransition, ScreenUpdate};
use crate::state::{AppState, Screen};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Frame { width, height } => {
            app.viewport = (width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Auth(event) => {
            let Screen::Auth(state) = &mut app.screen else {
                tracing::debug!(?event, "auth result arrived off the auth screen");
                return vec![];
            };
            let update = auth::handle_event(state, event);
            apply_screen_update(app, update)
        }
        UiEvent::Dashboard(event) => {
            let Screen::Dashboard(state) = &mut app.screen else {
                tracing::debug!(?event, "dashboard result arrived off the dashboard");
                return vec![];
            };
            let update = dashboard::handle_event(state, &mut app.task_fetch, event);
            apply_screen_update(app, update)
        }
    }
}

/// Chooses the first screen: the dashboard when a token is stored.
pub fn start(app: &mut AppState, authenticated: bool) -> Vec<UiEffect> {
    if authenticated {
        enter_dashboard(app)
    } else {
        app.screen = Screen::Auth(AuthState::new());
        vec![]
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            let page_size = app.list_page_size();
            let update = match &mut app.screen {
                Screen::Auth(state) => auth::handle_key(state, key),
                Screen::Dashboard(state) => {
                    dashboard::handle_key(state, &mut app.task_fetch, key, page_size)
                }
            };
            apply_screen_update(app, update)
        }
        Event::Paste(text) => {
            paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn paste(app: &mut AppState, text: &str) {
    let text = text.lines().next().unwrap_or_default();
    match &mut app.screen {
        Screen::Auth(state) => {
            let field = state.focused();
            state.field_mut(field).insert_str(text);
        }
        Screen::Dashboard(state) => {
            let field = match state.focus {
                dashboard::DashboardFocus::Title => &mut state.title,
                dashboard::DashboardFocus::Description => &mut state.description,
                dashboard::DashboardFocus::Search => &mut state.search,
                dashboard::DashboardFocus::List => return,
            };
            field.insert_str(text);
            state.clamp_selection();
        }
    }
}

fn apply_screen_update(app: &mut AppState, update: ScreenUpdate) -> Vec<UiEffect> {
    let mut effects = update.effects;
    match update.transition {
        ScreenTransition::Stay => {}
        ScreenTransition::ToAuth { message } => {
            app.task_fetch.cancel();
            app.screen = Screen::Auth(match message {
                Some(message) => AuthState::with_error(message),
                None => AuthState::new(),
            });
        }
        ScreenTransition::ToDashboard => effects.extend(enter_dashboard(app)),
    }
    effects
}

fn enter_dashboard(app: &mut AppState) -> Vec<UiEffect> {
    app.screen = Screen::Dashboard(DashboardState::new());
    dashboard::on_mount(&mut app.task_fetch)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use taskdeck_core::api::{ApiError, Task, TaskId};

    use super::*;
    use crate::events::{AuthUiEvent, DashboardUiEvent};
    use crate::features::auth::{AuthMessage, AuthMode};

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn fetch_req(effects: &[UiEffect]) -> crate::common::RequestId {
        match effects {
            [UiEffect::FetchTasks { req }] => *req,
            other => panic!("expected FetchTasks, got {other:?}"),
        }
    }

    #[test]
    fn test_start_without_token_shows_auth() {
        let mut app = AppState::new();
        assert!(start(&mut app, false).is_empty());
        assert_eq!(app.auth().map(|a| a.mode), Some(AuthMode::Login));
    }

    #[test]
    fn test_start_with_token_mounts_dashboard() {
        let mut app = AppState::new();
        let effects = start(&mut app, true);
        fetch_req(&effects);
        assert!(app.dashboard().is_some_and(|d| d.loading));
    }

    #[test]
    fn test_login_success_enters_dashboard_and_fetches() {
        let mut app = AppState::new();
        let effects = update(
            &mut app,
            UiEvent::Auth(AuthUiEvent::LoginFinished { result: Ok(()) }),
        );
        let req = fetch_req(&effects);
        assert!(app.task_fetch.is_active(req));
        assert!(app.dashboard().is_some());
    }

    #[test]
    fn test_failed_fetch_shows_auth_without_list() {
        let mut app = AppState::new();
        let req = fetch_req(&start(&mut app, true));

        let effects = update(
            &mut app,
            UiEvent::Dashboard(DashboardUiEvent::TasksLoaded {
                req,
                result: Err(ApiError::http_status(403, "")),
            }),
        );

        assert!(matches!(effects.as_slice(), [UiEffect::ClearSession]));
        let auth = app.auth().expect("auth screen");
        assert_eq!(
            auth.message,
            Some(AuthMessage::Error(dashboard::SESSION_EXPIRED.to_string()))
        );
    }

    #[test]
    fn test_logout_then_late_fetch_result_is_ignored() {
        let mut app = AppState::new();
        let req = fetch_req(&start(&mut app, true));

        let effects = update(&mut app, key(KeyCode::Char('L')));
        assert!(matches!(effects.as_slice(), [UiEffect::ClearSession]));
        assert!(app.auth().is_some());

        // Log straight back in; the old fetch must not populate the new dashboard.
        let new_req = fetch_req(&update(
            &mut app,
            UiEvent::Auth(AuthUiEvent::LoginFinished { result: Ok(()) }),
        ));
        assert_ne!(req, new_req);

        update(
            &mut app,
            UiEvent::Dashboard(DashboardUiEvent::TasksLoaded {
                req,
                result: Ok(vec![Task {
                    id: TaskId::from("1"),
                    title: "stale".into(),
                    description: None,
                    completed: false,
                }]),
            }),
        );
        let dashboard = app.dashboard().expect("dashboard");
        assert!(dashboard.loading);
        assert!(dashboard.tasks.is_empty());
    }

    #[test]
    fn test_quit_keys_emit_quit() {
        let mut app = AppState::new();
        let effects = update(&mut app, key(KeyCode::Esc));
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));

        let mut app = AppState::new();
        start(&mut app, true);
        let effects = update(&mut app, key(KeyCode::Char('q')));
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }

    #[test]
    fn test_paste_goes_to_focused_field() {
        let mut app = AppState::new();
        update(&mut app, UiEvent::Terminal(Event::Paste("me@example.com\nignored".into())));
        assert_eq!(app.auth().map(|a| a.email.value()), Some("me@example.com"));
    }
}
