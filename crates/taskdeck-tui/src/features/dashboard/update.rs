//! Dashboard reducer.
//!
//! Mutations only land after the server confirms them; nothing is applied
//! optimistically.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck_core::api::{NewTask, TaskId};
use taskdeck_core::tasks;

use super::state::{DashboardFocus, DashboardState};
use crate::common::LatestOnly;
use crate::effects::UiEffect;
use crate::events::DashboardUiEvent;
use crate::features::ScreenUpdate;

pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";

/// Starts the initial task fetch.
pub fn on_mount(fetch: &mut LatestOnly) -> Vec<UiEffect> {
    vec![UiEffect::FetchTasks { req: fetch.begin() }]
}

/// Re-runs the fetch; any older in-flight result becomes stale.
pub fn refresh(fetch: &mut LatestOnly) -> Vec<UiEffect> {
    on_mount(fetch)
}

pub fn logout(fetch: &mut LatestOnly) -> ScreenUpdate {
    fetch.cancel();
    ScreenUpdate::to_auth(None).with_effects(vec![UiEffect::ClearSession])
}

pub fn handle_key(
    state: &mut DashboardState,
    fetch: &mut LatestOnly,
    key: KeyEvent,
    page_size: usize,
) -> ScreenUpdate {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit].into();
    }

    match state.focus {
        DashboardFocus::List => handle_list_key(state, fetch, key, page_size),
        DashboardFocus::Title | DashboardFocus::Description => handle_draft_key(state, key).into(),
        DashboardFocus::Search => {
            handle_search_key(state, key);
            ScreenUpdate::stay()
        }
    }
}

fn handle_list_key(
    state: &mut DashboardState,
    fetch: &mut LatestOnly,
    key: KeyEvent,
    page_size: usize,
) -> ScreenUpdate {
    match key.code {
        KeyCode::Char('q') => vec![UiEffect::Quit].into(),
        KeyCode::Char('L') => logout(fetch),
        KeyCode::Char('r') => refresh(fetch).into(),
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_prev(1);
            ScreenUpdate::stay()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_next(1);
            ScreenUpdate::stay()
        }
        KeyCode::PageUp => {
            state.select_prev(page_size.max(1));
            ScreenUpdate::stay()
        }
        KeyCode::PageDown => {
            state.select_next(page_size.max(1));
            ScreenUpdate::stay()
        }
        KeyCode::Home | KeyCode::Char('g') => {
            state.selected = 0;
            ScreenUpdate::stay()
        }
        KeyCode::End | KeyCode::Char('G') => {
            state.selected = state.visible_tasks().len().saturating_sub(1);
            ScreenUpdate::stay()
        }
        KeyCode::Char(' ') | KeyCode::Enter => toggle_selected(state).into(),
        KeyCode::Char('d') | KeyCode::Delete => delete_selected(state).into(),
        KeyCode::Char('a') | KeyCode::Tab => {
            state.focus = DashboardFocus::Title;
            ScreenUpdate::stay()
        }
        KeyCode::Char('/') => {
            state.focus = DashboardFocus::Search;
            ScreenUpdate::stay()
        }
        KeyCode::Esc => {
            if !state.search.value().is_empty() {
                state.search.clear();
                state.clamp_selection();
            }
            ScreenUpdate::stay()
        }
        _ => ScreenUpdate::stay(),
    }
}

fn handle_draft_key(state: &mut DashboardState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => state.focus = DashboardFocus::List,
        KeyCode::Tab => {
            state.focus = match state.focus {
                DashboardFocus::Title => DashboardFocus::Description,
                _ => DashboardFocus::Title,
            };
        }
        KeyCode::BackTab => {
            state.focus = match state.focus {
                DashboardFocus::Description => DashboardFocus::Title,
                _ => DashboardFocus::List,
            };
        }
        KeyCode::Enter => return create_task(state),
        _ => {
            let field = if state.focus == DashboardFocus::Title {
                &mut state.title
            } else {
                &mut state.description
            };
            field.input(key);
        }
    }
    vec![]
}

fn handle_search_key(state: &mut DashboardState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => state.focus = DashboardFocus::List,
        _ => {
            if state.search.input(key) {
                state.selected = 0;
            }
        }
    }
}

/// Submits the new-task draft.
///
/// No-op while a create is in flight or when the title is blank.
pub fn create_task(state: &mut DashboardState) -> Vec<UiEffect> {
    if state.adding {
        return vec![];
    }
    let Some(task) = NewTask::from_draft(state.title.value(), state.description.value()) else {
        return vec![];
    };
    state.adding = true;
    vec![UiEffect::CreateTask { task }]
}

pub fn toggle_selected(state: &mut DashboardState) -> Vec<UiEffect> {
    let Some(task) = state.selected_task() else {
        return vec![];
    };
    let id = task.id.clone();
    let completed = !task.completed;
    toggle_task(state, id, completed)
}

/// Requests the completion flag flip. Ignored while the same task has a
/// toggle or delete in flight.
pub fn toggle_task(state: &mut DashboardState, id: TaskId, completed: bool) -> Vec<UiEffect> {
    if state.is_busy(&id) {
        return vec![];
    }
    state.toggling.insert(id.clone());
    vec![UiEffect::ToggleTask { id, completed }]
}

pub fn delete_selected(state: &mut DashboardState) -> Vec<UiEffect> {
    let Some(id) = state.selected_task().map(|t| t.id.clone()) else {
        return vec![];
    };
    delete_task(state, id)
}

pub fn delete_task(state: &mut DashboardState, id: TaskId) -> Vec<UiEffect> {
    if state.deleting.contains(&id) {
        return vec![];
    }
    state.deleting.insert(id.clone());
    vec![UiEffect::DeleteTask { id }]
}

pub fn handle_event(
    state: &mut DashboardState,
    fetch: &mut LatestOnly,
    event: DashboardUiEvent,
) -> ScreenUpdate {
    match event {
        DashboardUiEvent::TasksLoaded { req, result } => {
            if !fetch.finish_if_active(req) {
                tracing::debug!(?req, "discarding stale task list");
                return ScreenUpdate::stay();
            }
            match result {
                Ok(list) => {
                    state.tasks = list;
                    state.loading = false;
                    state.clamp_selection();
                    ScreenUpdate::stay()
                }
                Err(err) if err.is_unauthorized() => {
                    tracing::warn!(error = %err, "session rejected while loading tasks");
                    ScreenUpdate::to_auth(Some(SESSION_EXPIRED.to_string()))
                        .with_effects(vec![UiEffect::ClearSession])
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to load tasks");
                    ScreenUpdate::to_auth(Some(format!(
                        "Could not load tasks: {}",
                        err.user_message()
                    )))
                }
            }
        }
        DashboardUiEvent::TaskCreated { result } => {
            if !state.adding {
                return ScreenUpdate::stay();
            }
            state.adding = false;
            match result {
                Ok(task) => {
                    tasks::prepend(&mut state.tasks, task);
                    state.clear_draft();
                    state.search.clear();
                    state.selected = 0;
                    state.focus = DashboardFocus::List;
                }
                Err(err) => tracing::warn!(error = %err, "failed to create task"),
            }
            ScreenUpdate::stay()
        }
        DashboardUiEvent::TaskToggled { id, result } => {
            if !state.toggling.remove(&id) {
                return ScreenUpdate::stay();
            }
            match result {
                Ok(task) => {
                    if !tasks::replace_by_id(&mut state.tasks, task) {
                        tracing::debug!(%id, "toggled task no longer listed");
                    }
                }
                Err(err) => tracing::warn!(%id, error = %err, "failed to toggle task"),
            }
            ScreenUpdate::stay()
        }
        DashboardUiEvent::TaskDeleted { id, result } => {
            if !state.deleting.remove(&id) {
                return ScreenUpdate::stay();
            }
            match result {
                Ok(()) => {
                    tasks::remove_by_id(&mut state.tasks, &id);
                    state.clamp_selection();
                }
                Err(err) => tracing::warn!(%id, error = %err, "failed to delete task"),
            }
            ScreenUpdate::stay()
        }
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_core::api::{ApiError, Task};

    use super::*;
    use crate::features::ScreenTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn task(id: &str, title: &str, completed: bool) -> Task {
        Task {
            id: TaskId::from(id),
            title: title.to_string(),
            description: None,
            completed,
        }
    }

    fn loaded(tasks: Vec<Task>) -> (DashboardState, LatestOnly) {
        let mut state = DashboardState::new();
        let mut fetch = LatestOnly::default();
        let effects = on_mount(&mut fetch);
        let [UiEffect::FetchTasks { req }] = effects.as_slice() else {
            panic!("expected a fetch effect");
        };
        handle_event(
            &mut state,
            &mut fetch,
            DashboardUiEvent::TasksLoaded {
                req: *req,
                result: Ok(tasks),
            },
        );
        (state, fetch)
    }

    #[test]
    fn test_mount_fetch_populates_tasks() {
        let (state, fetch) = loaded(vec![task("1", "a", false), task("2", "b", true)]);
        assert!(!state.loading);
        assert_eq!(state.tasks.len(), 2);
        assert!(!fetch.has_active());
    }

    #[test]
    fn test_unauthorized_fetch_clears_session_and_shows_auth() {
        let mut state = DashboardState::new();
        let mut fetch = LatestOnly::default();
        let req = fetch.begin();

        let update = handle_event(
            &mut state,
            &mut fetch,
            DashboardUiEvent::TasksLoaded {
                req,
                result: Err(ApiError::http_status(
                    401,
                    r#"{"detail":"Could not validate credentials"}"#,
                )),
            },
        );

        assert_eq!(
            update.transition,
            ScreenTransition::ToAuth {
                message: Some(SESSION_EXPIRED.to_string())
            }
        );
        assert!(matches!(update.effects.as_slice(), [UiEffect::ClearSession]));
        assert!(state.loading);
    }

    #[test]
    fn test_other_fetch_failure_goes_to_auth_without_clearing() {
        let mut state = DashboardState::new();
        let mut fetch = LatestOnly::default();
        let req = fetch.begin();

        let update = handle_event(
            &mut state,
            &mut fetch,
            DashboardUiEvent::TasksLoaded {
                req,
                result: Err(ApiError::transport("connection refused")),
            },
        );

        assert_eq!(
            update.transition,
            ScreenTransition::ToAuth {
                message: Some("Could not load tasks: connection refused".to_string())
            }
        );
        assert!(update.effects.is_empty());
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn test_stale_fetch_result_is_discarded() {
        let mut state = DashboardState::new();
        let mut fetch = LatestOnly::default();
        let old = fetch.begin();
        let _new = fetch.begin();

        let update = handle_event(
            &mut state,
            &mut fetch,
            DashboardUiEvent::TasksLoaded {
                req: old,
                result: Err(ApiError::transport("boom")),
            },
        );
        assert_eq!(update.transition, ScreenTransition::Stay);
        assert!(state.loading);
    }

    #[test]
    fn test_blank_title_create_is_noop() {
        let (mut state, _) = loaded(vec![task("1", "a", false)]);
        state.title.set("   ");
        state.description.set("ignored");

        assert!(create_task(&mut state).is_empty());
        assert!(!state.adding);
        assert_eq!(state.tasks.len(), 1);
    }

    #[test]
    fn test_create_prepends_server_task_and_clears_draft() {
        let (mut state, mut fetch) = loaded(vec![task("1", "a", false)]);
        state.title.set(" New task ");
        let effects = create_task(&mut state);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CreateTask { task }] if task.title == "New task" && task.description.is_none()
        ));
        assert!(create_task(&mut state).is_empty(), "guarded while adding");

        handle_event(
            &mut state,
            &mut fetch,
            DashboardUiEvent::TaskCreated {
                result: Ok(task("42", "New task", false)),
            },
        );

        assert!(!state.adding);
        assert_eq!(state.tasks[0].id.as_str(), "42");
        assert_eq!(state.tasks.len(), 2);
        assert!(state.title.value().is_empty());
    }

    #[test]
    fn test_failed_create_keeps_draft_and_resets_adding() {
        let (mut state, mut fetch) = loaded(vec![]);
        state.title.set("Keep me");
        create_task(&mut state);

        handle_event(
            &mut state,
            &mut fetch,
            DashboardUiEvent::TaskCreated {
                result: Err(ApiError::http_status(500, "")),
            },
        );
        assert!(!state.adding);
        assert!(state.tasks.is_empty());
        assert_eq!(state.title.value(), "Keep me");
    }

    #[test]
    fn test_toggle_waits_for_server_and_touches_only_target() {
        let (mut state, mut fetch) = loaded(vec![
            task("1", "a", false),
            task("2", "b", false),
            task("3", "c", true),
        ]);
        state.selected = 1;

        let effects = toggle_selected(&mut state);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::ToggleTask { id, completed: true }] if id.as_str() == "2"
        ));
        assert!(!state.tasks[1].completed, "no optimistic update");
        assert!(toggle_selected(&mut state).is_empty(), "in-flight toggle ignored");

        handle_event(
            &mut state,
            &mut fetch,
            DashboardUiEvent::TaskToggled {
                id: TaskId::from("2"),
                result: Ok(task("2", "b", true)),
            },
        );

        let flags: Vec<bool> = state.tasks.iter().map(|t| t.completed).collect();
        assert_eq!(flags, vec![false, true, true]);
        assert!(state.toggling.is_empty());
    }

    #[test]
    fn test_failed_toggle_leaves_task_unchanged() {
        let (mut state, mut fetch) = loaded(vec![task("1", "a", false)]);
        toggle_selected(&mut state);
        handle_event(
            &mut state,
            &mut fetch,
            DashboardUiEvent::TaskToggled {
                id: TaskId::from("1"),
                result: Err(ApiError::http_status(404, r#"{"detail":"Todo not found"}"#)),
            },
        );
        assert!(!state.tasks[0].completed);
        assert!(state.toggling.is_empty());
    }

    #[test]
    fn test_delete_removes_exactly_one_entry() {
        let (mut state, mut fetch) = loaded(vec![
            task("1", "a", false),
            task("2", "b", false),
            task("3", "c", false),
        ]);
        state.selected = 2;

        let effects = delete_selected(&mut state);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::DeleteTask { id }] if id.as_str() == "3"
        ));
        assert!(delete_task(&mut state, TaskId::from("3")).is_empty());

        handle_event(
            &mut state,
            &mut fetch,
            DashboardUiEvent::TaskDeleted {
                id: TaskId::from("3"),
                result: Ok(()),
            },
        );

        let ids: Vec<&str> = state.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_failed_delete_keeps_task() {
        let (mut state, mut fetch) = loaded(vec![task("1", "a", false)]);
        delete_selected(&mut state);
        handle_event(
            &mut state,
            &mut fetch,
            DashboardUiEvent::TaskDeleted {
                id: TaskId::from("1"),
                result: Err(ApiError::transport("offline")),
            },
        );
        assert_eq!(state.tasks.len(), 1);
        assert!(state.deleting.is_empty());
    }

    #[test]
    fn test_logout_clears_session_and_cancels_fetch() {
        let mut state = DashboardState::new();
        let mut fetch = LatestOnly::default();
        on_mount(&mut fetch);

        let update = handle_key(&mut state, &mut fetch, key(KeyCode::Char('L')), 10);

        assert_eq!(update.transition, ScreenTransition::ToAuth { message: None });
        assert!(matches!(update.effects.as_slice(), [UiEffect::ClearSession]));
        assert!(!fetch.has_active());
    }

    #[test]
    fn test_draft_keys_and_submit() {
        let (mut state, mut fetch) = loaded(vec![]);
        handle_key(&mut state, &mut fetch, key(KeyCode::Char('a')), 10);
        assert_eq!(state.focus, DashboardFocus::Title);

        for ch in "Buy".chars() {
            handle_key(&mut state, &mut fetch, key(KeyCode::Char(ch)), 10);
        }
        handle_key(&mut state, &mut fetch, key(KeyCode::Tab), 10);
        handle_key(&mut state, &mut fetch, key(KeyCode::Char('x')), 10);
        assert_eq!(state.title.value(), "Buy");
        assert_eq!(state.description.value(), "x");

        let update = handle_key(&mut state, &mut fetch, key(KeyCode::Enter), 10);
        assert!(matches!(update.effects.as_slice(), [UiEffect::CreateTask { .. }]));
    }

    #[test]
    fn test_search_keys_filter_and_reset_selection() {
        let (mut state, mut fetch) = loaded(vec![
            task("1", "Buy milk", false),
            task("2", "Pay bills", false),
        ]);
        state.selected = 1;
        handle_key(&mut state, &mut fetch, key(KeyCode::Char('/')), 10);
        for ch in "milk".chars() {
            handle_key(&mut state, &mut fetch, key(KeyCode::Char(ch)), 10);
        }
        assert_eq!(state.selected, 0);
        assert_eq!(state.visible_tasks().len(), 1);

        handle_key(&mut state, &mut fetch, key(KeyCode::Enter), 10);
        assert_eq!(state.focus, DashboardFocus::List);
        assert_eq!(state.search.value(), "milk");
    }
}
