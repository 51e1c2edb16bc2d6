//! Auth screen reducer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck_core::api::{Credentials, Registration};

use super::state::{ACCOUNT_CREATED, AuthMessage, AuthMode, AuthState, FALLBACK_ERROR};
use crate::effects::UiEffect;
use crate::events::{AuthResult, AuthUiEvent};
use crate::features::ScreenUpdate;

pub fn handle_key(state: &mut AuthState, key: KeyEvent) -> ScreenUpdate {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit].into(),
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit].into(),
        KeyCode::Char('t') if ctrl => {
            state.toggle_mode();
            ScreenUpdate::stay()
        }
        KeyCode::Tab | KeyCode::Down => {
            state.move_focus(1);
            ScreenUpdate::stay()
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.move_focus(-1);
            ScreenUpdate::stay()
        }
        KeyCode::Enter => submit(state).into(),
        _ => {
            let field = state.focused();
            state.field_mut(field).input(key);
            ScreenUpdate::stay()
        }
    }
}

/// Submits the form in the current mode.
pub fn submit(state: &mut AuthState) -> Vec<UiEffect> {
    if state.submitting {
        return vec![];
    }

    if let Some(missing) = state.first_missing_field() {
        state.focus = Some(missing);
        state.message = Some(AuthMessage::Error(format!(
            "{} is required",
            missing.label()
        )));
        return vec![];
    }

    state.submitting = true;
    state.message = None;

    let email = state.email.value().trim().to_string();
    let password = state.password.value().to_string();
    match state.mode {
        AuthMode::Login => vec![UiEffect::Login {
            credentials: Credentials { email, password },
        }],
        AuthMode::Register => vec![UiEffect::Register {
            registration: Registration {
                email,
                password,
                full_name: state.full_name.value().trim().to_string(),
            },
        }],
    }
}

pub fn handle_event(state: &mut AuthState, event: AuthUiEvent) -> ScreenUpdate {
    match event {
        AuthUiEvent::LoginFinished { result } => {
            state.submitting = false;
            match result {
                Ok(()) => ScreenUpdate::to_dashboard(),
                Err(detail) => {
                    state.message = Some(error_message(detail));
                    ScreenUpdate::stay()
                }
            }
        }
        AuthUiEvent::RegisterFinished { result } => {
            state.submitting = false;
            apply_register_result(state, result);
            ScreenUpdate::stay()
        }
    }
}

fn apply_register_result(state: &mut AuthState, result: AuthResult) {
    match result {
        Ok(()) => {
            state.set_mode(AuthMode::Login);
            state.message = Some(AuthMessage::Notice(ACCOUNT_CREATED.to_string()));
        }
        Err(detail) => state.message = Some(error_message(detail)),
    }
}

fn error_message(detail: Option<String>) -> AuthMessage {
    AuthMessage::Error(
        detail
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_ERROR.to_string()),
    )
}
