//! UI event types.
//!
//! All external inputs (terminal, timer, async results) are converted to
//! `UiEvent` before reaching the reducer. Async handlers send their results
//! to the runtime inbox as one of these.

use crossterm::event::Event as CrosstermEvent;
use taskdeck_core::api::{ApiError, Task, TaskId};

use crate::common::RequestId;

/// Outcome of a login or registration request.
///
/// `Err` carries the server's detail text when it sent one.
pub type AuthResult = Result<(), Option<String>>;

#[derive(Debug)]
pub enum AuthUiEvent {
    /// Login finished; on success the token is already stored.
    LoginFinished { result: AuthResult },
    RegisterFinished { result: AuthResult },
}

#[derive(Debug)]
pub enum DashboardUiEvent {
    TasksLoaded {
        req: RequestId,
        result: Result<Vec<Task>, ApiError>,
    },
    TaskCreated {
        result: Result<Task, ApiError>,
    },
    TaskToggled {
        id: TaskId,
        result: Result<Task, ApiError>,
    },
    TaskDeleted {
        id: TaskId,
        result: Result<(), ApiError>,
    },
}

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic timer; drives spinner animation and rendering.
    Tick,
    /// Current terminal size, sent at the start of each loop iteration.
    Frame { width: u16, height: u16 },
    Terminal(CrosstermEvent),
    Auth(AuthUiEvent),
    Dashboard(DashboardUiEvent),
}
