//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover I/O only; the reducer never talks to the backend itself.

use taskdeck_core::api::{Credentials, NewTask, Registration, TaskId};

use crate::common::RequestId;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Log in and store the returned token.
    Login { credentials: Credentials },

    /// Create an account.
    Register { registration: Registration },

    /// Fetch the task list; the result is tagged with `req`.
    FetchTasks { req: RequestId },

    CreateTask { task: NewTask },

    /// Set the completion flag of one task.
    ToggleTask { id: TaskId, completed: bool },

    DeleteTask { id: TaskId },

    /// Forget the stored token.
    ClearSession,
}
