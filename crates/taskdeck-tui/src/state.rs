//! Top-level application state.

use crate::common::LatestOnly;
use crate::features::auth::AuthState;
use crate::features::dashboard::DashboardState;

/// The screen currently shown. Leaving a screen drops its drafts.
#[derive(Debug)]
pub enum Screen {
    Auth(AuthState),
    Dashboard(DashboardState),
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub should_quit: bool,
    /// Outstanding task-list fetch. Lives outside the dashboard so results
    /// that arrive after logout are recognized as stale.
    pub task_fetch: LatestOnly,
    pub spinner_frame: usize,
    /// Terminal size from the latest frame.
    pub viewport: (u16, u16),
}

impl AppState {
    /// Starts on the auth screen.
    pub fn new() -> Self {
        Self {
            screen: Screen::Auth(AuthState::new()),
            should_quit: false,
            task_fetch: LatestOnly::default(),
            spinner_frame: 0,
            viewport: (0, 0),
        }
    }

    pub fn auth(&self) -> Option<&AuthState> {
        match &self.screen {
            Screen::Auth(auth) => Some(auth),
            Screen::Dashboard(_) => None,
        }
    }

    pub fn dashboard(&self) -> Option<&DashboardState> {
        match &self.screen {
            Screen::Dashboard(dashboard) => Some(dashboard),
            Screen::Auth(_) => None,
        }
    }

    /// Rows the task list can show at once, used as the page step.
    pub fn list_page_size(&self) -> usize {
        usize::from(self.viewport.1.saturating_sub(16)).max(1)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
