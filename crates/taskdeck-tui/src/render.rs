//! Pure view functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::features::{auth, dashboard};
use crate::state::{AppState, Screen};

/// Spinner frames for in-flight requests.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    match &app.screen {
        Screen::Auth(state) => auth::render_auth(frame, state, app.spinner_frame, area),
        Screen::Dashboard(state) => dashboard::render_dashboard(
            frame,
            state,
            app.task_fetch.has_active(),
            app.spinner_frame,
            area,
        ),
    }
}

/// A `width` x `height` rect centered in `area`, clipped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
