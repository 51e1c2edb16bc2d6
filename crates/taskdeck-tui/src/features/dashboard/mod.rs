//! Dashboard screen: task list, new-task form, search and stats.

mod render;
mod state;
mod update;

pub use render::render_dashboard;
pub use state::{DashboardFocus, DashboardState, EMPTY_LIST};
pub use update::{
    SESSION_EXPIRED, create_task, delete_selected, delete_task, handle_event, handle_key, logout,
    on_mount, refresh, toggle_selected, toggle_task,
};
