//! Auth screen: login and registration form.

mod render;
mod state;
mod update;

pub use render::render_auth;
pub use state::{ACCOUNT_CREATED, AuthField, AuthMessage, AuthMode, AuthState, FALLBACK_ERROR};
pub use update::{handle_event, handle_key, submit};
