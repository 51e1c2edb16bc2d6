//! Screen features: each owns its state, reducer and view.

pub mod auth;
pub mod dashboard;

use crate::effects::UiEffect;

/// Navigation requested by a screen reducer.
#[derive(Debug, PartialEq, Eq)]
pub enum ScreenTransition {
    Stay,
    /// Show the auth screen, optionally with a message in its status slot.
    ToAuth { message: Option<String> },
    /// Show the dashboard and fetch the task list.
    ToDashboard,
}

/// Result of feeding a key or async result to a screen.
#[derive(Debug)]
pub struct ScreenUpdate {
    pub transition: ScreenTransition,
    pub effects: Vec<UiEffect>,
}

impl ScreenUpdate {
    fn new(transition: ScreenTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(ScreenTransition::Stay)
    }

    pub fn to_auth(message: Option<String>) -> Self {
        Self::new(ScreenTransition::ToAuth { message })
    }

    pub fn to_dashboard() -> Self {
        Self::new(ScreenTransition::ToDashboard)
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

impl From<Vec<UiEffect>> for ScreenUpdate {
    fn from(effects: Vec<UiEffect>) -> Self {
        Self::stay().with_effects(effects)
    }
}
