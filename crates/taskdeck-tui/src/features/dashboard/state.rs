use std::collections::HashSet;

use taskdeck_core::api::{Task, TaskId};
use taskdeck_core::tasks::{self, TaskStats};

use crate::common::TextField;

pub const EMPTY_LIST: &str = "No tasks found. Start by adding one above!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardFocus {
    #[default]
    List,
    Title,
    Description,
    Search,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    /// True until the first fetch settles.
    pub loading: bool,
    /// Server order, newly created tasks first.
    pub tasks: Vec<Task>,
    /// A create request is in flight.
    pub adding: bool,
    pub search: TextField,
    pub title: TextField,
    pub description: TextField,
    /// Index into the filtered view.
    pub selected: usize,
    pub focus: DashboardFocus,
    pub toggling: HashSet<TaskId>,
    pub deleting: HashSet<TaskId>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            loading: true,
            tasks: Vec::new(),
            adding: false,
            search: TextField::default(),
            title: TextField::default(),
            description: TextField::default(),
            selected: 0,
            focus: DashboardFocus::default(),
            toggling: HashSet::new(),
            deleting: HashSet::new(),
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks matching the search query, in list order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        tasks::filter_tasks(&self.tasks, self.search.value())
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected).copied()
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Keeps `selected` inside the filtered view.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn select_next(&mut self, step: usize) {
        let len = self.visible_tasks().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + step).min(len - 1);
    }

    pub fn select_prev(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    pub fn is_busy(&self, id: &TaskId) -> bool {
        self.toggling.contains(id) || self.deleting.contains(id)
    }

    pub fn clear_draft(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}
