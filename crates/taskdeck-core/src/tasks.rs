//! Derived views over a fetched task list.
//!
//! Everything here is pure and recomputed on demand.

use crate::api::{Task, TaskId};

/// Completion counts for a task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            completed: tasks.iter().filter(|t| t.completed).count(),
        }
    }

    pub fn pending(&self) -> usize {
        self.total - self.completed
    }

    /// Rounded completion percentage, or None for an empty list.
    pub fn percent(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let pct = (self.completed as f64 / self.total as f64 * 100.0).round();
        Some(pct.clamp(0.0, 100.0) as u8)
    }
}

/// Returns true if the task matches a case-insensitive substring query.
///
/// A blank query matches everything.
pub fn matches_query(task: &Task, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(&needle)
        || task
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

/// Tasks matching `query`, in their original order.
pub fn filter_tasks<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| matches_query(t, query)).collect()
}

/// Inserts a freshly created task at the front.
pub fn prepend(tasks: &mut Vec<Task>, task: Task) {
    tasks.insert(0, task);
}

/// Replaces the entry with the same id. Returns false if none matched.
pub fn replace_by_id(tasks: &mut [Task], updated: Task) -> bool {
    match tasks.iter_mut().find(|t| t.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// Removes the entry with the given id. Returns the removed task.
pub fn remove_by_id(tasks: &mut Vec<Task>, id: &TaskId) -> Option<Task> {
    let index = tasks.iter().position(|t| &t.id == id)?;
    Some(tasks.remove(index))
}
