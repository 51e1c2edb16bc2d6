//! Task command handlers.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use taskdeck_core::api::{ApiClient, ApiError, NewTask, Task, TaskId, TaskUpdate};
use taskdeck_core::tasks::{TaskStats, filter_tasks};

const SESSION_EXPIRED: &str = "Session expired. Please login again.";

pub async fn list(api: &ApiClient, search: Option<&str>) -> Result<()> {
    require_login(api)?;
    let tasks = api
        .list_tasks()
        .await
        .map_err(|err| api_failure(api, err, "Could not load tasks"))?;

    if tasks.is_empty() {
        println!("No tasks found. Start by adding one with `taskdeck add`.");
        return Ok(());
    }

    let query = search.unwrap_or_default();
    let visible = filter_tasks(&tasks, query);
    if visible.is_empty() {
        println!("No tasks match '{}'.", query.trim());
    } else {
        println!("{}", task_table(&visible));
    }

    println!("{}", stats_line(TaskStats::from_tasks(&tasks)));
    Ok(())
}

pub async fn show(api: &ApiClient, id: &str) -> Result<()> {
    require_login(api)?;
    let id = TaskId::from(id);
    let task = api
        .get_task(&id)
        .await
        .map_err(|err| api_failure(api, err, &format!("Could not load task {id}")))?;

    println!("ID:          {}", task.id);
    println!("Title:       {}", task.title);
    println!("Status:      {}", status_label(&task));
    if let Some(description) = task.description_text() {
        println!("Description: {description}");
    }
    Ok(())
}

pub async fn add(api: &ApiClient, title: &str, description: Option<&str>) -> Result<()> {
    require_login(api)?;
    let Some(new_task) = NewTask::from_draft(title, description.unwrap_or_default()) else {
        anyhow::bail!("Title is required");
    };

    let task = api
        .create_task(&new_task)
        .await
        .map_err(|err| api_failure(api, err, "Could not create task"))?;

    println!("✓ Created task {}: {}", task.id, task.title);
    Ok(())
}

pub async fn toggle(api: &ApiClient, id: &str) -> Result<()> {
    require_login(api)?;
    let id = TaskId::from(id);
    let task = api
        .get_task(&id)
        .await
        .map_err(|err| api_failure(api, err, &format!("Could not load task {id}")))?;

    update_completion(api, &id, !task.completed).await
}

/// Sets completion explicitly instead of flipping it.
pub async fn set_completed(api: &ApiClient, id: &str, completed: bool) -> Result<()> {
    require_login(api)?;
    update_completion(api, &TaskId::from(id), completed).await
}

pub async fn delete(api: &ApiClient, id: &str) -> Result<()> {
    require_login(api)?;
    let id = TaskId::from(id);
    api.delete_task(&id)
        .await
        .map_err(|err| api_failure(api, err, &format!("Could not delete task {id}")))?;

    println!("✓ Deleted task {id}");
    Ok(())
}

pub async fn stats(api: &ApiClient) -> Result<()> {
    require_login(api)?;
    let tasks = api
        .list_tasks()
        .await
        .map_err(|err| api_failure(api, err, "Could not load tasks"))?;

    let stats = TaskStats::from_tasks(&tasks);
    println!("Total:     {}", stats.total);
    println!("Completed: {}", stats.completed);
    println!("Pending:   {}", stats.pending());
    match stats.percent() {
        Some(percent) => println!("Progress:  {percent}%"),
        None => println!("Progress:  no tasks yet"),
    }
    Ok(())
}

async fn update_completion(api: &ApiClient, id: &TaskId, completed: bool) -> Result<()> {
    let task = api
        .update_task(id, TaskUpdate { completed })
        .await
        .map_err(|err| api_failure(api, err, &format!("Could not update task {id}")))?;

    println!("✓ Marked task {} as {}", task.id, status_label(&task));
    Ok(())
}

fn require_login(api: &ApiClient) -> Result<()> {
    if !api.session().is_authenticated() {
        anyhow::bail!("Not logged in. Run `taskdeck login` first.");
    }
    Ok(())
}

/// Converts an API failure into a command error.
///
/// A rejected token is dropped from the session so the next run starts clean.
fn api_failure(api: &ApiClient, err: ApiError, action: &str) -> anyhow::Error {
    if err.is_unauthorized() {
        tracing::info!(status = ?err.status, "token rejected, clearing session");
        if let Err(clear_err) = api.session().clear_token() {
            tracing::warn!(error = %format!("{clear_err:#}"), "failed to clear session");
        }
        return anyhow::anyhow!(SESSION_EXPIRED);
    }

    tracing::warn!(kind = %err.kind, error = %err, "{action}");
    anyhow::Error::new(err).context(action.to_string())
}

fn status_label(task: &Task) -> &'static str {
    if task.completed { "done" } else { "pending" }
}

fn task_table(tasks: &[&Task]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Status", "Title", "Description"]);

    for task in tasks {
        table.add_row(vec![
            task.id.to_string(),
            status_label(task).to_string(),
            task.title.clone(),
            task.description_text().unwrap_or_default().to_string(),
        ]);
    }

    table
}

fn stats_line(stats: TaskStats) -> String {
    let percent = stats.percent().unwrap_or(0);
    format!(
        "{} of {} completed ({percent}%)",
        stats.completed, stats.total
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, title: &str, completed: bool) -> Task {
        Task {
            id: TaskId::from(id),
            title: title.into(),
            description: None,
            completed,
        }
    }

    #[test]
    fn test_stats_line_rounds_percent() {
        let tasks = vec![
            task("1", "a", true),
            task("2", "b", false),
            task("3", "c", false),
        ];
        assert_eq!(
            stats_line(TaskStats::from_tasks(&tasks)),
            "1 of 3 completed (33%)"
        );
    }

    #[test]
    fn test_task_table_lists_status_and_title() {
        let done = task("7", "Water plants", true);
        let rendered = task_table(&[&done]).to_string();
        assert!(rendered.contains("Water plants"));
        assert!(rendered.contains("done"));
        assert!(rendered.contains("Description"));
    }
}
