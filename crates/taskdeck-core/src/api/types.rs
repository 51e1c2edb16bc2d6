//! Wire types for the tasks backend.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned task identifier.
///
/// The backend may send a number or a string; either way the client treats it
/// as opaque text and echoes it back in URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Uint(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => TaskId(n.to_string()),
            RawId::Uint(n) => TaskId(n.to_string()),
            RawId::Text(s) => TaskId(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Description text, treating an empty string as absent.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}

/// Body for `POST /todos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
}

impl NewTask {
    /// Builds a create request from raw form input.
    ///
    /// Returns None when the title is blank. The title is trimmed and a blank
    /// description is sent as null.
    pub fn from_draft(title: &str, description: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let description = description.trim();
        Some(Self {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

/// Body for `PUT /todos/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    pub completed: bool,
}

/// Body for `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Body for `POST /auth/register`.
#[derive(Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"***")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// Registration response. Only success matters to the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub id: Option<TaskId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Login response.
#[derive(Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &crate::session::mask_token(&self.access_token))
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_accepts_number_or_string() {
        let task: Task =
            serde_json::from_str(r#"{"id":42,"title":"a","description":null,"completed":false}"#)
                .unwrap();
        assert_eq!(task.id.as_str(), "42");

        let task: Task =
            serde_json::from_str(r#"{"id":"6650f0c2","title":"b","completed":true}"#).unwrap();
        assert_eq!(task.id.as_str(), "6650f0c2");
        assert_eq!(task.description, None);
        assert!(task.completed);
    }

    #[test]
    fn test_new_task_from_draft() {
        assert_eq!(NewTask::from_draft("   ", "desc"), None);

        let task = NewTask::from_draft("  Buy milk ", "  ").unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, None);

        let json = serde_json::to_value(NewTask::from_draft("t", " 2%  ").unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"title": "t", "description": "2%"}));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials {
            email: "a@b.c".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
