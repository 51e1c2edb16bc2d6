//! Effect handlers for the TUI runtime.
//!
//! Each handler is a pure async function that performs one request and
//! returns the `UiEvent` carrying its result. They never touch UI state; the
//! runtime spawns them and forwards the returned event to the inbox.

use taskdeck_core::api::{ApiClient, ApiError, Credentials, NewTask, Registration, TaskId, TaskUpdate};

use crate::common::RequestId;
use crate::events::{AuthUiEvent, DashboardUiEvent, UiEvent};

/// Logs in and stores the returned token in the session.
pub async fn login(api: ApiClient, credentials: Credentials) -> UiEvent {
    let result = match api.login(&credentials).await {
        Ok(token) => api
            .session()
            .set_token(&token.access_token)
            .map_err(|err| {
                tracing::warn!(error = %format!("{err:#}"), "failed to persist session");
                Some(format!("Could not save session: {err}"))
            }),
        Err(err) => {
            tracing::info!(email = %credentials.email, error = %err, "login failed");
            Err(auth_detail(err))
        }
    };
    UiEvent::Auth(AuthUiEvent::LoginFinished { result })
}

pub async fn register(api: ApiClient, registration: Registration) -> UiEvent {
    let result = match api.register(&registration).await {
        Ok(_) => {
            tracing::info!(email = %registration.email, "account created");
            Ok(())
        }
        Err(err) => {
            tracing::info!(email = %registration.email, error = %err, "registration failed");
            Err(auth_detail(err))
        }
    };
    UiEvent::Auth(AuthUiEvent::RegisterFinished { result })
}

pub async fn fetch_tasks(api: ApiClient, req: RequestId) -> UiEvent {
    let result = api.list_tasks().await;
    UiEvent::Dashboard(DashboardUiEvent::TasksLoaded { req, result })
}

pub async fn create_task(api: ApiClient, task: NewTask) -> UiEvent {
    let result = api.create_task(&task).await;
    UiEvent::Dashboard(DashboardUiEvent::TaskCreated { result })
}

pub async fn toggle_task(api: ApiClient, id: TaskId, completed: bool) -> UiEvent {
    let result = api.update_task(&id, TaskUpdate { completed }).await;
    UiEvent::Dashboard(DashboardUiEvent::TaskToggled { id, result })
}

pub async fn delete_task(api: ApiClient, id: TaskId) -> UiEvent {
    let result = api.delete_task(&id).await;
    UiEvent::Dashboard(DashboardUiEvent::TaskDeleted { id, result })
}

/// Server detail text, if the backend sent one.
fn auth_detail(err: ApiError) -> Option<String> {
    err.detail
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use taskdeck_core::session::Session;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer, session: Session) -> ApiClient {
        ApiClient::new(server.uri(), session, None).unwrap()
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "ada@example.com".into(),
            password: "pw".into(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_token_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "jwt-1"})))
            .mount(&server)
            .await;

        let session = Session::in_memory();
        let event = login(client(&server, session.clone()), credentials()).await;

        assert!(matches!(
            event,
            UiEvent::Auth(AuthUiEvent::LoginFinished { result: Ok(()) })
        ));
        assert_eq!(session.token().as_deref(), Some("jwt-1"));
    }

    #[tokio::test]
    async fn test_login_failure_persists_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let session = Session::in_memory();
        let event = login(client(&server, session.clone()), credentials()).await;

        let UiEvent::Auth(AuthUiEvent::LoginFinished { result: Err(detail) }) = event else {
            panic!("expected failed login");
        };
        assert_eq!(detail.as_deref(), Some("Invalid credentials"));
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn test_register_without_detail_reports_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let event = register(
            client(&server, Session::in_memory()),
            Registration {
                email: "ada@example.com".into(),
                password: "pw".into(),
                full_name: "Ada".into(),
            },
        )
        .await;

        assert!(matches!(
            event,
            UiEvent::Auth(AuthUiEvent::RegisterFinished { result: Err(None) })
        ));
    }

    #[tokio::test]
    async fn test_toggle_echoes_task_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/todos/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"id": 5, "title": "t", "description": null, "completed": true}),
            ))
            .mount(&server)
            .await;

        let event = toggle_task(
            client(&server, Session::in_memory()),
            TaskId::from("5"),
            true,
        )
        .await;

        let UiEvent::Dashboard(DashboardUiEvent::TaskToggled { id, result }) = event else {
            panic!("expected toggle result");
        };
        assert_eq!(id.as_str(), "5");
        assert!(result.unwrap().completed);
    }
}
