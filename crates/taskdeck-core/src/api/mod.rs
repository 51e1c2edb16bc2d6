//! HTTP client for the tasks backend.
//!
//! Every request re-reads the bearer token from the [`Session`] and attaches
//! it when present. Failures surface as [`ApiError`] without retries.

mod error;
mod types;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use error::{ApiError, ApiErrorKind};
pub use types::{
    AccessToken, Account, Credentials, NewTask, Registration, Task, TaskId, TaskUpdate,
};

use crate::config::Config;
use crate::session::Session;

pub const USER_AGENT: &str = concat!("taskdeck/", env!("CARGO_PKG_VERSION"));

const REGISTER_PATH: &str = "/auth/register";
const LOGIN_PATH: &str = "/auth/login";
const TODOS_PATH: &str = "/todos";

/// Client for the tasks REST API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        session: Session,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Builds a client from config, honoring an optional base URL override.
    ///
    /// # Errors
    /// Returns an error if the resolved base URL is invalid.
    pub fn from_config(
        config: &Config,
        override_url: Option<&str>,
        session: Session,
    ) -> Result<Self> {
        let base_url = config.resolve_api_url(override_url)?;
        Self::new(base_url, session, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Sends a request and returns the raw response once its status is a success.
    ///
    /// # Errors
    /// Returns an [`ApiError`] for transport failures and non-success statuses.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.session.token();
        tracing::debug!(%method, %url, authenticated = token.is_some(), "api request");

        let mut req = self
            .http
            .request(method.clone(), &url)
            .headers(build_headers(token.as_deref()));
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|err| {
            let err = ApiError::from(err);
            tracing::debug!(%method, %url, error = %err, "api request failed");
            err
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%method, %url, status = status.as_u16(), "api response");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::http_status(status.as_u16(), &body);
        tracing::debug!(%method, %url, status = status.as_u16(), error = %err, "api error response");
        Err(err)
    }

    async fn request_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let response = self.request(method, path, body).await?;
        let bytes = response.bytes().await.map_err(ApiError::from)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::parse(format!("Unexpected response from {path}: {err}")))
    }

    /// `POST /auth/register`
    ///
    /// # Errors
    /// Returns an [`ApiError`] if the backend rejects the registration.
    pub async fn register(&self, registration: &Registration) -> Result<Account, ApiError> {
        let response = self
            .request(Method::POST, REGISTER_PATH, Some(registration))
            .await?;
        // The body is informational only; tolerate anything.
        Ok(response.json::<Account>().await.unwrap_or_default())
    }

    /// `POST /auth/login`. Does not touch the session; callers decide.
    ///
    /// # Errors
    /// Returns an [`ApiError`] if the credentials are rejected.
    pub async fn login(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        self.request_json(Method::POST, LOGIN_PATH, Some(credentials))
            .await
    }

    /// `GET /todos`
    ///
    /// # Errors
    /// Returns an [`ApiError`] if the list cannot be fetched.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.request_json::<(), _>(Method::GET, TODOS_PATH, None)
            .await
    }

    /// `GET /todos/{id}`
    ///
    /// # Errors
    /// Returns an [`ApiError`] if the task cannot be fetched.
    pub async fn get_task(&self, id: &TaskId) -> Result<Task, ApiError> {
        self.request_json::<(), _>(Method::GET, &task_path(id), None)
            .await
    }

    /// `POST /todos`
    ///
    /// # Errors
    /// Returns an [`ApiError`] if the task cannot be created.
    pub async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        self.request_json(Method::POST, TODOS_PATH, Some(task)).await
    }

    /// `PUT /todos/{id}`
    ///
    /// # Errors
    /// Returns an [`ApiError`] if the task cannot be updated.
    pub async fn update_task(&self, id: &TaskId, update: TaskUpdate) -> Result<Task, ApiError> {
        self.request_json(Method::PUT, &task_path(id), Some(&update))
            .await
    }

    /// `DELETE /todos/{id}`. Any response body is ignored.
    ///
    /// # Errors
    /// Returns an [`ApiError`] if the task cannot be deleted.
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        self.request::<()>(Method::DELETE, &task_path(id), None)
            .await?;
        Ok(())
    }
}

fn task_path(id: &TaskId) -> String {
    format!("{TODOS_PATH}/{}", url_escape_segment(id.as_str()))
}

/// Percent-encodes a single path segment.
fn url_escape_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn build_headers(token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("accept", HeaderValue::from_static("application/json"));
    headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));
    if let Some(token) = token
        && let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}"))
    {
        headers.insert("authorization", value);
    }
    headers
}
