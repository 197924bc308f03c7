//! Forum API request construction and response normalization
//!
//! Pure functions behind the API client: each operation validates its input
//! and produces an [`ApiRequest`]; [`interpret_response`] turns whatever the
//! transport returned into a typed value or an [`ApiError`]. Nothing in here
//! performs I/O.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::Attachment;

/// Message used when the server gives no usable error text
pub const GENERIC_FAILURE: &str = "Request failed";

pub const DEFAULT_FORUM_ICON: &str = "MessageSquare";
pub const DEFAULT_FORUM_GRADIENT: &str = "gradient-purple-pink";

/// Endpoint groups exposed by the forum backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointGroup {
    Auth,
    Forums,
    Topics,
    Posts,
    Likes,
}

impl EndpointGroup {
    pub const ALL: [EndpointGroup; 5] = [
        EndpointGroup::Auth,
        EndpointGroup::Forums,
        EndpointGroup::Topics,
        EndpointGroup::Posts,
        EndpointGroup::Likes,
    ];

    /// Path segment appended to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            EndpointGroup::Auth => "auth",
            EndpointGroup::Forums => "forums",
            EndpointGroup::Topics => "topics",
            EndpointGroup::Posts => "posts",
            EndpointGroup::Likes => "likes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A transport-independent description of one round trip
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: EndpointGroup,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(endpoint: EndpointGroup) -> Self {
        Self {
            method: Method::Get,
            endpoint,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(endpoint: EndpointGroup, body: Value) -> Self {
        Self {
            method: Method::Post,
            endpoint,
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// Raw response as seen by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Error categories surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caught before any network call
    Validation,
    /// The server answered with a non-success status
    Server,
    /// No usable response was obtained
    Transport,
}

/// Failure of an API operation. Every failure is terminal for the action
/// that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            status: None,
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Server,
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
            status: None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Extract the `error` field from a failure body, if it is a non-empty string.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Turn a raw response into a typed value.
///
/// Non-success statuses become `Server` errors carrying the server's message,
/// or [`GENERIC_FAILURE`] when the body has none. A success body that does not
/// match `T` is also a `Server` error.
pub fn interpret_response<T: DeserializeOwned>(response: ApiResponse) -> ApiResult<T> {
    if !response.is_success() {
        let message =
            extract_error_message(&response.body).unwrap_or_else(|| GENERIC_FAILURE.to_string());
        return Err(ApiError::server(response.status, message));
    }

    serde_json::from_str(&response.body).map_err(|e| {
        ApiError::server(
            response.status,
            format!("{GENERIC_FAILURE}: malformed response ({e})"),
        )
    })
}

fn require(value: &str, field: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        Err(ApiError::validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

fn require_id(id: u64, field: &str) -> ApiResult<()> {
    if id == 0 {
        Err(ApiError::validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

pub fn register_request(username: &str, email: &str, password: &str) -> ApiResult<ApiRequest> {
    require(username, "Username")?;
    require(email, "Email")?;
    require(password, "Password")?;

    Ok(ApiRequest::post(
        EndpointGroup::Auth,
        json!({
            "action": "register",
            "username": username,
            "email": email,
            "password": password,
        }),
    ))
}

pub fn login_request(email: &str, password: &str) -> ApiResult<ApiRequest> {
    require(email, "Email")?;
    require(password, "Password")?;

    Ok(ApiRequest::post(
        EndpointGroup::Auth,
        json!({
            "action": "login",
            "email": email,
            "password": password,
        }),
    ))
}

pub fn list_forums_request() -> ApiRequest {
    ApiRequest::get(EndpointGroup::Forums)
}

/// Build a forum creation request; empty icon/gradient fall back to defaults.
pub fn create_forum_request(
    name: &str,
    description: &str,
    icon: Option<&str>,
    gradient: Option<&str>,
) -> ApiResult<ApiRequest> {
    require(name, "Name")?;

    let icon = icon.filter(|s| !s.trim().is_empty()).unwrap_or(DEFAULT_FORUM_ICON);
    let gradient = gradient
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_FORUM_GRADIENT);

    Ok(ApiRequest::post(
        EndpointGroup::Forums,
        json!({
            "name": name,
            "description": description,
            "icon": icon,
            "gradient": gradient,
        }),
    ))
}

pub fn list_topics_request(category_id: Option<u64>) -> ApiRequest {
    let request = ApiRequest::get(EndpointGroup::Topics);
    match category_id {
        Some(id) if id > 0 => request.with_query("category_id", id),
        _ => request,
    }
}

pub fn get_topic_request(id: u64) -> ApiResult<ApiRequest> {
    require_id(id, "Topic id")?;
    Ok(ApiRequest::get(EndpointGroup::Topics).with_query("id", id))
}

pub fn create_topic_request(
    user_id: u64,
    category_id: Option<u64>,
    title: &str,
    content: &str,
) -> ApiResult<ApiRequest> {
    require_id(user_id, "User id")?;
    let category_id = category_id
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::validation("Category is required"))?;
    require(title, "Title")?;
    require(content, "Content")?;

    Ok(ApiRequest::post(
        EndpointGroup::Topics,
        json!({
            "user_id": user_id,
            "category_id": category_id,
            "title": title,
            "content": content,
        }),
    ))
}

pub fn create_post_request(
    user_id: u64,
    topic_id: u64,
    content: &str,
    attachments: &[Attachment],
) -> ApiResult<ApiRequest> {
    require_id(user_id, "User id")?;
    require_id(topic_id, "Topic id")?;
    require(content, "Content")?;

    Ok(ApiRequest::post(
        EndpointGroup::Posts,
        json!({
            "user_id": user_id,
            "topic_id": topic_id,
            "content": content,
            "attachments": attachments,
        }),
    ))
}

pub fn toggle_like_request(user_id: u64, post_id: u64) -> ApiResult<ApiRequest> {
    require_id(user_id, "User id")?;
    require_id(post_id, "Post id")?;

    Ok(ApiRequest::post(
        EndpointGroup::Likes,
        json!({
            "user_id": user_id,
            "post_id": post_id,
        }),
    ))
}
