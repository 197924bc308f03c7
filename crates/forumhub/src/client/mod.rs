//! Forum API client
//!
//! [`ApiClient`] is built once in `main` and handed to every command by
//! reference. It owns a [`Transport`], which performs the actual round trip;
//! request construction, validation and response interpretation live in
//! `forumhub_core::api`.

pub mod http;
#[cfg(test)]
pub mod mock;

use std::future::Future;

use forumhub_core::api::{
    create_forum_request, create_post_request, create_topic_request, get_topic_request,
    interpret_response, list_forums_request, list_topics_request, login_request,
    register_request, toggle_like_request, ApiRequest, ApiResponse, ApiResult,
};
use forumhub_core::models::{Attachment, AuthResponse, Forum, LikeToggle, Post, Topic};
use forumhub_core::submission::{Completion, SubmissionState};
use serde::de::DeserializeOwned;

pub use http::HttpTransport;

/// Sends one request and returns the raw response.
///
/// Implementations never interpret status codes; failing to obtain any
/// response is reported as a `Transport` error.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = ApiResult<ApiResponse>> + Send;
}

pub struct ApiClient<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn execute<R: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<R> {
        log::debug!(
            "{:?} /{} query={:?}",
            request.method,
            request.endpoint.path(),
            request.query
        );

        let response = self.transport.send(request).await.inspect_err(|err| {
            log::warn!("Transport failure: {err}");
        })?;

        log::debug!("Response status {}", response.status);

        interpret_response(response).inspect_err(|err| {
            log::warn!("Request rejected: {err} (status {:?})", err.status);
        })
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<AuthResponse> {
        self.execute(register_request(username, email, password)?)
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        self.execute(login_request(email, password)?).await
    }

    /// Forums in server order
    pub async fn get_forums(&self) -> ApiResult<Vec<Forum>> {
        self.execute(list_forums_request()).await
    }

    pub async fn create_forum(
        &self,
        name: &str,
        description: &str,
        icon: Option<&str>,
        gradient: Option<&str>,
    ) -> ApiResult<Forum> {
        self.execute(create_forum_request(name, description, icon, gradient)?)
            .await
    }

    /// Topic summaries, optionally filtered by category
    pub async fn get_topics(&self, category_id: Option<u64>) -> ApiResult<Vec<Topic>> {
        self.execute(list_topics_request(category_id)).await
    }

    /// A single topic with its posts
    pub async fn get_topic(&self, id: u64) -> ApiResult<Topic> {
        self.execute(get_topic_request(id)?).await
    }

    pub async fn create_topic(
        &self,
        user_id: u64,
        category_id: Option<u64>,
        title: &str,
        content: &str,
    ) -> ApiResult<Topic> {
        self.execute(create_topic_request(user_id, category_id, title, content)?)
            .await
    }

    pub async fn create_post(
        &self,
        user_id: u64,
        topic_id: u64,
        content: &str,
        attachments: &[Attachment],
    ) -> ApiResult<Post> {
        self.execute(create_post_request(user_id, topic_id, content, attachments)?)
            .await
    }

    /// Like or unlike a post. Two calls in a row restore the original state.
    pub async fn toggle_like(&self, user_id: u64, post_id: u64) -> ApiResult<LikeToggle> {
        self.execute(toggle_like_request(user_id, post_id)?).await
    }
}

/// Run a mutating action through the submission state machine.
///
/// On success the caller re-fetches whatever the action changed; on failure
/// the error is returned for display and nothing is retried.
pub async fn submit<R>(
    state: &mut SubmissionState,
    action: impl Future<Output = ApiResult<R>>,
) -> ApiResult<R> {
    state.begin()?;
    let result = action.await;
    match state.complete(&result) {
        Completion::Refetch => result,
        Completion::Surface(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;
    use forumhub_core::api::{EndpointGroup, ErrorKind, Method};
    use forumhub_core::models::LikeAction;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_topic_empty_title_sends_nothing() {
        let client = ApiClient::new(MockTransport::forum());

        let err = client
            .create_topic(1, Some(1), "", "Some content")
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Title is required");
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_topic_missing_category_sends_nothing() {
        let client = ApiClient::new(MockTransport::forum());

        let err = client
            .create_topic(1, None, "Title", "Content")
            .await
            .unwrap_err();

        assert_eq!(err.message, "Category is required");
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_like_twice_restores_state() {
        let client = ApiClient::new(MockTransport::forum());

        let first = client.toggle_like(2, 7).await.unwrap();
        assert_eq!(first.action, LikeAction::Liked);
        assert_eq!(first.likes_count, 1);

        let second = client.toggle_like(2, 7).await.unwrap();
        assert_eq!(second.action, LikeAction::Unliked);
        assert_eq!(second.likes_count, 0);

        assert_eq!(client.transport().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_login_invalid_credentials_message() {
        let client = ApiClient::new(MockTransport::forum());

        let err = client.login("elena@example.com", "wrong").await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Server);
        assert_eq!(err.status, Some(401));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_login_success() {
        let client = ApiClient::new(MockTransport::forum());

        let auth = client
            .login("elena@example.com", "secret")
            .await
            .unwrap();

        assert_eq!(auth.user.username, "elena");
        assert_eq!(auth.token, "token-1");

        let calls = client.transport().calls();
        assert_eq!(calls[0].endpoint, EndpointGroup::Auth);
        assert_eq!(calls[0].body.as_ref().unwrap()["action"], "login");
    }

    #[tokio::test]
    async fn test_get_topics_passes_category_filter() {
        let client = ApiClient::new(MockTransport::forum());

        let topics = client.get_topics(Some(2)).await.unwrap();

        assert!(topics.iter().all(|t| t.category_id == 2));
        let calls = client.transport().calls();
        assert_eq!(calls[0].method, Method::Get);
        assert_eq!(
            calls[0].query,
            vec![("category_id".to_string(), "2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_get_topic_not_found_uses_generic_message() {
        let client = ApiClient::new(MockTransport::forum());

        let err = client.get_topic(999).await.unwrap_err();

        assert_eq!(err.status, Some(404));
        assert_eq!(err.message, "Request failed");
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic() {
        let client = ApiClient::new(MockTransport::offline());

        let err = client.get_forums().await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Transport);
        assert_eq!(err.message, "Request failed");
    }

    #[tokio::test]
    async fn test_create_post_sends_attachments() {
        let client = ApiClient::new(MockTransport::forum());
        let attachment = Attachment {
            url: "https://cdn.example.com/a.png".to_string(),
            file_type: "image/png".to_string(),
            name: "a.png".to_string(),
            size: 2048,
        };

        let post = client
            .create_post(2, 1, "See attached", &[attachment])
            .await
            .unwrap();

        assert_eq!(post.topic_id, 1);
        let calls = client.transport().calls();
        assert_eq!(
            calls[0].body.as_ref().unwrap()["attachments"],
            json!([{
                "url": "https://cdn.example.com/a.png",
                "type": "image/png",
                "name": "a.png",
                "size": 2048
            }])
        );
    }

    #[tokio::test]
    async fn test_submit_returns_to_idle() {
        let client = ApiClient::new(MockTransport::forum());
        let mut state = SubmissionState::default();

        let result = submit(&mut state, client.login("elena@example.com", "wrong")).await;
        assert!(result.is_err());
        assert!(!state.is_disabled());

        let result = submit(&mut state, client.toggle_like(2, 7)).await;
        assert!(result.is_ok());
        assert!(!state.is_disabled());
    }

    #[tokio::test]
    async fn test_submit_refuses_while_pending() {
        let client = ApiClient::new(MockTransport::forum());
        let mut state = SubmissionState::Submitting;

        let err = submit(&mut state, client.toggle_like(2, 7))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(client.transport().calls().is_empty());
    }
}
