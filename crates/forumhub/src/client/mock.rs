//! In-memory stand-in for the forum backend used by tests.

use std::collections::HashSet;
use std::sync::Mutex;

use forumhub_core::api::{
    ApiError, ApiRequest, ApiResponse, ApiResult, EndpointGroup, Method, GENERIC_FAILURE,
};
use forumhub_core::models::{Forum, Post, Topic};
use serde_json::{json, Value};

use super::Transport;

pub struct MockTransport {
    online: bool,
    calls: Mutex<Vec<ApiRequest>>,
    state: Mutex<State>,
}

struct State {
    forums: Vec<Forum>,
    topics: Vec<Topic>,
    likes: HashSet<(u64, u64)>,
    next_id: u64,
}

impl MockTransport {
    /// A backend seeded with three forums and three topics
    pub fn forum() -> Self {
        Self {
            online: true,
            calls: Mutex::new(Vec::new()),
            state: Mutex::new(State::seeded()),
        }
    }

    /// A transport that never obtains a response
    pub fn offline() -> Self {
        Self {
            online: false,
            ..Self::forum()
        }
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let mut state = self.state.lock().unwrap();
        let body = request.body.clone().unwrap_or(Value::Null);

        match (request.endpoint, request.method) {
            (EndpointGroup::Auth, _) => auth(&body),
            (EndpointGroup::Forums, Method::Get) => ok(&state.forums),
            (EndpointGroup::Forums, Method::Post) => {
                let id = state.bump();
                let forum: Forum = serde_json::from_value(json!({
                    "id": id,
                    "name": body["name"],
                    "description": body["description"],
                    "icon": body["icon"],
                    "gradient": body["gradient"],
                }))
                .unwrap();
                state.forums.push(forum.clone());
                created(&forum)
            }
            (EndpointGroup::Topics, Method::Get) => {
                let param = |key: &str| {
                    request
                        .query
                        .iter()
                        .find(|(k, _)| k.as_str() == key)
                        .and_then(|(_, v)| v.parse::<u64>().ok())
                };
                if let Some(id) = param("id") {
                    return match state.topics.iter_mut().find(|t| t.id == id) {
                        Some(topic) => {
                            topic.views_count += 1;
                            let mut topic = topic.clone();
                            topic.posts.get_or_insert_with(Vec::new);
                            ok(&topic)
                        }
                        None => ApiResponse::new(404, "null"),
                    };
                }
                let summaries: Vec<Topic> = state
                    .topics
                    .iter()
                    .filter(|t| param("category_id").map_or(true, |c| t.category_id == c))
                    .cloned()
                    .map(|mut t| {
                        t.posts = None;
                        t
                    })
                    .collect();
                ok(&summaries)
            }
            (EndpointGroup::Topics, Method::Post) => {
                let id = state.bump();
                let topic = topic(
                    id,
                    body["category_id"].as_u64().unwrap_or_default(),
                    body["user_id"].as_u64().unwrap_or_default(),
                    body["title"].as_str().unwrap_or_default(),
                    body["content"].as_str().unwrap_or_default(),
                );
                state.topics.push(topic.clone());
                created(&topic)
            }
            (EndpointGroup::Posts, _) => {
                let topic_id = body["topic_id"].as_u64().unwrap_or_default();
                let id = state.bump();
                let Some(topic) = state.topics.iter_mut().find(|t| t.id == topic_id) else {
                    return ApiResponse::new(404, r#"{"error":"Topic not found"}"#);
                };
                let post: Post = serde_json::from_value(json!({
                    "id": id,
                    "topic_id": topic_id,
                    "user_id": body["user_id"],
                    "content": body["content"],
                    "likes_count": 0,
                    "created_at": "2024-01-16 09:00:00",
                    "updated_at": "2024-01-16 09:00:00",
                    "author_name": "elena",
                    "author_role": "user",
                }))
                .unwrap();
                topic.replies_count += 1;
                topic.posts.get_or_insert_with(Vec::new).push(post.clone());
                created(&post)
            }
            (EndpointGroup::Likes, _) => {
                let key = (
                    body["user_id"].as_u64().unwrap_or_default(),
                    body["post_id"].as_u64().unwrap_or_default(),
                );
                let action = if state.likes.remove(&key) {
                    "unliked"
                } else {
                    state.likes.insert(key);
                    "liked"
                };
                let count = state.likes.iter().filter(|(_, p)| *p == key.1).count() as i64;
                for post in state
                    .topics
                    .iter_mut()
                    .filter_map(|t| t.posts.as_mut())
                    .flatten()
                    .filter(|p| p.id == key.1)
                {
                    post.likes_count = count;
                }
                ok(&json!({ "action": action, "likes_count": count }))
            }
        }
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.calls.lock().unwrap().push(request.clone());
        if !self.online {
            return Err(ApiError::transport(GENERIC_FAILURE));
        }
        Ok(self.handle(&request))
    }
}

impl State {
    fn seeded() -> Self {
        let forums = serde_json::from_value(json!([
            {"id": 1, "name": "General Discussion", "description": "Talk about anything",
             "icon": "MessageSquare", "gradient": "gradient-purple-pink",
             "topics_count": 2, "total_posts": 30},
            {"id": 2, "name": "Technology", "description": "Code and gadgets",
             "icon": "Cpu", "gradient": "gradient-blue-cyan",
             "topics_count": 1, "total_posts": 45},
            {"id": 3, "name": "Help", "description": "Ask questions",
             "icon": "HelpCircle", "gradient": "gradient-green-teal",
             "topics_count": 0, "total_posts": 0}
        ]))
        .unwrap();

        let mut welcome = topic(1, 1, 1, "Welcome to the forum", "Read the **rules** first.");
        welcome.is_pinned = true;
        welcome.views_count = 120;
        welcome.posts = Some(vec![serde_json::from_value(json!({
            "id": 7, "topic_id": 1, "user_id": 3, "content": "Thanks! `hello()`",
            "likes_count": 0, "created_at": "2024-01-15 11:00:00",
            "updated_at": "2024-01-15 11:00:00", "author_name": "igor",
            "author_role": "moderator"
        }))
        .unwrap()]);
        welcome.replies_count = 1;

        let mut rust = topic(2, 2, 2, "Rust async patterns", "```rust\nasync fn main() {}\n```");
        rust.views_count = 340;

        let mut intro = topic(3, 1, 3, "Introduce yourself", "Say *hi*");
        intro.views_count = 15;
        intro.is_locked = true;

        Self {
            forums,
            topics: vec![welcome, rust, intro],
            likes: HashSet::new(),
            next_id: 100,
        }
    }

    fn bump(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

fn topic(id: u64, category_id: u64, user_id: u64, title: &str, content: &str) -> Topic {
    serde_json::from_value(json!({
        "id": id,
        "category_id": category_id,
        "user_id": user_id,
        "title": title,
        "content": content,
        "created_at": "2024-01-15 10:00:00",
        "updated_at": "2024-01-15 10:00:00",
        "author_name": "elena",
        "author_role": "admin",
    }))
    .unwrap()
}

fn auth(body: &Value) -> ApiResponse {
    let user = json!({
        "id": 2,
        "username": body["username"].as_str().unwrap_or("elena"),
        "email": body["email"],
        "role": "user",
        "posts_count": 0,
        "created_at": "2024-01-15T10:00:00Z",
    });

    match body["action"].as_str() {
        Some("register") => created(&json!({ "user": user, "token": "token-2" })),
        Some("login") if body["password"] == "secret" => {
            ok(&json!({ "user": user, "token": "token-1" }))
        }
        Some("login") => ApiResponse::new(401, r#"{"error":"Invalid credentials"}"#),
        _ => ApiResponse::new(400, r#"{"error":"Invalid action"}"#),
    }
}

fn ok<T: serde::Serialize>(value: &T) -> ApiResponse {
    ApiResponse::new(200, serde_json::to_string(value).unwrap())
}

fn created<T: serde::Serialize>(value: &T) -> ApiResponse {
    ApiResponse::new(201, serde_json::to_string(value).unwrap())
}
