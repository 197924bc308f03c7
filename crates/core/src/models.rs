//! Forum domain models
//!
//! These types mirror the JSON shapes returned by the forum endpoints. All
//! entities are server-owned; the client only ever holds re-fetched copies.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Classification of a user, used for badge display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Label shown next to the author name
    pub fn badge(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Moderator => "Moderator",
            Role::User => "User",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub posts_count: u64,
    pub created_at: String,
}

/// Response of a successful login or registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// A forum category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forum {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gradient: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_posts: u64,
}

/// Read an explicit `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A discussion thread
///
/// `posts` is only present when a single topic is fetched by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: u64,
    pub category_id: u64,
    pub user_id: u64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub replies_count: u64,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_avatar: Option<String>,
    #[serde(default)]
    pub author_role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<Post>>,
}

impl Topic {
    /// Locked topics reject new replies
    pub fn accepts_replies(&self) -> bool {
        !self.is_locked
    }
}

/// A reply within a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub topic_id: u64,
    pub user_id: u64,
    pub content: String,
    #[serde(default)]
    pub likes_count: i64,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_avatar: Option<String>,
    #[serde(default)]
    pub author_role: Option<Role>,
}

/// File attached to a reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Liked,
    Unliked,
}

/// Result of toggling a like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeToggle {
    pub action: LikeAction,
    pub likes_count: i64,
}

/// A private message. There is no endpoint for messages yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub from: User,
    pub subject: String,
    pub preview: String,
    pub date: String,
    pub is_read: bool,
}

pub fn unread_count(messages: &[Message]) -> usize {
    messages.iter().filter(|m| !m.is_read).count()
}

/// Format a server timestamp for display
///
/// Accepts RFC 3339 and the `YYYY-MM-DD HH:MM:SS[.ffffff]` shape produced by
/// the backend. Anything else is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return dt.format("%Y-%m-%d %H:%M").to_string();
        }
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format("%Y-%m-%d %H:%M").to_string();
        }
    }

    raw.to_string()
}
