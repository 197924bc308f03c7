//! Aggregate statistics for the admin view

use serde::Serialize;

use crate::models::{Forum, Topic};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSummary {
    pub id: u64,
    pub title: String,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForumStats {
    pub forums: usize,
    pub topics: u64,
    pub posts: u64,
    pub pinned_topics: usize,
    pub locked_topics: usize,
    pub total_views: u64,
    pub busiest_forum: Option<String>,
    pub most_viewed_topic: Option<TopicSummary>,
}

/// Compute admin statistics from already fetched forums and topics.
///
/// Topic and post totals come from the per-forum counters; pinned, locked and
/// view figures come from the topic list. Ties keep the first entry.
pub fn compute_stats(forums: &[Forum], topics: &[Topic]) -> ForumStats {
    let busiest_forum = forums
        .iter()
        .filter(|f| f.total_posts > 0)
        .fold(None::<&Forum>, |best, f| match best {
            Some(b) if b.total_posts >= f.total_posts => Some(b),
            _ => Some(f),
        })
        .map(|f| f.name.clone());

    let most_viewed_topic = topics
        .iter()
        .fold(None::<&Topic>, |best, t| match best {
            Some(b) if b.views_count >= t.views_count => Some(b),
            _ => Some(t),
        })
        .map(|t| TopicSummary {
            id: t.id,
            title: t.title.clone(),
            views: t.views_count,
        });

    ForumStats {
        forums: forums.len(),
        topics: forums.iter().map(|f| f.topics_count).sum(),
        posts: forums.iter().map(|f| f.total_posts).sum(),
        pinned_topics: topics.iter().filter(|t| t.is_pinned).count(),
        locked_topics: topics.iter().filter(|t| t.is_locked).count(),
        total_views: topics.iter().map(|t| t.views_count).sum(),
        busiest_forum,
        most_viewed_topic,
    }
}
