//! Search over fetched topics

use crate::api::{ApiError, ApiResult};
use crate::models::Topic;

/// Normalize a search query. A blank query is a validation error.
pub fn parse_query(query: &str) -> ApiResult<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(ApiError::validation("Enter a search query"));
    }
    Ok(needle)
}

/// Case-insensitive substring search over title, content and author name.
///
/// Results keep the input order.
pub fn search_topics<'a>(topics: &'a [Topic], query: &str) -> ApiResult<Vec<&'a Topic>> {
    let needle = parse_query(query)?;

    Ok(topics
        .iter()
        .filter(|topic| {
            topic.title.to_lowercase().contains(&needle)
                || topic.content.to_lowercase().contains(&needle)
                || topic
                    .author_name
                    .as_ref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect())
}
