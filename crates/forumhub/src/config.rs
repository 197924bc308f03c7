use std::collections::HashMap;

use forumhub_core::api::EndpointGroup;

use crate::prelude::*;

/// Forum API configuration from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct ForumConfig {
    pub base_url: String,
    pub overrides: HashMap<EndpointGroup, String>,
    pub user_id: Option<u64>,
}

impl ForumConfig {
    /// Default API base URL for a locally running backend
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";

    /// Load configuration from environment variables
    ///
    /// Uses FORUMHUB_API_URL with default fallback, FORUMHUB_<GROUP>_URL for
    /// per-endpoint overrides and FORUMHUB_USER_ID for the session user.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("FORUMHUB_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string());

        let mut overrides = HashMap::new();
        for group in EndpointGroup::ALL {
            let key = f!("FORUMHUB_{}_URL", group.path().to_uppercase());
            if let Some(url) = lookup(&key).filter(|url| !url.trim().is_empty()) {
                overrides.insert(group, url);
            }
        }

        let user_id = match lookup("FORUMHUB_USER_ID") {
            Some(raw) if !raw.trim().is_empty() => Some(parse_user_id(&raw)?),
            _ => None,
        };

        Ok(Self {
            base_url,
            overrides,
            user_id,
        })
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, base_url: Option<String>, user_id: Option<u64>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(id) = user_id {
            self.user_id = Some(id);
        }
        self
    }

    /// Full URL for an endpoint group
    pub fn endpoint_url(&self, group: EndpointGroup) -> String {
        match self.overrides.get(&group) {
            Some(url) => url.clone(),
            None => f!("{}/{}", self.base_url.trim_end_matches('/'), group.path()),
        }
    }

    /// The authenticated user, required by every mutating command
    pub fn require_user(&self) -> Result<u64> {
        self.user_id.ok_or_else(|| Error::MissingSession.into())
    }
}

fn parse_user_id(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::Config(f!("FORUMHUB_USER_ID must be a positive integer, got {raw:?}")).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ForumConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ForumConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(
            config.endpoint_url(EndpointGroup::Topics),
            "http://localhost:8000/topics"
        );
        assert!(config.user_id.is_none());
        assert!(config.require_user().is_err());
    }

    #[test]
    fn test_endpoint_override() {
        let config = config_from(&[
            ("FORUMHUB_API_URL", "https://forum.example.com/api/"),
            ("FORUMHUB_LIKES_URL", "https://likes.example.com/toggle"),
        ])
        .unwrap();

        assert_eq!(
            config.endpoint_url(EndpointGroup::Auth),
            "https://forum.example.com/api/auth"
        );
        assert_eq!(
            config.endpoint_url(EndpointGroup::Likes),
            "https://likes.example.com/toggle"
        );
    }

    #[test]
    fn test_user_id_parsing() {
        let config = config_from(&[("FORUMHUB_USER_ID", " 42 ")]).unwrap();
        assert_eq!(config.require_user().unwrap(), 42);

        assert!(config_from(&[("FORUMHUB_USER_ID", "abc")]).is_err());
        assert!(config_from(&[("FORUMHUB_USER_ID", "0")]).is_err());
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = config_from(&[("FORUMHUB_USER_ID", "1")])
            .unwrap()
            .with_overrides(Some("http://10.0.0.5:9000".to_string()), Some(7));

        assert_eq!(config.user_id, Some(7));
        assert_eq!(
            config.endpoint_url(EndpointGroup::Forums),
            "http://10.0.0.5:9000/forums"
        );
    }
}
