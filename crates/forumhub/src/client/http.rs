use forumhub_core::api::{
    ApiError, ApiRequest, ApiResponse, ApiResult, EndpointGroup, Method, GENERIC_FAILURE,
};

use super::Transport;
use crate::config::ForumConfig;
use crate::prelude::*;

/// reqwest-backed transport. No timeout or retry is configured; long-hanging
/// requests are left to reqwest's defaults.
pub struct HttpTransport {
    client: reqwest::Client,
    config: ForumConfig,
}

impl HttpTransport {
    pub fn new(config: &ForumConfig) -> Result<Self> {
        Ok(Self {
            client: create_forum_client()?,
            config: config.clone(),
        })
    }

    fn url(&self, endpoint: EndpointGroup) -> String {
        self.config.endpoint_url(endpoint)
    }
}

/// Create an HTTP client that sends JSON on every request
pub fn create_forum_client() -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = self.url(request.endpoint);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            log::warn!("Failed to send request to {url}: {e}");
            ApiError::transport(GENERIC_FAILURE)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            log::warn!("Failed to read response body from {url}: {e}");
            ApiError::transport(GENERIC_FAILURE)
        })?;

        Ok(ApiResponse::new(status, body))
    }
}
