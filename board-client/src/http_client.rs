use crate::error::BoardClientError;
use crate::models::{
    CreatePostRequest, ErrorResponse, HealthResponse, Post, PostListResponse, UpdatePostRequest,
};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Typed client for the board HTTP API.
#[derive(Debug, Clone)]
pub struct BoardClient {
    client: Client,
    base_url: String,
}

impl BoardClient {
    /// Fails only when the underlying HTTP client cannot be initialised,
    /// e.g. when no TLS backend is available.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BoardClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn health(&self) -> Result<HealthResponse, BoardClientError> {
        let response = self.client.get(self.url("/health")).send().await?;
        Self::parse_json(response, StatusCode::OK).await
    }

    pub async fn list_posts(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<PostListResponse, BoardClientError> {
        tracing::debug!("Listing posts page={}, page_size={}", page, page_size);

        let response = self
            .client
            .get(self.url("/posts"))
            .query(&[("page", page), ("pageSize", page_size)])
            .send()
            .await?;

        Self::parse_json(response, StatusCode::OK).await
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, BoardClientError> {
        let response = self
            .client
            .get(self.url(&format!("/posts/{}", id)))
            .send()
            .await?;

        Self::parse_json(response, StatusCode::OK).await
    }

    pub async fn create_post(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<Post, BoardClientError> {
        let request = CreatePostRequest {
            title: title.into(),
            content: content.into(),
            author: author.into(),
        };

        let response = self
            .client
            .post(self.url("/posts"))
            .json(&request)
            .send()
            .await?;

        Self::parse_json(response, StatusCode::CREATED).await
    }

    pub async fn update_post(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Post, BoardClientError> {
        let request = UpdatePostRequest { title, content };

        let response = self
            .client
            .put(self.url(&format!("/posts/{}", id)))
            .json(&request)
            .send()
            .await?;

        Self::parse_json(response, StatusCode::OK).await
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), BoardClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/posts/{}", id)))
            .send()
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            _ => Err(Self::error_from(response).await),
        }
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: Response,
        expected: StatusCode,
    ) -> Result<T, BoardClientError> {
        if response.status() == expected {
            Ok(response.json::<T>().await?)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: Response) -> BoardClientError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|body| body.error)
            .unwrap_or(text);

        match status {
            StatusCode::NOT_FOUND => BoardClientError::NotFound,
            s if s.is_client_error() => BoardClientError::InvalidRequest(message),
            s => BoardClientError::ServerError {
                status: s.as_u16(),
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let client = BoardClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.url("/posts"), "http://localhost:8080/posts");
        assert_eq!(client.url("posts/1"), "http://localhost:8080/posts/1");
    }

    #[test]
    fn new_builds_configured_client() {
        let client = BoardClient::new(DEFAULT_BASE_URL);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), DEFAULT_BASE_URL);
    }
}
