// src/api/client.rs
use std::path::Path;
use std::time::Duration;

use reqwest::multipart;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::types::{
    AnalyticsData, GenerateRequest, GenerateResponse, ScheduleRequest, ScheduleResponse,
    UploadResponse,
};

/// Typed client for the content backend.
///
/// Wraps one `reqwest::Client` with a fixed request timeout and the server
/// base URL. The base URL comes from settings in the application and from a
/// mock server in tests.
#[derive(Debug, Clone)]
pub struct DeskClient {
    client: Client,
    base_url: Url,
}

impl DeskClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("postdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Trailing slash so Url::join appends to the path instead of
        // replacing its last segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Sends the picked file as the multipart `file` field and returns the
    /// storage path assigned by the server.
    pub async fn upload_image(&self, path: &Path) -> Result<UploadResponse, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        debug!(file = %file_name, bytes = bytes.len(), "uploading image");

        let part = multipart::Part::bytes(bytes).file_name(file_name);
        let form = multipart::Form::new().part("file", part);

        let url = self.endpoint("api/upload")?;
        let response = self.client.post(url.clone()).multipart(form).send().await?;
        Self::read_json(url.as_str(), response).await
    }

    /// Asks the backend to produce a caption and poster image for the
    /// uploaded file.
    pub async fn generate_content(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ApiError> {
        debug!(platform = %request.platform, "requesting content generation");
        self.post_json("api/generate", request).await
    }

    /// Submits the previewed content for scheduling and returns the server's
    /// confirmation message.
    pub async fn schedule_post(
        &self,
        request: &ScheduleRequest,
    ) -> Result<ScheduleResponse, ApiError> {
        debug!(platform = %request.platform, "scheduling post");
        self.post_json("api/schedule", request).await
    }

    pub async fn analytics_data(&self) -> Result<AnalyticsData, ApiError> {
        let url = self.endpoint("api/analytics-data")?;
        let response = self.client.get(url.clone()).send().await?;
        Self::read_json(url.as_str(), response).await
    }

    /// Fetches the preview bitmap. Generated image URLs may be absolute or
    /// server-relative; relative ones resolve against the base URL.
    pub async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.resolve_image_url(image_url)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, message });
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self.client.post(url.clone()).json(body).send().await?;
        Self::read_json(url.as_str(), response).await
    }

    /// Asserts a success status, capturing the body text of failures, then
    /// parses the body as `T` with the URL as context for shape mismatches.
    async fn read_json<T: DeserializeOwned>(
        context: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, message });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Deserialize {
            context: context.to_string(),
            source,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| ApiError::InvalidUrl {
            url: format!("{}{}", self.base_url, path),
            reason: e.to_string(),
        })
    }

    fn resolve_image_url(&self, image_url: &str) -> Result<Url, ApiError> {
        match Url::parse(image_url) {
            Ok(url) => Ok(url),
            Err(_) => self
                .base_url
                .join(image_url)
                .map_err(|e| ApiError::InvalidUrl {
                    url: image_url.to_string(),
                    reason: e.to_string(),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> DeskClient {
        DeskClient::new(base_url, 30).expect("client construction should not fail")
    }

    #[test]
    fn endpoints_join_after_the_base_path() {
        let client = test_client("http://localhost:5000");
        let url = client.endpoint("api/upload").expect("join should succeed");
        assert_eq!(url.as_str(), "http://localhost:5000/api/upload");
    }

    #[test]
    fn trailing_slashes_on_the_base_are_collapsed() {
        let client = test_client("http://localhost:5000/");
        let url = client
            .endpoint("api/analytics-data")
            .expect("join should succeed");
        assert_eq!(url.as_str(), "http://localhost:5000/api/analytics-data");
    }

    #[test]
    fn relative_image_urls_resolve_against_the_server() {
        let client = test_client("http://localhost:5000");
        let url = client
            .resolve_image_url("/static/generated/1.png")
            .expect("resolution should succeed");
        assert_eq!(url.as_str(), "http://localhost:5000/static/generated/1.png");
    }

    #[test]
    fn absolute_image_urls_pass_through() {
        let client = test_client("http://localhost:5000");
        let url = client
            .resolve_image_url("https://cdn.example.com/posters/1.png")
            .expect("resolution should succeed");
        assert_eq!(url.as_str(), "https://cdn.example.com/posters/1.png");
    }

    #[test]
    fn unparseable_server_urls_are_rejected() {
        let result = DeskClient::new("not a url", 30);
        assert!(matches!(result, Err(ApiError::InvalidUrl { .. })));
    }
}
