//! HTTP client for the form service
//!
//! Two endpoints are used:
//! - `POST {base}/create-user` with `{ "rollNumber", "name" }`
//! - `GET {base}/get-form?rollNumber=...`

use super::error::{ApiError, Result};
use super::traits::FormApi;
use crate::state::{CreateUserResponse, FormResponse, UserData};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// Default form service address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Client for the form service over HTTP
pub struct HttpFormApi {
    client: Client,
    base_url: String,
}

impl HttpFormApi {
    /// Create a client for the given base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base_url));
        }

        let client = Client::builder()
            .user_agent(concat!("dynaform-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Decode a successful JSON response, turning other statuses into errors
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl FormApi for HttpFormApi {
    async fn create_user(&self, user: &UserData) -> Result<CreateUserResponse> {
        let response = self
            .client
            .post(self.endpoint("create-user"))
            .json(user)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Rejections may come with an error status but still carry the verdict
        if let Ok(parsed) = serde_json::from_str::<CreateUserResponse>(&body) {
            return Ok(parsed);
        }

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn get_form_structure(&self, roll_number: &str) -> Result<FormResponse> {
        let response = self
            .client
            .get(self.endpoint("get-form"))
            .query(&[("rollNumber", roll_number)])
            .send()
            .await?;

        Self::handle_response(response).await
    }
}

/// Pull a human readable message out of an error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
