use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult};
use crate::config::PageConfig;
use quill_types::{VoteForm, VoteOutcome};

/// Header carrying the cross-site-request-forgery token on every same-origin
/// POST.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Client for the Quill backend's asynchronous endpoints.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    vote_path: String,
    csrf_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client from the page configuration.
    pub fn new(config: &PageConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.server_url.clone(),
            vote_path: config.vote_path.clone(),
            csrf_token: config.csrf_token.clone(),
        }
    }

    /// Set the CSRF token attached to subsequent POST requests.
    pub fn set_csrf_token(&mut self, token: Option<String>) {
        self.csrf_token = token;
    }

    /// Full URL of the vote endpoint.
    pub fn vote_url(&self) -> String {
        format!("{}{}", self.base_url, self.vote_path)
    }

    /// Helper to add the CSRF header to a POST request if a token is set
    fn add_csrf_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.csrf_token {
            req.header(CSRF_HEADER, token)
        } else {
            req
        }
    }

    /// Helper to handle API responses
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            // Clean up HTML error pages (e.g., a proxy's 404 page)
            let clean_error = if error_text.contains("<html>") || error_text.contains("<!DOCTYPE") {
                format!(
                    "Server returned {} error. Please check the server URL.",
                    status.as_u16()
                )
            } else {
                error_text
            };

            match status.as_u16() {
                404 => Err(ApiError::NotFound(clean_error)),
                401 | 403 => Err(ApiError::Unauthorized(clean_error)),
                400 => Err(ApiError::BadRequest(clean_error)),
                _ => Err(ApiError::Api(clean_error)),
            }
        }
    }

    /// Submit a vote. The payload is the activated control's identifier; the
    /// response names the score element to update and its new value.
    ///
    /// Dropping the returned future cancels the request. Concurrent calls are
    /// independent and complete in no particular order.
    pub async fn vote(&self, button: &str) -> ApiResult<VoteOutcome> {
        let form = VoteForm::new(button);
        let req = self.add_csrf_header(self.client.post(self.vote_url()).form(&form));
        let response = req.send().await?;
        self.handle_response(response).await
    }
}
