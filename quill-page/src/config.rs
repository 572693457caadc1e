use serde::{Deserialize, Serialize};

/// Name of the cookie the backend stores the CSRF token under.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Explicit configuration for the page controller.
///
/// Replaces the ambient globals of the original page scripts (document-wide
/// request setup, cookie scans at call sites): the host resolves everything
/// once and hands it to the controller constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Server base URL, without a trailing slash.
    pub server_url: String,
    /// Path of the vote endpoint on the server.
    pub vote_path: String,
    /// CSRF token attached to every same-origin POST.
    pub csrf_token: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            server_url: std::env::var("QUILL_SERVER_URL")
                .unwrap_or_else(|_| "https://quill-qa.fly.dev".to_string()),
            vote_path: "/vote/".to_string(),
            csrf_token: None,
        }
    }
}

impl PageConfig {
    pub fn new(server_url: impl Into<String>, csrf_token: Option<String>) -> Self {
        Self {
            server_url: server_url.into(),
            csrf_token,
            ..Default::default()
        }
    }

    /// Pull the CSRF token out of a `Cookie` header string.
    pub fn with_csrf_from_cookies(mut self, cookies: &str) -> Self {
        self.csrf_token = cookie_value(cookies, CSRF_COOKIE);
        self
    }
}

/// Extracts the value of the cookie named `name` from a `Cookie` header
/// string, percent-decoded.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    for cookie in cookies.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(name) {
            if let Some(value) = value.strip_prefix('=') {
                return urlencoding::decode(value).ok().map(|v| v.into_owned());
            }
        }
    }
    None
}
