use crate::error::IncidentError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin of the ticketing API, without a trailing slash.
    pub base_url: String,
    /// `name=value` cookie pair sent on every request. Browsers attach the
    /// session cookie themselves, so this only matters off the web.
    pub session_cookie: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            session_cookie: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, IncidentError> {
        Self {
            base_url: base_url.into(),
            session_cookie: None,
        }
        .validated()
    }

    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    pub fn from_env() -> Result<Self, IncidentError> {
        let base_url =
            std::env::var("INCIDENT_API_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let session_cookie = std::env::var("INCIDENT_SESSION_COOKIE")
            .ok()
            .filter(|v| !v.trim().is_empty());
        Self {
            base_url,
            session_cookie,
        }
        .validated()
    }

    pub fn validated(mut self) -> Result<Self, IncidentError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(IncidentError::Config("base url is required".into()));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(IncidentError::Config(format!(
                "base url '{trimmed}' must start with http:// or https://"
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
