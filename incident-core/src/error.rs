use thiserror::Error;

/// The console-side operation a failure belongs to; picks the fallback text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_text(self) -> &'static str {
        match self {
            Self::List => "Error loading incidents",
            Self::Create | Self::Update => "Error saving incident",
            Self::Delete => "Error deleting incident",
        }
    }

    /// Confirmation text; loading the list has none.
    pub fn success_text(self) -> Option<&'static str> {
        match self {
            Self::List => None,
            Self::Create => Some("Incident created successfully"),
            Self::Update => Some("Incident updated successfully"),
            Self::Delete => Some("Incident deleted successfully"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IncidentError {
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success status. `message` is the body's `error` text when present.
    #[error("backend error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Backend { status: u16, message: Option<String> },

    #[error("not logged in")]
    Unauthenticated,

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl IncidentError {
    /// Text for the transient notice shown to the user.
    pub fn user_message(&self, op: Operation) -> String {
        match self {
            Self::Backend {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => op.failure_text().to_string(),
        }
    }
}

impl From<reqwest::Error> for IncidentError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
