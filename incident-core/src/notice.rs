use crate::error::{IncidentError, Operation};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message shown after an operation completes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    /// `None` for operations that complete silently.
    pub fn success(op: Operation) -> Option<Self> {
        op.success_text().map(|text| Self {
            kind: NoticeKind::Success,
            message: text.to_string(),
        })
    }

    pub fn failure(op: Operation, err: &IncidentError) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: err.user_message(op),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    /// How long the notice stays up before hiding itself.
    pub fn auto_hide_ms(&self) -> u64 {
        match self.kind {
            NoticeKind::Success => 4_000,
            NoticeKind::Error => 6_000,
        }
    }
}
