use crate::error::IncidentError;
use crate::model::{Incident, IncidentDraft, IncidentPatch};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthState {
    /// Session probe still in flight.
    #[default]
    Checking,
    LoggedIn,
    LoggedOut,
}

impl AuthState {
    pub fn is_logged_in(self) -> bool {
        self == Self::LoggedIn
    }
}

/// A ticketing backend exposing incident records.
///
/// Each method is exactly one request/response exchange. Futures are not
/// `Send`: in the browser they run on the single UI thread.
#[allow(async_fn_in_trait)]
pub trait IncidentBackend {
    async fn session(&self) -> Result<AuthState, IncidentError>;

    async fn logout(&self) -> Result<(), IncidentError>;

    async fn list(&self) -> Result<Vec<Incident>, IncidentError>;

    async fn create(&self, draft: &IncidentDraft) -> Result<Incident, IncidentError>;

    /// Returns whatever representation the backend echoed; it may be partial.
    async fn update(&self, sys_id: &str, draft: &IncidentDraft)
        -> Result<IncidentPatch, IncidentError>;

    async fn delete(&self, sys_id: &str) -> Result<(), IncidentError>;
}
