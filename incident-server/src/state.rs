use crate::validate::IncidentFields;
use incident_core::{derive_priority, Incident, IncidentState, Level};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Inner {
    /// Newest first.
    incidents: Vec<Incident>,
    sessions: HashSet<String>,
    issued: u64,
}

/// In-memory stand-in for the ticketing backend's table and session store.
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<Mutex<Inner>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn open_session(&self) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.lock().sessions.insert(token.clone());
        token
    }

    pub fn close_session(&self, token: &str) -> bool {
        self.lock().sessions.remove(token)
    }

    pub fn has_session(&self, token: &str) -> bool {
        self.lock().sessions.contains(token)
    }

    pub fn list(&self) -> Vec<Incident> {
        self.lock().incidents.clone()
    }

    pub fn insert(&self, fields: IncidentFields) -> Incident {
        let mut inner = self.lock();
        inner.issued += 1;

        let mut incident = Incident {
            sys_id: uuid::Uuid::new_v4().simple().to_string(),
            number: format!("INC{:07}", 10_000 + inner.issued),
            ..Incident::default()
        };
        apply(&mut incident, fields);
        inner.incidents.insert(0, incident.clone());
        incident
    }

    pub fn update(&self, sys_id: &str, fields: IncidentFields) -> Option<Incident> {
        let mut inner = self.lock();
        let incident = inner.incidents.iter_mut().find(|i| i.sys_id == sys_id)?;
        apply(incident, fields);
        Some(incident.clone())
    }

    pub fn remove(&self, sys_id: &str) -> bool {
        let mut inner = self.lock();
        let before = inner.incidents.len();
        inner.incidents.retain(|i| i.sys_id != sys_id);
        inner.incidents.len() != before
    }

    pub fn seed_demo_data(&self) {
        let samples = [
            ("Email server not responding", IncidentState::InProgress, Level::High, Level::Medium),
            ("VPN disconnects every hour", IncidentState::New, Level::Medium, Level::Medium),
            ("Printer on floor 3 out of toner", IncidentState::Resolved, Level::Low, Level::Low),
        ];
        for (description, state, urgency, impact) in samples {
            self.insert(IncidentFields {
                short_description: Some(description.into()),
                state: Some(Some(state)),
                urgency: Some(Some(urgency)),
                impact: Some(Some(impact)),
            });
        }
    }
}

/// Writes the present fields, then re-derives priority.
fn apply(incident: &mut Incident, fields: IncidentFields) {
    if let Some(description) = fields.short_description {
        incident.short_description = description;
    }
    if let Some(state) = fields.state {
        incident.state = state;
    }
    if let Some(urgency) = fields.urgency {
        incident.urgency = urgency;
    }
    if let Some(impact) = fields.impact {
        incident.impact = impact;
    }
    incident.priority = derive_priority(incident.urgency, incident.impact);
}
